use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Member {
    Table,
    Id,
    Email,
    Name,
    Role,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Event {
    Table,
    Id,
    Title,
    Description,
    Location,
    StartsAt,
    OpensAt,
    ClosesAt,
    AccessCode,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Attendance {
    Table,
    Id,
    MemberId,
    EventId,
    CreatedAt,
}
