use rollcall_db::table::{Attendance as AttendanceTable, Event as EventTable};
use rollcall_member::Member;
use rollcall_shared::Role;
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteExecutor, prelude::FromRow};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub member_id: String,
    pub event_id: String,
    pub created_at: i64,
}

/// Event columns a member may see next to their own attendance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: i64,
    pub opens_at: Option<i64>,
    pub closes_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendedEvent {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub event: EventSummary,
}

#[derive(FromRow)]
struct AttendedEventRow {
    id: String,
    member_id: String,
    event_id: String,
    created_at: i64,
    title: String,
    description: Option<String>,
    location: Option<String>,
    starts_at: i64,
    opens_at: Option<i64>,
    closes_at: Option<i64>,
}

impl From<AttendedEventRow> for AttendedEvent {
    fn from(row: AttendedEventRow) -> Self {
        Self {
            event: EventSummary {
                id: row.event_id.to_owned(),
                title: row.title,
                description: row.description,
                location: row.location,
                starts_at: row.starts_at,
                opens_at: row.opens_at,
                closes_at: row.closes_at,
            },
            attendance: Attendance {
                id: row.id,
                member_id: row.member_id,
                event_id: row.event_id,
                created_at: row.created_at,
            },
        }
    }
}

#[derive(FromRow)]
struct AttendeeRow {
    id: String,
    email: String,
    name: Option<String>,
    role: sqlx::types::Text<Role>,
    created_at: i64,
}

#[derive(FromRow)]
pub(crate) struct RosterRow {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: sqlx::types::Text<Role>,
    pub created_at: i64,
    pub attendance_count: i64,
}

pub(crate) async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    attendance: &Attendance,
) -> Result<(), sqlx::Error> {
    let statement = Query::insert()
        .into_table(AttendanceTable::Table)
        .columns([
            AttendanceTable::Id,
            AttendanceTable::MemberId,
            AttendanceTable::EventId,
            AttendanceTable::CreatedAt,
        ])
        .values_panic([
            attendance.id.to_owned().into(),
            attendance.member_id.to_owned().into(),
            attendance.event_id.to_owned().into(),
            attendance.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

pub async fn count_for_member<'e>(
    executor: impl SqliteExecutor<'e>,
    member_id: &str,
) -> Result<i64, sqlx::Error> {
    let statement = Query::select()
        .expr(Func::count(Expr::col(AttendanceTable::Id)))
        .from(AttendanceTable::Table)
        .and_where(Expr::col(AttendanceTable::MemberId).eq(member_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(executor)
        .await?;

    Ok(count)
}

pub async fn find_for_member<'e>(
    executor: impl SqliteExecutor<'e>,
    member_id: &str,
) -> Result<Vec<AttendedEvent>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AttendedEventRow>(
        r#"SELECT a."id", a."member_id", a."event_id", a."created_at",
                  e."title", e."description", e."location",
                  e."starts_at", e."opens_at", e."closes_at"
           FROM "attendance" a
           JOIN "event" e ON e."id" = a."event_id"
           WHERE a."member_id" = ?
           ORDER BY e."starts_at" DESC, a."created_at" DESC"#,
    )
    .bind(member_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(AttendedEvent::from).collect())
}

pub async fn find_attendees<'e>(
    executor: impl SqliteExecutor<'e>,
    event_id: &str,
) -> Result<Vec<Member>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AttendeeRow>(
        r#"SELECT m."id", m."email", m."name", m."role", m."created_at"
           FROM "attendance" a
           JOIN "member" m ON m."id" = a."member_id"
           WHERE a."event_id" = ?
           ORDER BY m."name" IS NULL, m."name", m."email""#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Member {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role.0,
            created_at: row.created_at,
        })
        .collect())
}

pub(crate) async fn roster<'e>(
    executor: impl SqliteExecutor<'e>,
) -> Result<Vec<RosterRow>, sqlx::Error> {
    sqlx::query_as::<_, RosterRow>(
        r#"SELECT m."id", m."email", m."name", m."role", m."created_at",
                  COUNT(a."id") AS "attendance_count"
           FROM "member" m
           LEFT JOIN "attendance" a ON a."member_id" = m."id"
           GROUP BY m."id"
           ORDER BY m."name" IS NULL, m."name", m."email""#,
    )
    .fetch_all(executor)
    .await
}

/// Removes every attendance row of an event. Only meant to run inside the
/// registry's delete transaction.
pub async fn remove_for_event<'e>(
    executor: impl SqliteExecutor<'e>,
    event_id: &str,
) -> Result<u64, sqlx::Error> {
    let statement = Query::delete()
        .from_table(AttendanceTable::Table)
        .and_where(Expr::col(AttendanceTable::EventId).eq(event_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.rows_affected())
}

pub(crate) async fn event_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    event_id: &str,
) -> Result<bool, sqlx::Error> {
    let statement = Query::select()
        .column(EventTable::Id)
        .from(EventTable::Table)
        .and_where(Expr::col(EventTable::Id).eq(event_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(executor)
        .await?;

    Ok(row.is_some())
}
