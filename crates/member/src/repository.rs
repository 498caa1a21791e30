use rollcall_db::table::Member as MemberTable;
use rollcall_shared::Role;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteExecutor, prelude::FromRow};

#[derive(FromRow)]
struct MemberRow {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: sqlx::types::Text<Role>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: i64,
}

impl Member {
    pub fn is_officer(&self) -> bool {
        self.role == Role::Officer
    }
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role.0,
            created_at: row.created_at,
        }
    }
}

pub enum FindType {
    Id(String),
    Email(String),
}

const COLUMNS: [MemberTable; 5] = [
    MemberTable::Id,
    MemberTable::Email,
    MemberTable::Name,
    MemberTable::Role,
    MemberTable::CreatedAt,
];

pub async fn find<'e>(
    executor: impl SqliteExecutor<'e>,
    arg_type: FindType,
) -> Result<Option<Member>, sqlx::Error> {
    let mut statement = Query::select()
        .columns(COLUMNS)
        .from(MemberTable::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(MemberTable::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(MemberTable::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let row = sqlx::query_as_with::<_, MemberRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Member::from))
}

/// Members ordered by name, then email for members without one.
pub async fn list<'e>(executor: impl SqliteExecutor<'e>) -> Result<Vec<Member>, sqlx::Error> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(MemberTable::Table)
        .order_by(MemberTable::Name, Order::Asc)
        .order_by(MemberTable::Email, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, MemberRow, _>(&sql, values)
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().map(Member::from).collect())
}

pub(crate) async fn create<'e>(
    executor: impl SqliteExecutor<'e>,
    member: &Member,
) -> Result<(), sqlx::Error> {
    let statement = Query::insert()
        .into_table(MemberTable::Table)
        .columns(COLUMNS)
        .values_panic([
            member.id.to_owned().into(),
            member.email.to_owned().into(),
            member.name.to_owned().into(),
            member.role.to_string().into(),
            member.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

pub(crate) async fn update_role<'e>(
    executor: impl SqliteExecutor<'e>,
    id: &str,
    role: Role,
) -> Result<u64, sqlx::Error> {
    let statement = Query::update()
        .table(MemberTable::Table)
        .value(MemberTable::Role, role.as_ref())
        .and_where(Expr::col(MemberTable::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.rows_affected())
}
