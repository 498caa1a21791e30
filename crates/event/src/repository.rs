use rollcall_db::table::Event as EventTable;
use sea_query::{Cond, Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteExecutor, prelude::FromRow};

/// Full event record, access code included. Only officers ever see it.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: i64,
    pub opens_at: Option<i64>,
    pub closes_at: Option<i64>,
    pub access_code: Option<String>,
    pub created_at: i64,
}

/// Event as listed to everyone. Has no access code field at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: i64,
    pub opens_at: Option<i64>,
    pub closes_at: Option<i64>,
    pub created_at: i64,
}

impl From<Event> for PublicEvent {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            starts_at: event.starts_at,
            opens_at: event.opens_at,
            closes_at: event.closes_at,
            created_at: event.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event, most recent schedule first.
    All,
    /// Events still accepting check-ins at `now`, soonest opening first.
    Upcoming { now: i64 },
}

const COLUMNS: [EventTable; 9] = [
    EventTable::Id,
    EventTable::Title,
    EventTable::Description,
    EventTable::Location,
    EventTable::StartsAt,
    EventTable::OpensAt,
    EventTable::ClosesAt,
    EventTable::AccessCode,
    EventTable::CreatedAt,
];

pub async fn find<'e>(
    executor: impl SqliteExecutor<'e>,
    id: &str,
) -> Result<Option<Event>, sqlx::Error> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(EventTable::Table)
        .and_where(Expr::col(EventTable::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Event, _>(&sql, values)
        .fetch_optional(executor)
        .await
}

pub async fn list<'e>(
    executor: impl SqliteExecutor<'e>,
    filter: EventFilter,
) -> Result<Vec<Event>, sqlx::Error> {
    let mut statement = Query::select()
        .columns(COLUMNS)
        .from(EventTable::Table)
        .to_owned();

    match filter {
        EventFilter::All => {
            statement
                .order_by(EventTable::StartsAt, Order::Desc)
                .order_by(EventTable::CreatedAt, Order::Desc);
        }
        EventFilter::Upcoming { now } => {
            statement
                .cond_where(
                    Cond::any()
                        .add(Expr::col(EventTable::ClosesAt).gte(now))
                        .add(
                            Cond::all()
                                .add(Expr::col(EventTable::ClosesAt).is_null())
                                .add(Expr::col(EventTable::StartsAt).gte(now)),
                        ),
                )
                .order_by_expr(
                    Expr::cust(r#"COALESCE("opens_at", "starts_at")"#),
                    Order::Asc,
                )
                .order_by(EventTable::Title, Order::Asc);
        }
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Event, _>(&sql, values)
        .fetch_all(executor)
        .await
}

pub(crate) async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    event: &Event,
) -> Result<(), sqlx::Error> {
    let statement = Query::insert()
        .into_table(EventTable::Table)
        .columns(COLUMNS)
        .values_panic([
            event.id.to_owned().into(),
            event.title.to_owned().into(),
            event.description.to_owned().into(),
            event.location.to_owned().into(),
            event.starts_at.into(),
            event.opens_at.into(),
            event.closes_at.into(),
            event.access_code.to_owned().into(),
            event.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

pub(crate) async fn delete<'e>(
    executor: impl SqliteExecutor<'e>,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let statement = Query::delete()
        .from_table(EventTable::Table)
        .and_where(Expr::col(EventTable::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.rows_affected())
}
