use std::{path::PathBuf, str::FromStr};

use rollcall_shared::{FixedClock, State};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub const NOW: i64 = 1_769_364_000;

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_string_lossy()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    rollcall_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(State::new(pool.clone(), pool).with_clock(FixedClock::new(NOW)))
}

#[allow(dead_code)]
pub async fn create_event(state: &State, id: &str, starts_at: i64) -> anyhow::Result<()> {
    sqlx::query(
        r#"INSERT INTO "event" ("id", "title", "starts_at", "access_code", "created_at")
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(id)
    .bind(format!("Event {id}"))
    .bind(starts_at)
    .bind(format!("CODE-{id}"))
    .bind(NOW)
    .execute(&state.write_db)
    .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn create_member(state: &State, name: &str) -> anyhow::Result<String> {
    let member = rollcall_member::Command(state.clone())
        .resolve_or_create(&rollcall_shared::Identity::new(
            format!("{name}@rollcall.localhost"),
            Some(name.to_owned()),
        ))
        .await?;

    Ok(member.id)
}
