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
pub fn window_input(
    title: &str,
    code: &str,
    opens_at: i64,
    closes_at: i64,
) -> rollcall_event::CreateEventInput {
    rollcall_event::CreateEventInput {
        title: title.to_owned(),
        access_code: code.to_owned(),
        opens_at: Some(opens_at),
        closes_at: Some(closes_at),
        ..Default::default()
    }
}
