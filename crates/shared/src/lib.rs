mod clock;
mod error;
mod identity;
mod role;

use std::sync::Arc;

pub use clock::*;
pub use error::*;
pub use identity::*;
pub use role::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
    pub clock: Arc<dyn Clock>,
}

impl State {
    pub fn new(read_db: sqlx::SqlitePool, write_db: sqlx::SqlitePool) -> Self {
        Self {
            read_db,
            write_db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Server-observed time in unix seconds.
    pub fn now(&self) -> i64 {
        self.clock.now()
    }
}
