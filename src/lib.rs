pub mod auth;
pub mod check_in;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;
pub mod seed;

pub use check_in::{CheckIn, CheckInInput, CheckInReceipt};
pub use config::Config;
pub use db::{create_pool, create_read_pool, create_write_pool};
pub use routes::{AppState, router};
