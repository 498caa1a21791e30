mod command;
pub mod gate;
mod query;
pub mod repository;

pub use command::*;
pub use query::*;
pub use repository::{Event, EventFilter, PublicEvent};
