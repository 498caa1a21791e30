mod command;
pub mod repository;

pub use command::*;
pub use repository::Member;
