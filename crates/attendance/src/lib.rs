mod command;
mod query;
pub mod repository;
pub mod status;

pub use command::*;
pub use query::*;
pub use repository::{Attendance, AttendedEvent, EventSummary};
pub use status::{ActivityPolicy, DEFAULT_ACTIVITY_THRESHOLD, MemberStatus, StatusFilter};
