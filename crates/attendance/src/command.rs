use std::ops::Deref;

use rollcall_shared::{Error, is_foreign_key_violation, is_unique_violation};

use crate::repository::{self, Attendance};

/// The only writer of attendance rows.
#[derive(Clone)]
pub struct Command(pub rollcall_shared::State);

impl Deref for Command {
    type Target = rollcall_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    /// Records that a member attended an event. The unique
    /// `(member_id, event_id)` index arbitrates concurrent attempts: exactly
    /// one insert wins, every other attempt fails with `AlreadyCheckedIn`.
    #[tracing::instrument(skip(self))]
    pub async fn record(
        &self,
        member_id: &str,
        event_id: &str,
    ) -> rollcall_shared::Result<Attendance> {
        let attendance = Attendance {
            id: ulid::Ulid::new().to_string(),
            member_id: member_id.to_owned(),
            event_id: event_id.to_owned(),
            created_at: self.now(),
        };

        match repository::insert(&self.write_db, &attendance).await {
            Ok(()) => {
                tracing::info!(attendance_id = %attendance.id, "attendance recorded");

                Ok(attendance)
            }
            Err(e) if is_unique_violation(&e) => Err(Error::AlreadyCheckedIn),
            Err(e) if is_foreign_key_violation(&e) => {
                if repository::event_exists(&self.write_db, event_id).await? {
                    Err(Error::NotFound("member"))
                } else {
                    Err(Error::NotFound("event"))
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
