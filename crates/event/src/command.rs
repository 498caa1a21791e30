use std::ops::Deref;

use rollcall_shared::{Error, invalid, is_unique_violation};
use serde::Deserialize;
use validator::Validate;

use crate::repository::{self, Event};

#[derive(Clone)]
pub struct Command(pub rollcall_shared::State);

impl Deref for Command {
    type Target = rollcall_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Officer input for a new event. A schedule is required: either `date`, or a
/// check-in window from which the date defaults to the opening time.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub date: Option<i64>,
    pub opens_at: Option<i64>,
    pub closes_at: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub access_code: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl Command {
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateEventInput) -> rollcall_shared::Result<Event> {
        let input = CreateEventInput {
            title: input.title.trim().to_owned(),
            access_code: input.access_code.trim().to_owned(),
            description: non_blank(input.description),
            location: non_blank(input.location),
            ..input
        };
        input.validate()?;

        let (opens_at, closes_at) = match (input.opens_at, input.closes_at) {
            (Some(opens_at), Some(closes_at)) if opens_at > closes_at => {
                invalid!("check-in window must open before it closes")
            }
            (Some(opens_at), Some(closes_at)) => (Some(opens_at), Some(closes_at)),
            (None, None) => (None, None),
            _ => invalid!("check-in window needs both opensAt and closesAt"),
        };

        let Some(starts_at) = input.date.or(opens_at) else {
            invalid!("date or check-in window is required");
        };

        let event = Event {
            id: ulid::Ulid::new().to_string(),
            title: input.title,
            description: input.description,
            location: input.location,
            starts_at,
            opens_at,
            closes_at,
            access_code: Some(input.access_code),
            created_at: self.now(),
        };

        match repository::insert(&self.write_db, &event).await {
            Ok(()) => {
                tracing::info!(event_id = %event.id, "event created");

                Ok(event)
            }
            Err(e) if is_unique_violation(&e) => Err(Error::DuplicateAccessCode),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes an event together with its attendance rows in one transaction:
    /// readers see either both or neither.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> rollcall_shared::Result<Event> {
        let mut tx = self.write_db.begin().await?;

        let Some(event) = repository::find(&mut *tx, id).await? else {
            return Err(Error::NotFound("event"));
        };

        let removed = rollcall_attendance::repository::remove_for_event(&mut *tx, id).await?;

        if repository::delete(&mut *tx, id).await? == 0 {
            return Err(Error::NotFound("event"));
        }

        tx.commit().await?;

        tracing::info!(event_id = %event.id, attendance_removed = removed, "event deleted");

        Ok(event)
    }
}
