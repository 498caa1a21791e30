use std::ops::Deref;

use rollcall_shared::Error;

use crate::repository::{self, Event, EventFilter, PublicEvent};

#[derive(Clone)]
pub struct Query(pub rollcall_shared::State);

impl Deref for Query {
    type Target = rollcall_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub async fn find(&self, id: &str) -> rollcall_shared::Result<Option<Event>> {
        Ok(repository::find(&self.read_db, id).await?)
    }

    pub async fn get(&self, id: &str) -> rollcall_shared::Result<Event> {
        self.find(id).await?.ok_or(Error::NotFound("event"))
    }

    pub async fn list(&self, filter: EventFilter) -> rollcall_shared::Result<Vec<Event>> {
        Ok(repository::list(&self.read_db, filter).await?)
    }

    /// Events still open for check-in at the current server time, stripped of
    /// their access codes.
    pub async fn upcoming(&self) -> rollcall_shared::Result<Vec<PublicEvent>> {
        let events = self.list(EventFilter::Upcoming { now: self.now() }).await?;

        Ok(events.into_iter().map(PublicEvent::from).collect())
    }
}
