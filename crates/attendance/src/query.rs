use std::ops::Deref;

use rollcall_member::Member;

use crate::{
    repository::{self, AttendedEvent},
    status::{ActivityPolicy, MemberStatus, StatusFilter},
};

#[derive(Clone)]
pub struct Query {
    pub state: rollcall_shared::State,
    pub policy: ActivityPolicy,
}

impl Deref for Query {
    type Target = rollcall_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Query {
    pub fn new(state: rollcall_shared::State, policy: ActivityPolicy) -> Self {
        Self { state, policy }
    }

    pub async fn attendance_for(
        &self,
        member_id: &str,
    ) -> rollcall_shared::Result<Vec<AttendedEvent>> {
        Ok(repository::find_for_member(&self.read_db, member_id).await?)
    }

    pub async fn attendance_count(&self, member_id: &str) -> rollcall_shared::Result<i64> {
        Ok(repository::count_for_member(&self.read_db, member_id).await?)
    }

    pub async fn attendees_of(&self, event_id: &str) -> rollcall_shared::Result<Vec<Member>> {
        Ok(repository::find_attendees(&self.read_db, event_id).await?)
    }

    /// Derived on every call from the ledger, never stored.
    pub async fn is_active(&self, member_id: &str) -> rollcall_shared::Result<bool> {
        let count = self.attendance_count(member_id).await?;

        Ok(self.policy.is_active(count))
    }

    pub async fn roster(&self, filter: StatusFilter) -> rollcall_shared::Result<Vec<MemberStatus>> {
        let rows = repository::roster(&self.read_db).await?;

        Ok(rows
            .into_iter()
            .map(|row| MemberStatus::derive(row, &self.policy))
            .filter(|status| filter.matches(status))
            .collect())
    }
}
