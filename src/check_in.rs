use rollcall_shared::{Identity, invalid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInInput {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub access_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReceipt {
    pub attendance_id: String,
    pub event_id: String,
    pub member_id: String,
    pub timestamp: i64,
}

/// Check-in flow: event lookup, access gate, identity resolution, ledger.
#[derive(Clone)]
pub struct CheckIn {
    state: rollcall_shared::State,
    members: rollcall_member::Command,
    events: rollcall_event::Query,
    ledger: rollcall_attendance::Command,
}

impl CheckIn {
    pub fn new(state: rollcall_shared::State) -> Self {
        Self {
            members: rollcall_member::Command(state.clone()),
            events: rollcall_event::Query(state.clone()),
            ledger: rollcall_attendance::Command(state.clone()),
            state,
        }
    }

    #[tracing::instrument(skip(self, identity, input), fields(event_id = %input.event_id))]
    pub async fn check_in(
        &self,
        identity: &Identity,
        input: CheckInInput,
    ) -> rollcall_shared::Result<CheckInReceipt> {
        let event_id = input.event_id.trim();
        if event_id.is_empty() || input.access_code.trim().is_empty() {
            invalid!("eventId and accessCode are required");
        }

        let event = self.events.get(event_id).await?;

        if let Err(e) = rollcall_event::gate::verify(&event, &input.access_code, self.state.now()) {
            tracing::info!(reason = %e, "check-in rejected");
            return Err(e);
        }

        // Members only come into existence once the gate has let them through.
        let member = self.members.resolve_or_create(identity).await?;
        let attendance = self.ledger.record(&member.id, &event.id).await?;

        Ok(CheckInReceipt {
            attendance_id: attendance.id,
            event_id: attendance.event_id,
            member_id: attendance.member_id,
            timestamp: attendance.created_at,
        })
    }
}
