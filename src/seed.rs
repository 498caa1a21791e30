use anyhow::bail;
use rollcall_event::{CreateEventInput, EventFilter};
use rollcall_shared::{Identity, Role};

// 2026-01-25 18:00, 2026-02-01 18:00 and 2026-02-08 19:00 UTC
const GENERAL_MEETING_1: i64 = 1_769_364_000;
const GENERAL_MEETING_2: i64 = 1_769_968_800;
const WORKSHOP: i64 = 1_770_577_200;

struct SampleEvent {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    date: i64,
    access_code: &'static str,
}

const EVENTS: [SampleEvent; 3] = [
    SampleEvent {
        title: "General Meeting #1",
        description: "Welcome to HealthLink! Learn about our mission and upcoming projects.",
        location: "Warren Lecture Hall 2005",
        date: GENERAL_MEETING_1,
        access_code: "HLK2026",
    },
    SampleEvent {
        title: "General Meeting #2",
        description: "Project showcase and team formation.",
        location: "Zoom Link: zoom.us/j/...",
        date: GENERAL_MEETING_2,
        access_code: "SHOW2026",
    },
    SampleEvent {
        title: "Workshop: Health & Wellness Tech",
        description: "Learn about the latest innovations in health technology.",
        location: "Engineering Building Room 301",
        date: WORKSHOP,
        access_code: "WORKSHOP",
    },
];

/// Members with the number of sample events (in order) each attended.
const MEMBERS: [(&str, &str, usize); 4] = [
    ("member1@ucsd.edu", "Alice Johnson", 2),
    ("member2@ucsd.edu", "Bob Smith", 3),
    ("member3@ucsd.edu", "Charlie Davis", 1),
    ("member4@ucsd.edu", "Diana Wilson", 0),
];

/// Loads three events, one officer and four members with 2/3/1/0 attendances.
/// Refuses to touch a database that already holds events.
#[tracing::instrument(skip_all)]
pub async fn load_sample(state: &rollcall_shared::State) -> anyhow::Result<()> {
    let events = rollcall_event::Command(state.clone());
    let members = rollcall_member::Command(state.clone());
    let ledger = rollcall_attendance::Command(state.clone());

    let existing = rollcall_event::Query(state.clone())
        .list(EventFilter::All)
        .await?;
    if !existing.is_empty() {
        bail!("database already holds events, run `rollcall reset` first");
    }

    let mut event_ids = Vec::with_capacity(EVENTS.len());
    for sample in &EVENTS {
        let event = events
            .create(CreateEventInput {
                title: sample.title.to_owned(),
                description: Some(sample.description.to_owned()),
                location: Some(sample.location.to_owned()),
                date: Some(sample.date),
                access_code: sample.access_code.to_owned(),
                ..Default::default()
            })
            .await?;
        event_ids.push(event.id);
    }
    tracing::info!("Created {} events", event_ids.len());

    let officer = members
        .register(
            &Identity::new("officer@healthlink.org", Some("Officer One".to_owned())),
            Role::Officer,
        )
        .await?;
    tracing::info!("Created officer: {}", officer.email);

    for (email, name, attended) in MEMBERS {
        let member = members
            .register(&Identity::new(email, Some(name.to_owned())), Role::Member)
            .await?;

        for event_id in event_ids.iter().take(attended) {
            ledger.record(&member.id, event_id).await?;
        }
    }
    tracing::info!("Created {} members with attendance", MEMBERS.len());

    Ok(())
}
