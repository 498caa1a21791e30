//! Decides whether a check-in attempt against an event may proceed.

use rollcall_shared::{Error, Result};

use crate::Event;

/// Checks a submitted access code and the server time against an event.
///
/// The stored code must exist, the submitted code must match it exactly once
/// surrounding whitespace is trimmed, and `now` must lie inside the
/// `[opens_at, closes_at]` window when the event defines one. `now` is always
/// server time.
pub fn verify(event: &Event, submitted_code: &str, now: i64) -> Result<()> {
    let Some(expected) = event
        .access_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
    else {
        return Err(Error::NoAccessCodeConfigured);
    };

    if submitted_code.trim() != expected {
        return Err(Error::InvalidAccessCode);
    }

    if event.opens_at.is_some_and(|opens_at| now < opens_at) {
        return Err(Error::WindowNotOpen);
    }

    if event.closes_at.is_some_and(|closes_at| now > closes_at) {
        return Err(Error::WindowClosed);
    }

    Ok(())
}
