use rollcall_shared::Role;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::repository::RosterRow;

/// Number of attended events from which a member counts as active.
pub const DEFAULT_ACTIVITY_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPolicy {
    pub threshold: u32,
}

impl Default for ActivityPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACTIVITY_THRESHOLD,
        }
    }
}

impl ActivityPolicy {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn is_active(&self, attendance_count: i64) -> bool {
        attendance_count >= i64::from(self.threshold)
    }
}

#[derive(EnumString, Display, AsRefStr, Default, Debug, Clone, Copy, PartialEq, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, status: &MemberStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status.active,
            StatusFilter::Inactive => !status.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatus {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
    pub attendance_count: i64,
    pub active: bool,
}

impl MemberStatus {
    pub(crate) fn derive(row: RosterRow, policy: &ActivityPolicy) -> Self {
        Self {
            active: policy.is_active(row.attendance_count),
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.0,
            created_at: row.created_at,
            attendance_count: row.attendance_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_from_threshold_inclusive() {
        let policy = ActivityPolicy::default();
        assert!(!policy.is_active(0));
        assert!(!policy.is_active(1));
        assert!(policy.is_active(2));
        assert!(policy.is_active(3));
    }

    #[test]
    fn threshold_is_configurable() {
        let policy = ActivityPolicy::new(5);
        assert!(!policy.is_active(4));
        assert!(policy.is_active(5));
    }

    #[test]
    fn filter_parses_lowercase() {
        assert_eq!("active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }
}
