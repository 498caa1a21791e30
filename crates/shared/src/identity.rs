/// Identity verified by the external authentication service for one request.
///
/// Handed explicitly to every core call that needs to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub name: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name,
        }
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Emails are matched case-insensitively, so they are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
