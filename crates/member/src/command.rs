use std::ops::Deref;

use rollcall_shared::{Identity, Role, is_unique_violation};
use validator::Validate;

use crate::repository::{self, FindType, Member};

#[derive(Clone)]
pub struct Command(pub rollcall_shared::State);

impl Deref for Command {
    type Target = rollcall_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Width of the `member.name` column.
pub const MAX_NAME_CHARS: usize = 120;

#[derive(Validate)]
struct ResolveInput {
    #[validate(email)]
    email: String,
}

/// Names come from the identity provider, so an overlong one is cut to the
/// column width rather than refused.
fn display_name(name: Option<&str>, email: &str) -> String {
    let name = name.map(str::trim).filter(|name| !name.is_empty()).unwrap_or(email);

    name.chars().take(MAX_NAME_CHARS).collect()
}

impl Command {
    pub async fn find(&self, id: impl Into<String>) -> rollcall_shared::Result<Option<Member>> {
        Ok(repository::find(&self.read_db, FindType::Id(id.into())).await?)
    }

    pub async fn find_by_email(
        &self,
        email: impl AsRef<str>,
    ) -> rollcall_shared::Result<Option<Member>> {
        let email = rollcall_shared::normalize_email(email.as_ref());

        Ok(repository::find(&self.read_db, FindType::Email(email)).await?)
    }

    /// Maps a verified identity to its member, creating the member on first
    /// sight. Concurrent first-time resolutions race on the unique email index
    /// and the losers read back the winner's row.
    #[tracing::instrument(skip(self), fields(email = %identity.email))]
    pub async fn resolve_or_create(&self, identity: &Identity) -> rollcall_shared::Result<Member> {
        let input = ResolveInput {
            email: identity.normalized_email(),
        };
        input.validate()?;

        let existing =
            repository::find(&self.read_db, FindType::Email(input.email.to_owned())).await?;
        if let Some(member) = existing {
            return Ok(member);
        }

        let member = Member {
            id: ulid::Ulid::new().to_string(),
            name: Some(display_name(identity.name.as_deref(), &input.email)),
            email: input.email,
            role: Role::Member,
            created_at: self.now(),
        };

        match repository::create(&self.write_db, &member).await {
            Ok(()) => {
                tracing::info!(member_id = %member.id, "member created");

                Ok(member)
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!("member created concurrently, reading it back");

                repository::find(&self.write_db, FindType::Email(member.email))
                    .await?
                    .ok_or(rollcall_shared::Error::NotFound("member"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Officer promotion and demotion. Never called from the check-in path.
    #[tracing::instrument(skip(self))]
    pub async fn set_role(
        &self,
        email: impl AsRef<str> + std::fmt::Debug,
        role: Role,
    ) -> rollcall_shared::Result<Member> {
        let email = rollcall_shared::normalize_email(email.as_ref());
        let Some(mut member) = repository::find(&self.write_db, FindType::Email(email)).await?
        else {
            return Err(rollcall_shared::Error::NotFound("member"));
        };

        repository::update_role(&self.write_db, &member.id, role).await?;
        member.role = role;

        Ok(member)
    }

    /// Creates a member with an explicit role, used for seeding.
    pub async fn register(
        &self,
        identity: &Identity,
        role: Role,
    ) -> rollcall_shared::Result<Member> {
        let member = self.resolve_or_create(identity).await?;
        if member.role == role {
            return Ok(member);
        }

        self.set_role(&member.email, role).await
    }
}
