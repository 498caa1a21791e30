use anyhow::bail;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Member,
    Officer,
}

impl From<Role> for rollcall_shared::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Member => rollcall_shared::Role::Member,
            Role::Officer => rollcall_shared::Role::Officer,
        }
    }
}

#[tracing::instrument(skip(config))]
pub async fn set_role(config: rollcall::Config, email: String, role: Role) -> anyhow::Result<()> {
    let pool = rollcall::create_pool(&config.database, 1).await?;
    let command = rollcall_member::Command(rollcall_shared::State::new(pool.clone(), pool.clone()));

    let result = command.set_role(&email, role.into()).await;
    pool.close().await;

    let member = match result {
        Ok(member) => member,
        Err(rollcall_shared::Error::NotFound(_)) => {
            bail!("member {email} not found, they must check in once first")
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("{} is now {}", member.email, member.role);

    Ok(())
}
