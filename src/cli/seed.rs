#[tracing::instrument(skip(config))]
pub async fn seed(config: rollcall::Config) -> anyhow::Result<()> {
    tracing::info!("Seeding database...");

    let pool = rollcall::create_pool(&config.database, 1).await?;
    rollcall::db::run_migrations(&pool).await?;

    rollcall::seed::load_sample(&rollcall_shared::State::new(pool.clone(), pool.clone())).await?;
    pool.close().await;

    tracing::info!("Seeding complete");

    Ok(())
}
