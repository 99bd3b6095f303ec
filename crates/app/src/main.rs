use migration::{Migrator, MigratorTrait};

use crate::error::Result;

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = settings::Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "billbook={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect_database(&settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let default_account = settings.bootstrap.default_account.trim();
    if !default_account.is_empty() && engine.ensure_defaults(default_account).await? {
        tracing::info!("created default account \"{default_account}\"");
    }

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn connect_database(config: &settings::Database) -> Result<sea_orm::DatabaseConnection> {
    let url = config.url();
    tracing::info!("connecting to {url}");

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
