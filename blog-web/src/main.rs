use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use infrastructure::templates::Templates;
use infrastructure::uploads::UploadStore;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let uploads = UploadStore::new(&settings.upload_dir);
    uploads.ensure_dir().await.with_context(|| {
        format!(
            "failed to create upload directory {}",
            settings.upload_dir.display()
        )
    })?;
    info!(dir = %settings.upload_dir.display(), "upload directory ready");

    let templates = Templates::load().context("failed to load templates")?;

    let state = AppState::new(pool, templates, uploads, settings.session_ttl_seconds);

    server::run_http(&settings, state).await
}
