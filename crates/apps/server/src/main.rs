mod routes;
mod settings;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::routes::AppState;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::from_env()?;
    let state = AppState::load(&settings);
    let app = routes::router(state);

    info!("dossier server listening on http://{}", settings.addr);
    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
