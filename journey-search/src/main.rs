use journey_search::config::{AppConfig, CatalogSourceConfig};
use journey_search::journeys::{CachedJourneyProvider, SampleJourneys};
use journey_search::stations::{FileStationSource, HttpStationSource, LoadedCatalog, load_catalog};
use journey_search::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();

    // One-shot catalog load; failures leave an empty catalog
    let timeout = config.catalog_timeout;
    let loaded = match &config.catalog_source {
        CatalogSourceConfig::File(path) => {
            load_catalog(&FileStationSource::new(path.clone()), timeout).await
        }
        CatalogSourceConfig::Http(http) => match HttpStationSource::new(http.clone()) {
            Ok(client) => load_catalog(&client, timeout).await,
            Err(e) => {
                warn!(error = %e, "could not create station client");
                LoadedCatalog::unavailable(e.to_string())
            }
        },
        CatalogSourceConfig::None => {
            warn!("no station catalog configured; set STATIONS_FILE or STATIONS_URL");
            LoadedCatalog::unavailable("no station catalog configured")
        }
    };

    let journeys = CachedJourneyProvider::new(SampleJourneys, &config.cache);
    let state = AppState::new(loaded, journeys);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "journey search listening");
    info!("  GET  /health");
    info!("  GET  /api/stations?zone=");
    info!("  GET  /api/stations/search?q=");
    info!("  GET  /api/stations/:code");
    info!("  GET  /api/catalog/status");
    info!("  POST /api/search");

    axum::serve(listener, app).await?;
    Ok(())
}
