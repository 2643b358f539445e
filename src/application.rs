use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

use crate::config::Settings;
use crate::proxy::ProxyService;
use crate::Result;

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
}

impl Application {
    #[instrument]
    pub async fn new() -> Result<Self> {
        let settings = Settings::new()?;
        Ok(Self { settings })
    }

    #[instrument(skip(self))]
    pub async fn run(self) -> Result<()> {
        let upstream = self.settings.upstream.to_config();
        if upstream.is_none() {
            warn!("upstream API not configured; proxied routes will answer with configuration errors");
        }

        let router = ProxyService::new(upstream).into_router();

        let address = self.settings.listen_address();
        info!("Starting HSK gateway on {address}");
        let listener = TcpListener::bind(&address).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
