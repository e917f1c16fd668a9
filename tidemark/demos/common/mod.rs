use std::sync::Arc;

use tidemark_core::TidemarkConnector;

/// Yahoo by default; CI sets `TIDEMARK_DEMOS_USE_MOCK` to stay offline.
pub fn get_connector() -> Result<Arc<dyn TidemarkConnector>, tidemark::TidemarkError> {
    if std::env::var("TIDEMARK_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Ok(Arc::new(tidemark_mock::MockConnector::anchored(chrono::Utc::now())))
    } else {
        Ok(Arc::new(tidemark_yfinance::YfConnector::try_new_default()?))
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tidemark=info")),
        )
        .try_init();
}
