use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{start_server, HttpState, LogEntry};

pub fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let state = HttpState::new(config, logs);

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(state)?;
        server.await
    })?;

    Ok(())
}
