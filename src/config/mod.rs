// Configuration module entry point
// Loads layered settings and owns the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, ImageConfig, RoutesConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; values missing from it fall back to the defaults
    /// below, and `FRAMESHARE_*` environment variables override both
    /// (nested keys use `__`, e.g. `FRAMESHARE_SERVER__PORT=6000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5050)?
            .set_default("image.path", "image.jpg")?
            .set_default("routes.image_path", "/image.jpg")?
            .set_default("routes.data_path", "/data")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("http.server_name", "frameshare/0.1")?
            .set_default("http.enable_cors", false)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FRAMESHARE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        if config.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
