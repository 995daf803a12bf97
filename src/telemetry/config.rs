#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let format = match std::env::var("HORNET_LOG_FORMAT")
            .unwrap_or_else(|_| "text".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let default_filter = std::env::var("HORNET_LOG_LEVEL")
            .map(|level| format!("hornet_headers={},tower_http={}", level, level))
            .unwrap_or_else(|_| "hornet_headers=info,tower_http=info".to_string());

        Self {
            format,
            default_filter,
        }
    }
}
