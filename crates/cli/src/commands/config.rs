use stint_core::{AppConfig, LoadOptions, LogFormat};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let format = match config.logging.format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    };

    let lines = vec![
        "effective config (source precedence: env > file > default):".to_string(),
        format!("server.bind_address = {}", config.server.bind_address),
        format!("server.port = {}", config.server.port),
        format!("delegate.base_url = {}", config.delegate.base_url),
        format!("delegate.timeout_secs = {}", config.delegate.timeout_secs),
        format!("logging.level = {}", config.logging.level),
        format!("logging.format = {format}"),
    ];

    lines.join("\n")
}
