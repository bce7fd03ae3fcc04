use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_ROOT: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
        }
    }
}

#[derive(Clone, Serialize)]
struct ServerConfig {
    port: u16,
    site_root: PathBuf,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok()),
            site_root: parse_site_root(std::env::var("SITE_ROOT").ok()),
            log_level: parse_log_level(std::env::var("LOG_LEVEL").ok(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|port| *port != 0)
        .unwrap_or(DEFAULT_PORT)
}

fn parse_site_root(raw: Option<String>) -> PathBuf {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_ROOT))
}

fn parse_log_level(raw: Option<String>, default: LogLevel) -> LogLevel {
    match raw
        .unwrap_or_else(|| default.as_str().to_string())
        .trim()
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);

    let static_service = ServeDir::new(&config.site_root)
        .not_found_service(ServeFile::new(config.site_root.join("index.html")));

    let app = Router::new()
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(config.clone(), log_request));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &config,
        LogLevel::Info,
        "server_start",
        serde_json::json!({
            "bind_address": bind_address,
            "config": &config,
        }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn log_request(
    State(config): State<ServerConfig>,
    request: Request,
    next: Next,
) -> Response {
    let request_started_at = Instant::now();
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    log_event(
        &config,
        LogLevel::Info,
        "request_complete",
        serde_json::json!({
            "method": method,
            "path": path,
            "status": response.status().as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis() as u64,
        }),
    );

    response
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level.rank() < config.log_level.rank() {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_missing_or_invalid_values() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("not-a-port".to_string())), DEFAULT_PORT);
        assert_eq!(parse_port(Some("0".to_string())), DEFAULT_PORT);
        assert_eq!(parse_port(Some("70000".to_string())), DEFAULT_PORT);
    }

    #[test]
    fn port_accepts_valid_values_with_whitespace() {
        assert_eq!(parse_port(Some(" 3000 ".to_string())), 3000);
    }

    #[test]
    fn site_root_defaults_when_unset_or_blank() {
        assert_eq!(parse_site_root(None), PathBuf::from(DEFAULT_SITE_ROOT));
        assert_eq!(
            parse_site_root(Some("   ".to_string())),
            PathBuf::from(DEFAULT_SITE_ROOT)
        );
        assert_eq!(
            parse_site_root(Some("public".to_string())),
            PathBuf::from("public")
        );
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!(
            parse_log_level(Some("DEBUG".to_string()), LogLevel::Info),
            LogLevel::Debug
        );
        assert_eq!(
            parse_log_level(Some("info".to_string()), LogLevel::Debug),
            LogLevel::Info
        );
        assert_eq!(
            parse_log_level(Some("garbage".to_string()), LogLevel::Info),
            LogLevel::Info
        );
        assert_eq!(parse_log_level(None, LogLevel::Info), LogLevel::Info);
    }

    #[test]
    fn debug_ranks_below_info() {
        assert!(LogLevel::Debug.rank() < LogLevel::Info.rank());
    }
}
