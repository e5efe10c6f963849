//! Command-line / environment configuration.

use clap::Parser;

/// Where the dashboard backend lives and which paths it serves.
#[derive(Debug, Clone, Parser)]
#[command(name = "ai-trade-dashboard", version, about = "Live AI trading dashboard client")]
pub struct Config {
    /// Backend `host[:port]`; the stream and the command API share it.
    #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1:8000")]
    pub host: String,

    /// Telemetry WebSocket path.
    #[arg(long, default_value = "/ws")]
    pub ws_path: String,

    /// Order endpoint path.
    #[arg(long, default_value = "/api/order")]
    pub order_path: String,

    /// Model retraining endpoint path.
    #[arg(long, default_value = "/api/train_ai")]
    pub train_path: String,
}

impl Config {
    pub fn stream_url(&self) -> String {
        format!("ws://{}{}", self.host, self.ws_path)
    }

    pub fn order_url(&self) -> String {
        format!("http://{}{}", self.host, self.order_path)
    }

    pub fn train_url(&self) -> String {
        format!("http://{}{}", self.host, self.train_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_endpoint_urls() {
        let config = Config::try_parse_from(["dashboard", "--host", "10.0.0.5:9000"]).unwrap();
        assert_eq!(config.stream_url(), "ws://10.0.0.5:9000/ws");
        assert_eq!(config.order_url(), "http://10.0.0.5:9000/api/order");
        assert_eq!(config.train_url(), "http://10.0.0.5:9000/api/train_ai");
    }

    #[test]
    fn paths_are_overridable() {
        let config = Config::try_parse_from([
            "dashboard",
            "--host",
            "localhost",
            "--ws-path",
            "/stream",
            "--order-path",
            "/v2/order",
            "--train-path",
            "/v2/train",
        ])
        .unwrap();
        assert_eq!(config.stream_url(), "ws://localhost/stream");
        assert_eq!(config.order_url(), "http://localhost/v2/order");
        assert_eq!(config.train_url(), "http://localhost/v2/train");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
