//! Command dispatcher: one-shot REST actions (orders, model retraining) whose
//! progress is reported through the status lines.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::config::Config;
use crate::engine::status::{CommandStatus, StatusTarget};
use crate::error::{AppError, Result};
use crate::network::{Repaint, UiSender};
use crate::types::{OrderReceipt, OrderRequest, OrderSide, RetrainAck, RetrainRequest};

// ── Request execution ──────────────────────────────────────────────────────────

/// POST `body` as JSON and return the parsed response body.
///
/// The body is parsed as JSON whatever the status; an unreadable or non-JSON
/// body becomes `None`. A non-success status fails with
/// [`AppError::Request`], carrying the backend's `error` field or else the
/// canonical reason phrase of the status code. The phrase the server actually
/// sent is not available through `reqwest` and is not used.
pub async fn post_json<B>(client: &Client, url: &str, body: &B) -> Result<Option<Value>>
where
    B: Serialize + ?Sized,
{
    let resp = client.post(url).json(body).send().await?;
    let status = resp.status();

    let data = match resp.bytes().await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Invalid JSON from {url}: {e}");
                None
            }
        },
        Err(e) => {
            log::warn!("Unreadable response body from {url}: {e}");
            None
        }
    };

    if !status.is_success() {
        let message = data
            .as_ref()
            .and_then(|d| d.get("error"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_else(|| status.as_str().to_owned());
        return Err(AppError::Request(message));
    }

    Ok(data)
}

fn failure(e: &AppError) -> CommandStatus {
    CommandStatus::Error(format!("Error: {e}"))
}

// ── Actions ────────────────────────────────────────────────────────────────────

/// Submit one order and drive the trade status line through its states.
///
/// Only fails when the UI has gone away.
pub async fn submit_order<R: Repaint>(
    client: &Client,
    url: &str,
    side: OrderSide,
    ui: &UiSender<R>,
) -> Result<()> {
    ui.command(StatusTarget::Trade, CommandStatus::InFlight(format!("Sending {side}...")))?;

    let status = match post_json(client, url, &OrderRequest { side }).await {
        Ok(body) => {
            let receipt = OrderReceipt::from_body(body.as_ref());
            log::info!("Order {side} accepted: {receipt}");
            CommandStatus::Success(receipt.to_string())
        }
        Err(e) => {
            log::error!("Order {side} failed: {e}");
            failure(&e)
        }
    };
    ui.command(StatusTarget::Trade, status)
}

/// Ask the backend to retrain the model and drive the train status line.
pub async fn trigger_retrain<R: Repaint>(client: &Client, url: &str, ui: &UiSender<R>) -> Result<()> {
    ui.command(StatusTarget::Train, CommandStatus::InFlight("Training...".to_owned()))?;

    let status = match post_json(client, url, &RetrainRequest {}).await {
        Ok(body) => {
            let ack = RetrainAck::from_body(body.as_ref());
            log::info!("Retrain requested: {ack}");
            CommandStatus::Success(ack.to_string())
        }
        Err(e) => {
            log::error!("Retrain request failed: {e}");
            failure(&e)
        }
    };
    ui.command(StatusTarget::Train, status)
}

// ── Dispatcher ─────────────────────────────────────────────────────────────────

/// Spawns one task per button press on the shared runtime. Invocations are
/// never deduplicated or cancelled; each writes its own status transitions.
pub struct CommandDispatcher<R: Repaint> {
    runtime: Handle,
    client: Client,
    order_url: String,
    train_url: String,
    ui: UiSender<R>,
}

impl<R: Repaint> CommandDispatcher<R> {
    pub fn new(runtime: Handle, client: Client, config: &Config, ui: UiSender<R>) -> Self {
        Self {
            runtime,
            client,
            order_url: config.order_url(),
            train_url: config.train_url(),
            ui,
        }
    }

    pub fn submit_order(&self, side: OrderSide) {
        let client = self.client.clone();
        let url = self.order_url.clone();
        let ui = self.ui.clone();
        self.runtime.spawn(async move {
            if submit_order(&client, &url, side, &ui).await.is_err() {
                log::debug!("UI closed before order {side} finished.");
            }
        });
    }

    pub fn trigger_retrain(&self) {
        let client = self.client.clone();
        let url = self.train_url.clone();
        let ui = self.ui.clone();
        self.runtime.spawn(async move {
            if trigger_retrain(&client, &url, &ui).await.is_err() {
                log::debug!("UI closed before retrain request finished.");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::AppMessage;
    use clap::Parser;
    use std::sync::mpsc;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, Uri, header};
    use axum::routing::post;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc as tokio_mpsc;

    fn test_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    /// What the backend saw of one request.
    #[derive(Debug)]
    struct Received {
        path: String,
        content_type: Option<String>,
        body: String,
    }

    /// Serve `/api/order` and `/api/train_ai` with a fixed reply; every request
    /// that arrives is reported on the returned channel.
    async fn serve(
        status: StatusCode,
        reply: &'static str,
    ) -> (String, tokio_mpsc::UnboundedReceiver<Received>) {
        let (seen_tx, seen_rx) = tokio_mpsc::unbounded_channel();
        let handler = move |uri: Uri, headers: HeaderMap, body: String| {
            let seen_tx = seen_tx.clone();
            async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let _ = seen_tx.send(Received {
                    path: uri.path().to_owned(),
                    content_type,
                    body,
                });
                (status, [(header::CONTENT_TYPE, "application/json")], reply)
            }
        };
        let app = Router::new()
            .route("/api/order", post(handler.clone()))
            .route("/api/train_ai", post(handler));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}"), seen_rx)
    }

    fn statuses(rx: &mpsc::Receiver<AppMessage>) -> Vec<(StatusTarget, CommandStatus)> {
        rx.try_iter()
            .map(|m| match m {
                AppMessage::Command(target, status) => (target, status),
                other => panic!("unexpected message {other:?}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn post_json_sends_json_and_returns_body() {
        let (base, mut seen) = serve(StatusCode::OK, r#"{"ok":true}"#).await;
        let body = post_json(&test_client(), &format!("{base}/api/order"), &OrderRequest {
            side: OrderSide::Sell,
        })
        .await
        .unwrap();
        assert_eq!(body, Some(serde_json::json!({"ok": true})));

        let request = seen.recv().await.unwrap();
        assert_eq!(request.path, "/api/order");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert_eq!(request.body, r#"{"side":"SELL"}"#);
    }

    #[tokio::test]
    async fn post_json_prefers_backend_error_message() {
        let (base, _seen) = serve(StatusCode::BAD_REQUEST, r#"{"ok":false,"error":"margin"}"#).await;
        let err = post_json(&test_client(), &format!("{base}/api/train_ai"), &RetrainRequest {})
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::Request(m) if m == "margin"), "{err:?}");
    }

    #[tokio::test]
    async fn post_json_falls_back_to_reason_phrase() {
        let (base, _seen) = serve(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await;
        let err = post_json(&test_client(), &format!("{base}/api/train_ai"), &RetrainRequest {})
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[tokio::test]
    async fn post_json_tolerates_non_json_success() {
        let (base, _seen) = serve(StatusCode::OK, "accepted").await;
        let body = post_json(&test_client(), &format!("{base}/api/train_ai"), &RetrainRequest {})
            .await
            .unwrap();
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn order_success_reports_side_volume_and_retcode() {
        let (base, mut seen) = serve(
            StatusCode::OK,
            r#"{"ok":true,"side":"BUY","volume":1.0,"result":{"retcode":10009}}"#,
        )
        .await;
        let (tx, rx) = mpsc::channel();
        let ui = UiSender::new(tx, ());
        submit_order(&test_client(), &format!("{base}/api/order"), OrderSide::Buy, &ui)
            .await
            .unwrap();
        assert_eq!(seen.recv().await.unwrap().body, r#"{"side":"BUY"}"#);

        let statuses = statuses(&rx);
        assert_eq!(statuses.len(), 2);
        assert_eq!(
            statuses[0],
            (StatusTarget::Trade, CommandStatus::InFlight("Sending BUY...".into()))
        );
        let (target, status) = &statuses[1];
        assert_eq!(*target, StatusTarget::Trade);
        assert!(matches!(status, CommandStatus::Success(_)));
        let text = status.text();
        for needle in ["BUY", "1", "10009"] {
            assert!(text.contains(needle), "{text}");
        }
    }

    #[tokio::test]
    async fn order_rejection_reports_error_marker() {
        let (base, _seen) = serve(StatusCode::BAD_REQUEST, r#"{"error":"margin"}"#).await;
        let (tx, rx) = mpsc::channel();
        let ui = UiSender::new(tx, ());
        submit_order(&test_client(), &format!("{base}/api/order"), OrderSide::Sell, &ui)
            .await
            .unwrap();

        let statuses = statuses(&rx);
        assert_eq!(statuses[1].1, CommandStatus::Error("Error: margin".into()));
        assert!(statuses[1].1.text().contains("Error: margin"));
    }

    #[tokio::test]
    async fn order_with_null_body_renders_placeholders() {
        let (base, _seen) = serve(StatusCode::OK, "null").await;
        let (tx, rx) = mpsc::channel();
        let ui = UiSender::new(tx, ());
        submit_order(&test_client(), &format!("{base}/api/order"), OrderSide::Auto, &ui)
            .await
            .unwrap();

        let statuses = statuses(&rx);
        assert_eq!(statuses[0].1.text(), "Sending AUTO...");
        assert_eq!(statuses[1].1, CommandStatus::Success("OK: - - (-)".into()));
    }

    #[tokio::test]
    async fn unreachable_backend_reports_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (tx, rx) = mpsc::channel();
        let ui = UiSender::new(tx, ());
        submit_order(&test_client(), &format!("http://{addr}/api/order"), OrderSide::Buy, &ui)
            .await
            .unwrap();

        let statuses = statuses(&rx);
        assert!(matches!(&statuses[1].1, CommandStatus::Error(t) if t.starts_with("Error: ")));
    }

    #[tokio::test]
    async fn retrain_with_empty_body_uses_default_phrase() {
        let (base, mut seen) = serve(StatusCode::OK, "{}").await;
        let (tx, rx) = mpsc::channel();
        let ui = UiSender::new(tx, ());
        trigger_retrain(&test_client(), &format!("{base}/api/train_ai"), &ui)
            .await
            .unwrap();
        let request = seen.recv().await.unwrap();
        assert_eq!(request.path, "/api/train_ai");
        assert_eq!(request.body, "{}");

        let statuses = statuses(&rx);
        assert_eq!(
            statuses[0],
            (StatusTarget::Train, CommandStatus::InFlight("Training...".into()))
        );
        assert_eq!(
            statuses[1],
            (StatusTarget::Train, CommandStatus::Success("Training started".into()))
        );
    }

    #[tokio::test]
    async fn retrain_echoes_backend_message() {
        let (base, _seen) = serve(StatusCode::OK, r#"{"ok":true,"message":"Training queued"}"#).await;
        let (tx, rx) = mpsc::channel();
        trigger_retrain(&test_client(), &format!("{base}/api/train_ai"), &UiSender::new(tx, ()))
            .await
            .unwrap();
        assert_eq!(statuses(&rx)[1].1.text(), "Training queued");
    }

    #[test]
    fn dispatcher_runs_actions_on_the_runtime() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let (base, _seen) = runtime.block_on(serve(StatusCode::OK, r#"{"message":"ok"}"#));
        let host = base.trim_start_matches("http://").to_owned();
        let config = Config::try_parse_from(["dashboard", "--host", host.as_str()]).unwrap();

        let (tx, rx) = mpsc::channel();
        let dispatcher =
            CommandDispatcher::new(runtime.handle().clone(), test_client(), &config, UiSender::new(tx, ()));
        dispatcher.trigger_retrain();

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, AppMessage::Command(StatusTarget::Train, CommandStatus::InFlight(_))));
        match second {
            AppMessage::Command(StatusTarget::Train, status) => assert_eq!(status.text(), "ok"),
            other => panic!("unexpected message {other:?}"),
        }
    }
}
