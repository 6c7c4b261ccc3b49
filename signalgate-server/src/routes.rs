//! HTTP routes: health probe and the listing webhook.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use signalgate_core::{Candle, Mode, SignalInput, Timeframe};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook/listing", post(webhook_listing))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Webhook body. Candles use the short `o/h/l/c/v` keys, oldest first.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookIn {
    pub symbol: String,
    pub exchange: String,
    pub tf: String,
    pub candles: Vec<Candle>,
    #[serde(default)]
    pub mode_hint: Option<String>,
}

impl WebhookIn {
    pub fn into_input(self) -> Result<SignalInput, ApiError> {
        let timeframe: Timeframe = self.tf.parse()?;
        let mode_hint = self
            .mode_hint
            .as_deref()
            .map(str::parse::<Mode>)
            .transpose()?;
        Ok(SignalInput::new(
            self.symbol,
            self.exchange,
            timeframe,
            self.candles,
            mode_hint,
        )?)
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WebhookOut {
    Suppressed {
        sent: bool,
        reason: &'static str,
    },
    Sent {
        sent: bool,
        mode: Mode,
        score: String,
        entry_open: bool,
    },
}

async fn webhook_listing(
    State(state): State<Arc<AppState>>,
    body: Result<Json<WebhookIn>, JsonRejection>,
) -> Result<Json<WebhookOut>, ApiError> {
    let Json(body) = body?;
    let input = body.into_input()?;
    let decision = state.engine.evaluate(&input);
    log::info!(
        "{} {} {}: {} entry_open={}",
        decision.symbol,
        input.timeframe,
        decision.mode,
        decision.score_label(),
        decision.entry_open
    );

    let key = decision.dedup_key();
    let fresh = {
        let state = Arc::clone(&state);
        let key = key.clone();
        tokio::task::spawn_blocking(move || state.dedup.is_fresh(&key)).await??
    };
    if !fresh {
        log::debug!("suppressed duplicate {key}");
        return Ok(Json(WebhookOut::Suppressed {
            sent: false,
            reason: "dedup",
        }));
    }

    state.notifier.send(&decision.message).await?;

    Ok(Json(WebhookOut::Sent {
        sent: true,
        mode: decision.mode,
        score: decision.score_label(),
        entry_open: decision.entry_open,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(tf: &str, mode_hint: Option<&str>) -> WebhookIn {
        WebhookIn {
            symbol: "ESIM".into(),
            exchange: "BYBIT".into(),
            tf: tf.into(),
            candles: vec![Candle::new(1.0, 1.2, 0.9, 1.1, 10.0).unwrap()],
            mode_hint: mode_hint.map(String::from),
        }
    }

    #[test]
    fn into_input_parses_timeframe_and_hint() {
        let input = body("15m", Some("FIRST_MOVE")).into_input().unwrap();
        assert_eq!(input.timeframe, Timeframe::M15);
        assert_eq!(input.mode_hint, Some(Mode::FirstMove));
    }

    #[test]
    fn into_input_rejects_unknown_values() {
        assert!(body("1h", None).into_input().is_err());
        assert!(body("5m", Some("YOLO")).into_input().is_err());
    }

    #[test]
    fn responses_serialize_flat() {
        let out = serde_json::to_value(WebhookOut::Sent {
            sent: true,
            mode: Mode::ConfirmLight,
            score: "A(4/4)".into(),
            entry_open: true,
        })
        .unwrap();
        assert_eq!(
            out,
            json!({"sent": true, "mode": "CONFIRM_LIGHT", "score": "A(4/4)", "entry_open": true})
        );
    }
}
