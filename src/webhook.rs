//! Webhook module: the HTTP surface of the bot.
//!
//! Exposes a liveness route and the Twilio-style WhatsApp webhook, and
//! renders reply segments as a TwiML `<Response>` document.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::bot::Engine;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

/// Build the axum router with the liveness and webhook routes.
pub fn routes(engine: Arc<Engine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/", get(home))
        .route("/whatsapp", post(whatsapp))
        .with_state(state)
}

/// Inbound Twilio webhook form payload. Twilio posts many more fields;
/// only the sender and the message body matter here.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

async fn home() -> &'static str {
    "Pesticide tank-mix bot is running!"
}

async fn whatsapp(
    State(state): State<AppState>,
    Form(message): Form<IncomingMessage>,
) -> impl IntoResponse {
    debug!(from = %message.from, "inbound whatsapp message");
    let segments = state.engine.handle(&message.from, &message.body).await;
    (
        [(header::CONTENT_TYPE, "application/xml")],
        render_twiml(&segments),
    )
}

/// Render reply segments as a TwiML messaging response, one `<Message>`
/// per segment. No segments yields an empty `<Response/>`, which tells
/// the provider to send nothing.
pub fn render_twiml(segments: &[String]) -> String {
    let mut body = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
    for segment in segments {
        body.push_str("<Message>");
        body.push_str(&escape_xml(segment));
        body.push_str("</Message>");
    }
    body.push_str("</Response>");
    body
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
