//! Betfair command-line client.
//!
//! Logs in with the credentials from the environment, refreshes the session,
//! downloads the navigation menu, lists event types and logs out.

use anyhow::{anyhow, Context};
use betfair_sdk::{ExchangeCall, Session, SessionConfig};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LIST_EVENT_TYPES: &str = "SportsAPING/v1.0/listEventTypes";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,betfair_sdk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SessionConfig::from_env().context("failed to load configuration")?;
    tracing::info!("Exchange: {}", config.exchange);

    let mut session = Session::new(config).context("failed to create session")?;

    let login = ExchangeCall::login(&session)?.call(&session).await?;
    let token = login
        .body
        .get("sessionToken")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("login response has no session token: {}", login.body))?;
    session.set_session_token(token)?;
    tracing::info!("Logged in as {}", session.username());

    let keep_alive = ExchangeCall::keep_alive(&session)?.call(&session).await?;
    tracing::info!(
        "Keep alive status: {}",
        keep_alive.body.get("status").and_then(serde_json::Value::as_str).unwrap_or("unknown")
    );

    let menu = ExchangeCall::navigation(&session, None)?.call(&session).await?;
    let children = menu
        .body
        .get("children")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    tracing::info!("Navigation menu has {} top-level entries", children);

    let event_types = ExchangeCall::betting(&session, LIST_EVENT_TYPES, json!({"filter": {}}), None)?
        .call(&session)
        .await?;
    if let Some(results) = event_types.body.get("result").and_then(Value::as_array) {
        for entry in results {
            let name = entry
                .pointer("/eventType/name")
                .and_then(Value::as_str)
                .unwrap_or("?");
            let markets = entry.get("marketCount").and_then(Value::as_u64).unwrap_or(0);
            tracing::info!("{}: {} markets", name, markets);
        }
    }

    ExchangeCall::logout(&session)?.call(&session).await?;
    session.clear_session_token();
    tracing::info!("Logged out");

    Ok(())
}
