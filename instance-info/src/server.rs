use std::net::SocketAddr;

use anyhow::Result;
use axum::{
  extract::State,
  http::{header, HeaderName, StatusCode},
  response::{IntoResponse, Response},
  routing::any,
  Json, Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{error::ErrorDocument, imds, info};

/// Headers set on every response; `Content-Type` is set by [`Json`]
pub const RESPONSE_HEADERS: [(HeaderName, &str); 4] = [
  (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
  (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
  (header::PRAGMA, "no-cache"),
  (header::EXPIRES, "0"),
];

#[derive(Clone, Debug)]
pub struct AppState {
  pub client: imds::Client,
  /// Status returned with the error document when no IMDS token is available
  pub unavailable_status: StatusCode,
}

impl AppState {
  pub fn new(client: imds::Client) -> Self {
    Self {
      client,
      unavailable_status: StatusCode::OK,
    }
  }

  pub fn with_unavailable_status(mut self, status: StatusCode) -> Self {
    self.unavailable_status = status;
    self
  }
}

/// Describe the instance; the request itself is ignored
pub async fn describe(State(state): State<AppState>) -> Response {
  match info::collect(&state.client).await {
    Ok(info) => (RESPONSE_HEADERS, Json(info)).into_response(),
    Err(err) => {
      warn!("{err}");
      (
        state.unavailable_status,
        RESPONSE_HEADERS,
        Json(ErrorDocument::token_unavailable()),
      )
        .into_response()
    }
  }
}

/// Every path and method is answered by [`describe`]
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", any(describe))
    .fallback(describe)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn run(state: AppState, addr: SocketAddr) -> Result<()> {
  let listener = TcpListener::bind(addr).await?;
  info!("Listening on {}", listener.local_addr()?);
  info!("Using IMDS endpoint {}", state.client.endpoint());

  axum::serve(listener, router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      warn!("Failed to listen for Ctrl-C: {err}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(err) => {
        warn!("Failed to listen for SIGTERM: {err}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }

  info!("Shutting down");
}
