//! Liveness responder for hosts which stop idle processes.

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn router(message: impl Into<String>) -> Router {
    let message: Arc<str> = Arc::from(message.into());

    Router::new().route("/", get(home)).with_state(message)
}

async fn home(State(message): State<Arc<str>>) -> Json<String> {
    Json(message.to_string())
}

pub async fn serve(address: &str, message: impl Into<String>) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind keep-alive responder to {}", address))?;
    log::info!("Keep-alive responder listening on {}", address);

    axum::serve(listener, router(message))
        .await
        .context("Keep-alive responder failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_with_message() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router("Hi there")).await.unwrap();
        });

        let response = reqwest::get(format!("http://{}/", address)).await.unwrap();
        assert!(response.status().is_success());
        let body: String = response.json().await.unwrap();
        assert_eq!(body, "Hi there");
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router("Hi there")).await.unwrap();
        });

        let response = reqwest::get(format!("http://{}/status", address)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bind_failure_is_an_error() {
        assert!(serve("not an address", "x").await.is_err());
    }
}
