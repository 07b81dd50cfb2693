//! A messenger between monitoring and the team.
//!
//! Receives notifications at `GET /notify?message=...` and relays them to a
//! Slack channel as a colour-coded attachment via an incoming webhook.
//!
//! Two kinds of message are supported, chosen per deployment with
//! `$NOTIFY_MODE`; see [event]. For the environment variables see [config].

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

use config::Config;
use dotenvy::dotenv;
use router::Deps;
use std::{net::SocketAddr, process};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};

mod config;
mod error;
mod event;
mod router;
mod slack;

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, binds to 0.0.0.0, and starts the server.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let config = match Config::from_env() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    server_(listener, config).await;
}

/// Initialise a server without graceful shutdown.
async fn server_(listener: TcpListener, config: Config) {
    // Giving a receiver that will never resolve.
    server(listener, config, oneshot::channel::<()>().1).await;
}

/// Initialise a server with graceful shutdown via `rx`.
async fn server(listener: TcpListener, config: Config, rx: oneshot::Receiver<()>) {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }

    let deps = Deps::new(&config);
    info!(
        "Relaying {} messages to {} on {}",
        config.mode,
        config.channel,
        deps.webhook.host()
    );

    axum::serve(listener, router::new(deps, config.mode).into_make_service())
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
        .expect("Failed to start server");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::Mode, slack::webhook::HOOK_PATH};
    use mockito::Matcher;
    use url::Url;

    #[tokio::test]
    async fn test_real_notify_api() {
        let mut srv = mockito::Server::new_async().await;

        let hook_mock = srv
            .mock("POST", HOOK_PATH)
            .match_query(Matcher::UrlEncoded("token".into(), "t0k3n".into()))
            .match_body(Matcher::Regex("Server\\+is\\+DOWN".into()))
            .create_async()
            .await;

        let config = Config {
            webhook_url: Url::parse(&format!("{}{}?token=t0k3n", srv.url(), HOOK_PATH)).unwrap(),
            channel: slack::ChannelName("#alerts".into()),
            mode: Mode::Freeform,
            port: 0,
        };

        let (tx, rx) = oneshot::channel::<()>();

        // Port 0 requests that the OS assigns us an available port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Move the server into the background so that it's not blocking.
        tokio::spawn(async move { server(listener, config, rx).await });

        let res = reqwest::Client::new()
            .get(format!("http://127.0.0.1:{}/notify", addr.port()))
            .query(&[("message", "Server is DOWN")])
            .send()
            .await
            .unwrap();

        let status = res.status();
        let len = res.content_length();
        let body = res.text().await.unwrap();

        tx.send(()).unwrap();

        hook_mock.assert_async().await;

        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(len, Some(7));
        assert_eq!(body, "success");
    }
}
