//! Integration tests for the probe service.
//!
//! Each test serves the real router on an ephemeral loopback port and talks
//! to it over HTTP.
//! Run with: cargo test --test integration

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use myapp::api::{self, AppState};
use myapp::config::Config;
use myapp::probe::{FixedDraw, StartupClock};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Running server plus the means to stop it.
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<myapp::Result<()>>,
}

impl TestServer {
    async fn start(state: AppState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(api::serve(listener, state, async move {
            rx.await.ok();
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn get(&self, path: &str) -> (u16, String) {
        let response = reqwest::get(format!("http://{}{}", self.addr, path))
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
        self.handle.await.unwrap().unwrap();
    }
}

/// Build config the same way the binary does, from environment-style pairs.
fn config_from(pairs: &[(&str, &str)]) -> Config {
    Config::from_vars(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
}

fn booted_for(elapsed: Duration) -> StartupClock {
    let started = Instant::now()
        .checked_sub(elapsed)
        .expect("monotonic clock too close to its origin");
    StartupClock::started_at(started, time::OffsetDateTime::now_utc())
}

#[tokio::test]
async fn zero_boot_delay_is_ready_immediately() {
    let server = TestServer::start(AppState::new(config_from(&[("BOOT_DELAY", "0")]))).await;

    assert_eq!(server.get("/ready").await, (200, "Ready".to_string()));

    server.stop().await;
}

#[tokio::test]
async fn still_booting_two_seconds_into_five() {
    let state = AppState::new(config_from(&[("BOOT_DELAY", "5")]))
        .with_clock(booted_for(Duration::from_secs(2)));
    let server = TestServer::start(state).await;

    assert_eq!(
        server.get("/ready").await,
        (503, "Still booting up".to_string())
    );

    server.stop().await;
}

#[tokio::test]
async fn readiness_flips_once_delay_passes() {
    let server = TestServer::start(AppState::new(config_from(&[("BOOT_DELAY", "1")]))).await;

    assert_eq!(server.get("/ready").await.0, 503);
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert_eq!(server.get("/ready").await, (200, "Ready".to_string()));
    assert_eq!(server.get("/ready").await.0, 200);

    server.stop().await;
}

#[tokio::test]
async fn healthz_without_dsn_fails() {
    let server = TestServer::start(AppState::new(config_from(&[]))).await;

    assert_eq!(
        server.get("/healthz").await,
        (500, "DB_DSN not configured".to_string())
    );

    server.stop().await;
}

#[tokio::test]
async fn healthz_with_dsn_succeeds() {
    let server =
        TestServer::start(AppState::new(config_from(&[("DB_DSN", "postgres://x")]))).await;

    assert_eq!(server.get("/healthz").await, (200, "Healthy".to_string()));

    server.stop().await;
}

#[tokio::test]
async fn feature_disabled_on_every_call() {
    let state = AppState::new(config_from(&[("FEATURE_NEW", "false")]))
        .with_random(Arc::new(FixedDraw(0.0)));
    let server = TestServer::start(state).await;

    for _ in 0..25 {
        assert_eq!(
            server.get("/feature/new").await,
            (200, "Feature disabled".to_string())
        );
    }

    server.stop().await;
}

#[tokio::test]
async fn feature_enabled_reports_both_outcomes() {
    let failing = AppState::new(config_from(&[("FEATURE_NEW", "TRUE")]))
        .with_random(Arc::new(FixedDraw(0.2)));
    let server = TestServer::start(failing).await;
    assert_eq!(
        server.get("/feature/new").await,
        (500, "Feature failed".to_string())
    );
    server.stop().await;

    let working = AppState::new(config_from(&[("FEATURE_NEW", "true")]))
        .with_random(Arc::new(FixedDraw(0.5)));
    let server = TestServer::start(working).await;
    assert_eq!(
        server.get("/feature/new").await,
        (200, "Feature works".to_string())
    );
    server.stop().await;
}

#[tokio::test]
async fn feature_enabled_fails_about_half_the_time() {
    let server = TestServer::start(AppState::new(config_from(&[("FEATURE_NEW", "true")]))).await;

    let runs = 400;
    let mut failures = 0;
    for _ in 0..runs {
        let (status, body) = server.get("/feature/new").await;
        match status {
            500 => {
                assert_eq!(body, "Feature failed");
                failures += 1;
            }
            200 => assert_eq!(body, "Feature works"),
            other => panic!("unexpected status {other}"),
        }
    }

    let rate = failures as f64 / runs as f64;
    assert!((0.35..0.65).contains(&rate), "failure rate {rate}");

    server.stop().await;
}

#[tokio::test]
async fn live_and_root_always_succeed() {
    let state = AppState::new(config_from(&[("BOOT_DELAY", "3600")]));
    let server = TestServer::start(state).await;

    assert_eq!(server.get("/live").await, (200, "OK".to_string()));
    assert_eq!(server.get("/").await, (200, "myapp is running".to_string()));
    assert_eq!(server.get("/ready").await.0, 503);

    server.stop().await;
}

#[tokio::test]
async fn status_reports_configuration() {
    let state = AppState::new(config_from(&[
        ("BOOT_DELAY", "0"),
        ("DB_DSN", "postgres://user:pw@db/app"),
    ]));
    let server = TestServer::start(state).await;

    let response = reqwest::get(format!("http://{}/status", server.addr))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["ready"], true);
    assert_eq!(json["db_configured"], true);
    assert_eq!(json["feature_new"], false);
    assert!(json.get("db_dsn").is_none());

    server.stop().await;
}
