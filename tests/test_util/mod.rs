#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use todo_rest::{SharedData, db, persistence};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Creates a fresh in-memory database for a test. sqlx hands every pool opened on
/// "sqlite::memory:" its own database, so tests never see each other's rows.
pub async fn prepare_db_and_test<F, R>(test_fn: F)
where
    R: Future<Output = ()>,
    F: FnOnce(SqlitePool) -> R,
{
    let pool = db::connect_sqlx("sqlite::memory:")
        .await
        .unwrap_or_else(|db_err| panic!("Failed to start test database: {db_err:#}"));

    test_fn(pool).await;
}

/// Builds the full application router on top of [pool]
pub fn app_for(pool: SqlitePool) -> Router {
    todo_rest::build_app(Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
    }))
}

/// Sends a single request through the router and returns the status with the parsed JSON body
pub async fn call<T: DeserializeOwned>(
    app: &Router,
    method: &str,
    uri: &str,
    json_body: Option<&str>,
) -> (StatusCode, T) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match json_body {
        Some(raw_json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw_json.to_owned())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("Could not build request"))
        .await
        .expect("Router failed to produce a response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read data from response body!");

    let parsed = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Could not parse body content into data structure! Error: {}, Received body: {:?}",
            err, bytes
        )
    });
    (status, parsed)
}

/// A server listening on an ephemeral local port
pub struct RunningServer {
    pub base_url: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), anyhow::Error>>,
}

impl RunningServer {
    pub async fn start(pool: SqlitePool) -> RunningServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind a local port");
        let base_url = format!(
            "http://{}",
            listener.local_addr().expect("Listener has no address")
        );
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(todo_rest::serve(listener, pool, async move {
            let _ = shutdown_rx.await;
        }));

        RunningServer {
            base_url,
            shutdown,
            handle,
        }
    }

    /// Triggers graceful shutdown and waits for the server task to finish
    pub async fn stop(self) -> Result<(), anyhow::Error> {
        let _ = self.shutdown.send(());
        self.handle.await.expect("Server task panicked")
    }
}
