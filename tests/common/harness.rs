//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use veridict::classifier::{Classification, MockClassifier, ZeroShotClassifier};
use veridict::gateway::{HandlerState, create_router_with_state};

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Spawns a server with the stub zero-shot classifier on an ephemeral port.
///
/// The stub classifier is deterministic and needs no model weights, so these
/// tests exercise the full HTTP path without external dependencies.
pub async fn spawn_stub_server() -> Result<TestServer, ServerStartupError> {
    let classifier = ZeroShotClassifier::stub()
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    spawn_with_state(HandlerState::new(Arc::new(classifier))).await
}

/// Spawns a server whose classifier always returns `result`.
pub async fn spawn_mock_server(result: Classification) -> Result<TestServer, ServerStartupError> {
    let classifier = MockClassifier::with_result(result);

    spawn_with_state(HandlerState::new(Arc::new(classifier))).await
}

/// Spawns a server whose classifier failed to initialize.
pub async fn spawn_unavailable_server() -> Result<TestServer, ServerStartupError> {
    spawn_with_state(HandlerState::<MockClassifier>::unavailable()).await
}

async fn spawn_with_state<C>(state: HandlerState<C>) -> Result<TestServer, ServerStartupError>
where
    C: veridict::classifier::Classify + 'static,
{
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
