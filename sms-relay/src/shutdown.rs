//! Graceful shutdown on SIGINT / SIGTERM.

use std::future::Future;

use tokio::signal;
use tracing::info;

/// Which signal stopped the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
        }
    }
}

/// Resolve with whichever of the two futures completes first.
pub async fn first_signal<I, T>(interrupt: I, terminate: T) -> ShutdownSignal
where
    I: Future<Output = ()>,
    T: Future<Output = ()>,
{
    let received = tokio::select! {
        _ = interrupt => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    };

    info!(signal = received.as_str(), "sms_relay_shutting_down");
    received
}

/// Wait for Ctrl+C or, on unix, SIGTERM.
///
/// A signal whose handler cannot be installed never fires; the other one
/// still does.
pub async fn shutdown_signal() -> ShutdownSignal {
    let interrupt = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    first_signal(interrupt, terminate).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::{pending, ready};

    #[tokio::test]
    async fn test_interrupt_wins_when_first() {
        let received = first_signal(ready(()), pending::<()>()).await;
        assert_eq!(received, ShutdownSignal::Interrupt);
    }

    #[tokio::test]
    async fn test_terminate_wins_when_first() {
        let received = first_signal(pending::<()>(), ready(())).await;
        assert_eq!(received, ShutdownSignal::Terminate);
        assert_eq!(received.as_str(), "SIGTERM");
    }
}
