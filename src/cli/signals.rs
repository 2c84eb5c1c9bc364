//! Shutdown signal handling for the server

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

/// Fires once on SIGINT/SIGTERM (or an explicit trigger)
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.sender.borrow()
    }

    /// Request shutdown
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    /// Listen for OS signals in the background
    pub fn setup(&self) -> Result<(), std::io::Error> {
        let on_ctrl_c = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("received SIGINT");
                    on_ctrl_c.trigger();
                }
                Err(e) => warn!(error = %e, "failed to install Ctrl+C handler"),
            }
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate())?;
            let on_term = self.clone();
            tokio::spawn(async move {
                sigterm.recv().await;
                info!("received SIGTERM");
                on_term.trigger();
            });
        }

        Ok(())
    }

    /// Future that resolves once shutdown is requested
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut receiver = self.sender.subscribe();
        async move {
            let _ = receiver.wait_for(|stop| *stop).await;
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
