use std::io;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawn a task that cancels `interrupt` on SIGINT (and SIGTERM on Unix).
///
/// Handlers are installed before this returns, so a signal delivered while the terminal is
/// being set up is still routed to `interrupt`. The task exits without cancelling when
/// `interrupt` is cancelled by someone else.
pub fn spawn_signal_listener(interrupt: CancellationToken) -> JoinHandle<()> {
    let registered = Termination::register();

    tokio::spawn(async move {
        let mut termination = match registered {
            Ok(termination) => termination,
            Err(err) => {
                // Ctrl+C still arrives as a key event in raw mode.
                log::warn!("signal handler unavailable: {}", err);
                interrupt.cancelled().await;
                return;
            }
        };

        tokio::select! {
            _ = interrupt.cancelled() => {}
            received = termination.recv() => match received {
                Some(name) => {
                    log::info!("received {}, shutting down", name);
                    interrupt.cancel();
                }
                None => {
                    log::warn!("signal streams closed");
                    interrupt.cancelled().await;
                }
            },
        }
    })
}

/// Wait for the listener task, logging instead of propagating a panic or abort.
///
/// Returns `true` when the task finished normally.
pub async fn join_signal_listener(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(err) => {
            log::warn!("signal listener failed: {}", err);
            false
        }
    }
}

#[cfg(unix)]
struct Termination {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Termination {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> Option<&'static str> {
        tokio::select! {
            Some(()) = self.interrupt.recv() => Some("SIGINT"),
            Some(()) = self.terminate.recv() => Some("SIGTERM"),
            else => None,
        }
    }
}

#[cfg(windows)]
struct Termination {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl Termination {
    fn register() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) -> Option<&'static str> {
        self.ctrl_c.recv().await.map(|()| "Ctrl+C")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn listener_stops_when_token_cancelled_elsewhere() {
        let token = CancellationToken::new();
        let handle = spawn_signal_listener(token.clone());

        token.cancel();
        let joined =
            tokio::time::timeout(Duration::from_millis(500), join_signal_listener(handle)).await;
        assert!(matches!(joined, Ok(true)));
    }

    #[tokio::test]
    async fn panicked_listener_is_reported_not_propagated() {
        let handle = tokio::spawn(async {
            panic!("listener blew up");
        });
        assert!(!join_signal_listener(handle).await);
    }
}
