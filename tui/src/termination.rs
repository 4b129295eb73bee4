#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tracing::info;

/// Reason the application is shutting down
#[derive(Debug, Clone, PartialEq)]
pub enum Interrupted {
    OsSigInt,
    OsSigTerm,
    UserInt,
}

/// Handle for asking every loop of the application to stop
#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

#[cfg(unix)]
async fn terminate_by_unix_signal(mut terminator: Terminator) -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    let interrupted = tokio::select! {
        _ = sigint.recv() => Interrupted::OsSigInt,
        _ = sigterm.recv() => Interrupted::OsSigTerm,
    };
    info!(?interrupted, "received os signal");

    terminator.terminate(interrupted)
}

// create a broadcast channel for retrieving the application kill signal
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    #[cfg(unix)]
    tokio::spawn({
        let terminator = terminator.clone();
        async move {
            if let Err(err) = terminate_by_unix_signal(terminator).await {
                tracing::error!(%err, "could not listen for os signals");
            }
        }
    });

    (terminator, rx)
}
