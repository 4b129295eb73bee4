use std::{future::Future, pin::Pin, time::Duration};

use anyhow::Context;
use tokio::{
    net::TcpStream,
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
    time::MissedTickBehavior,
};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};
use trivia_comms::transport::{
    self,
    client::{CommandWriter, EventStream},
};

use crate::{Interrupted, Terminator};

use super::{action::Action, State};

/// Where and how to reach the trivia server
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub addr: String,
    /// Pause between two connection attempts
    pub reconnect_delay: Duration,
    /// Upper bound for a single connection attempt
    pub connect_timeout: Duration,
}

pub struct StateStore {
    config: ConnectionConfig,
    state_tx: UnboundedSender<State>,
}

impl StateStore {
    pub fn new(config: ConnectionConfig) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (StateStore { config, state_tx }, state_rx)
    }
}

type ServerHandle = (EventStream, CommandWriter);

/// A connection attempt in flight, polled next to the user actions so it never blocks an exit
type PendingConnection = Pin<Box<dyn Future<Output = anyhow::Result<ServerHandle>> + Send>>;

async fn create_server_handle(addr: String, timeout: Duration) -> anyhow::Result<ServerHandle> {
    let stream = tokio::time::timeout(timeout, TcpStream::connect(addr.as_str()))
        .await
        .context("timed out while connecting")?
        .with_context(|| format!("could not connect to {addr}"))?;
    let (event_stream, command_writer) = transport::client::split_tcp_stream(stream);

    Ok((event_stream, command_writer))
}

/// Resolves with the outcome of the pending attempt, never resolves when there is none
async fn wait_for_connection(
    pending_connection: &mut Option<PendingConnection>,
) -> anyhow::Result<ServerHandle> {
    match pending_connection {
        Some(connection) => connection.await,
        None => std::future::pending().await,
    }
}

impl StateStore {
    pub async fn main_loop(
        self,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let mut opt_server_handle: Option<ServerHandle> = None;
        let mut pending_connection: Option<PendingConnection> = None;
        let mut state = State::default();

        // the initial state once
        self.state_tx.send(state.clone())?;

        // first tick completes right away, so the first connection attempt is immediate
        let mut reconnect_ticker = tokio::time::interval(self.config.reconnect_delay);
        reconnect_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            if let Some((event_stream, command_writer)) = opt_server_handle.as_mut() {
                tokio::select! {
                    // Handle the server events as they come in
                    maybe_event = event_stream.next() => match maybe_event {
                        Some(Ok(event)) => {
                            debug!(?event, "received server event");
                            state.handle_server_event(&event);
                        },
                        // a frame we do not understand, nothing to re-render
                        Some(Err(err)) if err.is_recoverable() => {
                            warn!(%err, "skipping server event");
                            continue;
                        },
                        // server disconnected, keep the data around for when it comes back
                        maybe_err => {
                            match maybe_err {
                                Some(Err(err)) => warn!(%err, "connection to the server broke"),
                                _ => info!("server closed the connection"),
                            }
                            opt_server_handle = None;
                            state.mark_disconnected();
                            reconnect_ticker.reset();
                        },
                    },
                    // Handle the actions coming from the UI
                    // and process them to do async operations
                    Some(action) = action_rx.recv() => match action {
                        Action::Exit => {
                            let _ = terminator.terminate(Interrupted::UserInt);

                            break Interrupted::UserInt;
                        },
                        action => {
                            if let Some(command) = state.apply_action(&action) {
                                if let Err(err) = command_writer.write(&command).await {
                                    warn!(%err, ?command, "could not send command");
                                    opt_server_handle = None;
                                    state.mark_disconnected();
                                    reconnect_ticker.reset();
                                }
                            }
                        },
                    },
                    // Catch and handle interrupt signal to gracefully shutdown
                    Ok(interrupted) = interrupt_rx.recv() => {
                        break interrupted;
                    }
                }
            } else {
                tokio::select! {
                    _ = reconnect_ticker.tick(), if pending_connection.is_none() => {
                        state.mark_connection_request_start();
                        pending_connection = Some(Box::pin(create_server_handle(
                            self.config.addr.clone(),
                            self.config.connect_timeout,
                        )));
                    },
                    result = wait_for_connection(&mut pending_connection) => {
                        pending_connection = None;

                        let addr = self.config.addr.clone();
                        match result {
                            Ok(server_handle) => {
                                info!(%addr, "connected to the server");
                                // set the server handle and change status for further processing
                                let (_, command_writer) = opt_server_handle.insert(server_handle);

                                if let Some(command) = state.process_connection_request_result(Ok(addr)) {
                                    if let Err(err) = command_writer.write(&command).await {
                                        warn!(%err, "could not send the greeting command");
                                        opt_server_handle = None;
                                        state.mark_disconnected();
                                    }
                                }
                            },
                            Err(err) => {
                                warn!(err = %format!("{err:#}"), "connection attempt failed");
                                state.process_connection_request_result(Err(err));
                            }
                        }
                    },
                    Some(action) = action_rx.recv() => match action {
                        Action::Exit => {
                            let _ = terminator.terminate(Interrupted::UserInt);

                            break Interrupted::UserInt;
                        },
                        action => {
                            // local transitions still apply, anything for the server is lost
                            if let Some(command) = state.apply_action(&action) {
                                warn!(?command, "not connected, dropping command");
                            }
                        },
                    },
                    // Catch and handle interrupt signal to gracefully shutdown
                    Ok(interrupted) = interrupt_rx.recv() => {
                        break interrupted;
                    }
                }
            }

            self.state_tx.send(state.clone())?;
        };

        Ok(result)
    }
}
