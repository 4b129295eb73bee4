use std::net::SocketAddr;

use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
};
use tokio_stream::StreamExt;
use trivia_comms::{
    command::{self, ClientCommand},
    event::{self, ServerEvent},
    transport,
};

fn welcome_topics() -> ServerEvent {
    ServerEvent::Topics(vec![event::Topic {
        pk: 1,
        name: "History".into(),
        questions: Vec::default(),
        has_players: true,
    }])
}

#[tokio::test]
async fn assert_server_client_transport() {
    let (addr_tx, addr_rx) = oneshot::channel();
    let (server_collected_commands, client_collected_events) =
        tokio::join!(execute_server(addr_tx), execute_client(addr_rx));

    assert!(server_collected_commands.is_ok());
    assert!(client_collected_events.is_ok());

    assert_eq!(
        server_collected_commands.unwrap(),
        vec![
            ClientCommand::GetTopics,
            ClientCommand::JoinGame(command::JoinGameCommand {
                topic_pk: 1,
                name: "alice".into(),
            }),
        ]
    );

    // the garbage frame in between is skipped, the connection survives it
    assert_eq!(
        client_collected_events.unwrap(),
        vec![welcome_topics(), ServerEvent::Over(event::GameOver { players: Vec::default() })]
    );
}

async fn execute_server(
    addr_tx: oneshot::Sender<SocketAddr>,
) -> anyhow::Result<Vec<command::ClientCommand>> {
    // bind to any free port and tell the client where to find us
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind to the port");
    let _ = addr_tx.send(listener.local_addr()?);

    // accept the only client connection we will have
    let tcp_stream = match listener.accept().await {
        Ok((tcp_stream, _addr)) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to accept client: {}", e)),
    };

    // break the client connection into higher level API for ease of use
    let (mut command_stream, mut event_writer) = transport::server::split_tcp_stream(tcp_stream);
    // store commands received from the client
    let mut collected_commands = Vec::new();

    event_writer.write(&welcome_topics()).await?;
    event_writer.write_raw(r#"{"event":"nonsense"}"#).await?;
    event_writer
        .write(&ServerEvent::Over(event::GameOver {
            players: Vec::default(),
        }))
        .await?;

    // listen for commands from the client until the connection is closed
    while let Some(result) = command_stream.next().await {
        match result {
            // client has sent a valid command which we could read and parse
            Ok(command) => collected_commands.push(command),
            // client has sent a command which we could not read or parse
            // could be a bug in the client, malicious client, breaking api changes etc.
            Err(e) => return Err(anyhow::anyhow!("failed to read command: {}", e)),
        }
    }

    Ok(collected_commands)
}

async fn execute_client(
    addr_rx: oneshot::Receiver<SocketAddr>,
) -> anyhow::Result<Vec<event::ServerEvent>> {
    let addr = addr_rx.await?;

    // create a client connection to the server
    let tcp_stream = match TcpStream::connect(addr).await {
        Ok(tcp_stream) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to connect to server: {}", e)),
    };

    // break the server connection into higher level API for ease of use
    let (mut event_stream, mut command_writer) = transport::client::split_tcp_stream(tcp_stream);
    // store events received from the server
    let mut collected_events = Vec::new();

    command_writer.write(&ClientCommand::GetTopics).await?;
    command_writer
        .write(&ClientCommand::JoinGame(command::JoinGameCommand {
            topic_pk: 1,
            name: "alice".into(),
        }))
        .await?;

    // read until the game over event, tolerating frames we do not understand
    while let Some(result) = event_stream.next().await {
        match result {
            Ok(event) => {
                let is_over = matches!(event, ServerEvent::Over(_));
                collected_events.push(event);

                if is_over {
                    break;
                }
            }
            Err(e) if e.is_recoverable() => continue,
            Err(e) => return Err(anyhow::anyhow!("could not read event: {}", e)),
        }
    }

    Ok(collected_events)
}
