use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio_stream::StreamExt;
use trivia_comms::{
    command::{self, ClientCommand},
    event::{self, ServerEvent},
    transport,
};

const PORT: usize = 8081;

fn sample_topic() -> event::Topic {
    event::Topic {
        pk: 1,
        name: "Geography".into(),
        questions: vec![event::Question {
            text: "Capital of Norway?".into(),
            options: vec!["Bergen".into(), "Oslo".into(), "Tromso".into()],
            correct_index: Some(2),
        }],
        has_players: false,
    }
}

async fn server_example() -> anyhow::Result<()> {
    // bind to the example port to wait for client connection
    let listener = TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .expect("could not bind to the port");

    // accept the only client connection we will have
    let tcp_stream = match listener.accept().await {
        Ok((tcp_stream, _addr)) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to accept client: {}", e)),
    };

    // break the client connection into higher level API for ease of use
    let (mut command_stream, mut event_writer) = transport::server::split_tcp_stream(tcp_stream);

    // play a single question game with whoever asks, until the connection is closed
    while let Some(result) = command_stream.next().await {
        let command = match result {
            Ok(command) => command,
            // client has sent a command which we could not read or parse
            // could be a bug in the client, malicious client, breaking api changes etc.
            Err(e) => {
                println!("SERVER: failed to read command: {}", e);
                continue;
            }
        };
        println!("SERVER: received command: {:?}", command);

        let reply = match command {
            ClientCommand::GetTopics => ServerEvent::Topics(vec![sample_topic()]),
            ClientCommand::JoinGame(join) => ServerEvent::Game(event::Game {
                uid: "game-1".into(),
                players: vec![event::PlayerScore {
                    name: join.name,
                    score: 0,
                }],
                current_question: sample_topic().questions.into_iter().next(),
                question_count: 1,
                feedback: None,
            }),
            ClientCommand::Answer(answer) => ServerEvent::Over(event::GameOver {
                players: vec![event::PlayerScore {
                    name: "player".into(),
                    score: u32::from(answer.index == 2),
                }],
            }),
        };

        event_writer.write(&reply).await?;
    }

    Ok(())
}

async fn client_example() -> anyhow::Result<()> {
    // create a client connection to the server
    let tcp_stream = match TcpStream::connect(format!("localhost:{}", PORT)).await {
        Ok(tcp_stream) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to connect to server: {}", e)),
    };

    // break the server connection into higher level API for ease of use
    let (mut event_stream, mut command_writer) = transport::client::split_tcp_stream(tcp_stream);

    command_writer.write(&ClientCommand::GetTopics).await?;

    // react to every event until the game is over
    while let Some(result) = event_stream.next().await {
        let event = match result {
            Ok(event) => event,
            // server has sent an event which we could not read or parse
            // could be a bug in the server, malicious server, breaking api changes etc.
            Err(e) => {
                println!("CLIENT: failed to read event: {}", e);
                continue;
            }
        };
        println!("CLIENT: received event: {:?}", event);

        match event {
            ServerEvent::Topics(topics) => {
                let topic = topics.first().context("server has no topics")?;

                command_writer
                    .write(&ClientCommand::JoinGame(command::JoinGameCommand {
                        topic_pk: topic.pk,
                        name: "player".into(),
                    }))
                    .await?;
            }
            ServerEvent::Game(game) => {
                command_writer
                    .write(&ClientCommand::Answer(command::AnswerCommand {
                        index: 2,
                        game_uid: game.uid,
                    }))
                    .await?;
            }
            ServerEvent::Over(_) => break,
            _ => (),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tokio::try_join!(server_example(), client_example()).context("one of the examples failed")?;

    println!("example ran without problems");

    Ok(())
}
