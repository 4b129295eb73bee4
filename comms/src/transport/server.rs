use tokio::{
    io::AsyncWriteExt,
    net::{tcp::OwnedWriteHalf, TcpStream},
};

use crate::{command, event};

use super::common::{frame_stream, BoxedStream, TransportError, NEW_LINE};

/// [CommandStream] is a stream of [crate::command::ClientCommand]s sent by the client
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select!]
/// without the risk of missing commands.
pub type CommandStream = BoxedStream<Result<command::ClientCommand, TransportError>>;

/// [EventWriter] is a wrapper around a [TcpStream] which writes [crate::event::ServerEvent]s to the client
pub struct EventWriter {
    writer: OwnedWriteHalf,
}

impl EventWriter {
    pub fn new(writer: OwnedWriteHalf) -> Self {
        Self { writer }
    }

    /// Send a [crate::event::ServerEvent] to the backing [TcpStream]
    ///
    /// # Cancel Safety
    ///
    /// Same as [crate::transport::client::CommandWriter::write], a partially
    /// written event corrupts the stream.
    pub async fn write(&mut self, event: &event::ServerEvent) -> anyhow::Result<()> {
        let mut serialized_bytes = serde_json::to_vec(event)?;
        serialized_bytes.extend_from_slice(NEW_LINE);

        self.writer.write_all(serialized_bytes.as_slice()).await?;

        Ok(())
    }

    /// Write raw bytes followed by a new line, without any validation.
    /// Handy to check how the other side copes with frames it does not understand.
    pub async fn write_raw(&mut self, frame: &str) -> anyhow::Result<()> {
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.write_all(NEW_LINE).await?;

        Ok(())
    }
}

/// Splits a TCP stream into a stream of commands and an event writer.
///
/// # Arguments
///
/// - `stream` - A [TcpStream] to split
pub fn split_tcp_stream(stream: TcpStream) -> (CommandStream, EventWriter) {
    let (reader, writer) = stream.into_split();

    (frame_stream(reader), EventWriter::new(writer))
}
