use std::pin::Pin;

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_stream::{wrappers::LinesStream, Stream, StreamExt};

pub const NEW_LINE: &[u8; 2] = b"\r\n";

pub type BoxedStream<Item> = Pin<Box<dyn Stream<Item = Item> + Send>>;

/// Failure while reading a frame from the other side of the connection
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection itself is broken, no further frames will arrive
    #[error("could not read from the connection: {0}")]
    Io(#[from] std::io::Error),
    /// A frame arrived but could not be decoded, the connection is still usable
    #[error("could not decode frame {frame:?}: {source}")]
    Decode {
        frame: String,
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Whether the connection is still usable after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TransportError::Decode { .. })
    }
}

/// Turns a reader into a stream of newline delimited JSON frames
pub fn frame_stream<R, T>(reader: R) -> BoxedStream<Result<T, TransportError>>
where
    R: AsyncRead + Send + Unpin + 'static,
    T: DeserializeOwned + Send + 'static,
{
    Box::pin(
        LinesStream::new(BufReader::new(reader).lines()).map(|line| {
            let line = line?;

            serde_json::from_str::<T>(&line)
                .map_err(|source| TransportError::Decode { frame: line, source })
        }),
    )
}
