use std::convert::Infallible;
use std::fmt::Display;

use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::providers::openai::CompletionMeta;

mod reassembler;
mod relay;

pub use reassembler::{LineReassembler, TailPolicy};
pub use relay::{RelayFrame, StreamRelay};

/// Upstream byte stream → OpenAI chunk stream.
///
/// Pull-based: bytes are read from upstream only as fast as the client consumes
/// frames, and dropping the returned stream drops the upstream body with it.
/// A transport error ends the upstream read; the stop chunk and `[DONE]` are
/// still emitted so the client sees a well-formed end.
pub fn relay_event_stream<S, E>(
    upstream: S,
    meta: CompletionMeta,
    tail: TailPolicy,
) -> impl Stream<Item = RelayFrame> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    async_stream::stream! {
        let mut upstream = Box::pin(upstream);
        let mut reassembler = LineReassembler::new(tail);
        let relay = StreamRelay::new(meta);

        while let Some(item) = upstream.next().await {
            match item {
                Ok(bytes) => {
                    for line in reassembler.push(&bytes) {
                        if let Some(chunk) = relay.relay(&line) {
                            yield RelayFrame::Chunk(chunk);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(id = %relay.meta().id, "upstream stream error: {}", e);
                    break;
                }
            }
        }

        if let Some(line) = reassembler.finish() {
            if let Some(chunk) = relay.relay(&line) {
                yield RelayFrame::Chunk(chunk);
            }
        }

        for frame in relay.finalize() {
            yield frame;
        }
    }
}

pub fn sse_response<S>(frames: S) -> Response
where
    S: Stream<Item = RelayFrame> + Send + 'static,
{
    let events = frames.map(|frame| Ok::<_, Infallible>(frame.to_event()));
    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}
