use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::time::sleep;
use tracing::warn;
use vigil_codec::{decode_jpeg, encode_jpeg, from_transport_text};
use vigil_overlay::overlay_detections;
use vigil_queue::QueueClient;
use vigil_types::Envelope;

#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Idle wait after an empty poll. Bounded, so the loop wakes promptly
    /// without spinning a core.
    pub poll_idle: Duration,
    pub jpeg_quality: u8,
}

/// The consumer loop: a lazy, unbounded sequence of ready-to-transmit JPEG
/// chunks, one per successfully processed envelope.
///
/// Liveness is the loop's overriding invariant. Queue errors back off for
/// the idle interval; a message that fails schema or frame decoding is
/// logged and dropped without emitting a chunk (the broker copy is already
/// gone - at-most-once, no redelivery).
pub fn frame_chunks(
    client: Arc<dyn QueueClient>,
    queue: String,
    options: ChunkOptions,
) -> impl Stream<Item = Vec<u8>> + Send {
    async_stream::stream! {
        loop {
            let body = match client.poll_one(&queue).await {
                Ok(Some(body)) => body,
                Ok(None) => {
                    sleep(options.poll_idle).await;
                    continue;
                }
                Err(err) => {
                    warn!(queue = %queue, error = %err, "poll failed");
                    sleep(options.poll_idle).await;
                    continue;
                }
            };

            let envelope = match Envelope::from_json(&body) {
                Ok(envelope) => envelope,
                Err(err) => {
                    warn!(queue = %queue, error = %err, "dropping malformed message");
                    continue;
                }
            };

            let mut frame = match from_transport_text(&envelope.frame)
                .and_then(|bytes| decode_jpeg(&bytes))
            {
                Ok(frame) => frame,
                Err(err) => {
                    warn!(queue = %queue, error = %err, "dropping undecodable frame");
                    continue;
                }
            };

            overlay_detections(&mut frame, &envelope.detections);

            match encode_jpeg(&frame, options.jpeg_quality) {
                Ok(chunk) => yield chunk,
                Err(err) => {
                    warn!(queue = %queue, error = %err, "dropping unencodable frame");
                }
            }
        }
    }
}
