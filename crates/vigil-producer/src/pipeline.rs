use std::sync::Arc;

use anyhow::Result;
use image::RgbImage;
use tracing::{error, info, warn};
use vigil_codec::{encode_jpeg, to_transport_text};
use vigil_queue::QueueClient;
use vigil_types::Envelope;

use crate::detector::Detector;
use crate::source::FrameSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineState {
    Running,
    Draining,
    Stopped,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineReport {
    pub published: u64,
    pub skipped: u64,
}

/// The producer loop. Broker connection and queue declaration happen before
/// construction, and the caller releases the connection after `run`
/// returns; the loop itself drives `Running -> Draining -> Stopped`. A
/// failure on a single frame never halts the loop.
pub struct ProducerPipeline {
    client: Arc<dyn QueueClient>,
    queue: String,
    jpeg_quality: u8,
}

impl ProducerPipeline {
    pub fn new(client: Arc<dyn QueueClient>, queue: String, jpeg_quality: u8) -> Self {
        Self {
            client,
            queue,
            jpeg_quality,
        }
    }

    pub async fn run(
        &self,
        source: Box<dyn FrameSource>,
        detector: &mut dyn Detector,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let mut source = Some(source);
        let mut state = PipelineState::Running;
        let mut frame_index: u64 = 0;

        loop {
            match state {
                PipelineState::Running => {
                    let Some(src) = source.as_mut() else {
                        state = PipelineState::Draining;
                        continue;
                    };
                    match src.next_frame() {
                        Ok(Some(frame)) => {
                            frame_index += 1;
                            match self.process_frame(&frame, detector).await {
                                Ok(()) => report.published += 1,
                                Err(err) => {
                                    report.skipped += 1;
                                    warn!(frame = frame_index, error = %err, "frame skipped");
                                }
                            }
                        }
                        Ok(None) => state = PipelineState::Draining,
                        Err(err) => {
                            error!(error = %err, "frame source failed, draining");
                            state = PipelineState::Draining;
                        }
                    }
                }
                PipelineState::Draining => {
                    // Release the capture handle.
                    source = None;
                    state = PipelineState::Stopped;
                }
                PipelineState::Stopped => break,
            }
        }

        info!(
            published = report.published,
            skipped = report.skipped,
            "producer stopped"
        );
        Ok(report)
    }

    async fn process_frame(&self, frame: &RgbImage, detector: &mut dyn Detector) -> Result<()> {
        let detections = detector.detect(frame)?;
        let jpeg = encode_jpeg(frame, self.jpeg_quality)?;
        let envelope = Envelope::new(to_transport_text(&jpeg), detections);
        let body = envelope.to_json()?;
        self.client.publish(&self.queue, body.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{NoopDetector, ScriptedDetector};
    use crate::source::TestPatternSource;
    use anyhow::anyhow;
    use vigil_queue::MemoryQueue;
    use vigil_types::Detection;

    struct FailingDetector;

    impl Detector for FailingDetector {
        fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
            Err(anyhow!("model exploded"))
        }
    }

    fn pipeline(client: Arc<dyn QueueClient>) -> ProducerPipeline {
        ProducerPipeline::new(client, "q".to_string(), 90)
    }

    #[tokio::test]
    async fn test_publishes_one_envelope_per_frame() {
        let queue = Arc::new(MemoryQueue::new());
        queue.declare_queue("q").await.unwrap();

        let mut detector = ScriptedDetector::walking_person();
        let report = pipeline(queue.clone())
            .run(Box::new(TestPatternSource::new(3, 64, 48)), &mut detector)
            .await
            .unwrap();

        assert_eq!(report.published, 3);
        assert_eq!(report.skipped, 0);

        for _ in 0..3 {
            let body = queue.poll_one("q").await.unwrap().unwrap();
            let envelope = Envelope::from_json(&body).unwrap();
            assert_eq!(envelope.detections.len(), 1);
            assert_eq!(envelope.detections[0].name, "person");
        }
        assert!(queue.poll_one("q").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detector_failure_skips_frame_but_keeps_running() {
        let queue = Arc::new(MemoryQueue::new());
        queue.declare_queue("q").await.unwrap();

        let report = pipeline(queue.clone())
            .run(
                Box::new(TestPatternSource::new(2, 16, 16)),
                &mut FailingDetector,
            )
            .await
            .unwrap();

        assert_eq!(report.published, 0);
        assert_eq!(report.skipped, 2);
    }

    #[tokio::test]
    async fn test_empty_detection_set_still_publishes() {
        let queue = Arc::new(MemoryQueue::new());
        queue.declare_queue("q").await.unwrap();

        let report = pipeline(queue.clone())
            .run(Box::new(TestPatternSource::new(1, 8, 8)), &mut NoopDetector)
            .await
            .unwrap();

        assert_eq!(report.published, 1);
        let body = queue.poll_one("q").await.unwrap().unwrap();
        let envelope = Envelope::from_json(&body).unwrap();
        assert!(envelope.detections.is_empty());
    }
}
