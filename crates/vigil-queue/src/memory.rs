use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::client::QueueClient;
use crate::error::{QueueError, Result};

/// In-process FIFO with the same observable semantics as the AMQP client:
/// idempotent declare, destructive single-message fetch, `None` on empty.
/// Backs tests and loop-level coverage that must not depend on a live
/// broker.
#[derive(Default)]
pub struct MemoryQueue {
    queues: Mutex<HashMap<String, VecDeque<Vec<u8>>>>,
    closed: AtomicBool,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(QueueError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl QueueClient for MemoryQueue {
    async fn declare_queue(&self, name: &str) -> Result<()> {
        self.ensure_open()?;
        self.queues
            .lock()
            .await
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    async fn publish(&self, name: &str, payload: &[u8]) -> Result<()> {
        self.ensure_open()?;
        self.queues
            .lock()
            .await
            .entry(name.to_string())
            .or_default()
            .push_back(payload.to_vec());
        Ok(())
    }

    async fn poll_one(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        Ok(self
            .queues
            .lock()
            .await
            .get_mut(name)
            .and_then(|queue| queue.pop_front()))
    }

    async fn disconnect(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }
}
