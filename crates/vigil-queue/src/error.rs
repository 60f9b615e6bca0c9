use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("broker connection failed: {0}")]
    Connection(#[source] lapin::Error),

    #[error("queue declare failed: {0}")]
    Declare(#[source] lapin::Error),

    #[error("publish failed: {0}")]
    Publish(#[source] lapin::Error),

    #[error("poll failed: {0}")]
    Poll(#[source] lapin::Error),

    #[error("connection is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, QueueError>;
