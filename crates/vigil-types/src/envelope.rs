use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One detection box in pixel coordinates, origin top-left.
/// Producers keep `x2/y2 >= x1/y1`; the overlay side truncates fractional
/// coordinates toward zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Integer pixel corners, fractional parts truncated toward zero.
    pub fn corners(&self) -> (i32, i32, i32, i32) {
        (
            self.x1 as i32,
            self.y1 as i32,
            self.x2 as i32,
            self.y2 as i32,
        )
    }
}

/// One recognized object: box, class label, confidence.
/// Read-only once produced by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub confidence: f64,
    pub name: String,
}

impl Detection {
    pub fn new(bbox: BoundingBox, confidence: f64, name: impl Into<String>) -> Self {
        Self {
            bbox,
            confidence,
            name: name.into(),
        }
    }
}

/// The unit of queue traffic: one transport-text-encoded JPEG frame plus its
/// detections. Built once at publish time, consumed and dropped by the
/// viewer, never mutated in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub frame: String,
    pub detections: Vec<Detection>,
}

impl Envelope {
    pub fn new(frame: String, detections: Vec<Detection>) -> Self {
        Self { frame, detections }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}
