use anyhow::Result;
use image::RgbImage;
use vigil_types::{BoundingBox, Detection};

/// Boundary to the analysis model. One invocation yields exactly one
/// detection set for the given frame; implementations never hand back
/// multiple alternative results. The real model lives outside this system.
pub trait Detector: Send {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>>;
}

/// Detects nothing. Useful when only the transport path is under test.
pub struct NoopDetector;

impl Detector for NoopDetector {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        Ok(Vec::new())
    }
}

/// Cycles through preset detection sets, one per frame. Stands in for the
/// model in demos and end-to-end tests.
pub struct ScriptedDetector {
    sets: Vec<Vec<Detection>>,
    index: usize,
}

impl ScriptedDetector {
    pub fn new(sets: Vec<Vec<Detection>>) -> Self {
        Self { sets, index: 0 }
    }

    /// Demo script: a "person" box sweeping across the frame.
    pub fn walking_person() -> Self {
        let sets = (0..8)
            .map(|step| {
                let x = 40.0 + step as f64 * 60.0;
                vec![Detection::new(
                    BoundingBox::new(x, 120.0, x + 80.0, 320.0),
                    0.87,
                    "person",
                )]
            })
            .collect();
        Self::new(sets)
    }
}

impl Detector for ScriptedDetector {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        if self.sets.is_empty() {
            return Ok(Vec::new());
        }
        let set = self.sets[self.index % self.sets.len()].clone();
        self.index += 1;
        Ok(set)
    }
}
