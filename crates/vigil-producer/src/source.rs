use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Boundary to the video input. `Ok(None)` means the source has no more
/// frames.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// Reads still frames from a directory in lexicographic order. A file that
/// fails to decode is logged and skipped; it never ends the stream.
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    index: usize,
}

impl ImageDirSource {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("failed to open frame directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase());
                matches!(ext.as_deref(), Some("jpg" | "jpeg" | "png"))
            })
            .collect();
        files.sort();
        Ok(Self { files, index: 0 })
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        while self.index < self.files.len() {
            let path = self.files[self.index].clone();
            self.index += 1;
            match image::open(&path) {
                Ok(image) => return Ok(Some(image.to_rgb8())),
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipping unreadable frame");
                }
            }
        }
        Ok(None)
    }
}

/// Bounded synthetic source for smoke runs and tests: a gradient that
/// shifts a little every frame.
pub struct TestPatternSource {
    remaining: u32,
    width: u32,
    height: u32,
    tick: u32,
}

impl TestPatternSource {
    pub fn new(frames: u32, width: u32, height: u32) -> Self {
        Self {
            remaining: frames,
            width,
            height,
            tick: 0,
        }
    }
}

impl FrameSource for TestPatternSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        let shift = self.tick * 8;
        self.tick += 1;
        let frame = RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb([
                ((x + shift) % 256) as u8,
                (y % 256) as u8,
                ((x + y + shift) % 256) as u8,
            ])
        });
        Ok(Some(frame))
    }
}
