//! Interface to the icon detector.
//!
//! The computer-vision detector itself lives outside this crate; this module
//! holds the trait it plugs into, a fixed-list implementation for boxes given
//! on the command line, and the one-shot loader used to bring a backend up.

mod loader;

pub use loader::DetectorLoader;

use image::RgbaImage;

use crate::bbox::{compute_close_kernel_size, RawBBox};
use crate::error::{Error, Result};

pub const DEFAULT_MIN_AREA: u64 = 200;
/// More boxes than this usually means the sheet is noisy or the area floor too low.
pub const MAX_DETECTIONS_WARNING: usize = 500;
/// `0` asks for a gap-closing kernel sized from the image resolution.
pub const DEFAULT_MERGE_GAP: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionParams {
    /// Boxes smaller than this area are dropped
    pub min_area: u64,
    /// Gap-closing kernel size, or `0` for automatic
    pub merge_gap: u32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_AREA,
            merge_gap: DEFAULT_MERGE_GAP,
        }
    }
}

impl DetectionParams {
    /// Kernel size the detector should close gaps with for a `width`x`height` image
    pub fn effective_merge_gap(&self, width: u32, height: u32) -> u32 {
        if self.merge_gap == 0 {
            compute_close_kernel_size(width, height)
        } else {
            self.merge_gap
        }
    }
}

/// Whether `count` detections is enough to warn the user about.
pub fn exceeds_detection_warning(count: usize) -> bool {
    count > MAX_DETECTIONS_WARNING
}

/// Trait for icon detectors
/// Produces raw candidate boxes; cleanup and ordering happen afterwards.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &RgbaImage, params: &DetectionParams) -> Result<Vec<RawBBox>>;

    fn name(&self) -> &str;
}

/// Detector that returns a fixed list of boxes regardless of the pixels
#[derive(Debug, Clone, Default)]
pub struct ManualDetector {
    boxes: Vec<RawBBox>,
}

impl ManualDetector {
    pub fn new(boxes: Vec<RawBBox>) -> Self {
        Self { boxes }
    }
}

impl Detector for ManualDetector {
    fn detect(&self, _image: &RgbaImage, _params: &DetectionParams) -> Result<Vec<RawBBox>> {
        Ok(self.boxes.clone())
    }

    fn name(&self) -> &str {
        "manual"
    }
}

/// Parse `"x,y,w,h"` into a box. Width and height must be non-negative.
pub fn parse_bbox(s: &str) -> Result<RawBBox> {
    let invalid = || Error::InvalidBBox(s.to_string());

    let values = s
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>>>()?;
    let &[x, y, w, h] = values.as_slice() else {
        return Err(invalid());
    };

    if !values.iter().all(|v| v.is_finite()) || w < 0.0 || h < 0.0 {
        return Err(invalid());
    }
    Ok(RawBBox::new(x, y, w, h))
}
