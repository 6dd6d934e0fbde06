//! Per-region background alpha matting.
//!
//! Estimates a region's background color from its border, decides whether
//! that background is uniform enough to remove, and if so rewrites the alpha
//! channel so only the foreground stays opaque.

mod color;
mod confidence;
mod fill;
mod mask;
mod morphology;
mod region;
#[cfg(test)]
mod test_util;
pub mod types;

pub use color::{color_distance, compute_border_variance, estimate_bg_color};
pub use confidence::{compute_bg_confidence, should_remove_bg};
pub use mask::{apply_alpha_mask, ColorKeyRemover};
pub use region::compute_padded_region;
pub use types::{
    BackgroundRemover, BgConfidence, BgRemovalOutcome, MattingConfig, PaddedRegion, RgbColor,
    BG_BORDER_SAMPLE_INSET_PX, BG_CONFIDENCE_THRESHOLD, BG_DISTANCE_THRESHOLD,
    BG_EDGE_FEATHER_PX, BG_MAX_BG_VARIANCE,
};

/// Create the default background remover (border color keying)
pub fn create_default_remover(config: MattingConfig) -> Box<dyn BackgroundRemover> {
    Box::new(ColorKeyRemover::new(config))
}
