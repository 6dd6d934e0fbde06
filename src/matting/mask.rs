use image::RgbaImage;
use ndarray::Array2;

use super::color::{
    clamp_rows, color_distance, compute_border_variance, estimate_bg_color, pixel_at,
};
use super::confidence::{compute_bg_confidence, should_remove_bg_with};
use super::fill::{feather_edges, fill_holes};
use super::morphology::{close3x3, open3x3};
use super::types::{
    BackgroundRemover, BgRemovalOutcome, MattingConfig, RgbColor, BG_EDGE_FEATHER_PX,
};

/// Soft alpha at or above this value is foreground when binarizing.
const BINARIZE_LEVEL: u8 = 128;
/// Fraction of the distance threshold below which a pixel is pure background.
const SOFT_THRESHOLD_RATIO: f64 = 0.6;

/// Clear the background of an RGBA buffer by rewriting its alpha channel.
///
/// Stages, in order:
/// 1. Soft alpha from the distance to `bg_color`
/// 2. Binarize at 128
/// 3. Morphological open
/// 4. Morphological close
/// 5. Hole fill from the border
/// 6. Feather boundary pixels
///
/// RGB values are left as they are.
pub fn apply_alpha_mask(pixels: &mut [u8], w: usize, h: usize, bg_color: RgbColor, threshold: f64) {
    apply_alpha_mask_with_radius(pixels, w, h, bg_color, threshold, BG_EDGE_FEATHER_PX);
}

pub(crate) fn apply_alpha_mask_with_radius(
    pixels: &mut [u8],
    w: usize,
    h: usize,
    bg_color: RgbColor,
    threshold: f64,
    feather_radius: usize,
) {
    let _span = tracing::debug_span!("apply_alpha_mask", w, h).entered();
    let h = clamp_rows(pixels.len(), w, h);
    if w == 0 || h == 0 {
        return;
    }

    let soft = soft_alpha(pixels, w, h, bg_color, threshold);
    let binary = soft.mapv(|a| if a >= BINARIZE_LEVEL { 255 } else { 0 });
    let opened = open3x3(&binary);
    let closed = close3x3(&opened);
    let filled = fill_holes(&closed);
    let feathered = feather_edges(&filled, feather_radius);

    for (px, &alpha) in pixels.chunks_exact_mut(4).zip(feathered.iter()) {
        px[3] = alpha;
    }
}

fn soft_alpha(pixels: &[u8], w: usize, h: usize, bg_color: RgbColor, threshold: f64) -> Array2<u8> {
    let soft_threshold = threshold * SOFT_THRESHOLD_RATIO;
    let span = threshold - soft_threshold;

    Array2::from_shape_fn((h, w), |(y, x)| {
        let dist = color_distance(pixel_at(pixels, w, x, y), bg_color);
        if dist <= soft_threshold {
            0
        } else if dist >= threshold {
            255
        } else {
            ((dist - soft_threshold) / span * 255.0).round() as u8
        }
    })
}

/// Removes a uniform background color keyed off the region's border.
#[derive(Debug, Clone, Default)]
pub struct ColorKeyRemover {
    config: MattingConfig,
}

impl ColorKeyRemover {
    pub fn new(config: MattingConfig) -> Self {
        Self { config }
    }
}

impl BackgroundRemover for ColorKeyRemover {
    fn remove_background(&self, region: &mut RgbaImage) -> BgRemovalOutcome {
        let (w, h) = (region.width() as usize, region.height() as usize);
        let cfg = &self.config;
        let pixels: &mut [u8] = region;

        let bg_color = estimate_bg_color(pixels, w, h, cfg.sample_inset);
        let border_variance = compute_border_variance(pixels, w, h, bg_color, cfg.sample_inset);
        let confidence = compute_bg_confidence(pixels, w, h, bg_color, cfg.threshold);

        let bg_removed = should_remove_bg_with(
            confidence.border_bg_ratio,
            Some(border_variance),
            cfg.confidence_cutoff,
            cfg.max_border_variance,
        );
        if bg_removed {
            apply_alpha_mask_with_radius(pixels, w, h, bg_color, cfg.threshold, cfg.feather_radius);
        } else {
            tracing::debug!(
                "Keeping background: border ratio {:.2}, border variance {:.1}",
                confidence.border_bg_ratio,
                border_variance
            );
        }

        BgRemovalOutcome {
            bg_removed,
            bg_color,
            confidence,
            border_variance,
        }
    }
}
