//! Cut padded icon regions out of a source image and clear their backgrounds.

mod resize;

pub use resize::{compute_fit_within_dimensions, resize_to_fit, EXPORT_SIZE_MAX, EXPORT_SIZE_MIN};

use image::{imageops, RgbaImage};
use rayon::prelude::*;

use crate::bbox::BBox;
use crate::matting::{compute_padded_region, BackgroundRemover, PaddedRegion};

pub const DEFAULT_PADDING: u32 = 4;
pub const MAX_PADDING: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSettings {
    /// Pixels added around each box before cropping, capped at [`MAX_PADDING`]
    pub padding: u32,
    /// When false the background remover is never invoked
    pub bg_removal: bool,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            bg_removal: true,
        }
    }
}

impl CropSettings {
    pub fn effective_padding(&self) -> u32 {
        self.padding.min(MAX_PADDING)
    }
}

/// One extracted sprite and how its background was handled.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedIcon {
    pub index: usize,
    pub bbox: BBox,
    pub region: PaddedRegion,
    pub image: RgbaImage,
    pub padding_applied: u32,
    pub bg_removed: bool,
    /// Product of the border and overall background ratios, for reporting
    pub bg_confidence: f64,
    /// Share of border pixels matching the background, the removal signal
    pub border_bg_ratio: f64,
}

impl CroppedIcon {
    /// Removal was requested but judged unsafe for this region.
    pub fn bg_removal_skipped(&self, settings: &CropSettings) -> bool {
        settings.bg_removal && !self.bg_removed
    }
}

/// Copy of the pixels inside `region`
pub fn extract_region(source: &RgbaImage, region: &PaddedRegion) -> RgbaImage {
    imageops::crop_imm(source, region.x, region.y, region.w, region.h).to_image()
}

/// Crop every box out of `source`, removing backgrounds where it is safe.
///
/// Regions are independent and processed in parallel. The output keeps the
/// order of `bboxes`, and `index` is the position in that slice.
pub fn process_icons(
    source: &RgbaImage,
    bboxes: &[BBox],
    settings: &CropSettings,
    remover: &dyn BackgroundRemover,
) -> Vec<CroppedIcon> {
    let _span = tracing::debug_span!("process_icons", count = bboxes.len()).entered();
    let (img_w, img_h) = source.dimensions();
    let padding = settings.effective_padding();

    bboxes
        .par_iter()
        .enumerate()
        .map(|(index, bbox)| {
            let region = compute_padded_region(bbox, padding, img_w, img_h);
            let mut image = extract_region(source, &region);

            let (bg_removed, bg_confidence, border_bg_ratio) = if settings.bg_removal {
                let outcome = remover.remove_background(&mut image);
                if !outcome.bg_removed {
                    tracing::warn!(
                        "Background removal skipped for icon {}: border ratio {:.2}, variance {:.1}",
                        index + 1,
                        outcome.confidence.border_bg_ratio,
                        outcome.border_variance
                    );
                }
                (
                    outcome.bg_removed,
                    outcome.confidence.confidence,
                    outcome.confidence.border_bg_ratio,
                )
            } else {
                (false, 0.0, 0.0)
            };

            CroppedIcon {
                index,
                bbox: *bbox,
                region,
                image,
                padding_applied: padding,
                bg_removed,
                bg_confidence,
                border_bg_ratio,
            }
        })
        .collect()
}
