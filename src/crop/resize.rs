use image::{imageops, RgbaImage};

pub const EXPORT_SIZE_MIN: u32 = 32;
pub const EXPORT_SIZE_MAX: u32 = 2048;

/// Size that fits within `target_px` on the longest side, keeping the aspect ratio.
///
/// Images that already fit are returned unchanged; nothing is upscaled.
pub fn compute_fit_within_dimensions(src_w: u32, src_h: u32, target_px: u32) -> (u32, u32) {
    let max_side = src_w.max(src_h);
    if max_side <= target_px {
        return (src_w, src_h);
    }

    let scale = target_px as f64 / max_side as f64;
    let w = (src_w as f64 * scale).round() as u32;
    let h = (src_h as f64 * scale).round() as u32;
    (w.max(1), h.max(1))
}

/// Downscale a sprite so its longest side is at most `target_px`
pub fn resize_to_fit(sprite: &RgbaImage, target_px: u32) -> RgbaImage {
    let _span = tracing::debug_span!("resize_to_fit", target_px).entered();

    let (src_w, src_h) = sprite.dimensions();
    let (w, h) = compute_fit_within_dimensions(src_w, src_h, target_px);
    if (w, h) == (src_w, src_h) {
        return sprite.clone();
    }

    imageops::resize(sprite, w, h, imageops::FilterType::Lanczos3)
}
