use super::types::PaddedRegion;
use crate::bbox::BBox;

/// Grow `bbox` by `padding` on every side and clamp each edge to the image.
///
/// Edges saturate at the image border; a box lying entirely outside the
/// image collapses to zero width or height instead of inverting.
pub fn compute_padded_region(
    bbox: &BBox,
    padding: u32,
    image_width: u32,
    image_height: u32,
) -> PaddedRegion {
    let x = bbox.x.saturating_sub(padding);
    let y = bbox.y.saturating_sub(padding);
    let right = (bbox.right() + padding as i64).min(image_width as i64);
    let bottom = (bbox.bottom() + padding as i64).min(image_height as i64);

    PaddedRegion {
        x,
        y,
        w: (right - x as i64).max(0) as u32,
        h: (bottom - y as i64).max(0) as u32,
    }
}
