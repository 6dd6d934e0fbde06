use super::types::{BBox, ImageDims, RawBBox};

/// Boxes covering at least this fraction of the image are whole-image detections.
pub const FULL_IMAGE_AREA_THRESHOLD: f64 = 0.9;

/// Slack, in pixels, allowed when testing whether one box sits inside another.
pub const CONTAINMENT_TOLERANCE: i64 = 5;

/// Snap a detector box to integer pixels.
///
/// The origin is floored and the extent ceiled, so the result always covers
/// the fractional input. Negative and NaN values saturate to 0.
pub fn round_bbox(raw: &RawBBox) -> BBox {
    BBox {
        x: raw.x.floor() as u32,
        y: raw.y.floor() as u32,
        w: raw.w.ceil() as u32,
        h: raw.h.ceil() as u32,
    }
}

/// Keep boxes whose area is at least `min_area`.
pub fn filter_by_min_area(bboxes: &[BBox], min_area: u64) -> Vec<BBox> {
    bboxes
        .iter()
        .filter(|b| b.area() >= min_area)
        .copied()
        .collect()
}

/// Drop boxes that cover [`FULL_IMAGE_AREA_THRESHOLD`] or more of the image.
///
/// An image with zero area carries no size information, so nothing is dropped.
pub fn filter_full_image(bboxes: &[BBox], dims: ImageDims) -> Vec<BBox> {
    let image_area = dims.area();
    if image_area == 0 {
        return bboxes.to_vec();
    }

    bboxes
        .iter()
        .filter(|b| (b.area() as f64 / image_area as f64) < FULL_IMAGE_AREA_THRESHOLD)
        .copied()
        .collect()
}

/// Drop every box that lies inside a strictly larger box, allowing
/// [`CONTAINMENT_TOLERANCE`] pixels of overhang on each side.
///
/// Boxes of equal area never remove each other, so exact duplicates both survive.
pub fn filter_contained(bboxes: &[BBox]) -> Vec<BBox> {
    if bboxes.len() <= 1 {
        return bboxes.to_vec();
    }

    bboxes
        .iter()
        .filter(|a| !bboxes.iter().any(|b| contains_with_tolerance(b, a)))
        .copied()
        .collect()
}

fn contains_with_tolerance(outer: &BBox, inner: &BBox) -> bool {
    if outer.area() <= inner.area() {
        return false;
    }

    let tol = CONTAINMENT_TOLERANCE;
    inner.x as i64 >= outer.x as i64 - tol
        && inner.y as i64 >= outer.y as i64 - tol
        && inner.right() <= outer.right() + tol
        && inner.bottom() <= outer.bottom() + tol
}
