//! Bounding-box post-processing.
//!
//! Turns raw detector rectangles into a clean, integer, reading-ordered list.

mod filter;
mod kernel;
mod sort;
pub mod types;

pub use filter::{
    filter_by_min_area, filter_contained, filter_full_image, round_bbox, CONTAINMENT_TOLERANCE,
    FULL_IMAGE_AREA_THRESHOLD,
};
pub use kernel::{
    compute_close_kernel_size, MORPH_CLOSE_BASE_KERNEL, MORPH_CLOSE_MAX_KERNEL,
    MORPH_KERNEL_REFERENCE_DIM,
};
pub use sort::{sort_bboxes, ROW_SORT_TOLERANCE};
pub use types::{BBox, ImageDims, RawBBox};

/// Full pipeline: round, area filter, full-image filter, containment filter, sort.
///
/// The full-image filter only runs when `image_dims` is supplied.
pub fn process_bboxes(raw: &[RawBBox], min_area: u64, image_dims: Option<ImageDims>) -> Vec<BBox> {
    let _span = tracing::debug_span!("process_bboxes", candidates = raw.len()).entered();

    let rounded: Vec<BBox> = raw.iter().map(round_bbox).collect();
    let mut boxes = filter_by_min_area(&rounded, min_area);
    if let Some(dims) = image_dims {
        boxes = filter_full_image(&boxes, dims);
    }
    let boxes = filter_contained(&boxes);
    let sorted = sort_bboxes(&boxes);

    tracing::debug!("Kept {} of {} candidate boxes", sorted.len(), raw.len());
    sorted
}
