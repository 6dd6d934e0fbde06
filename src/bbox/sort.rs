use super::types::BBox;

/// Boxes whose top edges are within this many pixels of a row's first box share that row.
pub const ROW_SORT_TOLERANCE: u32 = 10;

/// Order boxes in reading order: rows top-to-bottom, each row left-to-right.
///
/// Rows are formed in a single pass over the boxes sorted by `y`. A box joins
/// the current row while its `y` is within [`ROW_SORT_TOLERANCE`] of the row's
/// anchor, which is the `y` of the first box placed in it. Both sorts are
/// stable, so equal keys keep their input order.
pub fn sort_bboxes(bboxes: &[BBox]) -> Vec<BBox> {
    let mut sorted = bboxes.to_vec();
    sorted.sort_by_key(|b| b.y);

    let mut rows: Vec<Vec<BBox>> = Vec::new();
    let mut anchor_y = 0;
    for bbox in sorted {
        if let Some(row) = rows.last_mut() {
            if bbox.y.abs_diff(anchor_y) <= ROW_SORT_TOLERANCE {
                row.push(bbox);
                continue;
            }
        }
        anchor_y = bbox.y;
        rows.push(vec![bbox]);
    }

    rows.into_iter()
        .flat_map(|mut row| {
            row.sort_by_key(|b| b.x);
            row
        })
        .collect()
}
