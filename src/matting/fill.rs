use std::collections::VecDeque;

use ndarray::Array2;

use super::morphology::neighbor;

/// Turn enclosed background into foreground.
///
/// Background pixels 4-connected to the region border are exterior and stay
/// `0`; every other background pixel is a hole and becomes `255`.
pub(crate) fn fill_holes(mask: &Array2<u8>) -> Array2<u8> {
    let (h, w) = mask.dim();
    let mut exterior = Array2::from_elem((h, w), false);
    let mut queue = VecDeque::with_capacity(2 * (w + h));

    let mut seed = |x: usize, y: usize, exterior: &mut Array2<bool>| {
        if mask[[y, x]] == 0 && !exterior[[y, x]] {
            exterior[[y, x]] = true;
            queue.push_back((x, y));
        }
    };
    for x in 0..w {
        seed(x, 0, &mut exterior);
        if h > 1 {
            seed(x, h - 1, &mut exterior);
        }
    }
    for y in 1..h.saturating_sub(1) {
        seed(0, y, &mut exterior);
        if w > 1 {
            seed(w - 1, y, &mut exterior);
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let Some((nx, ny)) = neighbor(x, y, dx, dy, w, h) else {
                continue;
            };
            if mask[[ny, nx]] == 0 && !exterior[[ny, nx]] {
                exterior[[ny, nx]] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    let mut filled = mask.clone();
    ndarray::Zip::from(&mut filled)
        .and(&exterior)
        .for_each(|v, &outside| {
            if *v == 0 && !outside {
                *v = 255;
            }
        });
    filled
}

/// Soften the silhouette edge of a binary mask.
///
/// Only boundary pixels, those with an opposite-valued pixel among their eight
/// neighbors, are replaced by the rounded mean of the `(2r+1)^2` box around
/// them. Everything else keeps its `0` or `255`.
pub(crate) fn feather_edges(mask: &Array2<u8>, radius: usize) -> Array2<u8> {
    let (h, w) = mask.dim();
    let mut out = mask.clone();

    for y in 0..h {
        for x in 0..w {
            if !is_boundary(mask, x, y) {
                continue;
            }

            let x0 = x.saturating_sub(radius);
            let y0 = y.saturating_sub(radius);
            let x1 = (x + radius + 1).min(w);
            let y1 = (y + radius + 1).min(h);
            let window = mask.slice(ndarray::s![y0..y1, x0..x1]);
            let sum: u32 = window.iter().map(|&v| v as u32).sum();
            out[[y, x]] = (sum as f64 / window.len() as f64).round() as u8;
        }
    }

    out
}

fn is_boundary(mask: &Array2<u8>, x: usize, y: usize) -> bool {
    let (h, w) = mask.dim();
    let value = mask[[y, x]];
    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if let Some((nx, ny)) = neighbor(x, y, dx, dy, w, h) {
                let other = mask[[ny, nx]];
                if (value == 0 && other == 255) || (value == 255 && other == 0) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    #[test]
    fn enclosed_background_becomes_foreground() {
        let mut mask = Array2::<u8>::zeros((9, 9));
        mask.slice_mut(s![2..7, 2..7]).fill(255);
        mask[[4, 4]] = 0;

        let filled = fill_holes(&mask);
        assert_eq!(filled[[4, 4]], 255);
        assert_eq!(filled[[0, 0]], 0);
        assert_eq!(filled[[1, 4]], 0);
    }

    #[test]
    fn diagonal_gap_does_not_leak() {
        // Ring closed only diagonally at the corners still encloses its center
        // under 4-connectivity.
        let mut mask = Array2::<u8>::zeros((5, 5));
        for (y, x) in [(1, 2), (2, 1), (2, 3), (3, 2)] {
            mask[[y, x]] = 255;
        }
        let filled = fill_holes(&mask);
        assert_eq!(filled[[2, 2]], 255);
        assert_eq!(filled[[1, 1]], 0);
    }

    #[test]
    fn background_touching_border_stays_clear() {
        let mut mask = Array2::<u8>::from_elem((5, 5), 255);
        mask[[0, 2]] = 0;
        mask[[1, 2]] = 0;
        mask[[2, 2]] = 0;
        let filled = fill_holes(&mask);
        assert_eq!(filled[[2, 2]], 0);
    }

    #[test]
    fn feather_only_touches_boundary() {
        let mut mask = Array2::<u8>::zeros((10, 10));
        mask.slice_mut(s![2..8, 2..8]).fill(255);

        let out = feather_edges(&mask, 1);
        assert_eq!(out[[0, 0]], 0);
        assert_eq!(out[[5, 5]], 255);
        // Corner of the block sees 4 of 9 set pixels.
        assert_eq!(out[[2, 2]], 113);
        // Side of the block sees 6 of 9.
        assert_eq!(out[[2, 5]], 170);
        // Pixel just outside a side sees 3 of 9.
        assert_eq!(out[[1, 5]], 85);
    }

    #[test]
    fn feather_window_clips_at_region_edge() {
        let mut mask = Array2::<u8>::zeros((3, 3));
        mask[[0, 0]] = 255;
        let out = feather_edges(&mask, 1);
        // 1 of the 4 in-bounds pixels is set.
        assert_eq!(out[[0, 0]], 64);
    }
}
