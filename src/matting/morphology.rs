//! 3x3 binary morphology on `0`/`255` masks.

use ndarray::Array2;

/// A pixel survives erosion only if its whole 3x3 neighborhood is set.
/// Out-of-bounds neighbors count as background.
pub(crate) fn erode3x3(mask: &Array2<u8>) -> Array2<u8> {
    let (h, w) = mask.dim();
    Array2::from_shape_fn((h, w), |(y, x)| {
        let mut min = 255u8;
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                match neighbor(x, y, dx, dy, w, h) {
                    Some((nx, ny)) => min = min.min(mask[[ny, nx]]),
                    None => min = 0,
                }
            }
        }
        min
    })
}

/// A pixel is set after dilation if any in-bounds 3x3 neighbor is set.
pub(crate) fn dilate3x3(mask: &Array2<u8>) -> Array2<u8> {
    let (h, w) = mask.dim();
    Array2::from_shape_fn((h, w), |(y, x)| {
        let mut max = 0u8;
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if let Some((nx, ny)) = neighbor(x, y, dx, dy, w, h) {
                    max = max.max(mask[[ny, nx]]);
                }
            }
        }
        max
    })
}

/// Erode then dilate: clears isolated specks.
pub(crate) fn open3x3(mask: &Array2<u8>) -> Array2<u8> {
    dilate3x3(&erode3x3(mask))
}

/// Dilate then erode: fills pinholes and hairline gaps.
pub(crate) fn close3x3(mask: &Array2<u8>) -> Array2<u8> {
    erode3x3(&dilate3x3(mask))
}

#[inline]
pub(crate) fn neighbor(
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
    w: usize,
    h: usize,
) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < w && ny < h).then_some((nx, ny))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_removes_single_pixel_speck() {
        let mut mask = Array2::<u8>::zeros((5, 5));
        mask[[2, 2]] = 255;
        assert!(open3x3(&mask).iter().all(|&v| v == 0));
    }

    #[test]
    fn close_fills_single_pixel_hole() {
        let mut mask = Array2::<u8>::from_elem((7, 7), 0);
        mask.slice_mut(ndarray::s![1..6, 1..6]).fill(255);
        mask[[3, 3]] = 0;
        assert_eq!(close3x3(&mask)[[3, 3]], 255);
    }

    #[test]
    fn erosion_treats_outside_as_background() {
        let mask = Array2::<u8>::from_elem((3, 3), 255);
        let eroded = erode3x3(&mask);
        assert_eq!(eroded[[1, 1]], 255);
        assert_eq!(eroded[[0, 0]], 0);
        assert_eq!(eroded[[0, 1]], 0);
    }

    #[test]
    fn dilation_ignores_outside() {
        let mut mask = Array2::<u8>::zeros((3, 3));
        mask[[0, 0]] = 255;
        let dilated = dilate3x3(&mask);
        assert_eq!(dilated[[1, 1]], 255);
        assert_eq!(dilated[[2, 2]], 0);
    }

    #[test]
    fn open_preserves_solid_block() {
        let mut mask = Array2::<u8>::zeros((10, 10));
        mask.slice_mut(ndarray::s![2..8, 2..8]).fill(255);
        assert_eq!(open3x3(&mask), mask);
        assert_eq!(close3x3(&mask), mask);
    }
}
