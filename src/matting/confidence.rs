use super::color::{border_ring, clamp_rows, color_distance, pixel_at};
use super::types::{BgConfidence, RgbColor, BG_CONFIDENCE_THRESHOLD, BG_MAX_BG_VARIANCE};

/// Score how cleanly `bg_color` describes the region.
///
/// A pixel is background-like when its distance to `bg_color` is at most
/// `threshold`. The border ratio is taken over the outermost ring, the
/// overall ratio over every pixel. Rows past the end of `pixels` are ignored.
pub fn compute_bg_confidence(
    pixels: &[u8],
    w: usize,
    h: usize,
    bg_color: RgbColor,
    threshold: f64,
) -> BgConfidence {
    let h = clamp_rows(pixels.len(), w, h);
    let is_bg = |x: usize, y: usize| color_distance(pixel_at(pixels, w, x, y), bg_color) <= threshold;

    let border = border_ring(w, h, 0);
    let border_bg = border.iter().filter(|&&(x, y)| is_bg(x, y)).count();

    let overall_total = w * h;
    let overall_bg = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| is_bg(x, y))
        .count();

    let border_bg_ratio = ratio(border_bg, border.len());
    let overall_bg_ratio = ratio(overall_bg, overall_total);

    BgConfidence {
        confidence: border_bg_ratio * overall_bg_ratio,
        border_bg_ratio,
        overall_bg_ratio,
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Decide whether the background can be removed, using the default cutoffs.
///
/// A border variance above [`BG_MAX_BG_VARIANCE`] always vetoes removal.
pub fn should_remove_bg(border_bg_ratio: f64, border_variance: Option<f64>) -> bool {
    should_remove_bg_with(
        border_bg_ratio,
        border_variance,
        BG_CONFIDENCE_THRESHOLD,
        BG_MAX_BG_VARIANCE,
    )
}

pub(crate) fn should_remove_bg_with(
    border_bg_ratio: f64,
    border_variance: Option<f64>,
    confidence_cutoff: f64,
    max_border_variance: f64,
) -> bool {
    if border_variance.is_some_and(|v| v > max_border_variance) {
        return false;
    }
    border_bg_ratio >= confidence_cutoff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matting::test_util::{fill_rect, solid};
    use crate::matting::types::BG_DISTANCE_THRESHOLD;

    #[test]
    fn uniform_region_is_fully_confident() {
        let px = solid(10, 10, [200, 200, 200]);
        let c = compute_bg_confidence(&px, 10, 10, RgbColor::new(200, 200, 200), BG_DISTANCE_THRESHOLD);
        assert_eq!(c.confidence, 1.0);
        assert_eq!(c.border_bg_ratio, 1.0);
        assert_eq!(c.overall_bg_ratio, 1.0);
    }

    #[test]
    fn icon_heavy_region_has_low_product() {
        let mut px = solid(10, 10, [200, 200, 200]);
        fill_rect(&mut px, 10, (1, 1, 9, 9), [0, 0, 0]);
        let c = compute_bg_confidence(&px, 10, 10, RgbColor::new(200, 200, 200), BG_DISTANCE_THRESHOLD);
        assert_eq!(c.border_bg_ratio, 1.0);
        assert!((c.overall_bg_ratio - 0.36).abs() < 1e-9);
        assert!(c.confidence < 0.85);
    }

    #[test]
    fn threshold_is_inclusive() {
        let px = solid(2, 2, [50, 0, 0]);
        let c = compute_bg_confidence(&px, 2, 2, RgbColor::new(0, 0, 0), 50.0);
        assert_eq!(c.overall_bg_ratio, 1.0);
        let c = compute_bg_confidence(&px, 2, 2, RgbColor::new(0, 0, 0), 49.9);
        assert_eq!(c.overall_bg_ratio, 0.0);
    }

    #[test]
    fn empty_region_scores_zero() {
        let c = compute_bg_confidence(&[], 0, 0, RgbColor::default(), BG_DISTANCE_THRESHOLD);
        assert_eq!(c, BgConfidence::default());
    }

    #[test]
    fn short_buffer_scores_complete_rows() {
        let px = solid(3, 2, [200, 200, 200]);
        let c = compute_bg_confidence(&px, 3, 5, RgbColor::new(200, 200, 200), BG_DISTANCE_THRESHOLD);
        assert_eq!(c.border_bg_ratio, 1.0);
        assert_eq!(c.overall_bg_ratio, 1.0);
    }

    #[test]
    fn gate_uses_ratio_cutoff() {
        assert!(should_remove_bg(0.85, None));
        assert!(should_remove_bg(0.95, None));
        assert!(!should_remove_bg(0.84, None));
    }

    #[test]
    fn gate_vetoes_noisy_border() {
        assert!(!should_remove_bg(0.95, Some(55.0)));
        assert!(!should_remove_bg(1.0, Some(50.1)));
        assert!(should_remove_bg(0.95, Some(50.0)));
        assert!(should_remove_bg(0.95, Some(10.0)));
    }
}
