use super::types::RgbColor;

/// Euclidean distance between two colors in RGB space.
#[inline]
pub fn color_distance(a: RgbColor, b: RgbColor) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Coordinates of the one-pixel ring `inset` pixels in from the region edge.
///
/// `inset` is clamped to `(min(w, h) - 1) / 2` so tiny regions still yield a
/// ring. Each pixel is visited once: the top and bottom rows first, then the
/// left and right columns without their corners.
pub(crate) fn border_ring(w: usize, h: usize, inset: usize) -> Vec<(usize, usize)> {
    let i = inset.min(w.min(h).saturating_sub(1) / 2);
    let mut ring = Vec::new();

    for x in i..w.saturating_sub(i) {
        ring.push((x, i));
        if h > 1 + 2 * i {
            ring.push((x, h - 1 - i));
        }
    }
    for y in (i + 1)..h.saturating_sub(1 + i) {
        ring.push((i, y));
        if w > 1 + 2 * i {
            ring.push((w - 1 - i, y));
        }
    }

    ring
}

/// Number of whole `w`-pixel RGBA rows, at most `h`, that fit in `len` bytes.
#[inline]
pub(crate) fn clamp_rows(len: usize, w: usize, h: usize) -> usize {
    h.min(len / (4 * w.max(1)))
}

#[inline]
pub(crate) fn pixel_at(pixels: &[u8], w: usize, x: usize, y: usize) -> RgbColor {
    let i = (y * w + x) * 4;
    RgbColor::from_rgba(&pixels[i..i + 4])
}

/// Estimate the background color as the mean of the sample ring.
///
/// Returns black when the ring is empty (zero-sized region). Rows past the
/// end of `pixels` are ignored.
pub fn estimate_bg_color(pixels: &[u8], w: usize, h: usize, inset: usize) -> RgbColor {
    let h = clamp_rows(pixels.len(), w, h);
    let ring = border_ring(w, h, inset);
    if ring.is_empty() {
        return RgbColor::default();
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for &(x, y) in &ring {
        let c = pixel_at(pixels, w, x, y);
        r += c.r as u64;
        g += c.g as u64;
        b += c.b as u64;
    }

    let n = ring.len() as f64;
    RgbColor {
        r: (r as f64 / n).round() as u8,
        g: (g as f64 / n).round() as u8,
        b: (b as f64 / n).round() as u8,
    }
}

/// Population standard deviation of the sample ring's distance to `bg_color`.
///
/// A high value means the border is patterned or multi-colored.
pub fn compute_border_variance(
    pixels: &[u8],
    w: usize,
    h: usize,
    bg_color: RgbColor,
    inset: usize,
) -> f64 {
    let h = clamp_rows(pixels.len(), w, h);
    let distances: Vec<f64> = border_ring(w, h, inset)
        .into_iter()
        .map(|(x, y)| color_distance(pixel_at(pixels, w, x, y), bg_color))
        .collect();
    if distances.is_empty() {
        return 0.0;
    }

    let n = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / n;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
