/// Opaque `w`x`h` RGBA buffer of one color.
pub(crate) fn solid(w: usize, h: usize, rgb: [u8; 3]) -> Vec<u8> {
    let mut px = Vec::with_capacity(w * h * 4);
    for _ in 0..w * h {
        px.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    px
}

/// Paint the half-open rectangle `[x0, x1) x [y0, y1)`.
pub(crate) fn fill_rect(
    px: &mut [u8],
    w: usize,
    (x0, y0, x1, y1): (usize, usize, usize, usize),
    rgb: [u8; 3],
) {
    for y in y0..y1 {
        for x in x0..x1 {
            let i = (y * w + x) * 4;
            px[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

pub(crate) fn alpha_at(px: &[u8], w: usize, x: usize, y: usize) -> u8 {
    px[(y * w + x) * 4 + 3]
}
