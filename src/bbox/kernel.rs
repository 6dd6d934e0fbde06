/// Kernel size at the reference resolution.
pub const MORPH_CLOSE_BASE_KERNEL: u32 = 3;
/// Geometric mean of the reference resolution, sqrt(400 * 300).
pub const MORPH_KERNEL_REFERENCE_DIM: f64 = 346.0;
pub const MORPH_CLOSE_MAX_KERNEL: u32 = 15;

/// Size of the gap-closing structuring element for an image of the given size.
///
/// Scales linearly with the geometric mean of the dimensions, clamped to
/// `[MORPH_CLOSE_BASE_KERNEL, MORPH_CLOSE_MAX_KERNEL]`, and always odd.
pub fn compute_close_kernel_size(width: u32, height: u32) -> u32 {
    let geomean = (width as f64 * height as f64).sqrt();
    let raw = (MORPH_CLOSE_BASE_KERNEL as f64 * geomean / MORPH_KERNEL_REFERENCE_DIM).round() as u32;
    let clamped = raw.clamp(MORPH_CLOSE_BASE_KERNEL, MORPH_CLOSE_MAX_KERNEL);
    if clamped % 2 == 0 {
        clamped + 1
    } else {
        clamped
    }
}
