/// Candidate rectangle as produced by a detector, in image pixel space.
/// Fields may be fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawBBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RawBBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Integer bounding box, the output of normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }
}

impl From<BBox> for RawBBox {
    fn from(b: BBox) -> Self {
        Self {
            x: b.x as f64,
            y: b.y as f64,
            w: b.w as f64,
            h: b.h as f64,
        }
    }
}

/// Source image size. `(0, 0)` means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageDims {
    pub width: u32,
    pub height: u32,
}

impl ImageDims {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
