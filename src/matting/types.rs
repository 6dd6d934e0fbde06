use image::RgbaImage;

/// Color distance at or below which a pixel counts as background.
pub const BG_DISTANCE_THRESHOLD: f64 = 50.0;
/// Minimum fraction of background-like border pixels needed to remove the background.
pub const BG_CONFIDENCE_THRESHOLD: f64 = 0.85;
/// Border color spread above which removal is considered unsafe.
pub const BG_MAX_BG_VARIANCE: f64 = 50.0;
/// Box radius used when softening the silhouette edge.
pub const BG_EDGE_FEATHER_PX: usize = 1;
/// How far in from the region edge the background sample ring sits.
pub const BG_BORDER_SAMPLE_INSET_PX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color of the RGBA pixel at the start of `px`
    pub(crate) fn from_rgba(px: &[u8]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
        }
    }
}

/// How confidently a region's background can be removed.
///
/// `confidence` is the product of the two ratios and is kept for reporting.
/// The removal decision looks at `border_bg_ratio` only, so a large icon on a
/// clean background still qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BgConfidence {
    pub confidence: f64,
    pub border_bg_ratio: f64,
    pub overall_bg_ratio: f64,
}

/// Rectangle of the source image that a sprite is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedRegion {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Tuning for background removal. Defaults are the named constants above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MattingConfig {
    pub threshold: f64,
    pub confidence_cutoff: f64,
    pub max_border_variance: f64,
    pub feather_radius: usize,
    pub sample_inset: usize,
}

impl Default for MattingConfig {
    fn default() -> Self {
        Self {
            threshold: BG_DISTANCE_THRESHOLD,
            confidence_cutoff: BG_CONFIDENCE_THRESHOLD,
            max_border_variance: BG_MAX_BG_VARIANCE,
            feather_radius: BG_EDGE_FEATHER_PX,
            sample_inset: BG_BORDER_SAMPLE_INSET_PX,
        }
    }
}

/// Result of one background removal attempt on a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BgRemovalOutcome {
    pub bg_removed: bool,
    pub bg_color: RgbColor,
    pub confidence: BgConfidence,
    pub border_variance: f64,
}

/// Strategy for clearing a region's background
///
/// Implementations only touch the alpha channel and keep no state between
/// regions, so one remover can serve every region of an image in parallel.
pub trait BackgroundRemover: Sync {
    /// Remove the background of `region` in place, or leave it untouched
    /// and report why not.
    fn remove_background(&self, region: &mut RgbaImage) -> BgRemovalOutcome;
}
