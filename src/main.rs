use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use spritecut::bbox::{self, ImageDims, RawBBox};
use spritecut::crop::{self, CropSettings, EXPORT_SIZE_MAX, EXPORT_SIZE_MIN, MAX_PADDING};
use spritecut::detect::{self, DetectionParams, Detector, DetectorLoader, ManualDetector};
use spritecut::export::{self, PngDirSink};
use spritecut::matting::{self, MattingConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sprite sheet to split
    input: PathBuf,

    /// Icon bounding box as x,y,w,h (repeatable)
    #[arg(long = "bbox", value_parser = detect::parse_bbox)]
    bboxes: Vec<RawBBox>,

    /// Drop boxes smaller than this area
    #[arg(long, default_value_t = detect::DEFAULT_MIN_AREA)]
    min_area: u64,

    /// Gap-closing kernel size for detection, 0 sizes it from the image
    #[arg(long, default_value_t = detect::DEFAULT_MERGE_GAP)]
    merge_gap: u32,

    /// Pixels of padding around each icon
    #[arg(long, default_value_t = crop::DEFAULT_PADDING,
          value_parser = clap::value_parser!(u32).range(0..=(MAX_PADDING as i64)))]
    padding: u32,

    /// Keep the original background
    #[arg(long)]
    no_bg_removal: bool,

    /// Downscale sprites so the longest side fits this size
    #[arg(long,
          value_parser = clap::value_parser!(u32).range((EXPORT_SIZE_MIN as i64)..=(EXPORT_SIZE_MAX as i64)))]
    export_size: Option<u32>,

    /// 1-based index of an icon to leave out (repeatable)
    #[arg(long = "exclude")]
    excluded: Vec<usize>,

    /// Directory the sprites are written to
    #[arg(short, long, default_value = "sprites")]
    output_dir: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("spritecut starting");

    let load_start = Instant::now();
    let source = image::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?
        .to_rgba8();
    let (width, height) = source.dimensions();
    tracing::info!("Sheet: {}x{} ({:.1}ms)", width, height, ms(load_start));

    let params = DetectionParams {
        min_area: args.min_area,
        merge_gap: args.merge_gap,
    };

    // Initialize detector
    let loader: DetectorLoader<Box<dyn Detector>> = DetectorLoader::new();
    let boxes = args.bboxes.clone();
    let detector = loader
        .get_or_init(|| Ok(Box::new(ManualDetector::new(boxes)) as Box<dyn Detector>))
        .context("Failed to initialize detector")?;
    tracing::info!(
        "Detector: {} (merge gap {})",
        detector.name(),
        params.effective_merge_gap(width, height)
    );

    let detect_start = Instant::now();
    let raw = detector
        .detect(&source, &params)
        .context("Failed to detect icons")?;
    let boxes = bbox::process_bboxes(&raw, params.min_area, Some(ImageDims::new(width, height)));
    tracing::info!(
        "Detected {} icons from {} candidates ({:.1}ms)",
        boxes.len(),
        raw.len(),
        ms(detect_start)
    );

    if detect::exceeds_detection_warning(boxes.len()) {
        tracing::warn!(
            "{} icons detected, more than {}; try raising --min-area",
            boxes.len(),
            detect::MAX_DETECTIONS_WARNING
        );
    }

    if boxes.is_empty() {
        tracing::warn!("No icons to export");
        return Ok(());
    }

    let settings = CropSettings {
        padding: args.padding,
        bg_removal: !args.no_bg_removal,
    };
    let remover = matting::create_default_remover(MattingConfig::default());

    let crop_start = Instant::now();
    let icons = crop::process_icons(&source, &boxes, &settings, remover.as_ref());
    let skipped = icons
        .iter()
        .filter(|icon| icon.bg_removal_skipped(&settings))
        .count();
    tracing::info!(
        "Cropped {} icons, background kept on {} ({:.1}ms)",
        icons.len(),
        skipped,
        ms(crop_start)
    );

    let excluded: HashSet<usize> = args
        .excluded
        .iter()
        .filter_map(|&n| n.checked_sub(1))
        .collect();

    // Write sprites
    let export_start = Instant::now();
    let mut sink = PngDirSink::new(&args.output_dir).context("Failed to prepare output directory")?;
    let written = export::export_icons(&icons, &excluded, &mut sink, args.export_size)
        .context("Failed to write sprites")?;
    tracing::info!(
        "Wrote {} sprites to {} ({:.1}ms)",
        written,
        sink.dir().display(),
        ms(export_start)
    );

    Ok(())
}

fn ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
