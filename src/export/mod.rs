mod png_dir;

pub use png_dir::PngDirSink;

use std::collections::HashSet;

use image::RgbaImage;

use crate::crop::{resize_to_fit, CroppedIcon};
use crate::error::Result;

/// Trait for sprite destinations
pub trait SpriteSink {
    /// Write one finished sprite under `name`
    fn write_sprite(&mut self, name: &str, sprite: &RgbaImage) -> Result<()>;

    /// Number of sprites written so far
    fn written(&self) -> usize;
}

/// File name for the `index`-th of `total` sprites: `icon-07.png` when `total` has two digits.
pub fn generate_filename(index: usize, total: usize) -> String {
    let width = total.to_string().len();
    format!("icon-{:0width$}.png", index + 1, width = width)
}

/// Write every icon not listed in `excluded` to `sink`.
///
/// Included icons are renumbered consecutively. When `export_size` is set,
/// sprites larger than it are scaled down to fit. Returns the number written.
pub fn export_icons<S: SpriteSink + ?Sized>(
    icons: &[CroppedIcon],
    excluded: &HashSet<usize>,
    sink: &mut S,
    export_size: Option<u32>,
) -> Result<usize> {
    let _span = tracing::debug_span!("export_icons").entered();

    let included: Vec<&CroppedIcon> = icons
        .iter()
        .filter(|icon| !excluded.contains(&icon.index))
        .collect();

    for (i, icon) in included.iter().enumerate() {
        let name = generate_filename(i, included.len());
        match export_size {
            Some(size) => sink.write_sprite(&name, &resize_to_fit(&icon.image, size))?,
            None => sink.write_sprite(&name, &icon.image)?,
        }
    }

    tracing::info!(
        "Exported {} sprites ({} excluded)",
        included.len(),
        icons.len() - included.len()
    );
    Ok(included.len())
}
