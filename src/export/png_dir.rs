use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use super::SpriteSink;
use crate::error::{Error, Result};

/// Writes each sprite as a PNG file into one directory
pub struct PngDirSink {
    dir: PathBuf,
    written: usize,
}

impl PngDirSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tracing::info!("Writing sprites to {}", dir.display());

        fs::create_dir_all(&dir).map_err(|err| Error::Io(dir.clone(), err))?;

        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SpriteSink for PngDirSink {
    fn write_sprite(&mut self, name: &str, sprite: &RgbaImage) -> Result<()> {
        let path = self.dir.join(name);
        tracing::debug!("Writing {}", path.display());

        sprite.save_with_format(&path, ImageFormat::Png)?;
        self.written += 1;
        Ok(())
    }

    fn written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn writes_png_files_into_directory() {
        let dir = std::env::temp_dir().join(format!("spritecut-png-dir-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut sink = PngDirSink::new(&dir).unwrap();
        let sprite = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 0]));
        sink.write_sprite("icon-1.png", &sprite).unwrap();

        assert_eq!(sink.written(), 1);
        let back = image::open(sink.dir().join("icon-1.png")).unwrap().to_rgba8();
        assert_eq!(back, sprite);

        fs::remove_dir_all(&dir).unwrap();
    }
}
