//! Split a sprite sheet into individual transparent sprites.

pub mod bbox;
pub mod crop;
pub mod detect;
pub mod error;
pub mod export;
pub mod matting;

pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use image::{Rgba, RgbaImage};

    use crate::bbox::{process_bboxes, ImageDims, RawBBox};
    use crate::crop::{process_icons, CropSettings};
    use crate::detect::{parse_bbox, DetectionParams, Detector, ManualDetector};
    use crate::export::{export_icons, SpriteSink};
    use crate::matting::{create_default_remover, MattingConfig};

    struct Collect(Vec<(String, RgbaImage)>);

    impl SpriteSink for Collect {
        fn write_sprite(&mut self, name: &str, sprite: &RgbaImage) -> crate::Result<()> {
            self.0.push((name.to_string(), sprite.clone()));
            Ok(())
        }

        fn written(&self) -> usize {
            self.0.len()
        }
    }

    /// 200x100 off-white sheet with three 30x30 icons: two on the top row, one below.
    fn sheet() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(200, 100, Rgba([245, 245, 240, 255]));
        let icons = [
            (120, 10, [30, 160, 30]),
            (20, 12, [200, 30, 30]),
            (60, 60, [30, 30, 200]),
        ];
        for (x0, y0, rgb) in icons {
            for y in y0..y0 + 30 {
                for x in x0..x0 + 30 {
                    img.put_pixel(x, y, Rgba([rgb[0], rgb[1], rgb[2], 255]));
                }
            }
        }
        img
    }

    #[test]
    fn sheet_is_split_into_ordered_transparent_sprites() {
        let source = sheet();
        let (w, h) = source.dimensions();

        let detector = ManualDetector::new(vec![
            parse_bbox("119.6,9.8,30.2,30").unwrap(),
            parse_bbox("60,60,30,30").unwrap(),
            parse_bbox("20,12,30,30").unwrap(),
            // nested inside the red icon
            parse_bbox("25,15,20,20").unwrap(),
            // too small
            parse_bbox("2,2,5,5").unwrap(),
            // whole sheet
            parse_bbox("0,0,200,100").unwrap(),
        ]);
        let params = DetectionParams::default();
        let raw = detector.detect(&source, &params).unwrap();
        let boxes = process_bboxes(&raw, params.min_area, Some(ImageDims::new(w, h)));

        let origins: Vec<_> = boxes.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(origins, vec![(20, 12), (119, 9), (60, 60)]);

        let remover = create_default_remover(MattingConfig::default());
        let settings = CropSettings::default();
        let icons = process_icons(&source, &boxes, &settings, remover.as_ref());
        assert_eq!(icons.len(), 3);
        assert!(icons.iter().all(|icon| icon.bg_removed));

        let red = &icons[0].image;
        assert_eq!(red.dimensions(), (38, 38));
        assert_eq!(red.get_pixel(0, 0)[3], 0);
        assert_eq!(red.get_pixel(19, 19), &Rgba([200, 30, 30, 255]));

        let mut sink = Collect(Vec::new());
        let written = export_icons(&icons, &HashSet::from([1]), &mut sink, Some(32)).unwrap();
        assert_eq!(written, 2);
        assert_eq!(sink.written(), 2);
        assert_eq!(sink.0[0].0, "icon-1.png");
        assert_eq!(sink.0[1].0, "icon-2.png");
        assert!(sink.0.iter().all(|(_, s)| s.width() <= 32 && s.height() <= 32));
    }

    #[test]
    fn disabled_removal_exports_opaque_crops() {
        let source = sheet();
        let boxes = process_bboxes(&[RawBBox::new(60.0, 60.0, 30.0, 30.0)], 0, None);
        let settings = CropSettings {
            padding: 0,
            bg_removal: false,
        };
        let remover = create_default_remover(MattingConfig::default());
        let icons = process_icons(&source, &boxes, &settings, remover.as_ref());

        assert!(!icons[0].bg_removed);
        assert!(!icons[0].bg_removal_skipped(&settings));
        assert!(icons[0].image.pixels().all(|p| *p == Rgba([30, 30, 200, 255])));
    }
}
