//! Decoding of the source animation into RGB frames.
//!
//! Container parsing is delegated to the `image` crate. GIFs are decoded with
//! its animation decoder so every frame comes out fully composited; any other
//! format it can read produces a single frame.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageFormat, ImageReader, RgbaImage};

use super::types::RasterFrame;
use crate::error::{ReelError, Result};

/// Load every frame of the image at `path`, in temporal order.
pub fn load_frames(path: &Path) -> Result<Vec<RasterFrame>> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| ReelError::SourceOpen {
            path: path.to_path_buf(),
            source,
        })?;

    let frames = match reader.format() {
        Some(ImageFormat::Gif) => {
            let file = File::open(path).map_err(|source| ReelError::SourceOpen {
                path: path.to_path_buf(),
                source,
            })?;
            let decoder = GifDecoder::new(BufReader::new(file))?;
            decoder
                .into_frames()
                .collect_frames()?
                .into_iter()
                .map(|frame| rgba_to_frame(frame.into_buffer()))
                .collect()
        }
        _ => vec![image_to_frame(reader.decode()?)],
    };

    log::debug!("Decoded {} frame(s) from {}", frames.len(), path.display());
    Ok(frames)
}

/// Convert a decoded image to an RGB frame, discarding alpha.
pub fn image_to_frame(image: DynamicImage) -> RasterFrame {
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();
    RasterFrame::rgb(rgb.into_raw(), width, height)
}

fn rgba_to_frame(buffer: RgbaImage) -> RasterFrame {
    image_to_frame(DynamicImage::ImageRgba8(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn test_image_to_frame_drops_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([10, 20, 30, 0]));
        img.put_pixel(1, 0, image::Rgba([40, 50, 60, 255]));
        let frame = image_to_frame(DynamicImage::ImageRgba8(img));
        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 1);
        assert_eq!(frame.data, vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_load_still_png_yields_one_frame() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("still.png");
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([255, 0, 0]));
        img.save(&path).unwrap();

        let frames = load_frames(&path).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].width, 3);
        assert_eq!(frames[0].height, 2);
        assert_eq!(&frames[0].data[15..18], &[255, 0, 0]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_frames(Path::new("/nonexistent/anim.gif")).unwrap_err();
        assert!(matches!(err, ReelError::SourceOpen { .. }));
    }
}
