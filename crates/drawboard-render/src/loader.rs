//! Image loading from `data:` URIs and local paths.

use crate::error::{RenderError, RenderResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use drawboard_core::Orientation;
use image::{RgbaImage, imageops};
use std::path::Path;

/// Decode an image source into RGBA pixels.
///
/// Accepts `data:<mime>;base64,<payload>` URIs, `file://` URLs and plain
/// filesystem paths.
pub fn load_image(src: &str) -> RenderResult<RgbaImage> {
    if let Some(rest) = src.strip_prefix("data:") {
        let bytes = decode_data_uri(rest)?;
        return Ok(image::load_from_memory(&bytes)?.to_rgba8());
    }

    let path = Path::new(src.strip_prefix("file://").unwrap_or(src));
    if !path.is_file() {
        return Err(RenderError::NotFound(src.to_string()));
    }
    Ok(image::open(path)?.to_rgba8())
}

fn decode_data_uri(rest: &str) -> RenderResult<Vec<u8>> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::InvalidDataUri("missing ','".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(RenderError::InvalidDataUri(format!(
            "unsupported encoding in '{}'",
            header
        )));
    }
    Ok(STANDARD.decode(payload.trim())?)
}

/// Natural size of an image, or `(0, 0)` when it cannot be read.
pub fn image_dimensions(src: &str) -> (u32, u32) {
    let result = if src.starts_with("data:") {
        load_image(src).map(|img| img.dimensions())
    } else {
        let path = Path::new(src.strip_prefix("file://").unwrap_or(src));
        image::image_dimensions(path).map_err(RenderError::from)
    };
    result.unwrap_or_else(|e| {
        log::debug!("Could not read dimensions of {}: {}", src, e);
        (0, 0)
    })
}

/// Rotate decoded pixels clockwise to match an orientation.
pub fn orient(image: RgbaImage, orientation: Orientation) -> RgbaImage {
    match orientation {
        Orientation::Upright => image,
        Orientation::Quarter => imageops::rotate90(&image),
        Orientation::Half => imageops::rotate180(&image),
        Orientation::ThreeQuarter => imageops::rotate270(&image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_load_data_uri() {
        let source = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(&source)));
        let loaded = load_image(&uri).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
        assert_eq!(image_dimensions(&uri), (3, 2));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        RgbaImage::from_pixel(4, 5, Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();
        let src = path.to_str().unwrap();

        assert_eq!(load_image(src).unwrap().dimensions(), (4, 5));
        assert_eq!(image_dimensions(src), (4, 5));
        assert_eq!(image_dimensions(&format!("file://{}", src)), (4, 5));
    }

    #[test]
    fn test_missing_and_malformed() {
        assert!(matches!(
            load_image("/definitely/not/here.png"),
            Err(RenderError::NotFound(_))
        ));
        assert!(matches!(
            load_image("data:image/png,rawbytes"),
            Err(RenderError::InvalidDataUri(_))
        ));
        assert!(matches!(
            load_image("data:image/png;base64,@@@"),
            Err(RenderError::Base64(_))
        ));
        assert_eq!(image_dimensions("/definitely/not/here.png"), (0, 0));
    }

    #[test]
    fn test_orient_swaps_sides() {
        let mut image = RgbaImage::new(3, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let rotated = orient(image.clone(), Orientation::Quarter);
        assert_eq!(rotated.dimensions(), (1, 3));
        // Clockwise: the left end moves to the top.
        assert_eq!(rotated.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));

        let flipped = orient(image, Orientation::Half);
        assert_eq!(flipped.get_pixel(2, 0), &Rgba([255, 0, 0, 255]));
    }
}
