//! Raster encoding into `data:` URIs.

use crate::error::RenderResult;
use base64::{Engine, engine::general_purpose::STANDARD};
use drawboard_core::{ExportFormat, ExportOptions};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

/// Encode pixels with the requested format and quality.
pub fn encode(pixels: &RgbaImage, options: &ExportOptions) -> RenderResult<Vec<u8>> {
    match options.format {
        ExportFormat::Jpeg => encode_jpeg(pixels, options.quality),
        ExportFormat::Png => encode_png(pixels),
    }
}

/// Wrap encoded bytes in a base64 `data:` URI.
pub fn to_data_uri(bytes: &[u8], format: ExportFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

fn encode_jpeg(pixels: &RgbaImage, quality: f32) -> RenderResult<Vec<u8>> {
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
    let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;

    let mut jpeg_data = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg_data, quality);
    encoder.encode_image(&rgb)?;
    Ok(jpeg_data)
}

fn encode_png(pixels: &RgbaImage) -> RenderResult<Vec<u8>> {
    let (width, height) = pixels.dimensions();
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels.as_raw())?;
    }
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn decode_uri(uri: &str, prefix: &str) -> DynamicImage {
        let payload = uri.strip_prefix(prefix).unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn test_jpeg_data_uri() {
        let pixels = RgbaImage::from_pixel(8, 4, Rgba([200, 100, 50, 255]));
        let options = ExportOptions::default();
        let uri = to_data_uri(&encode(&pixels, &options).unwrap(), options.format);
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let decoded = decode_uri(&uri, "data:image/jpeg;base64,");
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_png_is_lossless() {
        let mut pixels = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        pixels.put_pixel(1, 1, Rgba([1, 2, 3, 4]));
        let options = ExportOptions {
            format: ExportFormat::Png,
            ..ExportOptions::default()
        };
        let uri = to_data_uri(&encode(&pixels, &options).unwrap(), options.format);
        let decoded = decode_uri(&uri, "data:image/png;base64,").to_rgba8();
        assert_eq!(decoded, pixels);
    }
}
