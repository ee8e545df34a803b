//! Scene rasterization with tiny-skia.
//!
//! Shape paths are converted element by element and drawn through the view
//! transform; fills use the even-odd rule and strokes have round caps and
//! joins. Edges are aliased and text boxes are not drawn.

use drawboard_core::Scene;
use drawboard_core::shapes::Shape;
use image::RgbaImage;
use kurbo::{Affine, BezPath, PathEl};
use peniko::Color;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Stroke, Transform,
};

/// Render the scene into a `width` x `height` buffer using its current view.
///
/// `background` is the already-rotated background image; it is painted with
/// its top-left corner at the logical origin.
pub fn render_scene(
    scene: &Scene,
    width: u32,
    height: u32,
    background: Option<&Pixmap>,
) -> RgbaImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        log::warn!("Cannot rasterize an empty {}x{} surface", width, height);
        return RgbaImage::new(width, height);
    };
    let bg = scene.background_color();
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

    let view = Affine::translate(scene.translation()) * Affine::scale(scene.zoom());
    let transform = to_transform(view);

    if let Some(image) = background {
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }

    for shape in scene.shapes_ordered() {
        if let Shape::Text(_) = shape {
            log::trace!("Skipping text object {}", shape.id());
            continue;
        }
        let Some(path) = to_skia_path(&shape.to_path()) else {
            continue;
        };
        let style = shape.style();

        if let Some(fill) = style.fill() {
            pixmap.fill_path(&path, &paint_for(fill), FillRule::EvenOdd, transform, None);
        }
        if style.stroke_width > 0.0 && !style.stroke_color.is_transparent() {
            let stroke = Stroke {
                width: style.stroke_width as f32,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint_for(style.stroke()), &stroke, transform, None);
        }
    }
    to_image(&pixmap)
}

/// Convert decoded pixels into a premultiplied pixmap.
pub fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, data).unwrap_or_else(|| RgbaImage::new(width, height))
}

fn paint_for(color: Color) -> Paint<'static> {
    let c = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = false;
    paint
}

fn to_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    // None for empty or degenerate paths.
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawboard_core::shapes::{Line, Rectangle, ShapeStyle};
    use drawboard_core::{Brush, SerializableColor};
    use image::Rgba;
    use kurbo::{Point, Vec2};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn pixel(image: &RgbaImage, x: u32, y: u32) -> Rgba<u8> {
        *image.get_pixel(x, y)
    }

    fn filled_square(at: Point, side: f64, color: SerializableColor) -> Shape {
        let mut rect = Rectangle::new(at, side, side);
        rect.style = ShapeStyle {
            stroke_color: SerializableColor::transparent(),
            stroke_width: 0.0,
            fill_color: Some(color),
        };
        Shape::Rectangle(rect)
    }

    #[test]
    fn test_background_color_fills_target() {
        let mut scene = Scene::new();
        scene.set_background_color(SerializableColor::new(10, 20, 30, 255));
        let out = render_scene(&scene, 4, 3, None);
        assert_eq!(out.dimensions(), (4, 3));
        assert!(out.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_empty_surface() {
        let out = render_scene(&Scene::new(), 0, 5, None);
        assert_eq!(out.dimensions(), (0, 5));
    }

    #[test]
    fn test_line_is_stroked() {
        let mut scene = Scene::new();
        let brush = Brush {
            width: 2.0,
            ..Brush::default()
        };
        scene.add(Shape::Line(Line::build(
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
            &brush,
        )));
        let out = render_scene(&scene, 10, 10, None);
        assert_eq!(pixel(&out, 5, 4), BLACK);
        assert_eq!(pixel(&out, 5, 5), BLACK);
        assert_eq!(pixel(&out, 5, 0), WHITE);
        assert_eq!(pixel(&out, 5, 9), WHITE);
    }

    #[test]
    fn test_filled_rect_respects_view() {
        let mut scene = Scene::new();
        scene.add(filled_square(Point::new(1.0, 1.0), 2.0, SerializableColor::black()));
        scene.set_zoom(2.0);
        scene.set_translation(Vec2::new(1.0, 0.0));

        // Logical (1,1)-(3,3) maps to device (3,2)-(7,6).
        let out = render_scene(&scene, 10, 10, None);
        assert_eq!(pixel(&out, 3, 2), BLACK);
        assert_eq!(pixel(&out, 6, 5), BLACK);
        assert_eq!(pixel(&out, 2, 2), WHITE);
        assert_eq!(pixel(&out, 7, 5), WHITE);
    }

    #[test]
    fn test_background_image_is_scaled() {
        let mut scene = Scene::new();
        scene.set_zoom(2.0);
        let image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        let background = to_pixmap(&image).unwrap();

        let out = render_scene(&scene, 6, 4, Some(&background));
        assert_eq!(pixel(&out, 3, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(pixel(&out, 4, 1), WHITE);
        assert_eq!(pixel(&out, 0, 2), WHITE);
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut scene = Scene::new();
        scene.add(filled_square(
            Point::ZERO,
            4.0,
            SerializableColor::new(0, 0, 0, 128),
        ));
        let p = pixel(&render_scene(&scene, 4, 4, None), 1, 1);
        assert!(p[0] > 120 && p[0] < 135, "{:?}", p);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_pixmap_round_trip_keeps_opaque_pixels() {
        let mut image = RgbaImage::from_pixel(2, 2, WHITE);
        image.put_pixel(1, 0, Rgba([9, 8, 7, 255]));
        let back = to_image(&to_pixmap(&image).unwrap());
        assert_eq!(back, image);
    }
}
