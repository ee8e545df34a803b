//! Built-in annotation marks, registered as custom draws.
//!
//! | mark        | kind | trigger |
//! |-------------|------|---------|
//! | arrow       | path | move    |
//! | check       | path | up      |
//! | cross       | path | up      |
//! | grade stamp | text | up      |

use crate::custom::{CustomDraw, Trigger};
use crate::shapes::{PathOptions, TextOptions};
use kurbo::Point;

/// Arrowhead length in logical units.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;
/// Angle between each arrowhead side and the shaft, in degrees.
pub const ARROW_HEAD_ANGLE: f64 = 30.0;
/// Half-size of the check and cross marks.
pub const MARK_SIZE: f64 = 20.0;
/// Width and font size of grade stamps.
pub const STAMP_SIZE: f64 = 40.0;

/// Shaft from `from` to `to` with a two-sided head at `to`.
pub fn arrow_path(from: Point, to: Point) -> String {
    let angle = (from.y - to.y).atan2(from.x - to.x).to_degrees();
    let top = (angle + ARROW_HEAD_ANGLE).to_radians();
    let bottom = (angle - ARROW_HEAD_ANGLE).to_radians();
    let (top_x, top_y) = (ARROW_HEAD_LENGTH * top.cos(), ARROW_HEAD_LENGTH * top.sin());
    let (bot_x, bot_y) = (ARROW_HEAD_LENGTH * bottom.cos(), ARROW_HEAD_LENGTH * bottom.sin());

    format!(
        " M {} {} L {} {} M {} {} L {} {} L {} {}",
        from.x,
        from.y,
        to.x,
        to.y,
        to.x + top_x,
        to.y + top_y,
        to.x,
        to.y,
        to.x + bot_x,
        to.y + bot_y,
    )
}

/// Check mark whose vertex sits at `at`.
pub fn check_path(at: Point) -> String {
    format!(
        "M {} {} L {} {} L {} {}",
        at.x - MARK_SIZE,
        at.y - MARK_SIZE,
        at.x,
        at.y,
        at.x + MARK_SIZE * 2.0,
        at.y - MARK_SIZE * 2.0,
    )
}

/// Cross centered on `at`.
pub fn cross_path(at: Point) -> String {
    format!(
        "M {} {} L {} {} M {} {} L {} {}",
        at.x - MARK_SIZE,
        at.y - MARK_SIZE,
        at.x + MARK_SIZE,
        at.y + MARK_SIZE,
        at.x + MARK_SIZE,
        at.y - MARK_SIZE,
        at.x - MARK_SIZE,
        at.y + MARK_SIZE,
    )
}

/// Text options for a grade stamp such as `A+`.
pub fn grade_stamp_options(label: &str) -> TextOptions {
    TextOptions {
        width: Some(STAMP_SIZE),
        font_size: Some(STAMP_SIZE),
        ..TextOptions::with_lines([label])
    }
}

pub fn arrow(name: impl Into<String>) -> CustomDraw {
    CustomDraw::path(name, |from, to, _, _| PathOptions::new(arrow_path(from, to)))
}

pub fn check(name: impl Into<String>) -> CustomDraw {
    CustomDraw::path(name, |from, _, _, _| PathOptions::new(check_path(from))).on(Trigger::Up)
}

pub fn cross(name: impl Into<String>) -> CustomDraw {
    CustomDraw::path(name, |from, _, _, _| PathOptions::new(cross_path(from))).on(Trigger::Up)
}

/// Stamp `label` at the gesture start on pointer-up.
pub fn grade_stamp(name: impl Into<String>, label: impl Into<String>) -> CustomDraw {
    let label = label.into();
    CustomDraw::text(name, move |_, _| grade_stamp_options(&label)).on(Trigger::Up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::CustomKind;
    use kurbo::{BezPath, Shape as _};

    #[test]
    fn test_arrow_head_points_back_along_shaft() {
        let path = arrow_path(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(path.starts_with(" M 0 0 L 100 0 M "));

        let bez = BezPath::from_svg(&path).unwrap();
        let bounds = bez.bounding_box();
        let head_dx = ARROW_HEAD_LENGTH * ARROW_HEAD_ANGLE.to_radians().cos();
        let head_dy = ARROW_HEAD_LENGTH * ARROW_HEAD_ANGLE.to_radians().sin();
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        assert!((bounds.y0 + head_dy).abs() < 1e-9);
        assert!((bounds.y1 - head_dy).abs() < 1e-9);
        assert!(100.0 - head_dx > 0.0);
    }

    #[test]
    fn test_check_and_cross() {
        assert_eq!(check_path(Point::new(50.0, 50.0)), "M 30 30 L 50 50 L 90 10");
        assert_eq!(
            cross_path(Point::new(50.0, 50.0)),
            "M 30 30 L 70 70 M 70 30 L 30 70"
        );
        assert!(BezPath::from_svg(&cross_path(Point::new(0.5, 0.5))).is_ok());
    }

    #[test]
    fn test_descriptors() {
        let draw = arrow("arrow");
        assert_eq!(draw.kind, CustomKind::Path);
        assert_eq!(draw.trigger, Trigger::Move);
        assert!(!draw.enabled);

        assert_eq!(check("check").trigger, Trigger::Up);
        assert_eq!(cross("cross").trigger, Trigger::Up);

        let stamp = grade_stamp("aplus", "A+");
        assert_eq!(stamp.kind, CustomKind::Text);
        assert_eq!(stamp.trigger, Trigger::Up);
        let generate = stamp.text_generator.unwrap();
        let options = generate(16.0, 1.0);
        assert_eq!(options.text, vec!["A+".to_string()]);
        assert_eq!(options.width, Some(40.0));
        assert_eq!(options.font_size, Some(40.0));
    }
}
