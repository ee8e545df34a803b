//! Registry of pluggable custom-draw generators.
//!
//! A custom draw is a named generator that turns pointer geometry into path
//! options, or the current font size into text options. The board runs every
//! enabled generator whose [`Trigger`] matches the pointer event and builds
//! the result with the regular shape builders.

use crate::error::{DrawboardError, DrawboardResult};
use crate::shapes::{PathOptions, TextOptions};
use kurbo::Point;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a custom draw produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomKind {
    #[default]
    Path,
    Text,
}

/// Pointer event a custom draw runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Every intermediate move; the previous result is replaced.
    #[default]
    Move,
    /// Once, on pointer-up.
    Up,
}

/// Computes path options from `(from, to, brush_width, zoom)` in logical space.
pub type PathGenerator = Box<dyn Fn(Point, Point, f64, f64) -> PathOptions>;

/// Computes text options from `(font_size, zoom)`.
pub type TextGenerator = Box<dyn Fn(f64, f64) -> TextOptions>;

/// A custom-draw registration request.
pub struct CustomDraw {
    pub name: String,
    pub kind: CustomKind,
    pub trigger: Trigger,
    pub path_generator: Option<PathGenerator>,
    pub text_generator: Option<TextGenerator>,
    pub enabled: bool,
}

impl CustomDraw {
    /// A path-kind draw triggered on move.
    pub fn path<F>(name: impl Into<String>, generator: F) -> Self
    where
        F: Fn(Point, Point, f64, f64) -> PathOptions + 'static,
    {
        Self {
            name: name.into(),
            kind: CustomKind::Path,
            trigger: Trigger::Move,
            path_generator: Some(Box::new(generator)),
            text_generator: None,
            enabled: false,
        }
    }

    /// A text-kind draw triggered on move.
    pub fn text<F>(name: impl Into<String>, generator: F) -> Self
    where
        F: Fn(f64, f64) -> TextOptions + 'static,
    {
        Self {
            name: name.into(),
            kind: CustomKind::Text,
            trigger: Trigger::Move,
            path_generator: None,
            text_generator: Some(Box::new(generator)),
            enabled: false,
        }
    }

    pub fn on(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl fmt::Debug for CustomDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDraw")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("trigger", &self.trigger)
            .field("path_generator", &self.path_generator.is_some())
            .field("text_generator", &self.text_generator.is_some())
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Output of one armed generator.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomOutput {
    Path(PathOptions),
    Text(TextOptions),
}

enum Generator {
    Path(PathGenerator),
    Text(TextGenerator),
}

struct Entry {
    name: String,
    trigger: Trigger,
    generator: Generator,
    enabled: bool,
}

/// Named custom-draw generators and their armed state.
#[derive(Default)]
pub struct CustomDrawRegistry {
    entries: Vec<Entry>,
}

impl CustomDrawRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a custom draw. Names are unique.
    pub fn register(&mut self, draw: CustomDraw) -> DrawboardResult<()> {
        if draw.name.is_empty() {
            return Err(DrawboardError::Validation("name is empty".to_string()));
        }
        if self.contains(&draw.name) {
            return Err(DrawboardError::Validation(format!(
                "'{}' is already registered",
                draw.name
            )));
        }

        let generator = match draw.kind {
            CustomKind::Path => draw.path_generator.map(Generator::Path).ok_or_else(|| {
                DrawboardError::Validation(format!("'{}' has no path generator", draw.name))
            })?,
            CustomKind::Text => draw.text_generator.map(Generator::Text).ok_or_else(|| {
                DrawboardError::Validation(format!("'{}' has no text generator", draw.name))
            })?,
        };

        debug!("Registered custom draw '{}' ({:?} on {:?})", draw.name, draw.kind, draw.trigger);
        self.entries.push(Entry {
            name: draw.name,
            trigger: draw.trigger,
            generator,
            enabled: draw.enabled,
        });
        Ok(())
    }

    /// Arm exactly the named entries and disarm every other one.
    pub fn set_enabled<S: AsRef<str>>(&mut self, names: &[S]) {
        for entry in &mut self.entries {
            entry.enabled = names.iter().any(|n| n.as_ref() == entry.name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name && e.enabled)
    }

    /// Names of enabled entries for a trigger.
    pub fn armed(&self, trigger: Trigger) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.enabled && e.trigger == trigger)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every armed generator for `trigger`, in registration order.
    pub fn generate(
        &self,
        trigger: Trigger,
        from: Point,
        to: Point,
        brush_width: f64,
        font_size: f64,
        zoom: f64,
    ) -> Vec<CustomOutput> {
        self.entries
            .iter()
            .filter(|e| e.enabled && e.trigger == trigger)
            .map(|e| match &e.generator {
                Generator::Path(generate) => {
                    CustomOutput::Path(generate(from, to, brush_width, zoom))
                }
                Generator::Text(generate) => CustomOutput::Text(generate(font_size, zoom)),
            })
            .collect()
    }
}

impl fmt::Debug for CustomDrawRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.name, e.trigger, e.enabled)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_draw(name: &str) -> CustomDraw {
        CustomDraw::path(name, |from, to, _, _| {
            PathOptions::new(format!("M {} {} L {} {}", from.x, from.y, to.x, to.y))
        })
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = CustomDrawRegistry::new();
        let result = registry.register(line_draw(""));
        assert!(matches!(result, Err(DrawboardError::Validation(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_generator_is_rejected() {
        let mut registry = CustomDrawRegistry::new();

        let mut path = line_draw("arrow");
        path.path_generator = None;
        assert!(matches!(registry.register(path), Err(DrawboardError::Validation(_))));

        let mut text = CustomDraw::text("stamp", |_, _| TextOptions::default());
        text.text_generator = None;
        assert!(matches!(registry.register(text), Err(DrawboardError::Validation(_))));

        // A text generator does not satisfy a path-kind draw.
        let mut mismatched = CustomDraw::text("mixed", |_, _| TextOptions::default());
        mismatched.kind = CustomKind::Path;
        assert!(matches!(registry.register(mismatched), Err(DrawboardError::Validation(_))));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = CustomDrawRegistry::new();
        registry.register(line_draw("arrow")).unwrap();
        assert!(matches!(
            registry.register(line_draw("arrow")),
            Err(DrawboardError::Validation(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_enable_is_exclusive() {
        let mut registry = CustomDrawRegistry::new();
        registry.register(line_draw("arrow")).unwrap();
        registry.register(line_draw("check").on(Trigger::Up)).unwrap();

        registry.set_enabled(&["arrow"]);
        assert_eq!(registry.armed(Trigger::Move), vec!["arrow"]);
        assert!(registry.armed(Trigger::Up).is_empty());

        registry.set_enabled(&["check"]);
        assert!(!registry.is_enabled("arrow"));
        assert!(registry.armed(Trigger::Move).is_empty());
        assert_eq!(registry.armed(Trigger::Up), vec!["check"]);

        registry.set_enabled::<&str>(&[]);
        assert!(registry.armed(Trigger::Up).is_empty());
    }

    #[test]
    fn test_generate_passes_geometry() {
        let mut registry = CustomDrawRegistry::new();
        registry.register(line_draw("line").enabled(true)).unwrap();
        registry
            .register(
                CustomDraw::text("size", |size, zoom| {
                    TextOptions::with_lines([format!("{}@{}", size, zoom)])
                })
                .enabled(true),
            )
            .unwrap();

        let out = registry.generate(
            Trigger::Move,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            2.0,
            16.0,
            1.5,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], CustomOutput::Path(PathOptions::new("M 1 2 L 3 4")));
        match &out[1] {
            CustomOutput::Text(options) => assert_eq!(options.text, vec!["16@1.5".to_string()]),
            other => panic!("expected text, got {:?}", other),
        }
    }
}
