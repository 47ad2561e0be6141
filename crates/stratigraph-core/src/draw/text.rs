//! Text styles for node identifiers and edge labels.
//!
//! A [`TextDefinition`] both produces the SVG `<text>` element and measures
//! the rendered string. Measurements come from `cosmic-text` shaping so that
//! edge labels have realistic click targets.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::node::element as svg_element;

use crate::{
    color::Color,
    geometry::{Point, Size},
};

/// Visual style of a text label.
///
/// # Examples
///
/// ```
/// # use stratigraph_core::draw::TextDefinition;
/// # use stratigraph_core::geometry::Point;
/// let mut style = TextDefinition::new();
/// style.set_font_size(14);
/// style.set_bold(true);
///
/// let text = style.render("US 100", Point::new(0.0, 0.0));
/// assert!(text.to_string().contains("font-weight=\"bold\""));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    bold: bool,
    vertically_centered: bool,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family (e.g. "sans-serif", "Arial").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the fill color. `None` leaves the SVG default (black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Centers the text vertically on its anchor instead of sitting on the baseline.
    pub fn set_vertically_centered(&mut self, centered: bool) {
        self.vertically_centered = centered;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_vertically_centered(&self) -> bool {
        self.vertically_centered
    }

    /// Builds a horizontally centered `<text>` element anchored at `position`.
    pub fn render(&self, content: &str, position: Point) -> svg_element::Text {
        let mut text = svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("font-family", self.font_family.as_str())
            .set("font-size", format!("{}px", self.font_size))
            .set("font-weight", if self.bold { "bold" } else { "normal" });

        if self.vertically_centered {
            text = text.set("dominant-baseline", "middle");
        }

        if let Some(color) = self.color {
            text = text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        text
    }

    /// Measures `content` as it would be rendered with this style.
    pub fn measure(&self, content: &str) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(content, self)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            color: None,
            bold: false,
            vertically_centered: false,
        }
    }
}

/// Shared font system used for label measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures single-line text in pixels.
    ///
    /// Falls back to an average glyph width when shaping produces no runs
    /// (for instance on hosts without any installed font).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size_px = f32::from(text_def.font_size());
        let metrics = Metrics::new(font_size_px, font_size_px * 1.2);
        let fallback = Size::new(
            text.chars().count() as f32 * font_size_px * 0.55,
            metrics.line_height,
        );

        let Ok(mut font_system) = self.font_system.lock() else {
            return fallback;
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = if text_def.is_bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        if width > 0.0 {
            Size::new(width, metrics.line_height)
        } else {
            fallback
        }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
