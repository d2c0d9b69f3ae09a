//! Paint-engine abstraction
//!
//! Drawing is abstracted behind the [`PaintEngine`] trait so the toolkit
//! never talks to a graphics API directly. A backend (GL, software raster,
//! test recorder, HTML export, ...) implements the three primitives; widgets
//! configure a [`Painter`] and route all geometry and text through it.
//!
//! ```text
//! Widget::draw(painter, style)
//!     ↓ painter.draw_rect / draw_text
//! Painter (active color, draw mode, content mask)
//!     ↓ PaintEngine::draw_polygon / draw_text
//! Backend
//! ```

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// How polygon geometry is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    #[default]
    Filled,
    Outline,
}

/// Horizontal text alignment within the target rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Polygon vertex list in pixel coordinates
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: SmallVec<[Point; 8]>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned quad for a rectangle, clockwise from the origin corner.
    pub fn from_rect(rect: Rect) -> Self {
        let mut vertices = SmallVec::new();
        vertices.push(rect.origin);
        vertices.push(Point::new(rect.right(), rect.y()));
        vertices.push(Point::new(rect.right(), rect.bottom()));
        vertices.push(Point::new(rect.x(), rect.bottom()));
        Self { vertices }
    }

    pub fn push(&mut self, point: Point) {
        self.vertices.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Draw state a backend needs to honor for a single primitive
#[derive(Clone, Copy, Debug)]
pub struct PaintState {
    pub active_color: Color,
    pub draw_mode: DrawMode,
    /// Clip mask; content outside this rect must not be touched.
    pub content_mask: Option<Rect>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            active_color: Color::BLACK,
            draw_mode: DrawMode::Filled,
            content_mask: None,
        }
    }
}

/// Abstract drawing backend.
///
/// The toolkit walks the finalized screen graph and calls these primitives;
/// it never performs GPU or font calls itself. Glyph rasterization and text
/// measurement are entirely the backend's concern.
pub trait PaintEngine {
    /// Prepare the viewport (matrices, background clear) for a frame.
    ///
    /// Utility for the host application; the drawer itself does not call it.
    fn setup_viewport(&mut self, rect: Rect, clear_color: Color);

    /// Draw widget geometry with the given paint state.
    fn draw_polygon(&mut self, state: &PaintState, polygon: &Polygon);

    /// Draw text into the bounding rectangle.
    fn draw_text(&mut self, state: &PaintState, text: &str, rect: Rect, alignment: TextAlignment);
}

/// Per-draw state that widgets configure before emitting primitives.
///
/// A fresh painter is created for each widget draw call; state does not leak
/// between widgets.
pub struct Painter<'a> {
    engine: &'a mut dyn PaintEngine,
    state: PaintState,
}

impl<'a> Painter<'a> {
    pub fn new(engine: &'a mut dyn PaintEngine) -> Self {
        Self {
            engine,
            state: PaintState::default(),
        }
    }

    pub fn set_active_color(&mut self, color: Color) {
        self.state.active_color = color;
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.state.draw_mode = mode;
    }

    pub fn set_content_mask(&mut self, rect: Rect) {
        self.state.content_mask = Some(rect);
    }

    pub fn clear_content_mask(&mut self) {
        self.state.content_mask = None;
    }

    pub fn draw_polygon(&mut self, polygon: &Polygon) {
        if !polygon.is_empty() {
            self.engine.draw_polygon(&self.state, polygon);
        }
    }

    /// Filled or outlined rectangle depending on the current draw mode
    pub fn draw_rect(&mut self, rect: Rect) {
        let polygon = Polygon::from_rect(rect);
        self.engine.draw_polygon(&self.state, &polygon);
    }

    pub fn draw_text(&mut self, text: &str, rect: Rect, alignment: TextAlignment) {
        self.engine.draw_text(&self.state, text, rect, alignment);
    }
}
