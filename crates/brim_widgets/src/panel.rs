//! Background panel container
//!
//! Draws a filled background with a header label; its children are regular
//! screen-graph nodes positioned by the host. The panel itself has no
//! pointer behavior, so events that miss its children bubble straight
//! through it.

use std::any::Any;

use brim_core::{DrawMode, Painter, Rect, Style, TextAlignment};
use brim_graph::{widget_cast, DefaultHandler, EventHandler, NodeId, Widget, WidgetBase};

const HEADER_HEIGHT: f32 = 20.0;

pub struct Panel {
    base: WidgetBase,
    header: String,
}

impl Panel {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::default(),
            header: header.into(),
        }
    }

    pub fn with_rectangle(mut self, rectangle: Rect) -> Self {
        self.base.rectangle = rectangle;
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }
}

impl Widget for Panel {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self, painter: &mut Painter<'_>, style: &Style) {
        let rect = self.base.rectangle;
        painter.set_active_color(style.panel_color);
        painter.set_draw_mode(DrawMode::Filled);
        painter.draw_rect(rect);
        painter.set_active_color(style.border_color);
        painter.set_draw_mode(DrawMode::Outline);
        painter.draw_rect(rect);
        painter.set_active_color(style.text_color);
        let header_rect = Rect::new(rect.x(), rect.y(), rect.width(), HEADER_HEIGHT);
        painter.draw_text(&self.header, header_rect, TextAlignment::Left);
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<Panel>(other).is_some_and(|other| other.header == self.header)
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(DefaultHandler::new(node))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
