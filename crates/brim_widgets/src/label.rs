//! Inert text label

use std::any::Any;

use brim_core::{Painter, Rect, Style, TextAlignment};
use brim_graph::{widget_cast, DefaultHandler, EventHandler, NodeId, Widget, WidgetBase};

pub struct Label {
    base: WidgetBase,
    text: String,
    alignment: TextAlignment,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::default(),
            text: text.into(),
            alignment: TextAlignment::Left,
        }
    }

    pub fn with_rectangle(mut self, rectangle: Rect) -> Self {
        self.base.rectangle = rectangle;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self, painter: &mut Painter<'_>, style: &Style) {
        painter.set_active_color(style.text_color);
        painter.draw_text(&self.text, self.base.rectangle, self.alignment);
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<Label>(other).is_some_and(|other| other.text == self.text)
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
