//! Single-line text box with an edit mode
//!
//! Left press starts text editing (the box sinks and stays sunken while
//! editing); a right press while sunken cancels it. The editing flag is
//! persistent state: it survives tree rebuilds through `copy_state` together
//! with the interaction state.

use std::any::Any;

use brim_core::{
    DrawMode, Event, InputEvent, InteractionState, MouseButton, MouseButtonEvent, Painter, Style,
    TextAlignment,
};
use brim_graph::{
    widget_cast, widget_cast_mut, EventHandler, HandlerCore, NodeId, Widget, WidgetBase,
};

pub struct TextBox {
    base: WidgetBase,
    text: String,
    is_editing: bool,
}

impl TextBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::default(),
            text: text.into(),
            is_editing: false,
        }
    }

    pub fn with_rectangle(mut self, rectangle: brim_core::Rect) -> Self {
        self.base.rectangle = rectangle;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn start_editing(&mut self) {
        self.is_editing = true;
        self.base.state = InteractionState::Sunken;
    }

    pub fn end_editing(&mut self) {
        self.is_editing = false;
        self.base.state = InteractionState::Normal;
    }
}

impl Widget for TextBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self, painter: &mut Painter<'_>, style: &Style) {
        let rect = self.base.rectangle;
        painter.set_active_color(style.state_color(self.base.state));
        painter.set_draw_mode(DrawMode::Filled);
        painter.draw_rect(rect);
        painter.set_active_color(if self.is_editing {
            style.decoration_color
        } else {
            style.border_color
        });
        painter.set_draw_mode(DrawMode::Outline);
        painter.draw_rect(rect);
        painter.set_active_color(style.text_color);
        painter.draw_text(&self.text, rect.inset(2.0, 0.0), TextAlignment::Left);
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<TextBox>(other).is_some_and(|other| other.text == self.text)
    }

    fn copy_state(&mut self, old: &dyn Widget) {
        self.base.state = old.base().state;
        if let Some(old) = widget_cast::<TextBox>(old) {
            self.is_editing = old.is_editing;
        }
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(TextBoxHandler {
            core: HandlerCore::new(node),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct TextBoxHandler {
    core: HandlerCore,
}

fn text_box_of(widget: &mut dyn Widget) -> &mut TextBox {
    widget_cast_mut::<TextBox>(widget).expect("text box handler wired to a different widget")
}

impl EventHandler for TextBoxHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }

    fn on_mouse_enter(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let text_box = text_box_of(widget);
        if text_box.state() == InteractionState::Normal {
            text_box.set_state(InteractionState::Highlighted);
        }
    }

    fn on_mouse_leave(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let text_box = text_box_of(widget);
        if text_box.state() == InteractionState::Highlighted {
            text_box.set_state(InteractionState::Normal);
        }
    }

    fn on_mouse_press(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        let text_box = text_box_of(widget);
        match event.button {
            MouseButton::Left => {
                text_box.start_editing();
                event.swallow();
            }
            MouseButton::Right if text_box.state() == InteractionState::Sunken => {
                text_box.end_editing();
                event.swallow();
            }
            _ => {}
        }
    }

    fn on_mouse_release(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if event.button == MouseButton::Left && text_box_of(widget).is_editing() {
            event.swallow();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brim_core::Point;

    fn fixture() -> (TextBox, TextBoxHandler) {
        let text_box = TextBox::new("name").with_rectangle(brim_core::Rect::new(
            0.0, 0.0, 80.0, 20.0,
        ));
        let handler = TextBoxHandler {
            core: HandlerCore::new(NodeId::default()),
        };
        (text_box, handler)
    }

    #[test]
    fn test_left_press_starts_editing() {
        let (mut text_box, mut handler) = fixture();
        let mut press = MouseButtonEvent::new(Point::new(5.0, 5.0), MouseButton::Left);
        handler.on_mouse_press(&mut text_box, &mut press);
        assert!(press.is_swallowed());
        assert!(text_box.is_editing());
        assert_eq!(text_box.state(), InteractionState::Sunken);
    }

    #[test]
    fn test_right_press_cancels_editing() {
        let (mut text_box, mut handler) = fixture();
        let mut press = MouseButtonEvent::new(Point::new(5.0, 5.0), MouseButton::Left);
        handler.on_mouse_press(&mut text_box, &mut press);

        let mut cancel = MouseButtonEvent::new(Point::new(5.0, 5.0), MouseButton::Right);
        handler.on_mouse_press(&mut text_box, &mut cancel);
        assert!(cancel.is_swallowed());
        assert!(!text_box.is_editing());
        assert_eq!(text_box.state(), InteractionState::Normal);
    }

    #[test]
    fn test_right_press_while_idle_ignored() {
        let (mut text_box, mut handler) = fixture();
        let mut press = MouseButtonEvent::new(Point::new(5.0, 5.0), MouseButton::Right);
        handler.on_mouse_press(&mut text_box, &mut press);
        assert!(!press.is_swallowed());
        assert!(!text_box.is_editing());
    }

    #[test]
    fn test_editing_survives_copy_state() {
        let (mut text_box, mut handler) = fixture();
        let mut press = MouseButtonEvent::new(Point::new(5.0, 5.0), MouseButton::Left);
        handler.on_mouse_press(&mut text_box, &mut press);

        let mut rebuilt = TextBox::new("name");
        rebuilt.copy_state(&text_box);
        assert!(rebuilt.is_editing());
        assert_eq!(rebuilt.state(), InteractionState::Sunken);
    }

    #[test]
    fn test_leave_keeps_edit_mode() {
        let (mut text_box, mut handler) = fixture();
        let mut press = MouseButtonEvent::new(Point::new(5.0, 5.0), MouseButton::Left);
        handler.on_mouse_press(&mut text_box, &mut press);

        let mut leave = Event::new(Point::new(200.0, 200.0));
        handler.on_mouse_leave(&mut text_box, &mut leave);
        assert!(text_box.is_editing());
        assert_eq!(text_box.state(), InteractionState::Sunken);
    }
}
