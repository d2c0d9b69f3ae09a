//! Latching radio button
//!
//! Unlike a push button, a radio button commits on press: the left press
//! sinks the widget, fires its bound action immediately, and the widget
//! stays sunken until the host declares it unselected on a later frame.

use std::any::Any;
use std::rc::Rc;

use brim_core::{
    DrawMode, Event, InputEvent, InteractionState, MouseButton, MouseButtonEvent, Painter, Style,
    TextAlignment,
};
use brim_graph::{
    widget_cast, widget_cast_mut, EventHandler, HandlerCore, NodeId, Widget, WidgetBase,
};

use crate::button::{button_identity, ApplyFn};

pub struct RadioButton {
    base: WidgetBase,
    label: String,
    apply: Option<ApplyFn>,
}

impl RadioButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::default(),
            label: label.into(),
            apply: None,
        }
    }

    pub fn with_rectangle(mut self, rectangle: brim_core::Rect) -> Self {
        self.base.rectangle = rectangle;
        self
    }

    pub fn with_apply(mut self, apply: ApplyFn) -> Self {
        self.apply = Some(apply);
        self
    }

    /// Declare the button as the selected member of its group.
    pub fn selected(mut self, selected: bool) -> Self {
        self.base.state = if selected {
            InteractionState::Sunken
        } else {
            InteractionState::Normal
        };
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.base.state == InteractionState::Sunken
    }

    fn fire(&self) {
        if let Some(apply) = &self.apply {
            apply();
        }
    }
}

impl Widget for RadioButton {
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
        if self.is_selected() {
            painter.set_active_color(style.decoration_color);
            painter.draw_rect(rect.inset(4.0, 4.0));
        }
        painter.set_active_color(style.border_color);
        painter.set_draw_mode(DrawMode::Outline);
        painter.draw_rect(rect);
        painter.set_active_color(style.text_color);
        painter.draw_text(&self.label, rect, TextAlignment::Center);
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<RadioButton>(other).is_some_and(|other| {
            button_identity(&self.label, &self.apply, &other.label, &other.apply)
        })
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(RadioButtonHandler {
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

pub struct RadioButtonHandler {
    core: HandlerCore,
}

fn radio_of(widget: &mut dyn Widget) -> &mut RadioButton {
    widget_cast_mut::<RadioButton>(widget)
        .expect("radio button handler wired to a different widget")
}

impl EventHandler for RadioButtonHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }

    fn on_mouse_enter(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let radio = radio_of(widget);
        if radio.state() == InteractionState::Normal {
            radio.set_state(InteractionState::Highlighted);
        }
    }

    fn on_mouse_leave(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let radio = radio_of(widget);
        if radio.state() == InteractionState::Highlighted {
            radio.set_state(InteractionState::Normal);
        }
    }

    fn on_mouse_press(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        let radio = radio_of(widget);
        if !radio.is_selected() {
            radio.set_state(InteractionState::Sunken);
            radio.fire();
        }
        event.swallow();
    }

    fn on_mouse_release(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        // Latching: the release never un-sinks a selected button.
        if event.button == MouseButton::Left && radio_of(widget).is_selected() {
            event.swallow();
        }
    }
}
