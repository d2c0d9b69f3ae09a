//! Momentary push button
//!
//! Interaction state machine, driven by the handler:
//!
//! ```text
//! Normal ──enter──► Highlighted ──left press──► Sunken
//!    ▲                  │                          │
//!    └──────leave───────┘        left release over the button
//!                                (fires the bound action once)
//! ```

use std::any::Any;
use std::rc::Rc;

use brim_core::{
    DrawMode, Event, InputEvent, InteractionState, MouseButton, MouseButtonEvent, Painter, Style,
    TextAlignment,
};
use brim_graph::{
    widget_cast, widget_cast_mut, EventHandler, HandlerCore, NodeId, Widget, WidgetBase,
};

/// Shared alias for widget-bound action callbacks.
pub(crate) type ApplyFn = Rc<dyn Fn()>;

pub struct PushButton {
    base: WidgetBase,
    label: String,
    apply: Option<ApplyFn>,
}

impl PushButton {
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

    /// Bind the action fired when the button is applied. Binding an action
    /// also changes reconciliation identity: two buttons with bound actions
    /// match only if they share the same callback.
    pub fn with_apply(mut self, apply: ApplyFn) -> Self {
        self.apply = Some(apply);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn fire(&self) {
        if let Some(apply) = &self.apply {
            apply();
        }
    }
}

/// Identity check shared by the button variants: callback identity when an
/// action is bound on either side, label equality otherwise.
pub(crate) fn button_identity(
    label: &str,
    apply: &Option<ApplyFn>,
    other_label: &str,
    other_apply: &Option<ApplyFn>,
) -> bool {
    match (apply, other_apply) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => label == other_label,
        _ => false,
    }
}

impl Widget for PushButton {
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
        painter.set_active_color(style.border_color);
        painter.set_draw_mode(DrawMode::Outline);
        painter.draw_rect(rect);
        painter.set_active_color(style.text_color);
        painter.draw_text(&self.label, rect, TextAlignment::Center);
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<PushButton>(other).is_some_and(|other| {
            button_identity(&self.label, &self.apply, &other.label, &other.apply)
        })
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(ButtonHandler {
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

pub struct ButtonHandler {
    core: HandlerCore,
}

fn button_of(widget: &mut dyn Widget) -> &mut PushButton {
    widget_cast_mut::<PushButton>(widget).expect("push button handler wired to a different widget")
}

impl EventHandler for ButtonHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }

    fn on_mouse_enter(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let button = button_of(widget);
        if button.state() == InteractionState::Normal {
            button.set_state(InteractionState::Highlighted);
        }
    }

    fn on_mouse_leave(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let button = button_of(widget);
        if button.state() == InteractionState::Highlighted {
            button.set_state(InteractionState::Normal);
        }
    }

    fn on_mouse_press(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        button_of(widget).set_state(InteractionState::Sunken);
        event.swallow();
    }

    fn on_mouse_release(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        let button = button_of(widget);
        if event.button != MouseButton::Left
            || button.state() != InteractionState::Sunken
        {
            return;
        }
        // The action fires only when the press completes over the button;
        // a release elsewhere just resets the state.
        button.set_state(InteractionState::Normal);
        if button.rectangle().contains(event.location()) {
            button.fire();
        }
        event.swallow();
    }
}
