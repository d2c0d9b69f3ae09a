//! Scrollable viewport with a composed scrollbar
//!
//! The scrollbar is not a screen-graph node: the view owns the
//! [`ScrollBar`] widget and its handler directly, keeps its geometry in
//! sync, and forwards pointer events that land inside the scrollbar
//! rectangle. Both halves of the pair therefore survive reconciliation
//! together with the view node itself.
//!
//! ```text
//! router ──► ScrollViewHandler
//!               │ location inside scrollbar rect?
//!               ├─yes─► ScrollBarHandler (enter/leave tracked once,
//!               │       press starts a scrollbar drag)
//!               └─no──► view behavior (wheel scrolling)
//! ```
//!
//! The scroll offset is always clamped to
//! `0 ..= max(0, content_height - viewport_height)`.

use std::any::Any;

use brim_core::{
    DrawMode, Event, InputEvent, MouseButton, MouseButtonEvent, MouseDragEvent, MouseWheelEvent,
    Painter, Rect, Style, WheelDirection,
};
use brim_graph::{
    widget_cast, widget_cast_mut, EventHandler, HandlerCore, NodeId, Widget, WidgetBase,
};
use tracing::trace;

use crate::scroll_bar::{ScrollBar, ScrollBarHandler};

/// Content pixels scrolled per wheel notch.
pub const SCROLL_STEP_SIZE: f32 = 40.0;

/// Track width of the composed scrollbar, in pixels.
const SCROLLBAR_WIDTH: f32 = 17.0;

pub struct ScrollView {
    base: WidgetBase,
    identifier: String,
    vert_scroll: f32,
    content_height: f32,
    scrollbar: ScrollBar,
}

impl ScrollView {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::default(),
            identifier: identifier.into(),
            vert_scroll: 0.0,
            content_height: 0.0,
            scrollbar: ScrollBar::new(),
        }
    }

    pub fn with_rectangle(mut self, rectangle: Rect) -> Self {
        self.base.rectangle = rectangle;
        self
    }

    /// Declare the total height of the scrolled content. Set each frame by
    /// the host; the persistent scroll offset is re-clamped against it.
    pub fn with_content_height(mut self, content_height: f32) -> Self {
        self.content_height = content_height;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn vert_scroll(&self) -> f32 {
        self.vert_scroll
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// The composed scrollbar. The view re-syncs its geometry and offset
    /// before drawing and before forwarding events.
    pub fn scrollbar(&self) -> &ScrollBar {
        &self.scrollbar
    }

    pub fn scrollbar_mut(&mut self) -> &mut ScrollBar {
        &mut self.scrollbar
    }

    pub fn set_vert_scroll(&mut self, value: f32) {
        self.vert_scroll = value;
        self.validize_scroll();
    }

    fn viewport_height(&self) -> f32 {
        self.base.rectangle.height()
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height()).max(0.0)
    }

    fn validize_scroll(&mut self) {
        self.vert_scroll = self.vert_scroll.clamp(0.0, self.max_scroll());
    }

    /// Track rectangle of the composed scrollbar, along the right edge.
    pub fn scrollbar_rect(&self) -> Rect {
        let rect = self.base.rectangle;
        Rect::new(
            rect.right() - SCROLLBAR_WIDTH,
            rect.y(),
            SCROLLBAR_WIDTH,
            rect.height(),
        )
    }

    /// Viewport area left of the scrollbar, for the host's content layout.
    pub fn content_rect(&self) -> Rect {
        let rect = self.base.rectangle;
        Rect::new(
            rect.x(),
            rect.y(),
            (rect.width() - SCROLLBAR_WIDTH).max(0.0),
            rect.height(),
        )
    }

    /// Push the view's geometry and offset into the scrollbar.
    fn sync_scrollbar(&mut self) {
        self.scrollbar.set_rectangle(self.scrollbar_rect());
        let ratio = if self.content_height > 0.0 {
            self.viewport_height() / self.content_height
        } else {
            1.0
        };
        self.scrollbar.set_ratio(ratio);
        self.scrollbar.set_scroll_offset(self.vert_scroll);
    }

    /// Pull a scrollbar-adjusted offset back, clamped.
    fn apply_scrollbar_offset(&mut self) {
        self.vert_scroll = self.scrollbar.scroll_offset();
        self.validize_scroll();
        self.scrollbar.set_scroll_offset(self.vert_scroll);
    }

    fn scroll_by(&mut self, delta: f32) {
        self.vert_scroll += delta;
        self.validize_scroll();
        self.sync_scrollbar();
        trace!(identifier = %self.identifier, vert_scroll = self.vert_scroll, "scrolled");
    }
}

impl Widget for ScrollView {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self, painter: &mut Painter<'_>, style: &Style) {
        self.sync_scrollbar();
        let rect = self.base.rectangle;
        painter.set_active_color(style.panel_color);
        painter.set_draw_mode(DrawMode::Filled);
        painter.draw_rect(rect);
        painter.set_active_color(style.border_color);
        painter.set_draw_mode(DrawMode::Outline);
        painter.draw_rect(rect);
        self.scrollbar.draw(painter, style);
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<ScrollView>(other).is_some_and(|other| {
            self.identifier == other.identifier && self.scrollbar.matches(&other.scrollbar)
        })
    }

    fn copy_state(&mut self, old: &dyn Widget) {
        self.base.state = old.base().state;
        if let Some(old) = widget_cast::<ScrollView>(old) {
            self.vert_scroll = old.vert_scroll;
            self.scrollbar.copy_state(&old.scrollbar);
            // Content declared this frame may be shorter than before.
            self.validize_scroll();
        }
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(ScrollViewHandler::new(node))
    }

    fn always_persistent(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct ScrollViewHandler {
    core: HandlerCore,
    /// Handler of the composed scrollbar; lives here so it survives rebuilds
    /// together with the view's node
    scrollbar_handler: ScrollBarHandler,
    /// Pointer was inside the scrollbar on the previous sample; drives
    /// exactly-once enter/leave forwarding
    was_inside_scrollbar: bool,
    /// A press inside the scrollbar started a knob drag; events keep routing
    /// to the scrollbar until release, even outside its rectangle
    dragging_scrollbar: bool,
}

impl ScrollViewHandler {
    pub fn new(node: NodeId) -> Self {
        Self {
            core: HandlerCore::new(node),
            scrollbar_handler: ScrollBarHandler::new(node),
            was_inside_scrollbar: false,
            dragging_scrollbar: false,
        }
    }
}

fn view_of(widget: &mut dyn Widget) -> &mut ScrollView {
    widget_cast_mut::<ScrollView>(widget).expect("scroll view handler wired to a different widget")
}

impl EventHandler for ScrollViewHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }

    fn on_mouse_move(&mut self, widget: &mut dyn Widget, event: &mut Event) {
        let view = view_of(widget);
        view.sync_scrollbar();
        let inside = view.scrollbar_rect().contains(event.location());
        if inside != self.was_inside_scrollbar {
            let mut hover = Event::new(event.location());
            if inside {
                self.scrollbar_handler
                    .on_mouse_enter(&mut view.scrollbar, &mut hover);
            } else {
                self.scrollbar_handler
                    .on_mouse_leave(&mut view.scrollbar, &mut hover);
            }
            self.was_inside_scrollbar = inside;
        }
        if inside {
            self.scrollbar_handler
                .on_mouse_move(&mut view.scrollbar, event);
        }
    }

    fn on_mouse_leave(&mut self, widget: &mut dyn Widget, event: &mut Event) {
        if self.was_inside_scrollbar {
            let view = view_of(widget);
            self.scrollbar_handler
                .on_mouse_leave(&mut view.scrollbar, event);
            self.was_inside_scrollbar = false;
        }
    }

    fn on_mouse_press(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        let view = view_of(widget);
        view.sync_scrollbar();
        if !view.scrollbar_rect().contains(event.location()) {
            return;
        }
        self.scrollbar_handler
            .on_mouse_press(&mut view.scrollbar, event);
        if event.is_swallowed() && event.button == MouseButton::Left {
            self.dragging_scrollbar = true;
        }
    }

    fn on_mouse_release(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if !self.dragging_scrollbar && !self.was_inside_scrollbar {
            return;
        }
        let view = view_of(widget);
        self.scrollbar_handler
            .on_mouse_release(&mut view.scrollbar, event);
        if self.dragging_scrollbar {
            self.dragging_scrollbar = false;
            view.apply_scrollbar_offset();
        }
    }

    fn on_mouse_drag(&mut self, widget: &mut dyn Widget, event: &mut MouseDragEvent) {
        // Once a knob drag started, the pointer may wander anywhere; the
        // drag keeps targeting the scrollbar until the button comes up.
        if !self.dragging_scrollbar {
            return;
        }
        let view = view_of(widget);
        self.scrollbar_handler
            .on_mouse_drag(&mut view.scrollbar, event);
        view.apply_scrollbar_offset();
    }

    fn on_mouse_wheel(&mut self, widget: &mut dyn Widget, event: &mut MouseWheelEvent) {
        let view = view_of(widget);
        let step = match event.direction {
            WheelDirection::Up => -SCROLL_STEP_SIZE,
            WheelDirection::Down => SCROLL_STEP_SIZE,
        };
        view.scroll_by(step);
        event.swallow();
    }
}
