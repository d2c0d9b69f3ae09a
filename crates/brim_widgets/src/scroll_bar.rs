//! Vertical scrollbar
//!
//! Owned and positioned by a [`ScrollView`](crate::ScrollView) rather than
//! living in the screen graph itself; the view forwards pointer events to
//! the scrollbar's handler and reads the adjusted offset back. `ratio` is
//! the visible fraction of the content (viewport height / content height):
//! the knob covers that fraction of the track, and a drag of the knob by
//! `dy` pixels moves the content by `dy / ratio`.

use std::any::Any;

use brim_core::{
    DrawMode, Event, InputEvent, InteractionState, MouseButton, MouseButtonEvent, MouseDragEvent,
    Painter, Rect, Style,
};
use brim_graph::{
    widget_cast, widget_cast_mut, EventHandler, HandlerCore, NodeId, Widget, WidgetBase,
};

pub struct ScrollBar {
    base: WidgetBase,
    /// Visible fraction of the content, in `0.0..=1.0`
    ratio: f32,
    /// Scroll offset in content pixels, mirroring the owning view
    scroll_offset: f32,
}

impl Default for ScrollBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollBar {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::default(),
            ratio: 1.0,
            scroll_offset: 0.0,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.clamp(0.0, 1.0);
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    /// Knob rectangle within the track, derived from ratio and offset.
    pub fn knob_rect(&self) -> Rect {
        let track = self.base.rectangle;
        let knob_height = (track.height() * self.ratio).max(4.0).min(track.height());
        let knob_travel = track.height() - knob_height;
        let knob_y = if self.ratio > 0.0 && self.ratio < 1.0 {
            // Offset in content pixels mapped onto the knob's travel range.
            let max_offset = track.height() / self.ratio - track.height();
            if max_offset > 0.0 {
                knob_travel * (self.scroll_offset / max_offset).clamp(0.0, 1.0)
            } else {
                0.0
            }
        } else {
            0.0
        };
        Rect::new(track.x(), track.y() + knob_y, track.width(), knob_height)
    }
}

impl Widget for ScrollBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self, painter: &mut Painter<'_>, style: &Style) {
        painter.set_active_color(style.scrollbar_color);
        painter.set_draw_mode(DrawMode::Filled);
        painter.draw_rect(self.base.rectangle);
        painter.set_active_color(style.state_color(self.base.state));
        painter.draw_rect(self.knob_rect());
    }

    fn matches(&self, other: &dyn Widget) -> bool {
        // A scrollbar has no identity of its own; the owning view provides it.
        widget_cast::<ScrollBar>(other).is_some()
    }

    fn copy_state(&mut self, old: &dyn Widget) {
        self.base.state = old.base().state;
        if let Some(old) = widget_cast::<ScrollBar>(old) {
            self.scroll_offset = old.scroll_offset;
        }
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(ScrollBarHandler::new(node))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct ScrollBarHandler {
    core: HandlerCore,
    /// Offset at press time; drags are applied relative to it
    drag_start_offset: f32,
}

impl ScrollBarHandler {
    pub fn new(node: NodeId) -> Self {
        Self {
            core: HandlerCore::new(node),
            drag_start_offset: 0.0,
        }
    }
}

fn scroll_bar_of(widget: &mut dyn Widget) -> &mut ScrollBar {
    widget_cast_mut::<ScrollBar>(widget).expect("scrollbar handler wired to a different widget")
}

impl EventHandler for ScrollBarHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }

    fn on_mouse_enter(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let bar = scroll_bar_of(widget);
        if bar.state() == InteractionState::Normal {
            bar.set_state(InteractionState::Highlighted);
        }
    }

    fn on_mouse_leave(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        let bar = scroll_bar_of(widget);
        if bar.state() == InteractionState::Highlighted {
            bar.set_state(InteractionState::Normal);
        }
    }

    fn on_mouse_press(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        let bar = scroll_bar_of(widget);
        bar.set_state(InteractionState::Sunken);
        self.drag_start_offset = bar.scroll_offset;
        event.swallow();
    }

    fn on_mouse_release(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        let bar = scroll_bar_of(widget);
        if event.button == MouseButton::Left && bar.state() == InteractionState::Sunken {
            bar.set_state(InteractionState::Normal);
            event.swallow();
        }
    }

    fn on_mouse_drag(&mut self, widget: &mut dyn Widget, event: &mut MouseDragEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        let bar = scroll_bar_of(widget);
        if bar.ratio <= 0.0 {
            return;
        }
        bar.scroll_offset = self.drag_start_offset + event.drag_distance.y / bar.ratio;
        event.swallow();
    }
}
