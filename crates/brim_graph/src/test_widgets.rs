//! Widget fixtures shared by the unit tests of this crate.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use brim_core::{Event, MouseButtonEvent, MouseDragEvent, MouseWheelEvent, Painter, Style};

use crate::handler::{DefaultHandler, EventHandler, HandlerCore};
use crate::node::{widget_cast, NodeId, Widget, WidgetBase};

/// Inert widget matching on a tag string.
pub(crate) struct Plain {
    base: WidgetBase,
    pub tag: &'static str,
}

impl Plain {
    pub fn new(tag: &'static str) -> Self {
        Self {
            base: WidgetBase::default(),
            tag,
        }
    }

    pub fn with_rect(mut self, rect: brim_core::Rect) -> Self {
        self.base.rectangle = rect;
        self
    }
}

impl Widget for Plain {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
    fn draw(&mut self, _: &mut Painter<'_>, _: &Style) {}
    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<Plain>(other).is_some_and(|other| other.tag == self.tag)
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

/// Widget that reports `always_persistent` and carries a counter as its
/// persistent state.
pub(crate) struct Sticky {
    base: WidgetBase,
    pub tag: &'static str,
    pub survivals: u32,
}

impl Sticky {
    pub fn new(tag: &'static str) -> Self {
        Self {
            base: WidgetBase::default(),
            tag,
            survivals: 0,
        }
    }
}

impl Widget for Sticky {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
    fn draw(&mut self, _: &mut Painter<'_>, _: &Style) {}
    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<Sticky>(other).is_some_and(|other| other.tag == self.tag)
    }
    fn copy_state(&mut self, old: &dyn Widget) {
        self.base.state = old.base().state;
        if let Some(old) = widget_cast::<Sticky>(old) {
            self.survivals = old.survivals + 1;
        }
    }
    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(DefaultHandler::new(node))
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

/// Event log entry recorded by [`Recorder`] widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LogEntry {
    pub tag: &'static str,
    pub event: &'static str,
}

pub(crate) type EventLog = Rc<RefCell<Vec<LogEntry>>>;

pub(crate) fn log_entry(log: &EventLog, tag: &'static str, event: &'static str) {
    log.borrow_mut().push(LogEntry { tag, event });
}

/// Widget whose handler records every event it receives; optionally swallows
/// presses/releases/wheels like a real interactive widget would.
pub(crate) struct Recorder {
    base: WidgetBase,
    pub tag: &'static str,
    pub swallow: bool,
    pub log: EventLog,
}

impl Recorder {
    pub fn new(tag: &'static str, rect: brim_core::Rect, swallow: bool, log: &EventLog) -> Self {
        Self {
            base: WidgetBase {
                rectangle: rect,
                ..WidgetBase::default()
            },
            tag,
            swallow,
            log: Rc::clone(log),
        }
    }
}

impl Widget for Recorder {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
    fn draw(&mut self, _: &mut Painter<'_>, _: &Style) {}
    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<Recorder>(other).is_some_and(|other| other.tag == self.tag)
    }
    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(RecorderHandler {
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

pub(crate) struct RecorderHandler {
    core: HandlerCore,
}

impl RecorderHandler {
    fn record(&self, widget: &mut dyn Widget, event: &'static str) -> bool {
        let recorder = widget_cast::<Recorder>(widget)
            .expect("recorder handler wired to a non-recorder widget");
        log_entry(&recorder.log, recorder.tag, event);
        recorder.swallow
    }
}

impl EventHandler for RecorderHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }

    fn on_mouse_move(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        self.record(widget, "move");
    }
    fn on_mouse_enter(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        self.record(widget, "enter");
    }
    fn on_mouse_leave(&mut self, widget: &mut dyn Widget, _event: &mut Event) {
        self.record(widget, "leave");
    }
    fn on_mouse_press(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if self.record(widget, "press") {
            use brim_core::InputEvent;
            event.swallow();
        }
    }
    fn on_mouse_release(&mut self, widget: &mut dyn Widget, event: &mut MouseButtonEvent) {
        if self.record(widget, "release") {
            use brim_core::InputEvent;
            event.swallow();
        }
    }
    fn on_mouse_click(&mut self, widget: &mut dyn Widget, _event: &mut MouseButtonEvent) {
        self.record(widget, "click");
    }
    fn on_mouse_drag(&mut self, widget: &mut dyn Widget, _event: &mut MouseDragEvent) {
        self.record(widget, "drag");
    }
    fn on_mouse_wheel(&mut self, widget: &mut dyn Widget, event: &mut MouseWheelEvent) {
        if self.record(widget, "wheel") {
            use brim_core::InputEvent;
            event.swallow();
        }
    }
}
