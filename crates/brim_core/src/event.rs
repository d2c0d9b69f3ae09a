//! Pointer event value types
//!
//! One value is created per raw input sample and discarded after dispatch.
//! Every event carries a *swallow* flag: a handler that fully consumed the
//! event calls [`InputEvent::swallow`] and the dispatcher stops forwarding it
//! to any further handler in the same dispatch chain. The flag is an explicit
//! boolean on the value, never control flow.

use crate::geometry::Point;

/// Mouse button identifier (matches platform)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Wheel scroll direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Common capability of all pointer events: location plus the swallow flag.
pub trait InputEvent {
    /// Window-pixel location the sample was taken at
    fn location(&self) -> Point;

    /// Mark the event as consumed; stops further forwarding.
    fn swallow(&mut self);

    fn is_swallowed(&self) -> bool;
}

macro_rules! impl_input_event {
    ($ty:ident) => {
        impl InputEvent for $ty {
            fn location(&self) -> Point {
                self.location
            }

            fn swallow(&mut self) {
                self.swallowed = true;
            }

            fn is_swallowed(&self) -> bool {
                self.swallowed
            }
        }
    };
}

/// Plain pointer event (move, enter, leave)
#[derive(Clone, Debug)]
pub struct Event {
    pub location: Point,
    swallowed: bool,
}

impl Event {
    pub fn new(location: Point) -> Self {
        Self {
            location,
            swallowed: false,
        }
    }
}

impl_input_event!(Event);

/// Button press/release/click event
#[derive(Clone, Debug)]
pub struct MouseButtonEvent {
    pub location: Point,
    pub button: MouseButton,
    swallowed: bool,
}

impl MouseButtonEvent {
    pub fn new(location: Point, button: MouseButton) -> Self {
        Self {
            location,
            button,
            swallowed: false,
        }
    }
}

impl_input_event!(MouseButtonEvent);

/// Drag event: a move while a button is held, past the drag threshold
#[derive(Clone, Debug)]
pub struct MouseDragEvent {
    pub location: Point,
    pub button: MouseButton,
    /// Offset of the current location from where the button was pressed
    pub drag_distance: Point,
    swallowed: bool,
}

impl MouseDragEvent {
    pub fn new(location: Point, button: MouseButton, drag_distance: Point) -> Self {
        Self {
            location,
            button,
            drag_distance,
            swallowed: false,
        }
    }
}

impl_input_event!(MouseDragEvent);

/// Wheel event
#[derive(Clone, Debug)]
pub struct MouseWheelEvent {
    pub location: Point,
    pub direction: WheelDirection,
    swallowed: bool,
}

impl MouseWheelEvent {
    pub fn new(location: Point, direction: WheelDirection) -> Self {
        Self {
            location,
            direction,
            swallowed: false,
        }
    }
}

impl_input_event!(MouseWheelEvent);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swallow_flag_starts_clear() {
        let event = Event::new(Point::new(1.0, 2.0));
        assert!(!event.is_swallowed());
        assert_eq!(event.location(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_swallow_is_sticky() {
        let mut event = MouseButtonEvent::new(Point::ZERO, MouseButton::Left);
        event.swallow();
        assert!(event.is_swallowed());
        event.swallow();
        assert!(event.is_swallowed());
    }
}
