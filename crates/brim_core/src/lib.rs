//! Brim Core Primitives
//!
//! This crate provides the foundational value types for the Brim widget
//! toolkit:
//!
//! - **Geometry**: points, sizes, and rectangles in pixel space
//! - **Events**: pointer event value types carrying the swallow flag
//! - **Paint abstraction**: the `PaintEngine` collaborator trait and the
//!   `Painter` draw-state that widgets route their geometry through
//! - **Style**: shared draw parameters (palette, dpi scale) and the
//!   widget interaction-state enum
//!
//! Nothing in this crate knows about the screen graph; the graph and the
//! concrete widgets live in `brim_graph` and `brim_widgets`.

pub mod color;
pub mod event;
pub mod geometry;
pub mod paint;
pub mod style;

pub use color::Color;
pub use event::{
    Event, InputEvent, MouseButton, MouseButtonEvent, MouseDragEvent, MouseWheelEvent,
    WheelDirection,
};
pub use geometry::{Point, Rect, Size};
pub use paint::{DrawMode, PaintEngine, PaintState, Painter, Polygon, TextAlignment};
pub use style::{InteractionState, Style};
