//! Brim Widget Variants
//!
//! Concrete widgets over the `brim_graph` capability traits, each paired with
//! its event handler:
//!
//! - [`PushButton`] — momentary button with an optional bound action
//! - [`RadioButton`] — latching button; fires its action on press
//! - [`TextBox`] — single-line text field with an edit mode
//! - [`ScrollView`] — scrollable viewport with a composed [`ScrollBar`]
//! - [`Panel`] — background container with a header label
//! - [`Label`] — inert text
//!
//! Widgets only carry state and draw themselves; all pointer behavior lives
//! in the handlers, which mutate widget state through `widget_cast` and the
//! event-router dispatch described in `brim_graph`.

pub mod button;
pub mod label;
pub mod panel;
pub mod radio_button;
pub mod scroll_bar;
pub mod scroll_view;
pub mod text_box;

pub use button::PushButton;
pub use label::Label;
pub use panel::Panel;
pub use radio_button::RadioButton;
pub use scroll_bar::ScrollBar;
pub use scroll_view::{ScrollView, SCROLL_STEP_SIZE};
pub use text_box::TextBox;
