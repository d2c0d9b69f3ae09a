//! Shared draw parameters
//!
//! A [`Style`] is threaded through every widget draw call. It carries the
//! palette and the interface scale; individual widgets decide which entries
//! apply to them. There is no style-sheet engine here — hosts that want
//! theming swap the whole `Style` value.

use crate::color::Color;

/// Interaction state of a widget, driving its drawn appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Normal,
    Highlighted,
    Sunken,
}

/// Draw parameters shared by all widgets of a UI instance
#[derive(Clone, Debug)]
pub struct Style {
    /// Interface scale; 1.0 = 96 dpi equivalent
    pub dpi_scale: f32,
    pub clear_color: Color,
    pub widget_color: Color,
    pub widget_highlight: Color,
    pub widget_sunken: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub panel_color: Color,
    pub scrollbar_color: Color,
    /// Selection/decoration fill (text selections, radio marks)
    pub decoration_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            dpi_scale: 1.0,
            clear_color: Color::shade(0.2),
            widget_color: Color::shade(0.6),
            widget_highlight: Color::shade(0.75),
            widget_sunken: Color::shade(0.4),
            border_color: Color::shade(0.1),
            text_color: Color::BLACK,
            panel_color: Color::shade(0.45),
            scrollbar_color: Color::shade(0.3),
            decoration_color: Color::rgb(0.35, 0.55, 0.8),
        }
    }
}

impl Style {
    /// Background fill for a widget in the given interaction state
    pub fn state_color(&self, state: InteractionState) -> Color {
        match state {
            InteractionState::Normal => self.widget_color,
            InteractionState::Highlighted => self.widget_highlight,
            InteractionState::Sunken => self.widget_sunken,
        }
    }
}
