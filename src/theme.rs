use ratatui::style::Color;

// Centralized colors for the tree view.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);
pub const ACCENT_ALT_RGB: (u8, u8, u8) = (255, 165, 0);

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

pub fn accent_alt() -> Color {
    Color::Rgb(ACCENT_ALT_RGB.0, ACCENT_ALT_RGB.1, ACCENT_ALT_RGB.2)
}

// Rows
pub fn row_fg() -> Color {
    Color::White
}
pub fn container_fg() -> Color {
    Color::Cyan
}
pub fn dragged_fg() -> Color {
    Color::DarkGray
}

// Status line
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}
