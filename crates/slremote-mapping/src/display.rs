//! Shadow copy of the device screens.
//!
//! Setters return the message to send only when the cell changes, so
//! repeated host feedback with the same value does not flood the port.

use slremote_protocol::{reset_displays, DeviceMessage, Rgb, CENTER_COLUMN, COLUMN_COUNT, FIELDS_PER_COLUMN};

/// Contents of one screen field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub text: String,
    /// `None` until written: the reset sequence leaves device values alone.
    pub value: Option<u8>,
    pub color: Rgb,
}

impl Default for DisplayCell {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: None,
            color: Rgb::GRAY,
        }
    }
}

/// 9 columns × 4 fields: eight knob screens and the center screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    cells: [[DisplayCell; FIELDS_PER_COLUMN]; COLUMN_COUNT],
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| DisplayCell::default())),
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank every cell and return the device reset sequence. Values are
    /// forgotten rather than zeroed, so the next `set_value` always sends.
    pub fn reset(&mut self) -> Vec<DeviceMessage> {
        *self = Self::default();
        reset_displays()
    }

    pub fn cell(&self, column: u8, field: u8) -> Option<&DisplayCell> {
        self.cells
            .get(column.min(CENTER_COLUMN) as usize)
            .and_then(|fields| fields.get(field as usize))
    }

    fn cell_mut(&mut self, column: u8, field: u8) -> Option<&mut DisplayCell> {
        self.cells
            .get_mut(column.min(CENTER_COLUMN) as usize)
            .and_then(|fields| fields.get_mut(field as usize))
    }

    /// Fields outside the tracked grid always produce a message.
    pub fn set_text(&mut self, column: u8, field: u8, text: &str) -> Option<DeviceMessage> {
        if let Some(cell) = self.cell_mut(column, field) {
            if cell.text == text {
                return None;
            }
            cell.text = text.to_string();
        }
        Some(DeviceMessage::set_display_text(column, field, text))
    }

    pub fn set_value(&mut self, column: u8, field: u8, value: u8) -> Option<DeviceMessage> {
        let value = value.min(0x7F);
        if let Some(cell) = self.cell_mut(column, field) {
            if cell.value == Some(value) {
                return None;
            }
            cell.value = Some(value);
        }
        Some(DeviceMessage::set_display_value(column, field, value))
    }

    pub fn set_color(&mut self, column: u8, field: u8, color: Rgb) -> Option<DeviceMessage> {
        let color = Rgb::new(color.r, color.g, color.b);
        if let Some(cell) = self.cell_mut(column, field) {
            if cell.color == color {
                return None;
            }
            cell.color = color;
        }
        Some(DeviceMessage::set_display_color(column, field, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_returns_sequence_and_clears() {
        let mut display = DisplayState::new();
        display.set_text(0, 0, "Kick");
        let messages = display.reset();
        assert_eq!(messages.len(), 73);
        assert_eq!(display.cell(0, 0).unwrap().text, "");
        assert_eq!(display.cell(8, 3).unwrap().color, Rgb::GRAY);
    }

    #[test]
    fn test_unchanged_cells_are_suppressed() {
        let mut display = DisplayState::new();
        assert!(display.set_text(8, 0, "Mixer Page").is_some());
        assert!(display.set_text(8, 0, "Mixer Page").is_none());
        assert!(display.set_text(8, 0, "Test Page").is_some());

        assert!(display.set_value(2, 0, 64).is_some());
        assert!(display.set_value(2, 0, 64).is_none());

        assert!(display.set_color(1, 0, Rgb::GRAY).is_none());
        assert!(display.set_color(1, 0, Rgb::new(127, 0, 0)).is_some());
    }

    #[test]
    fn test_out_of_grid_fields_pass_through() {
        let mut display = DisplayState::new();
        assert!(display.set_text(3, 5, "").is_some());
        assert!(display.set_text(3, 5, "").is_some());
        assert!(display.cell(3, 5).is_none());
    }

    #[test]
    fn test_column_saturates_like_codec() {
        let mut display = DisplayState::new();
        display.set_text(42, 1, "Center");
        assert_eq!(display.cell(8, 1).unwrap().text, "Center");
        assert_eq!(display.cell(42, 1).unwrap().text, "Center");
    }

    #[test]
    fn test_value_resent_after_reset() {
        let mut display = DisplayState::new();
        assert!(display.set_value(0, 0, 0).is_some());
        assert!(display.set_value(0, 0, 0).is_none());

        display.reset();
        assert_eq!(display.cell(0, 0).unwrap().value, None);
        assert_eq!(
            display.set_value(0, 0, 0),
            Some(DeviceMessage::set_display_value(0, 0, 0))
        );
    }
}
