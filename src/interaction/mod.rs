use serde::{Deserialize, Serialize};

/// Hover tooltip shown next to the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Tooltip {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub record_id: String,
    pub title: String,
    pub column_label: String,
    pub value: f64,
}

impl Tooltip {
    /// Text lines in display order: title, then `column: value`.
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Title: {}", self.title),
            format!("{}: {}", self.column_label, self.value),
        ]
    }
}

/// Pointer tracking used to route hover enter/leave events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    hovered: Option<String>,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    /// Updates the hovered marker and reports whether it changed.
    pub fn set_hovered(&mut self, hovered: Option<&str>) -> bool {
        if self.hovered.as_deref() == hovered {
            return false;
        }
        self.hovered = hovered.map(str::to_owned);
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.hovered = None;
    }
}
