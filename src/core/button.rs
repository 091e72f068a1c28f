//! Button identification.
//!
//! Every pad on the board has a 0-based `ButtonId`. The core never touches
//! concrete widgets; renderers map a `ButtonId` to a `RenderableHandle`
//! through `Presenter::resolve`.

use serde::{Deserialize, Serialize};

/// 0-based index of a button on the board.
///
/// Valid values are `[0, button_count)` for the configured board size.
/// The ID itself is unchecked; `SequenceGame` validates guesses against
/// the configured count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonId(pub u8);

impl ButtonId {
    /// Create a new button ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw button index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check whether this ID is valid for a board of `button_count` buttons.
    #[must_use]
    pub const fn in_range(self, button_count: u8) -> bool {
        self.0 < button_count
    }

    /// Iterate over all button IDs for a board of `button_count` buttons.
    ///
    /// ```
    /// use sequence_recall::core::ButtonId;
    ///
    /// let buttons: Vec<_> = ButtonId::all(4).collect();
    /// assert_eq!(buttons.len(), 4);
    /// assert_eq!(buttons[0], ButtonId::new(0));
    /// assert_eq!(buttons[3], ButtonId::new(3));
    /// ```
    pub fn all(button_count: u8) -> impl Iterator<Item = ButtonId> {
        (0..button_count).map(ButtonId)
    }
}

impl std::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Button({})", self.0)
    }
}

/// Opaque handle to something a renderer can highlight.
///
/// Produced by `Presenter::resolve`; the core passes it around without
/// interpreting it. Renderers define its meaning (a widget slot, a sprite
/// index, a DOM node id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderableHandle(pub u32);

impl RenderableHandle {
    /// Create a new handle.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}
