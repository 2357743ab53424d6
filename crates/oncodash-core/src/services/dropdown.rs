//! Two-state menu toggle used by the export and theme menus.

/// Whether a dropdown's choices are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
}

impl Dropdown {
    pub const fn new() -> Self {
        Self { open: false }
    }

    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Flip open/closed, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Pick an item; always collapses the menu.
    pub fn select<T>(&mut self, item: T) -> T {
        self.open = false;
        item
    }

    /// Click outside the control.
    pub fn dismiss(&mut self) {
        self.open = false;
    }
}
