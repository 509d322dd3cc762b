use serde::{Deserialize, Serialize};

/// _NET_WM_WINDOW_TYPE. `Unset` means the property was missing, in which
/// case the Motif decoration hints decide whether the window gets a frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Utility,
    Splash,
    Dialog,
    Normal,
    Unset,
}

impl Default for WindowType {
    fn default() -> Self {
        Self::Unset
    }
}

impl WindowType {
    /// Whether a window of this type gets a frame. Desktop, dock, menu and
    /// splash windows draw themselves.
    #[must_use]
    pub fn wants_frame(self) -> bool {
        !matches!(
            self,
            Self::Desktop | Self::Dock | Self::Menu | Self::Splash
        )
    }
}
