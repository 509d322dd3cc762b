use serde::{Deserialize, Serialize};

use super::{Edge, MenuGeometry, WindowHandle};

/// State carried while a move or resize drag is in progress.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReshapeDrag {
    pub handle: WindowHandle,
    /// `None` for a plain move.
    pub edge: Option<Edge>,
    /// Client origin minus pointer position at the moment the drag began;
    /// moves keep this offset constant.
    pub grab: (i32, i32),
}

/// State carried while the hidden-window menu is popped up.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSession {
    pub screen: usize,
    /// Layout snapshotted when the menu went up.
    pub geometry: MenuGeometry,
    /// The highlighted entry, if the pointer is over one.
    pub item: Option<usize>,
}

/// The manager's interaction mode. Exactly one of these holds at any time;
/// the payloads carry the transient per-mode state so that leaving the mode
/// drops it automatically.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Start-up: screens being announced and existing windows adopted.
    Initialising,
    Idle,
    /// An interactive move or resize.
    Reshaping(ReshapeDrag),
    /// The hidden-window menu is showing.
    MenuUp(MenuSession),
    /// A press in the close box, waiting for the confirming release.
    ClosingWindow(WindowHandle),
    /// A press of the hide button, waiting for the confirming release.
    HidingWindow(WindowHandle),
}

impl Default for Mode {
    fn default() -> Self {
        Self::Initialising
    }
}

impl Mode {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The client a press started an action on, while a confirm mode holds.
    #[must_use]
    pub fn pending_selection(&self) -> Option<WindowHandle> {
        match self {
            Self::ClosingWindow(h) | Self::HidingWindow(h) => Some(*h),
            _ => None,
        }
    }

    /// Whether this mode concerns the given client, so that removing the
    /// client must force the mode back to idle.
    #[must_use]
    pub fn involves(&self, handle: WindowHandle) -> bool {
        match self {
            Self::Reshaping(drag) => drag.handle == handle,
            Self::ClosingWindow(h) | Self::HidingWindow(h) => *h == handle,
            _ => false,
        }
    }
}
