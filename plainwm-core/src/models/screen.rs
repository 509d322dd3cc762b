use serde::{Deserialize, Serialize};

use super::{Bounds, Strut, WindowHandle};

/// One X screen under management.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub index: usize,
    pub root: WindowHandle,
    /// The full screen area, anchored at the origin.
    pub bounds: Bounds,
    /// The union of every client's reserved screen edges.
    pub strut: Strut,
    /// Shared window used for the size feedback box and the hidden-window
    /// menu. Created by the display server during screen setup.
    pub popup: WindowHandle,
    /// The 1x1 compatibility window advertised via _NET_SUPPORTING_WM_CHECK.
    pub ewmh_compat: WindowHandle,
    /// DISPLAY value naming this screen, handed to spawned commands.
    pub display: Option<String>,
}

impl Screen {
    #[must_use]
    pub fn new(index: usize, root: WindowHandle, width: i32, height: i32) -> Self {
        Self {
            index,
            root,
            bounds: Bounds::new(0, 0, width, height),
            strut: Strut::default(),
            popup: WindowHandle::NONE,
            ewmh_compat: WindowHandle::NONE,
            display: None,
        }
    }
}
