use crate::models::{Edge, EwmhProperty, Screen, StateAction, WindowHandle};

/// A pointer button event, with both window-relative and root coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub window: WindowHandle,
    pub root: WindowHandle,
    pub button: u32,
    pub x: i32,
    pub y: i32,
    pub x_root: i32,
    pub y_root: i32,
    pub time: u64,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEvent {
    pub window: WindowHandle,
    /// The child of `window` the pointer is in, if any.
    pub subwindow: WindowHandle,
    pub x: i32,
    pub y: i32,
    pub x_root: i32,
    pub y_root: i32,
}

/// The fields of a configure request that were actually supplied. Absent
/// fields keep their current values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowChanges {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub border_width: Option<i32>,
    pub sibling: Option<WindowHandle>,
    /// Raw stacking mode (Above, Below, TopIf, BottomIf, Opposite).
    pub stack_mode: Option<i32>,
}

/// Which property a PropertyNotify concerned, pre-classified to the ones
/// the manager reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Name,
    TransientFor,
    NormalHints,
    ColormapWindows,
    Strut,
}

/// One translated server event, as handed to the dispatcher.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    ScreenCreate(Screen),
    MapRequest(WindowHandle),
    Unmap {
        window: WindowHandle,
        /// True when the client announced the unmap itself with a synthetic
        /// event, per ICCCM 4.1.4.
        synthetic: bool,
    },
    Destroy(WindowHandle),
    ConfigureRequest {
        window: WindowHandle,
        changes: WindowChanges,
    },
    CirculateRequest {
        window: WindowHandle,
        on_top: bool,
    },
    /// WM_CHANGE_STATE asking for iconification.
    IconifyRequest(WindowHandle),
    /// A _NET_WM_STATE change; up to two properties per message.
    StateChangeRequest {
        window: WindowHandle,
        action: StateAction,
        properties: [Option<EwmhProperty>; 2],
    },
    /// _NET_ACTIVE_WINDOW.
    ActivateRequest(WindowHandle),
    /// _NET_CLOSE_WINDOW.
    CloseRequest(WindowHandle),
    /// _NET_WM_MOVERESIZE; `None` means a move rather than an edge resize.
    DragRequest {
        window: WindowHandle,
        edge: Option<Edge>,
    },
    PropertyChange {
        window: WindowHandle,
        kind: PropertyKind,
    },
    ColormapChange {
        window: WindowHandle,
        colormap: Option<u64>,
    },
    /// The input focus moved; the holder is re-queried rather than trusted
    /// from the event.
    FocusIn,
    /// A client window was reparented away from the root by someone else.
    ReparentedAway(WindowHandle),
    Enter {
        window: WindowHandle,
        time: u64,
    },
    ButtonPress(ButtonEvent),
    ButtonRelease(ButtonEvent),
    Motion(MotionEvent),
    Expose(WindowHandle),
}
