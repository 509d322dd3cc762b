use serde::{Deserialize, Serialize};

use super::{
    Bounds, EwmhState, FrameZone, SizeConstraints, SizeHints, Strut, WindowHandle, WindowType,
};

/// ICCCM WM_STATE values.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmState {
    Withdrawn,
    Normal,
    Iconic,
}

impl WmState {
    /// The on-the-wire WM_STATE value (IconicState is 3; 2 was the obsolete
    /// zoomed state).
    #[must_use]
    pub fn to_raw(self) -> u64 {
        match self {
            Self::Withdrawn => 0,
            Self::Normal => 1,
            Self::Iconic => 3,
        }
    }
}

/// Transient bookkeeping: a reparent we issued ourselves generates an unmap
/// event that must not be mistaken for the client unmapping itself.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalState {
    Normal,
    ReparentPending,
}

/// WM_PROTOCOLS capabilities this manager cares about.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Protocols {
    /// WM_DELETE_WINDOW: the client wants a message instead of a kill.
    pub delete: bool,
    /// WM_TAKE_FOCUS: the client wants to be told when to take focus.
    pub take_focus: bool,
}

/// One managed top-level window.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Client {
    pub window: WindowHandle,
    /// The decoration window, once the client has been reparented into one.
    pub frame: Option<WindowHandle>,
    /// The window this one is a dialog of, per WM_TRANSIENT_FOR.
    pub trans: Option<WindowHandle>,
    pub screen: usize,
    pub framed: bool,
    /// The bordered client box in root coordinates. The frame (when there
    /// is one) is one title-bar height taller, sitting above this box.
    pub bounds: Bounds,
    /// Geometry remembered while fullscreen, restored on the way out.
    pub return_bounds: Option<Bounds>,
    pub hints: SizeHints,
    pub constraints: SizeConstraints,
    pub state: WmState,
    pub internal: InternalState,
    pub hidden: bool,
    pub accepts_focus: bool,
    pub protocols: Protocols,
    pub wtype: WindowType,
    pub ewmh: EwmhState,
    pub strut: Strut,
    pub name: Option<String>,
    /// Middle-elided variant of the name for the hidden-window menu, only
    /// present when the full name would not fit on the screen.
    pub menu_name: Option<String>,
    /// The border width the window asked for; restored when the manager
    /// lets go of the window.
    pub original_border: i32,
    pub colormap: Option<u64>,
    /// WM_COLORMAP_WINDOWS entries in property order. A `None` colormap
    /// marks the entry naming the client window itself, whose current
    /// colormap is substituted at install time.
    pub colormap_windows: Vec<(WindowHandle, Option<u64>)>,
    /// Which cursor zone is currently installed on the frame.
    pub cursor: Option<FrameZone>,
}

impl Client {
    /// A freshly tracked window: withdrawn, unframed, focus-accepting, no
    /// protocols, no compliance state.
    #[must_use]
    pub fn new(window: WindowHandle, screen: usize) -> Self {
        Self {
            window,
            frame: None,
            trans: None,
            screen,
            framed: false,
            bounds: Bounds::default(),
            return_bounds: None,
            hints: SizeHints::default(),
            constraints: SizeConstraints::default(),
            state: WmState::Withdrawn,
            internal: InternalState::Normal,
            hidden: false,
            accepts_focus: true,
            protocols: Protocols::default(),
            wtype: WindowType::Unset,
            ewmh: EwmhState::default(),
            strut: Strut::default(),
            name: None,
            menu_name: None,
            original_border: 0,
            colormap: None,
            colormap_windows: Vec::new(),
            cursor: None,
        }
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.state == WmState::Normal
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == WmState::Iconic
    }

    #[must_use]
    pub fn is_withdrawn(&self) -> bool {
        self.state == WmState::Withdrawn
    }

    /// The name shown on the hidden-window menu.
    #[must_use]
    pub fn menu_title(&self) -> &str {
        self.menu_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// True if `handle` is this client's window or frame.
    #[must_use]
    pub fn owns(&self, handle: WindowHandle) -> bool {
        self.window == handle || self.frame == Some(handle)
    }

    /// Refreshes the effective constraints after the hints or the framing
    /// decision changed.
    pub fn refresh_constraints(&mut self, border: i32) {
        self.constraints = self.hints.constraints(self.framed, border);
    }
}
