mod bounds;
mod client;
mod edge;
mod ewmh_state;
mod frame;
mod hidden_menu;
mod manager;
mod mode;
mod registry;
mod screen;
mod size_hints;
mod strut;
mod window_type;

pub use bounds::Bounds;
pub use client::{Client, InternalState, Protocols, WmState};
pub use edge::{Edge, FrameZone};
pub use ewmh_state::{EwmhProperty, EwmhState, StateAction};
pub use frame::FrameMetrics;
pub use hidden_menu::{HiddenMenu, MenuGeometry};
pub use manager::Manager;
pub use mode::{MenuSession, Mode, ReshapeDrag};
pub use registry::Registry;
pub use screen::Screen;
pub use size_hints::{Gravity, SizeConstraints, SizeHints};
pub use strut::Strut;
pub use window_type::WindowType;

use serde::{Deserialize, Serialize};

/// An X window id. The server guarantees ids are unique for the lifetime of
/// the window, which makes them usable as registry keys.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    pub const NONE: WindowHandle = WindowHandle(0);

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}
