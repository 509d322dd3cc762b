//! The manager's complete mutable state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{Config, FocusMode};
use crate::models::{
    Bounds, FrameMetrics, HiddenMenu, Mode, Registry, Screen, Strut, WindowHandle,
};

#[derive(Serialize, Deserialize, Debug)]
pub struct State {
    pub screens: Vec<Screen>,
    pub registry: Registry,
    pub hidden: HiddenMenu,
    pub mode: Mode,
    /// The client holding input focus.
    pub focus: Option<WindowHandle>,
    /// The previous holder, refocused when the current one goes away.
    pub last_focus: Option<WindowHandle>,
    pub frame: FrameMetrics,
    pub focus_mode: FocusMode,
    pub edge_resistance: i32,
    /// Where auto-placement will put the next window.
    pub placement: (i32, i32),
    pub placement_step: i32,
    pub placement_reset_offset: i32,
    /// Screens whose client-list rewrite is in progress, guarding against
    /// the events their own restacking generates.
    pub(crate) updating_client_list: HashSet<usize>,
}

impl State {
    pub(crate) fn new(config: &impl Config) -> Self {
        Self {
            screens: Vec::new(),
            registry: Registry::default(),
            hidden: HiddenMenu::default(),
            mode: Mode::default(),
            focus: None,
            last_focus: None,
            frame: FrameMetrics::new(config.border_width(), 0),
            focus_mode: config.focus_mode(),
            edge_resistance: config.edge_resistance(),
            placement: config.placement_start(),
            placement_step: config.placement_step(),
            placement_reset_offset: config.placement_reset_offset(),
            updating_client_list: HashSet::new(),
        }
    }

    #[must_use]
    pub fn screen_for_root(&self, root: WindowHandle) -> Option<&Screen> {
        self.screens.iter().find(|s| s.root == root)
    }

    #[must_use]
    pub fn focused(&self, handle: WindowHandle) -> bool {
        self.focus == Some(handle)
    }

    /// Picks the next spot for a window with no position of its own,
    /// advancing the running cursor. The cursor starts inside the reserved
    /// edges, walks diagonally by one step per window, and wraps back near
    /// the strut once past the middle of the screen. A window too large for
    /// the cursor but small enough for the usable area is centred on that
    /// axis instead.
    pub fn auto_place(&mut self, screen: usize, width: i32, height: i32) -> (i32, i32) {
        let (display, strut): (Bounds, Strut) = match self.screens.get(screen) {
            Some(s) => (s.bounds, s.strut),
            None => return self.placement,
        };
        let (mut ax, mut ay) = self.placement;
        if ax < strut.left {
            ax = strut.left;
        }
        if ay < strut.top {
            ay = strut.top;
        }

        let x;
        if ax + width > display.width - strut.right
            && width <= display.width - strut.left - strut.right
        {
            x = (display.width - width) / 2;
            ax = strut.left + self.placement_reset_offset;
        } else {
            x = ax;
            ax += self.placement_step;
            if ax > display.width / 2 {
                ax = strut.left + self.placement_reset_offset;
            }
        }

        let y;
        if ay + height > display.height - strut.bottom
            && height <= display.height - strut.top - strut.bottom
        {
            y = (display.height - height) / 2;
            ay = strut.top + self.placement_reset_offset;
        } else {
            y = ay;
            ay += self.placement_step;
            if ay > display.height / 2 {
                ay = strut.top + self.placement_reset_offset;
            }
        }

        self.placement = (ax, ay);
        (x, y)
    }
}
