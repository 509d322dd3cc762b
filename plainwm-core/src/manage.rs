//! Window adoption and the client-side operations built on it: framing,
//! naming, placement, colormaps, hiding and withdrawal.

use crate::config::{Config, FocusMode};
use crate::display_servers::DisplayServer;
use crate::models::{Bounds, Client, Gravity, Manager, Mode, WindowHandle, WindowType, WmState};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Takes over a window: reads every property that matters, decides
    /// whether it gets a frame, places it and maps it. The window must
    /// already be tracked; callers add it to the registry first.
    pub fn manage_window(&mut self, window: WindowHandle) {
        let border = self.state.frame.border;
        let title = self.state.frame.title_height;

        let wtype = self.display_server.window_type(window);
        let net_state = self.display_server.ewmh_state(window);
        self.display_server.set_allowed_actions(window);

        // An unset window type falls back to the Motif decoration hints,
        // even though EWMH says to read it as "normal".
        let mut framed = if wtype == WindowType::Unset {
            self.display_server.decorations_allowed(window)
        } else {
            wtype.wants_frame()
        };
        if self.display_server.is_shaped(window) {
            framed = false;
        }

        {
            let Some(c) = self.state.registry.get_mut(window) else {
                return;
            };
            c.wtype = wtype;
            if let Some(state) = net_state {
                c.ewmh = state;
            }
            c.framed = framed;
        }

        self.update_client_strut(window);

        let hints = self.display_server.wm_hints(window);
        self.fetch_window_name(window);
        self.refetch_normal_hints(window);

        let colormap = self.display_server.window_colormap(window);
        self.refetch_colormaps(window);

        let protocols = self.display_server.protocols(window);
        let trans = self.display_server.transient_for(window);
        let wm_state = self.display_server.wm_state(window);
        let fresh = self.display_server.window_geometry(window);

        let initial_state = wm_state.unwrap_or(if hints.start_iconic {
            WmState::Iconic
        } else {
            WmState::Normal
        });

        let screen_index;
        let raw_origin;
        let size;
        let gravity;
        let trust_position;
        {
            let Some(c) = self.state.registry.get_mut(window) else {
                return;
            };
            c.colormap = colormap;
            c.protocols = protocols;
            c.trans = trans;

            if let Some(input) = hints.accepts_input {
                c.accepts_focus = input;
            }
            if protocols.take_focus {
                // WM_TAKE_FOCUS overrides the input hint.
                c.accepts_focus = true;
            }

            // Fresh geometry; the advertised size excludes borders (ICCCM
            // 4.1.2.3), so ours are added on top.
            let raw = fresh.unwrap_or(c.bounds);
            c.bounds.width = raw.width;
            c.bounds.height = raw.height;
            if c.framed {
                c.bounds.width += 2 * border;
                c.bounds.height += 2 * border;
            }
            // OpenGL programs have a habit of appearing smaller than their
            // own minimum size, which they don't like.
            if c.bounds.width < c.constraints.min_width {
                c.bounds.width = c.constraints.min_width;
            }
            if c.bounds.height < c.constraints.min_height {
                c.bounds.height = c.constraints.min_height;
            }

            screen_index = c.screen;
            raw_origin = (raw.x, raw.y);
            size = (c.bounds.width, c.bounds.height);
            gravity = c.hints.gravity;
            trust_position = c.hints.user_position || !c.framed;
        }

        // A dialog's program-given position is honoured as-is. A
        // user-given position is honoured too, with the gravity applied so
        // the advertised corner survives the framing; the same goes for
        // frameless windows and for everything found at start-up, placed
        // sensibly by whoever ran before us. The rest are auto-placed.
        let program_position = self
            .state
            .registry
            .get(window)
            .is_some_and(|c| c.hints.program_position);
        let (x, y) = if trans.is_some() && program_position {
            raw_origin
        } else if trust_position || self.state.mode == Mode::Initialising {
            let (dx, dy) = gravity_offset(gravity, border);
            (raw_origin.0 + dx, raw_origin.1 + dy)
        } else {
            self.state.auto_place(screen_index, size.0, size.1)
        };
        if let Some(c) = self.state.registry.get_mut(window) {
            c.bounds.x = x;
            c.bounds.y = y;
        }

        if framed {
            let frame = self.display_server.create_frame(
                screen_index,
                Bounds::new(x, y - title, size.0, size.1 + title),
            );
            self.display_server
                .resize_window(window, size.0 - 2 * border, size.1 - 2 * border);
            if let Some(c) = self.state.registry.get_mut(window) {
                c.frame = Some(frame);
            }
        }
        self.display_server.setup_client_window(window);

        let frame = self.state.registry.get(window).and_then(|c| c.frame);
        match frame {
            Some(frame) => {
                self.display_server
                    .reparent_window(window, frame, border, border + title);
            }
            None => {
                if let Some(root) = self.state.screens.get(screen_index).map(|s| s.root) {
                    self.display_server.reparent_window(window, root, x, y);
                }
            }
        }
        self.display_server.add_to_save_set(window);

        if initial_state == WmState::Iconic {
            self.hide_client(window);
        } else {
            if let Some(c) = self.state.registry.get_mut(window) {
                c.hidden = false;
            }
            if let Some(frame) = frame {
                self.display_server.map_window(frame);
            }
            self.display_server.map_window(window);
            let on = self.state.focus_mode == FocusMode::Click;
            self.set_active(window, on, 0);
            self.set_client_state(window, WmState::Normal);
        }

        let fullscreen = self
            .state
            .registry
            .get(window)
            .is_some_and(|c| c.ewmh.fullscreen);
        if fullscreen {
            self.enter_fullscreen(window);
        }
        if self.state.focus != Some(window) {
            self.cmap_focus(self.state.focus);
        }
    }

    /// Tells the client where it ended up, in its own coordinate space:
    /// framed clients hear about their interior, not the bordered box.
    pub(crate) fn send_configure(&self, c: &Client) {
        let border = self.state.frame.border;
        let bounds = if c.framed {
            Bounds::new(
                c.bounds.x + border,
                c.bounds.y + border,
                c.bounds.width - 2 * border,
                c.bounds.height - 2 * border,
            )
        } else {
            c.bounds
        };
        self.display_server
            .send_configure_notify(c.window, bounds, c.original_border);
    }

    /// Repaints a frame. Fullscreen windows have their frame pushed
    /// off-screen, so there is nothing to paint.
    pub(crate) fn draw_border(&self, c: &Client, active: bool) {
        let Some(frame) = c.frame else {
            return;
        };
        if c.ewmh.fullscreen {
            return;
        }
        let with_box = active || self.state.focus_mode == FocusMode::Click;
        self.display_server
            .draw_frame(frame, c.name.as_deref(), active, with_box);
    }

    /// Re-reads the window's name and refreshes the title bar, unless this
    /// is the first fetch and there is nothing drawn yet. A client that
    /// deletes its name property keeps its old name.
    pub(crate) fn fetch_window_name(&mut self, handle: WindowHandle) {
        let (window, screen, was_nameless) = match self.state.registry.get(handle) {
            Some(c) => (c.window, c.screen, c.name.is_none()),
            None => return,
        };
        if let Some(name) = self.display_server.window_name(window) {
            let display_width = self
                .state
                .screens
                .get(screen)
                .map_or(0, |s| s.bounds.width);
            let menu_name = self.elide_name(&name, display_width);
            if let Some(c) = self.state.registry.get_mut(handle) {
                c.name = Some(name);
                c.menu_name = menu_name;
            }
        }
        if !was_nameless {
            if let Some(c) = self.state.registry.get(handle) {
                let snapshot = c.clone();
                self.draw_border(&snapshot, self.state.focused(snapshot.window));
            }
        }
    }

    /// Middle-elides a name that would overflow the hidden-window menu,
    /// cutting ever more out of the middle until the result fits the
    /// display less a 10% margin. Gives up and keeps the full name when
    /// the halves get too short to be worth showing.
    fn elide_name(&self, name: &str, display_width: i32) -> Option<String> {
        let limit = display_width - display_width / 10;
        if self.display_server.popup_text_width(name) <= limit {
            return None;
        }
        let chars: Vec<char> = name.chars().collect();
        let half = chars.len() / 2;
        let mut cut = 5;
        while cut < half {
            let mut candidate: String = chars[..half - cut].iter().collect();
            candidate.push_str(" [...] ");
            candidate.extend(chars[half + cut..].iter());
            cut += 1;
            let width = self.display_server.popup_text_width(&candidate);
            if width == 0 || width <= limit {
                return Some(candidate);
            }
        }
        None
    }

    pub(crate) fn refetch_normal_hints(&mut self, handle: WindowHandle) {
        let window = match self.state.registry.get(handle) {
            Some(c) => c.window,
            None => return,
        };
        let hints = self.display_server.normal_hints(window);
        let border = self.state.frame.border;
        if let Some(c) = self.state.registry.get_mut(handle) {
            c.hints = hints;
            c.refresh_constraints(border);
        }
    }

    pub(crate) fn refetch_colormaps(&mut self, handle: WindowHandle) {
        let window = match self.state.registry.get(handle) {
            Some(c) => c.window,
            None => return,
        };
        let list = self.display_server.colormap_windows(window);
        if let Some(c) = self.state.registry.get_mut(handle) {
            c.colormap_windows = list;
        }
    }

    /// Installs the colormaps the given client wants, or the default when
    /// there is none. WM_COLORMAP_WINDOWS entries are installed back to
    /// front so the first entry ends up winning (ICCCM 4.1.8); a client
    /// without any borrows its transient parent's list.
    pub(crate) fn cmap_focus(&self, handle: Option<WindowHandle>) {
        match handle.and_then(|h| self.state.registry.get(h)) {
            Some(c) => self.cmap_focus_client(c),
            None => self.display_server.install_colormap(None),
        }
    }

    fn cmap_focus_client(&self, c: &Client) {
        if !c.colormap_windows.is_empty() {
            let mut found = false;
            for &(window, colormap) in c.colormap_windows.iter().rev() {
                self.display_server
                    .install_colormap(colormap.or(c.colormap));
                if window == c.window {
                    found = true;
                }
            }
            if !found {
                self.display_server.install_colormap(c.colormap);
            }
            return;
        }
        if let Some(parent) = c.trans.and_then(|t| self.state.registry.get(t)) {
            if !parent.colormap_windows.is_empty() {
                self.cmap_focus_client(parent);
                return;
            }
        }
        self.display_server.install_colormap(c.colormap);
    }

    /// Asks the client to close itself, or severs its connection if it
    /// never promised to listen.
    pub fn close_client(&self, handle: WindowHandle) {
        let Some(c) = self.state.registry.get(handle) else {
            return;
        };
        if c.protocols.delete {
            self.display_server.send_delete(c.window);
        } else {
            self.display_server.kill_client(c.window);
        }
    }

    /// Unmaps the client onto the hidden-window menu.
    pub fn hide_client(&mut self, handle: WindowHandle) {
        let (window, frame) = match self.state.registry.get(handle) {
            Some(c) => (c.window, c.frame),
            None => return,
        };
        self.state.hidden.push(window);
        if let Some(frame) = frame {
            self.display_server.unmap_window(frame);
        }
        self.display_server.unmap_window(window);
        if let Some(c) = self.state.registry.get_mut(window) {
            c.hidden = true;
        }
        if self.state.focus == Some(window) {
            self.focus_client(None, 0);
        }
        self.set_client_state(window, WmState::Iconic);
    }

    /// Takes the nth hidden-menu entry off the menu, remapping and raising
    /// it unless `map` is false (which just forgets a window that went
    /// away while hidden).
    pub fn unhide_nth(&mut self, n: usize, map: bool) {
        let Some(window) = self.state.hidden.take_nth(n) else {
            return;
        };
        if let Some(c) = self.state.registry.get_mut(window) {
            c.hidden = false;
        }
        if !map {
            return;
        }
        let frame = self.state.registry.get(window).and_then(|c| c.frame);
        if let Some(frame) = frame {
            self.display_server.map_window(frame);
        }
        self.display_server.map_window(window);
        self.raise_client(window);
        self.set_client_state(window, WmState::Normal);
        if self.state.focus_mode == FocusMode::Click {
            // It feels right that the unhidden window gets focus.
            self.focus_client(Some(window), 0);
        }
    }

    pub fn unhide_client(&mut self, handle: WindowHandle, map: bool) {
        let Some(window) = self.state.registry.get(handle).map(|c| c.window) else {
            return;
        };
        if let Some(n) = self.state.hidden.index_of(window) {
            self.unhide_nth(n, map);
        }
    }

    /// Returns a window the client has unmapped to its unmanaged state:
    /// out of the frame, back under the root, off the save-set. The frame
    /// is kept around in case the client maps again.
    pub(crate) fn withdraw_client(&mut self, handle: WindowHandle) {
        let (window, frame, screen, bounds) = match self.state.registry.get(handle) {
            Some(c) => (c.window, c.frame, c.screen, c.bounds),
            None => return,
        };
        if let Some(frame) = frame {
            self.display_server.unmap_window(frame);
            if let Some(root) = self.state.screens.get(screen).map(|s| s.root) {
                self.display_server
                    .reparent_window(window, root, bounds.x, bounds.y);
            }
        }
        self.display_server.remove_from_save_set(window);
        self.set_client_state(window, WmState::Withdrawn);
    }
}

/// The position correction ICCCM gravity asks for when a window grows a
/// frame: gravities anchoring the right or bottom edge pull the window back
/// by the border it gained on each side.
fn gravity_offset(gravity: Option<Gravity>, border: i32) -> (i32, i32) {
    match gravity {
        Some(Gravity::NorthEast) => (-2 * border, 0),
        Some(Gravity::SouthWest) => (0, -2 * border),
        Some(Gravity::SouthEast) => (-2 * border, -2 * border),
        _ => (0, 0),
    }
}
