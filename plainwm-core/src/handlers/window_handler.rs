//! Window lifecycle events: map requests, unmaps, destruction and the
//! final removal bookkeeping they share.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::models::{InternalState, Mode, WmState};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// A client asked to be mapped. Freshly created windows get adopted;
    /// withdrawn ones get their old frame back; iconified ones come back
    /// off the hidden-window menu.
    pub fn map_request_handler(&mut self, window: WindowHandle) {
        let known = |manager: &Self| {
            matches!(manager.state.registry.get(window), Some(c) if c.window == window)
        };
        if !known(self) {
            // The window may have been created after our last look at the
            // tree; scan again before giving up.
            for screen in 0..self.state.screens.len() {
                self.scan_existing_windows(screen);
            }
            if !known(self) {
                tracing::error!("map request for unknown window {window}");
                return;
            }
        }

        self.unhide_client(window, true);

        let (state, frame, screen) = match self.state.registry.get(window) {
            Some(c) => (c.state, c.frame, c.screen),
            None => return,
        };
        let border = self.state.frame.border;
        let title = self.state.frame.title_height;

        match state {
            WmState::Withdrawn if frame.is_none() => {
                self.manage_window(window);
            }
            WmState::Withdrawn | WmState::Normal => {
                if state == WmState::Withdrawn {
                    if let Some(frame) = frame {
                        self.display_server
                            .reparent_window(window, frame, border, border + title);
                        self.display_server.add_to_save_set(window);
                    }
                }
                if let Some(frame) = frame {
                    self.display_server.map_window(frame);
                }
                self.display_server.map_window(window);
                self.raise_client(window);
                self.set_client_state(window, WmState::Normal);
            }
            WmState::Iconic => {}
        }

        self.set_client_list(screen);
    }

    /// An UnmapNotify arrived for a tracked window. Reparenting a mapped
    /// window unmaps it as a side effect, so the first unmap after one of
    /// our reparents is swallowed; beyond that, an unmap is the client
    /// withdrawing, except while iconified where only a synthetic one (the
    /// client announcing itself, ICCCM 4.1.4) means anything.
    pub fn unmap_notify_handler(&mut self, window: WindowHandle, synthetic: bool) {
        let (state, internal) = match self.state.registry.get(window) {
            Some(c) => (c.state, c.internal),
            None => return,
        };

        if internal == InternalState::ReparentPending {
            if let Some(c) = self.state.registry.get_mut(window) {
                c.internal = InternalState::Normal;
            }
            return;
        }

        if state == WmState::Iconic {
            if synthetic {
                self.unhide_client(window, false);
            }
        } else {
            self.withdraw_client(window);
        }

        if let Some(c) = self.state.registry.get_mut(window) {
            c.internal = InternalState::Normal;
        }
    }

    pub fn destroy_notify_handler(&mut self, window: WindowHandle) {
        if self.state.registry.contains(window) {
            self.remove_client(window);
        }
    }

    /// Someone else reparented the window away from under us; it is no
    /// longer ours to manage. Only acted on when the window is not sitting
    /// in one of our frames.
    pub fn reparented_away_handler(&mut self, window: WindowHandle) {
        let Some(c) = self.state.registry.get(window) else {
            return;
        };
        if c.frame.is_none() || c.is_withdrawn() {
            self.remove_client(window);
        }
    }

    /// Forgets a client entirely: its menu entry, any interaction mode
    /// built on it, the focus if it held it, and finally its frame.
    pub fn remove_client(&mut self, handle: WindowHandle) {
        let Some(window) = self.state.registry.get(handle).map(|c| c.window) else {
            return;
        };
        let Some(removed) = self.state.registry.remove(window) else {
            return;
        };
        let screen = removed.screen;

        if removed.hidden {
            if let Some(n) = self.state.hidden.index_of(window) {
                self.unhide_nth(n, false);
            }
            // Tear the menu down too, so a release can't land on an entry
            // that no longer lines up with the window list.
            if let Mode::MenuUp(session) = self.state.mode {
                self.display_server.hide_popup(session.screen);
                self.state.mode = Mode::Idle;
            }
        }

        if self.state.mode.involves(window) {
            if matches!(self.state.mode, Mode::Reshaping(_)) {
                // The size indicator would otherwise stay up forever.
                self.display_server.hide_popup(screen);
            }
            self.state.mode = Mode::Idle;
        }

        let was_focus = self.state.focus == Some(window);
        let was_last = self.state.focus.is_none() && self.state.last_focus == Some(window);
        if was_focus || was_last {
            let replacement = removed
                .trans
                .and_then(|t| self.state.registry.get(t).map(|c| c.window))
                .or_else(|| self.topmost_client(screen));
            self.focus_client(replacement, 0);
        }
        if self.state.last_focus == Some(window) {
            self.state.last_focus = None;
        }

        if let Some(frame) = removed.frame {
            self.display_server.destroy_window(frame);
        }

        self.set_client_list(screen);
        self.update_struts(screen);
    }

    fn topmost_client(&self, screen: usize) -> Option<WindowHandle> {
        self.display_server
            .stacking_order(screen)
            .iter()
            .rev()
            .find_map(|&w| self.state.registry.get(w).map(|c| c.window))
    }
}
