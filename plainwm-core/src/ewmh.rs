//! The compliance layer: root-window client lists, _NET_WM_STATE handling,
//! reserved screen areas and the stacking rules that go with them.

use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{
    Bounds, Client, EwmhProperty, Manager, StateAction, Strut, WindowHandle, WindowType, WmState,
};
use crate::sanitize;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Rewrites _NET_CLIENT_LIST and _NET_CLIENT_LIST_STACKING on the
    /// screen's root, restacking windows first so the stacking list is
    /// truthful. Restacking raises events that land back here, and the
    /// stacking fixes themselves re-enter through `raise_client` and
    /// `lower_client`, so each screen carries a flag that turns the nested
    /// calls into no-ops.
    pub fn set_client_list(&mut self, screen: usize) {
        if !self.state.updating_client_list.insert(screen) {
            return;
        }
        self.fix_stack();

        // Mapping order, oldest client first.
        let mut list: Vec<WindowHandle> = self
            .state
            .registry
            .on_screen(screen)
            .filter(|c| !c.is_withdrawn())
            .map(|c| c.window)
            .collect();
        list.reverse();

        // Bottom-to-top order, with frames resolved to the clients inside.
        let stacking: Vec<WindowHandle> = self
            .display_server
            .stacking_order(screen)
            .into_iter()
            .filter_map(|w| self.state.registry.get(w))
            .filter(|c| c.screen == screen && !c.is_withdrawn())
            .map(|c| c.window)
            .collect();

        self.display_server.set_client_list(screen, &list, &stacking);
        self.state.updating_client_list.remove(&screen);
    }

    /// Forces every window into the stacking slot its state asks for
    /// (EWMH 1.2 section 7.10): below windows and the desktop at the
    /// bottom, above windows and docks on top, fullscreen above everything.
    /// Each pass covers all clients on all screens, like the raises and
    /// lowers it issues.
    fn fix_stack(&mut self) {
        let below: Vec<WindowHandle> = self
            .state
            .registry
            .iter()
            .filter(|c| c.ewmh.below)
            .map(|c| c.window)
            .collect();
        for handle in below {
            self.lower_client(handle);
        }

        // Only one desktop, surely.
        let desktop = self
            .state
            .registry
            .iter()
            .find(|c| c.wtype == WindowType::Desktop)
            .map(|c| c.window);
        if let Some(handle) = desktop {
            self.lower_client(handle);
        }

        let raised: Vec<WindowHandle> = self
            .state
            .registry
            .iter()
            .filter(|c| c.ewmh.above || (c.wtype == WindowType::Dock && !c.ewmh.below))
            .map(|c| c.window)
            .collect();
        for handle in raised {
            self.raise_client(handle);
        }

        let fullscreen: Vec<WindowHandle> = self
            .state
            .registry
            .iter()
            .filter(|c| c.ewmh.fullscreen)
            .map(|c| c.window)
            .collect();
        for handle in fullscreen {
            self.raise_client(handle);
        }
    }

    /// Raises the client, and with it any dialog hanging off it.
    pub fn raise_client(&mut self, handle: WindowHandle) {
        let Some(c) = self.state.registry.get(handle) else {
            return;
        };
        let window = c.window;
        let screen = c.screen;
        let frame = if c.framed { c.frame } else { None };

        if let Some(frame) = frame {
            self.display_server.raise_window(frame);
        }
        self.display_server.raise_window(window);

        let dialogs: Vec<(Option<WindowHandle>, WindowHandle)> = self
            .state
            .registry
            .iter()
            .filter(|t| t.trans == Some(window) || (frame.is_some() && t.trans == frame))
            .map(|t| (if t.framed { t.frame } else { None }, t.window))
            .collect();
        for (dialog_frame, dialog) in dialogs {
            if let Some(f) = dialog_frame {
                self.display_server.raise_window(f);
            }
            self.display_server.raise_window(dialog);
        }

        self.set_client_list(screen);
    }

    pub fn lower_client(&mut self, handle: WindowHandle) {
        let Some(c) = self.state.registry.get(handle) else {
            return;
        };
        let window = c.window;
        let screen = c.screen;
        let frame = if c.framed { c.frame } else { None };

        self.display_server.lower_window(window);
        if let Some(frame) = frame {
            self.display_server.lower_window(frame);
        }

        self.set_client_list(screen);
    }

    /// Moves the client to a new ICCCM state, updating both the WM_STATE
    /// property and the advertised _NET_WM_STATE to match.
    pub fn set_client_state(&mut self, handle: WindowHandle, wm_state: WmState) {
        let Some(c) = self.state.registry.get_mut(handle) else {
            return;
        };
        c.state = wm_state;
        let snapshot = c.clone();
        self.display_server.set_wm_state(snapshot.window, wm_state);
        self.update_net_state(&snapshot);
    }

    pub(crate) fn update_net_state(&self, c: &Client) {
        self.display_server
            .set_net_wm_state(c.window, &c.ewmh, c.hidden, c.is_withdrawn());
    }

    /// Applies one _NET_WM_STATE change requested by a client message.
    /// Gaining or losing the fullscreen flag also moves the window; any
    /// change may require a reshuffle of the stack.
    pub fn change_state(
        &mut self,
        handle: WindowHandle,
        action: StateAction,
        property: EwmhProperty,
    ) {
        let Some(c) = self.state.registry.get_mut(handle) else {
            return;
        };
        let was_fullscreen = c.ewmh.fullscreen;
        let value = action.apply(c.ewmh.get(property));
        c.ewmh.set(property, value);
        let now_fullscreen = c.ewmh.fullscreen;
        let window = c.window;
        let screen = c.screen;

        if !was_fullscreen && now_fullscreen {
            self.enter_fullscreen(window);
        }
        if was_fullscreen && !now_fullscreen {
            self.exit_fullscreen(window);
        }
        if let Some(c) = self.state.registry.get(window) {
            let snapshot = c.clone();
            self.update_net_state(&snapshot);
        }
        self.set_client_list(screen);
    }

    /// Grows the window over the whole screen, remembering where it was.
    /// The frame is kept, pushed off-screen so only the client area shows.
    pub fn enter_fullscreen(&mut self, handle: WindowHandle) {
        let (border, title) = (self.state.frame.border, self.state.frame.title_height);
        let display = match self
            .state
            .registry
            .get(handle)
            .and_then(|c| self.state.screens.get(c.screen))
        {
            Some(s) => s.bounds,
            None => return,
        };
        let Some(c) = self.state.registry.get_mut(handle) else {
            return;
        };

        c.return_bounds = Some(c.bounds);
        if c.framed {
            c.bounds = Bounds::new(
                -border,
                -border,
                display.width + 2 * border,
                display.height + title + 2 * border,
            );
            let snapshot = c.clone();
            if let Some(frame) = snapshot.frame {
                self.display_server.move_resize_window(frame, snapshot.bounds);
                self.display_server.move_resize_window(
                    snapshot.window,
                    Bounds::new(border, border, display.width, display.height),
                );
                self.display_server.raise_window(frame);
            }
            self.send_configure(&snapshot);
        } else {
            c.bounds = Bounds::new(0, 0, display.width, display.height);
            let snapshot = c.clone();
            self.display_server
                .move_resize_window(snapshot.window, snapshot.bounds);
            self.display_server.raise_window(snapshot.window);
            self.send_configure(&snapshot);
        }
    }

    /// Puts the window back where it was before it went fullscreen.
    pub fn exit_fullscreen(&mut self, handle: WindowHandle) {
        let (border, title) = (self.state.frame.border, self.state.frame.title_height);
        let Some(c) = self.state.registry.get_mut(handle) else {
            return;
        };
        if let Some(bounds) = c.return_bounds.take() {
            c.bounds = bounds;
        }
        let snapshot = c.clone();

        if snapshot.framed {
            if let Some(frame) = snapshot.frame {
                self.display_server.move_resize_window(
                    frame,
                    Bounds::new(
                        snapshot.bounds.x,
                        snapshot.bounds.y - title,
                        snapshot.bounds.width,
                        snapshot.bounds.height + title,
                    ),
                );
                self.display_server.move_resize_window(
                    snapshot.window,
                    Bounds::new(
                        border,
                        border + title,
                        snapshot.bounds.width - 2 * border,
                        snapshot.bounds.height - 2 * border,
                    ),
                );
            }
        } else {
            self.display_server
                .move_resize_window(snapshot.window, snapshot.bounds);
        }
        self.send_configure(&snapshot);
    }

    /// Re-reads the client's _NET_WM_STRUT. A missing property leaves the
    /// recorded strut alone.
    pub fn update_client_strut(&mut self, handle: WindowHandle) {
        let Some(strut) = self
            .state
            .registry
            .get(handle)
            .and_then(|c| self.display_server.window_strut(c.window))
        else {
            return;
        };
        let Some(c) = self.state.registry.get_mut(handle) else {
            return;
        };
        c.strut = strut;
        let screen = c.screen;
        self.update_struts(screen);
    }

    /// Recomputes the screen's reserved areas from every client's strut.
    /// When they change, the workarea property follows and every window is
    /// nudged back into reach of the pointer.
    pub fn update_struts(&mut self, screen_index: usize) {
        let mut strut = Strut::default();
        for c in self.state.registry.on_screen(screen_index) {
            strut = strut.merge(&c.strut);
        }

        let Some(screen) = self.state.screens.get_mut(screen_index) else {
            return;
        };
        if screen.strut == strut {
            return;
        }
        screen.strut = strut;
        let display = screen.bounds;
        self.display_server.set_workarea(
            screen_index,
            Bounds::new(
                strut.left,
                strut.top,
                display.width - (strut.left + strut.right),
                display.height - (strut.top + strut.bottom),
            ),
        );

        // Check no window fully occupies the reserved areas. Every client
        // is examined against its own screen, whichever screen changed.
        let metrics = self.state.frame;
        let resistance = self.state.edge_resistance;
        let handles: Vec<WindowHandle> = self.state.registry.iter().map(|c| c.window).collect();
        for handle in handles {
            let Some(c) = self.state.registry.get(handle) else {
                continue;
            };
            if c.ewmh.fullscreen {
                continue;
            }
            let Some(screen) = self.state.screens.get(c.screen) else {
                continue;
            };
            let sane = sanitize::sanitize(c, screen, metrics, None, c.bounds, resistance);
            let Some(c) = self.state.registry.get_mut(handle) else {
                continue;
            };
            sane.apply(&mut c.bounds, false);
            let snapshot = c.clone();
            if snapshot.framed {
                if let Some(frame) = snapshot.frame {
                    self.display_server.move_window(
                        frame,
                        snapshot.bounds.x,
                        snapshot.bounds.y - metrics.title_height,
                    );
                }
            } else {
                self.display_server
                    .move_window(snapshot.window, snapshot.bounds.x, snapshot.bounds.y);
            }
            self.send_configure(&snapshot);
        }
    }
}
