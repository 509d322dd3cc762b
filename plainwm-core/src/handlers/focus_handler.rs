//! Input focus movement and the per-client bookkeeping that rides along
//! with it.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::config::FocusMode;
use crate::display_servers::FocusTarget;
use crate::models::{Bounds, FrameZone};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Moves the input focus. The loser is repainted and told first, then
    /// the winner. `None` drops focus entirely; the dropped window is
    /// remembered so a stale FocusIn from the server can be told apart
    /// from real news.
    pub fn focus_client(&mut self, handle: Option<WindowHandle>, timestamp: u64) {
        let old = self.state.focus;
        if let Some(old) = old {
            self.set_active(old, false, 0);
            if let Some(screen) = self.state.registry.get(old).map(|c| c.screen) {
                self.display_server.set_active_window(screen, None);
            }
        }
        self.state.last_focus = if handle.is_none() { old } else { None };
        self.state.focus = handle;
        if let Some(window) = handle {
            self.set_active(window, true, timestamp);
            if let Some(screen) = self.state.registry.get(window).map(|c| c.screen) {
                self.display_server.set_active_window(screen, Some(window));
            }
            if self.state.focus_mode == FocusMode::Click {
                self.raise_client(window);
            }
        }
    }

    /// Pushes a client's focus state out to the server: the frame is
    /// snapped back around anything the client moved on its own, the input
    /// focus and the passive click-to-focus grabs are updated, and the
    /// frame is repainted to match.
    pub(crate) fn set_active(&self, handle: WindowHandle, on: bool, timestamp: u64) {
        let snapshot = match self.state.registry.get(handle) {
            Some(c) if !c.hidden => c.clone(),
            _ => return,
        };
        let border = self.state.frame.border;
        let title = self.state.frame.title_height;

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
            self.display_server
                .move_window(snapshot.window, border, border + title);
            self.send_configure(&snapshot);
        }

        if on && snapshot.accepts_focus {
            self.display_server
                .set_input_focus(FocusTarget::Window(snapshot.window));
            if snapshot.protocols.take_focus {
                self.display_server
                    .send_take_focus(snapshot.window, timestamp);
            }
            if self.state.focus_mode == FocusMode::Click {
                self.display_server.ungrab_buttons(snapshot.window);
            }
            self.cmap_focus(Some(snapshot.window));
        }
        if on && !snapshot.accepts_focus {
            // The window wants to be left alone; park the focus so
            // keystrokes don't leak to whoever held it before.
            self.display_server.set_input_focus(FocusTarget::None);
        }
        if !on && self.state.focus_mode == FocusMode::Click {
            self.display_server.grab_buttons(snapshot.window);
        }

        if snapshot.framed {
            self.draw_border(&snapshot, on);
        }
    }

    /// A FocusIn arrived. The event itself is not trusted; the server is
    /// asked who really holds focus now and our notion is brought in line.
    /// Focus reverting to the root or to nobody usually means a client died
    /// while holding it.
    pub fn focus_in_handler(&mut self) {
        match self.display_server.input_focus() {
            FocusTarget::PointerRoot | FocusTarget::None => {
                if self.state.focus.is_some() {
                    self.focus_client(None, 0);
                }
            }
            FocusTarget::Window(holder) => {
                let window = self.state.registry.get(holder).map(|c| c.window);
                if let Some(window) = window {
                    if self.state.focus != Some(window) {
                        self.focus_client(Some(window), 0);
                    }
                }
            }
        }
    }

    /// The pointer entered a client window or its frame.
    pub fn enter_notify_handler(&mut self, window: WindowHandle, timestamp: u64) {
        if !self.state.mode.is_idle() {
            return;
        }
        let (handle, frame, hidden) = match self.state.registry.get(window) {
            Some(c) => (c.window, c.frame, c.hidden),
            None => return,
        };
        // Clear any resize cursor left over from a brush past the frame
        // edge on the way in.
        if let Some(frame) = frame {
            self.display_server.set_frame_cursor(frame, None);
            if let Some(c) = self.state.registry.get_mut(handle) {
                c.cursor = Some(FrameZone::Title);
            }
        }
        if self.state.focus != Some(handle)
            && !hidden
            && self.state.focus_mode == FocusMode::Enter
        {
            self.focus_client(Some(handle), timestamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_servers::{FocusTarget, MockDisplayServer, ServerOp, WindowHints};
    use crate::models::{
        Bounds, FrameZone, Manager, Mode, Protocols, ReshapeDrag, Screen, WindowHandle,
    };

    type TestManager = Manager<TestConfig, MockDisplayServer>;

    const ROOT: WindowHandle = WindowHandle(1);

    fn manager_with(mut manager: TestManager, windows: &[WindowHandle]) -> TestManager {
        let mut screen = Screen::new(0, ROOT, 1280, 1024);
        screen.popup = WindowHandle(2);
        manager.state.screens.push(screen);
        manager.state.mode = Mode::Idle;
        for &window in windows {
            manager.state.registry.add(window, ROOT, 0);
            manager
                .display_server
                .geometries
                .borrow_mut()
                .insert(window, Bounds::new(0, 0, 300, 200));
            manager.manage_window(window);
        }
        manager.display_server.take_ops();
        manager
    }

    #[test]
    fn focus_moves_between_windows() {
        let a = WindowHandle(10);
        let b = WindowHandle(11);
        let mut manager = manager_with(Manager::new_test(), &[a, b]);

        manager.focus_client(Some(a), 5);
        assert_eq!(manager.state.focus, Some(a));
        assert!(manager
            .display_server
            .did(&ServerOp::SetInputFocus(FocusTarget::Window(a))));
        assert!(manager.display_server.did(&ServerOp::SetActiveWindow {
            screen: 0,
            window: Some(a),
        }));
        manager.display_server.take_ops();

        manager.focus_client(Some(b), 6);
        assert_eq!(manager.state.focus, Some(b));
        assert_eq!(manager.state.last_focus, None);
        let ops = manager.display_server.take_ops();
        let cleared = ops
            .iter()
            .position(|op| op == &ServerOp::SetActiveWindow { screen: 0, window: None })
            .unwrap();
        let set = ops
            .iter()
            .position(|op| {
                op == &ServerOp::SetActiveWindow {
                    screen: 0,
                    window: Some(b),
                }
            })
            .unwrap();
        assert!(cleared < set);
    }

    #[test]
    fn dropping_focus_remembers_the_last_holder() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        manager.display_server.take_ops();

        manager.focus_client(None, 0);

        assert_eq!(manager.state.focus, None);
        assert_eq!(manager.state.last_focus, Some(a));
        assert!(manager.display_server.did(&ServerOp::SetActiveWindow {
            screen: 0,
            window: None,
        }));
    }

    #[test]
    fn click_mode_swaps_the_passive_grabs_and_raises() {
        let a = WindowHandle(10);
        let b = WindowHandle(11);
        let mut manager =
            manager_with(Manager::new_test_click_to_focus(), &[a, b]);
        manager.focus_client(Some(a), 0);
        manager.display_server.take_ops();

        manager.focus_client(Some(b), 0);

        let frame = manager.state.registry.get(b).unwrap().frame.unwrap();
        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::GrabButtons(a)));
        assert!(ops.contains(&ServerOp::UngrabButtons(b)));
        assert!(ops.contains(&ServerOp::Raise(frame)));
    }

    #[test]
    fn unfocusable_window_parks_the_focus() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager.display_server.hints.borrow_mut().insert(
            a,
            WindowHints {
                accepts_input: Some(false),
                start_iconic: false,
            },
        );
        let mut manager = manager_with(manager, &[a]);

        manager.focus_client(Some(a), 0);

        assert!(manager
            .display_server
            .did(&ServerOp::SetInputFocus(FocusTarget::None)));
        assert!(!manager
            .display_server
            .did(&ServerOp::SetInputFocus(FocusTarget::Window(a))));
    }

    #[test]
    fn take_focus_protocol_gets_the_message() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager.display_server.protocol_lists.borrow_mut().insert(
            a,
            Protocols {
                delete: false,
                take_focus: true,
            },
        );
        let mut manager = manager_with(manager, &[a]);

        manager.focus_client(Some(a), 99);

        assert!(manager.display_server.did(&ServerOp::SendTakeFocus(a)));
    }

    #[test]
    fn focus_reverting_to_the_root_reads_as_nobody() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        manager.display_server.take_ops();

        manager.display_server.focus_holder.set(FocusTarget::PointerRoot);
        manager.focus_in_handler();

        assert_eq!(manager.state.focus, None);
        assert_eq!(manager.state.last_focus, Some(a));
    }

    #[test]
    fn focus_taken_behind_our_back_is_adopted() {
        let a = WindowHandle(10);
        let b = WindowHandle(11);
        let mut manager = manager_with(Manager::new_test(), &[a, b]);
        manager.focus_client(Some(a), 0);

        manager.display_server.focus_holder.set(FocusTarget::Window(b));
        manager.focus_in_handler();

        assert_eq!(manager.state.focus, Some(b));
    }

    #[test]
    fn entering_a_frame_focuses_and_resets_the_cursor() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();

        manager.enter_notify_handler(frame, 7);

        assert_eq!(manager.state.focus, Some(a));
        assert!(manager.display_server.did(&ServerOp::SetFrameCursor {
            frame,
            zone: None,
        }));
        assert_eq!(
            manager.state.registry.get(a).unwrap().cursor,
            Some(FrameZone::Title)
        );
    }

    #[test]
    fn entering_does_not_steal_focus_in_click_mode() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test_click_to_focus(), &[a]);

        manager.enter_notify_handler(a, 7);

        assert_eq!(manager.state.focus, None);
    }

    #[test]
    fn entering_during_a_drag_changes_nothing() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.state.mode = Mode::Reshaping(ReshapeDrag {
            handle: a,
            edge: None,
            grab: (0, 0),
        });

        manager.enter_notify_handler(a, 7);

        assert_eq!(manager.state.focus, None);
        assert!(manager.display_server.take_ops().is_empty());
    }
}
