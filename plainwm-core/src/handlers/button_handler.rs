//! Pointer button dispatch: the frame close, hide, move and resize
//! gestures, the root menu of hidden windows and the root shell bindings.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::config::FocusMode;
use crate::display_event::ButtonEvent;
use crate::models::{FrameZone, MenuGeometry, MenuSession, Mode};
use crate::utils::child_process::exec_shell;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    pub fn button_press_handler(&mut self, event: &ButtonEvent) {
        if !self.state.mode.is_idle() {
            // EWMH 4.3 asks for a second way out of a move or resize; a
            // fresh press cancels it. Other modes swallow presses and let
            // the release sort things out.
            if matches!(self.state.mode, Mode::Reshaping(_)) {
                if let Some(screen) = self.state.screen_for_root(event.root).map(|s| s.index) {
                    self.display_server.hide_popup(screen);
                }
                self.state.mode = Mode::Idle;
            }
            return;
        }

        let pressed = self.state.registry.get(event.window).map(|c| c.window);
        if let Some(window) = pressed {
            if self.state.focus != Some(window) && self.state.focus_mode == FocusMode::Click {
                self.focus_client(Some(window), event.time);
            }
        }
        // Scroll wheel; nothing beyond the focus change above.
        if (4..=7).contains(&event.button) {
            return;
        }

        let frame_press = pressed.and_then(|window| {
            if self.state.focus != Some(window) {
                return None;
            }
            let frame = self.state.registry.get(window).and_then(|c| c.frame)?;
            (event.window == frame).then_some((window, frame))
        });
        if let Some((window, frame)) = frame_press {
            self.frame_press(window, frame, event);
            return;
        }

        if event.window == event.root {
            self.root_press(event);
        }
    }

    /// A press on the frame of the focused client. The close box wins over
    /// everything; otherwise button 3 arms hiding, button 2 drags the
    /// window from anywhere, and button 1 dispatches on the zone under the
    /// pointer.
    fn frame_press(&mut self, window: WindowHandle, frame: WindowHandle, event: &ButtonEvent) {
        let (width, height) = match self.state.registry.get(window) {
            Some(c) => (c.bounds.width, c.bounds.height),
            None => return,
        };
        let zone = self.state.frame.zone_at(event.x, event.y, width, height);
        if zone == FrameZone::Box {
            self.state.mode = Mode::ClosingWindow(window);
            return;
        }
        match event.button {
            3 => self.state.mode = Mode::HidingWindow(window),
            2 => self.start_reshape(window, None),
            1 => {
                self.display_server.map_window(frame);
                self.raise_client(window);
                match zone {
                    FrameZone::Edge(edge) => self.start_reshape(window, Some(edge)),
                    FrameZone::Title => self.start_reshape(window, None),
                    FrameZone::Box | FrameZone::Interior => {}
                }
            }
            _ => {}
        }
    }

    /// Button 3 on the root raises the hidden-window menu; the others run
    /// whatever shell command they are bound to.
    fn root_press(&mut self, event: &ButtonEvent) {
        if event.button == 3 {
            self.cmap_focus(None);
            self.menu_hit(event);
        } else {
            self.shell_command(event);
        }
    }

    fn shell_command(&mut self, event: &ButtonEvent) {
        let command = match event.button {
            1 => self.config.button1_command(),
            2 => self.config.button2_command(),
            _ => None,
        };
        let Some(command) = command else {
            return;
        };
        let display = self
            .state
            .screen_for_root(event.root)
            .and_then(|s| s.display.clone());
        exec_shell(&command, display.as_deref(), &mut self.children);
    }

    /// Pops the hidden-window menu up under the pointer. The popup contents
    /// are painted from the expose the map generates, not here.
    fn menu_hit(&mut self, event: &ButtonEvent) {
        if self.state.hidden.is_empty() {
            return;
        }
        self.reset_all_cursors();
        let Some(screen) = self.state.screen_for_root(event.root).map(|s| s.index) else {
            return;
        };

        let widths: Vec<i32> = self
            .hidden_labels()
            .iter()
            .map(|label| self.display_server.popup_text_width(label))
            .collect();
        let mut geometry = MenuGeometry::compute(
            &widths,
            self.display_server.popup_height(),
            self.state.frame.border,
        );
        let display = self.state.screens[screen].bounds;
        geometry.place((event.x_root, event.y_root), &display);
        let item = geometry.item_at(event.x_root, event.y_root);

        self.display_server.show_menu(screen, &geometry);
        self.display_server.begin_menu_grab();
        self.state.mode = Mode::MenuUp(MenuSession {
            screen,
            geometry,
            item,
        });
    }

    /// The menu labels, most recently hidden first, matching the hidden
    /// list's order.
    pub(crate) fn hidden_labels(&self) -> Vec<String> {
        self.state
            .hidden
            .iter()
            .map(|w| {
                self.state
                    .registry
                    .get(w)
                    .map_or_else(String::new, |c| c.menu_title().to_owned())
            })
            .collect()
    }

    /// Puts the default cursor back on every frame. Done before the menu
    /// grabs the pointer, so no frame is left showing a resize arrow.
    pub(crate) fn reset_all_cursors(&mut self) {
        let frames: Vec<(WindowHandle, WindowHandle)> = self
            .state
            .registry
            .iter()
            .filter_map(|c| c.frame.map(|frame| (c.window, frame)))
            .collect();
        for (window, frame) in frames {
            self.display_server.set_frame_cursor(frame, None);
            if let Some(c) = self.state.registry.get_mut(window) {
                c.cursor = Some(FrameZone::Title);
            }
        }
    }

    /// Releases resolve whatever the press armed; whatever happens the
    /// mode always falls back to idle.
    pub fn button_release_handler(&mut self, event: &ButtonEvent) {
        match self.state.mode {
            Mode::MenuUp(session) => self.menu_release(&session, event),
            Mode::Reshaping(_) => {
                if let Some(screen) = self.state.screen_for_root(event.root).map(|s| s.index) {
                    self.display_server.hide_popup(screen);
                }
            }
            Mode::ClosingWindow(pending) => {
                let confirmed = self.state.registry.get(pending).is_some_and(|c| {
                    Some(event.window) == c.frame
                        && self
                            .state
                            .frame
                            .zone_at(event.x, event.y, c.bounds.width, c.bounds.height)
                            == FrameZone::Box
                });
                if confirmed {
                    self.close_client(pending);
                }
            }
            Mode::HidingWindow(pending) => {
                let confirmed = self.state.registry.get(pending).is_some_and(|c| {
                    Some(event.window) == c.frame
                        && event.x >= 0
                        && event.y >= 0
                        && event.x <= c.bounds.width
                        && event.y <= c.bounds.height + self.state.frame.title_height
                });
                if confirmed {
                    if event.shift {
                        self.lower_client(pending);
                    } else {
                        self.hide_client(pending);
                    }
                }
            }
            Mode::Initialising | Mode::Idle => {}
        }
        self.state.mode = Mode::Idle;
    }

    fn menu_release(&mut self, session: &MenuSession, event: &ButtonEvent) {
        let n = session.geometry.item_at(event.x_root, event.y_root);
        self.display_server.hide_popup(session.screen);
        if let Some(n) = n {
            self.unhide_nth(n, true);
        }
        // In click mode the unhidden window now holds focus; either way the
        // focused client's colormap goes back in.
        if let Some(focus) = self.state.focus {
            self.cmap_focus(Some(focus));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_event::ButtonEvent;
    use crate::display_servers::{MockDisplayServer, ServerOp};
    use crate::models::{
        Bounds, Edge, Manager, MenuGeometry, MenuSession, Mode, ReshapeDrag, Screen, WindowHandle,
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

    fn press(window: WindowHandle, button: u32, x: i32, y: i32) -> ButtonEvent {
        ButtonEvent {
            window,
            root: ROOT,
            button,
            x,
            y,
            x_root: x,
            y_root: y,
            time: 1,
            shift: false,
        }
    }

    #[test]
    fn box_press_and_release_close_the_window() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        // border 6, title 18: quarter 6, box x in 9..=20, y in 7..=18.
        manager.button_press_handler(&press(frame, 1, 10, 10));
        assert_eq!(manager.state.mode, Mode::ClosingWindow(a));

        manager.button_release_handler(&press(frame, 1, 12, 12));
        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(manager.display_server.did(&ServerOp::KillClient(a)));
    }

    #[test]
    fn release_outside_the_box_aborts_the_close() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        manager.button_press_handler(&press(frame, 1, 10, 10));
        manager.button_release_handler(&press(frame, 1, 100, 10));

        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(!manager.display_server.did(&ServerOp::KillClient(a)));
        assert!(!manager.display_server.did(&ServerOp::SendDelete(a)));
    }

    #[test]
    fn hide_button_hides_on_release_inside_the_frame() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        manager.button_press_handler(&press(frame, 3, 100, 10));
        assert_eq!(manager.state.mode, Mode::HidingWindow(a));

        manager.button_release_handler(&press(frame, 3, 200, 100));
        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(manager.state.registry.get(a).unwrap().hidden);
        assert!(manager.state.hidden.contains(a));
    }

    #[test]
    fn shifted_hide_release_lowers_instead() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        manager.button_press_handler(&press(frame, 3, 100, 10));
        let mut release = press(frame, 3, 100, 10);
        release.shift = true;
        manager.button_release_handler(&release);

        assert!(!manager.state.registry.get(a).unwrap().hidden);
        assert!(manager.display_server.did(&ServerOp::Lower(frame)));
    }

    #[test]
    fn title_press_starts_a_move() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();
        manager.display_server.pointer.set((0, 150, 95));

        manager.button_press_handler(&press(frame, 1, 100, 10));

        // Auto-placed at (100, 100): grab keeps the origin-pointer offset.
        match manager.state.mode {
            Mode::Reshaping(drag) => {
                assert_eq!(drag.handle, a);
                assert_eq!(drag.edge, None);
                assert_eq!(drag.grab, (-50, 5));
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn corner_press_starts_an_edge_resize() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        manager.button_press_handler(&press(frame, 1, 2, 2));

        assert!(matches!(
            manager.state.mode,
            Mode::Reshaping(ReshapeDrag {
                edge: Some(Edge::TopLeft),
                ..
            })
        ));
        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::Map(frame)));
        assert!(ops.contains(&ServerOp::Raise(frame)));
    }

    #[test]
    fn move_button_drags_from_the_frame_edge_too() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.focus_client(Some(a), 0);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        // Position is in the right resize zone, but button 2 always moves.
        manager.button_press_handler(&press(frame, 2, 308, 100));

        assert!(matches!(
            manager.state.mode,
            Mode::Reshaping(ReshapeDrag { edge: None, .. })
        ));
    }

    #[test]
    fn click_to_focus_runs_before_the_frame_dispatch() {
        let a = WindowHandle(10);
        let b = WindowHandle(11);
        let mut manager = manager_with(Manager::new_test_click_to_focus(), &[a, b]);
        manager.focus_client(Some(a), 0);
        let frame_b = manager.state.registry.get(b).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        // The press lands on unfocused b; focus moves first, so the title
        // drag starts on b.
        manager.button_press_handler(&press(frame_b, 1, 100, 10));

        assert_eq!(manager.state.focus, Some(b));
        assert!(matches!(
            manager.state.mode,
            Mode::Reshaping(ReshapeDrag { handle, edge: None, .. }) if handle == b
        ));
    }

    #[test]
    fn scroll_buttons_change_focus_and_nothing_else() {
        let a = WindowHandle(10);
        let b = WindowHandle(11);
        let mut manager = manager_with(Manager::new_test_click_to_focus(), &[a, b]);
        manager.focus_client(Some(a), 0);
        let frame_b = manager.state.registry.get(b).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        manager.button_press_handler(&press(frame_b, 4, 2, 2));

        assert_eq!(manager.state.focus, Some(b));
        assert_eq!(manager.state.mode, Mode::Idle);
    }

    #[test]
    fn press_during_a_reshape_cancels_it() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.state.mode = Mode::Reshaping(ReshapeDrag {
            handle: a,
            edge: None,
            grab: (0, 0),
        });

        manager.button_press_handler(&press(ROOT, 1, 500, 500));

        assert_eq!(manager.state.mode, Mode::Idle);
        // The size popup comes down with the mode, as on a normal release.
        assert!(manager.display_server.did(&ServerOp::HidePopup(0)));
    }

    #[test]
    fn press_while_the_menu_is_up_is_swallowed() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let session = MenuSession {
            screen: 0,
            geometry: MenuGeometry::compute(&[70], 15, 6),
            item: None,
        };
        manager.state.mode = Mode::MenuUp(session);

        manager.button_press_handler(&press(ROOT, 1, 500, 500));

        assert_eq!(manager.state.mode, Mode::MenuUp(session));
    }

    #[test]
    fn root_menu_button_pops_the_menu_under_the_pointer() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager
            .display_server
            .names
            .borrow_mut()
            .insert(a, "steak".into());
        let mut manager = manager_with(manager, &[a]);
        manager.hide_client(a);
        manager.display_server.take_ops();

        manager.button_press_handler(&press(ROOT, 3, 600, 400));

        // "steak" is 5 chars at 7px; plus padding 4 and border 6.
        let mut geometry = MenuGeometry::compute(&[35], 15, 6);
        geometry.place((600, 400), &Bounds::new(0, 0, 1280, 1024));
        match manager.state.mode {
            Mode::MenuUp(session) => {
                assert_eq!(session.screen, 0);
                assert_eq!(session.geometry, geometry);
                assert_eq!(session.item, Some(0));
            }
            other => panic!("expected the menu up, got {other:?}"),
        }
        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::InstallColormap(None)));
        assert!(ops.contains(&ServerOp::ShowMenu { screen: 0, geometry }));
        assert!(ops.contains(&ServerOp::BeginMenuGrab));
    }

    #[test]
    fn empty_menu_never_goes_up() {
        let mut manager = manager_with(Manager::new_test(), &[]);

        manager.button_press_handler(&press(ROOT, 3, 600, 400));

        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(!manager
            .display_server
            .take_ops()
            .iter()
            .any(|op| matches!(op, ServerOp::ShowMenu { .. })));
    }

    #[test]
    fn menu_release_unhides_the_chosen_window() {
        let a = WindowHandle(10);
        let b = WindowHandle(11);
        let mut manager = manager_with(Manager::new_test(), &[a, b]);
        manager.hide_client(a);
        manager.hide_client(b);
        manager.display_server.take_ops();
        let mut geometry = MenuGeometry::compute(&[70, 70], 15, 6);
        geometry.place((600, 400), &Bounds::new(0, 0, 1280, 1024));
        manager.state.mode = Mode::MenuUp(MenuSession {
            screen: 0,
            geometry,
            item: Some(0),
        });

        // Row 1 holds a; b was hidden later and sits in row 0.
        let y = geometry.origin.1 + 15 + 7;
        manager.button_release_handler(&press(ROOT, 3, geometry.origin.0 + 5, y));

        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(!manager.state.registry.get(a).unwrap().hidden);
        assert!(manager.state.registry.get(b).unwrap().hidden);
        assert!(manager.display_server.did(&ServerOp::HidePopup(0)));
    }

    #[test]
    fn menu_release_off_the_menu_just_drops_it() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.hide_client(a);
        manager.display_server.take_ops();
        let geometry = MenuGeometry::compute(&[70], 15, 6);
        manager.state.mode = Mode::MenuUp(MenuSession {
            screen: 0,
            geometry,
            item: None,
        });

        manager.button_release_handler(&press(ROOT, 3, 1000, 1000));

        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(manager.state.registry.get(a).unwrap().hidden);
        assert!(manager.display_server.did(&ServerOp::HidePopup(0)));
    }

    #[test]
    fn release_during_a_reshape_drops_the_size_popup() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.state.mode = Mode::Reshaping(ReshapeDrag {
            handle: a,
            edge: Some(Edge::Right),
            grab: (0, 0),
        });

        manager.button_release_handler(&press(ROOT, 1, 500, 500));

        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(manager.display_server.did(&ServerOp::HidePopup(0)));
    }

    #[test]
    fn root_press_without_a_binding_spawns_nothing() {
        let mut manager = manager_with(Manager::new_test(), &[]);

        // Button 1 has no command bound in the test configuration.
        manager.button_press_handler(&press(ROOT, 1, 10, 10));

        assert_eq!(manager.state.mode, Mode::Idle);
        assert!(manager.display_server.take_ops().is_empty());
    }
}
