//! Client messages: the old WM_CHANGE_STATE iconify request and the EWMH
//! state, activation, close and drag messages.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::config::FocusMode;
use crate::models::{Client, Edge, EwmhProperty, Mode, ReshapeDrag, StateAction};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// WM_CHANGE_STATE asking for iconification, the pre-EWMH way.
    pub fn iconify_request_handler(&mut self, window: WindowHandle) {
        if self
            .state
            .registry
            .get(window)
            .is_some_and(Client::is_normal)
        {
            self.hide_client(window);
        }
    }

    /// A _NET_WM_STATE message carries up to two properties to change in
    /// one go.
    pub fn state_change_request_handler(
        &mut self,
        window: WindowHandle,
        action: StateAction,
        properties: [Option<EwmhProperty>; 2],
    ) {
        if !self.state.registry.contains(window) {
            return;
        }
        for property in properties.into_iter().flatten() {
            self.change_state(window, action, property);
        }
    }

    /// _NET_ACTIVE_WINDOW. The window is unhidden and raised; focus only
    /// follows in click mode, since focusing a window the pointer isn't in
    /// makes no sense in enter mode.
    pub fn activate_request_handler(&mut self, window: WindowHandle) {
        let Some(c) = self.state.registry.get(window) else {
            return;
        };
        let frame = c.frame;
        if c.hidden {
            self.unhide_client(window, true);
        }
        if let Some(frame) = frame {
            self.display_server.map_window(frame);
        }
        self.raise_client(window);
        if self.state.focus != Some(window) && self.state.focus_mode == FocusMode::Click {
            self.focus_client(Some(window), 0);
        }
    }

    pub fn close_request_handler(&mut self, window: WindowHandle) {
        if self.state.registry.contains(window) {
            self.close_client(window);
        }
    }

    /// _NET_WM_MOVERESIZE: a pager or the client itself starting a drag.
    /// The window is made visible first; dragging something unmapped
    /// would go nowhere.
    pub fn drag_request_handler(&mut self, window: WindowHandle, edge: Option<Edge>) {
        let Some(c) = self.state.registry.get(window) else {
            return;
        };
        let frame = c.frame;
        if c.hidden {
            self.unhide_client(window, true);
        }
        if let Some(frame) = frame {
            self.display_server.map_window(frame);
        }
        self.raise_client(window);
        self.start_reshape(window, edge);
    }

    /// Begins an opaque move or resize. The offset between the window
    /// origin and the pointer is remembered so motion events can keep it
    /// constant; from here everything runs off motion events until the
    /// button goes up.
    pub(crate) fn start_reshape(&mut self, handle: WindowHandle, edge: Option<Edge>) {
        let (window, bounds) = match self.state.registry.get(handle) {
            Some(c) => (c.window, c.bounds),
            None => return,
        };
        let (_, pointer_x, pointer_y) = self.display_server.pointer_position();
        let grab = (bounds.x - pointer_x, bounds.y - pointer_y);
        self.display_server.begin_drag_grab(edge);
        self.state.mode = Mode::Reshaping(ReshapeDrag {
            handle: window,
            edge,
            grab,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_servers::{MockDisplayServer, ServerOp};
    use crate::models::{
        Bounds, Edge, EwmhProperty, Manager, Mode, Protocols, Screen, StateAction, WindowHandle,
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
    fn iconify_request_hides_only_normal_windows() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);

        manager.iconify_request_handler(a);
        assert!(manager.state.registry.get(a).unwrap().is_hidden());
        assert!(manager.state.hidden.contains(a));

        // A second request does nothing; the window is no longer normal.
        manager.display_server.take_ops();
        manager.iconify_request_handler(a);
        assert!(manager.display_server.take_ops().is_empty());
    }

    #[test]
    fn state_change_request_applies_both_properties() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);

        manager.state_change_request_handler(
            a,
            StateAction::Add,
            [Some(EwmhProperty::SkipTaskbar), Some(EwmhProperty::Above)],
        );

        let c = manager.state.registry.get(a).unwrap();
        assert!(c.ewmh.skip_taskbar);
        assert!(c.ewmh.above);
        assert!(!c.ewmh.fullscreen);
    }

    #[test]
    fn activation_unhides_raises_and_focuses_in_click_mode() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test_click_to_focus(), &[a]);
        manager.hide_client(a);
        manager.display_server.take_ops();

        manager.activate_request_handler(a);

        assert!(!manager.state.registry.get(a).unwrap().hidden);
        assert_eq!(manager.state.focus, Some(a));
    }

    #[test]
    fn activation_leaves_focus_alone_in_enter_mode() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);

        manager.activate_request_handler(a);

        assert_eq!(manager.state.focus, None);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        assert!(manager.display_server.did(&ServerOp::Raise(frame)));
    }

    #[test]
    fn close_request_honours_the_delete_protocol() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager.display_server.protocol_lists.borrow_mut().insert(
            a,
            Protocols {
                delete: true,
                take_focus: false,
            },
        );
        let mut manager = manager_with(manager, &[a]);

        manager.close_request_handler(a);

        assert!(manager.display_server.did(&ServerOp::SendDelete(a)));
    }

    #[test]
    fn drag_request_starts_a_reshape_with_the_grab_offset() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        manager.display_server.pointer.set((0, 500, 400));

        manager.drag_request_handler(a, Some(Edge::BottomRight));

        // Window was auto-placed at (100, 100).
        match manager.state.mode {
            Mode::Reshaping(drag) => {
                assert_eq!(drag.handle, a);
                assert_eq!(drag.edge, Some(Edge::BottomRight));
                assert_eq!(drag.grab, (-400, -300));
            }
            other => panic!("expected a reshape, got {other:?}"),
        }
        assert!(manager
            .display_server
            .did(&ServerOp::BeginDragGrab(Some(Edge::BottomRight))));
    }
}
