//! ConfigureRequest and CirculateRequest handling. Configure requests are
//! where the frame offset bookkeeping earns its keep: the client asks in
//! its own coordinates and both the frame and the interior must follow.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::display_event::WindowChanges;
use crate::models::{Bounds, InternalState};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    pub fn configure_request_handler(&mut self, window: WindowHandle, changes: &WindowChanges) {
        let known = matches!(self.state.registry.get(window), Some(c) if c.window == window);
        if !known {
            // Not ours to second-guess.
            self.display_server.configure_window(window, changes);
            return;
        }

        let border = self.state.frame.border;
        let title = self.state.frame.title_height;

        // ICCCM 4.1.5: when a border width is given, the x and y here have
        // been adjusted for it.
        let mut x = changes.x;
        let mut y = changes.y;
        if let Some(bw) = changes.border_width {
            x = x.map(|v| v - bw);
            y = y.map(|v| v - bw);
        }

        let (bounds, framed, frame, internal) = {
            let Some(c) = self.state.registry.get_mut(window) else {
                return;
            };
            if let Some(x) = x {
                c.bounds.x = x;
            }
            if let Some(y) = y {
                c.bounds.y = if c.framed { y + title } else { y };
            }
            if let Some(width) = changes.width {
                c.bounds.width = if c.framed { width + 2 * border } else { width };
            }
            if let Some(height) = changes.height {
                c.bounds.height = if c.framed { height + 2 * border } else { height };
            }
            if let Some(bw) = changes.border_width {
                c.original_border = bw;
            }
            (c.bounds, c.framed, c.frame, c.internal)
        };

        if let Some(frame) = frame {
            // The frame follows the same request, field for field, in
            // frame coordinates.
            let frame_changes = WindowChanges {
                x: x.map(|_| bounds.x),
                y: y.map(|_| bounds.y - title),
                width: changes.width.map(|_| bounds.width),
                height: changes.height.map(|_| bounds.height + title),
                border_width: changes.border_width.map(|_| 1),
                sibling: changes.sibling,
                stack_mode: changes.stack_mode,
            };
            self.display_server.configure_window(frame, &frame_changes);
            if let Some(c) = self.state.registry.get(window) {
                let snapshot = c.clone();
                self.send_configure(&snapshot);
            }
        }

        // The window itself: framed clients live at a fixed spot inside
        // the frame, everyone else gets the raw request. The border is
        // forced to zero either way; ours is painted on the frame.
        let window_changes = WindowChanges {
            x: if framed && internal == InternalState::Normal {
                x.map(|_| border)
            } else {
                x
            },
            y: if framed && internal == InternalState::Normal {
                y.map(|_| border)
            } else {
                y
            },
            width: changes.width,
            height: changes.height,
            border_width: Some(0),
            sibling: changes.sibling,
            stack_mode: changes.stack_mode,
        };
        self.display_server.configure_window(window, &window_changes);

        if let Some(frame) = frame {
            self.display_server.move_resize_window(
                frame,
                Bounds::new(
                    bounds.x,
                    bounds.y - title,
                    bounds.width,
                    bounds.height + title,
                ),
            );
            self.display_server
                .move_window(window, border, border + title);
        } else {
            self.display_server.move_resize_window(window, bounds);
        }
    }

    /// Old-style restack requests. For a tracked client the restack goes
    /// through the usual raise and lower paths so dialogs and the client
    /// list follow; anything else is restacked as asked.
    pub fn circulate_request_handler(&mut self, window: WindowHandle, on_top: bool) {
        match self.state.registry.get(window).map(|c| c.window) {
            None => {
                if on_top {
                    self.display_server.raise_window(window);
                } else {
                    self.display_server.lower_window(window);
                }
            }
            Some(w) => {
                if on_top {
                    self.raise_client(w);
                } else {
                    self.lower_client(w);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_event::WindowChanges;
    use crate::display_servers::{MockDisplayServer, ServerOp};
    use crate::models::{Bounds, Manager, Mode, Screen, WindowHandle};

    type TestManager = Manager<TestConfig, MockDisplayServer>;

    const ROOT: WindowHandle = WindowHandle(1);

    fn manager_with(windows: &[WindowHandle]) -> TestManager {
        let mut manager = Manager::new_test();
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
    fn unknown_window_requests_pass_through_untouched() {
        let mut manager = manager_with(&[]);
        let stranger = WindowHandle(77);
        let changes = WindowChanges {
            x: Some(5),
            y: Some(6),
            width: Some(300),
            height: Some(200),
            border_width: Some(2),
            sibling: None,
            stack_mode: Some(0),
        };

        manager.configure_request_handler(stranger, &changes);

        assert_eq!(
            manager.display_server.take_ops(),
            vec![ServerOp::Configure {
                window: stranger,
                changes,
            }]
        );
    }

    #[test]
    fn framed_request_moves_frame_and_interior_together() {
        let a = WindowHandle(10);
        let mut manager = manager_with(&[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        let changes = WindowChanges {
            x: Some(200),
            y: Some(300),
            width: Some(400),
            height: Some(250),
            ..WindowChanges::default()
        };

        manager.configure_request_handler(a, &changes);

        let c = manager.state.registry.get(a).unwrap();
        assert_eq!(c.bounds, Bounds::new(200, 318, 412, 262));

        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::Configure {
            window: frame,
            changes: WindowChanges {
                x: Some(200),
                y: Some(300),
                width: Some(412),
                height: Some(280),
                ..WindowChanges::default()
            },
        }));
        // The window hears about its interior in root coordinates.
        assert!(ops.contains(&ServerOp::ConfigureNotify {
            window: a,
            bounds: Bounds::new(206, 324, 400, 250),
            border_width: 0,
        }));
        assert!(ops.contains(&ServerOp::Configure {
            window: a,
            changes: WindowChanges {
                x: Some(6),
                y: Some(6),
                width: Some(400),
                height: Some(250),
                border_width: Some(0),
                ..WindowChanges::default()
            },
        }));
        assert!(ops.contains(&ServerOp::MoveResize {
            window: frame,
            bounds: Bounds::new(200, 300, 412, 280),
        }));
        assert!(ops.contains(&ServerOp::Move {
            window: a,
            x: 6,
            y: 24,
        }));
    }

    #[test]
    fn width_only_request_leaves_position_fields_unset() {
        let a = WindowHandle(10);
        let mut manager = manager_with(&[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        let before = manager.state.registry.get(a).unwrap().bounds;
        let changes = WindowChanges {
            width: Some(500),
            ..WindowChanges::default()
        };

        manager.configure_request_handler(a, &changes);

        let c = manager.state.registry.get(a).unwrap();
        assert_eq!((c.bounds.x, c.bounds.y), (before.x, before.y));
        assert_eq!(c.bounds.width, 512);

        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::Configure {
            window: frame,
            changes: WindowChanges {
                width: Some(512),
                ..WindowChanges::default()
            },
        }));
        assert!(ops.contains(&ServerOp::Configure {
            window: a,
            changes: WindowChanges {
                width: Some(500),
                border_width: Some(0),
                ..WindowChanges::default()
            },
        }));
    }

    #[test]
    fn declared_border_width_adjusts_the_origin() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        let mut screen = Screen::new(0, ROOT, 1280, 1024);
        screen.popup = WindowHandle(2);
        manager.state.screens.push(screen);
        manager.state.mode = Mode::Idle;
        manager.display_server.undecorated.borrow_mut().push(a);
        manager.state.registry.add(a, ROOT, 0);
        manager
            .display_server
            .geometries
            .borrow_mut()
            .insert(a, Bounds::new(0, 0, 300, 200));
        manager.manage_window(a);
        manager.display_server.take_ops();

        let changes = WindowChanges {
            x: Some(100),
            y: Some(80),
            border_width: Some(5),
            ..WindowChanges::default()
        };
        manager.configure_request_handler(a, &changes);

        let c = manager.state.registry.get(a).unwrap();
        assert_eq!((c.bounds.x, c.bounds.y), (95, 75));
        assert_eq!(c.original_border, 5);
        assert!(manager.display_server.did(&ServerOp::Configure {
            window: a,
            changes: WindowChanges {
                x: Some(95),
                y: Some(75),
                border_width: Some(0),
                ..WindowChanges::default()
            },
        }));
    }

    #[test]
    fn circulate_restacks_strangers_directly_and_clients_properly() {
        let a = WindowHandle(10);
        let stranger = WindowHandle(77);
        let mut manager = manager_with(&[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();

        manager.circulate_request_handler(stranger, true);
        assert!(manager.display_server.did(&ServerOp::Raise(stranger)));
        manager.display_server.take_ops();

        manager.circulate_request_handler(a, true);
        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::Raise(frame)));
        assert!(ops.contains(&ServerOp::Raise(a)));

        manager.circulate_request_handler(a, false);
        assert!(manager.display_server.did(&ServerOp::Lower(a)));
    }
}
