//! Pointer motion: opaque move and resize drags, menu selection tracking
//! and the frame cursor feedback while idle.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::display_event::MotionEvent;
use crate::models::{Bounds, FrameZone, MenuSession, Mode, ReshapeDrag};
use crate::sanitize::sanitize;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    pub fn motion_notify_handler(&mut self, event: &MotionEvent) {
        match self.state.mode {
            Mode::Reshaping(drag) => self.reshaping_motion(&drag),
            Mode::MenuUp(session) => self.menu_motion(&session, event),
            Mode::Idle => self.idle_motion(event),
            _ => {}
        }
    }

    /// One step of an opaque move or resize. The pointer is re-queried
    /// rather than read from the event, so a flood of motion events
    /// collapses to wherever the pointer is now.
    fn reshaping_motion(&mut self, drag: &ReshapeDrag) {
        let (pointer_screen, pointer_x, mut pointer_y) = self.display_server.pointer_position();
        let snapshot = match self.state.registry.get(drag.handle) {
            Some(c) => c.clone(),
            None => return,
        };
        let Some(screen) = self.state.screens.get(snapshot.screen) else {
            return;
        };
        let metrics = self.state.frame;
        let original = snapshot.bounds;
        let mut proposed = original;

        if let Some(edge) = drag.edge {
            self.display_server
                .show_size_popup(pointer_screen, pointer_x + 8, pointer_y + 8);

            // The frame's top edge rides one title bar above the bordered
            // box, so dragging it tracks the pointer plus that offset.
            if edge.moves_top() {
                pointer_y += metrics.title_height;
                proposed.height += original.y - pointer_y;
                proposed.y = pointer_y;
            } else if edge.moves_bottom() {
                proposed.height = pointer_y - original.y;
            }
            if edge.moves_right() {
                proposed.width = pointer_x - original.x;
            } else if edge.moves_left() {
                proposed.width += original.x - pointer_x;
                proposed.x = pointer_x;
            }

            let sane = sanitize(
                &snapshot,
                screen,
                metrics,
                drag.edge,
                proposed,
                self.state.edge_resistance,
            );
            let mut bounds = original;
            sane.apply(&mut bounds, true);
            if let Some(c) = self.state.registry.get_mut(drag.handle) {
                c.bounds = bounds;
            }

            if let Some(frame) = snapshot.frame {
                self.display_server
                    .move_resize_window(frame, metrics.frame_bounds(bounds));
                if bounds.width == original.width && bounds.height == original.height {
                    if bounds.x != original.x || bounds.y != original.y {
                        let mut moved = snapshot.clone();
                        moved.bounds = bounds;
                        self.send_configure(&moved);
                    }
                } else {
                    let (x, y) = metrics.interior_origin();
                    let (width, height) = metrics.interior_size(bounds);
                    self.display_server
                        .move_resize_window(snapshot.window, Bounds::new(x, y, width, height));
                }
            } else {
                self.display_server.move_resize_window(snapshot.window, bounds);
            }

            if let Some(text) = self.size_popup_text(drag.handle) {
                self.display_server.draw_size_popup(pointer_screen, &text);
            }
        } else {
            proposed.x = pointer_x + drag.grab.0;
            proposed.y = pointer_y + drag.grab.1;

            let sane = sanitize(
                &snapshot,
                screen,
                metrics,
                None,
                proposed,
                self.state.edge_resistance,
            );
            let mut bounds = original;
            sane.apply(&mut bounds, false);
            if let Some(c) = self.state.registry.get_mut(drag.handle) {
                c.bounds = bounds;
            }

            if let Some(frame) = snapshot.frame {
                self.display_server
                    .move_window(frame, bounds.x, bounds.y - metrics.title_height);
            } else {
                self.display_server
                    .move_window(snapshot.window, bounds.x, bounds.y);
            }
            let mut moved = snapshot;
            moved.bounds = bounds;
            self.send_configure(&moved);
        }
    }

    /// The size readout for the popup, in resize increments when the client
    /// declared any so a terminal reads in character cells.
    pub(crate) fn size_popup_text(&self, handle: WindowHandle) -> Option<String> {
        let c = self.state.registry.get(handle)?;
        let border = self.state.frame.border;
        let mut width = c.bounds.width - 2 * border;
        let mut height = c.bounds.height - 2 * border;

        // Subtract the base size so an xterm reports 80x24 even with a
        // scrollbar; clients with only a minimum get that subtracted
        // instead.
        if (c.hints.min.is_some() || c.hints.base.is_some()) && c.hints.inc.is_some() {
            if c.hints.base.is_some() {
                width -= c.constraints.base_width;
                height -= c.constraints.base_height;
            } else {
                width -= c.constraints.min_width;
                height -= c.constraints.min_height;
            }
        }
        if c.constraints.width_inc != 0 {
            width /= c.constraints.width_inc;
        }
        if c.constraints.height_inc != 0 {
            height /= c.constraints.height_inc;
        }
        Some(format!("{width} x {height}"))
    }

    fn menu_motion(&mut self, session: &MenuSession, event: &MotionEvent) {
        let item = session.geometry.item_at(event.x_root, event.y_root);
        if item == session.item {
            return;
        }
        self.display_server
            .menu_highlight(session.screen, &session.geometry, session.item, item);
        self.state.mode = Mode::MenuUp(MenuSession {
            item,
            ..*session
        });
    }

    /// While idle the only job is cursor feedback: show the matching resize
    /// arrow while the pointer is over a frame edge and put the plain
    /// cursor back elsewhere.
    fn idle_motion(&mut self, event: &MotionEvent) {
        let (window, frame, bounds, current) = match self.state.registry.get(event.window) {
            Some(c) => (c.window, c.frame, c.bounds, c.cursor),
            None => return,
        };
        if Some(event.window) != frame || event.subwindow == window {
            return;
        }
        let mut zone = self
            .state
            .frame
            .zone_at(event.x, event.y, bounds.width, bounds.height);
        if zone == FrameZone::Interior {
            zone = FrameZone::Title;
        }
        if current != Some(zone) {
            self.display_server
                .set_frame_cursor(event.window, (zone != FrameZone::Title).then_some(zone));
            if let Some(c) = self.state.registry.get_mut(window) {
                c.cursor = Some(zone);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_event::MotionEvent;
    use crate::display_servers::{MockDisplayServer, ServerOp};
    use crate::models::{
        Bounds, Edge, FrameZone, Manager, MenuGeometry, MenuSession, Mode, Screen, SizeHints,
        WindowHandle,
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

    fn motion(window: WindowHandle) -> MotionEvent {
        MotionEvent {
            window,
            subwindow: WindowHandle::NONE,
            x: 0,
            y: 0,
            x_root: 0,
            y_root: 0,
        }
    }

    #[test]
    fn dragging_the_corner_resizes_with_feedback() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.pointer.set((0, 412, 312));
        manager.start_reshape(a, Some(Edge::BottomRight));
        manager.display_server.take_ops();

        manager.display_server.pointer.set((0, 500, 400));
        manager.motion_notify_handler(&motion(frame));

        // Auto-placed at (100, 100); the corner follows the pointer.
        assert_eq!(
            manager.state.registry.get(a).unwrap().bounds,
            Bounds::new(100, 100, 400, 300)
        );
        let ops = manager.display_server.take_ops();
        let show = ops
            .iter()
            .position(|op| op == &ServerOp::ShowSizePopup { screen: 0, x: 508, y: 408 })
            .unwrap();
        let frame_op = ops
            .iter()
            .position(|op| {
                op == &ServerOp::MoveResize {
                    window: frame,
                    bounds: Bounds::new(100, 82, 400, 318),
                }
            })
            .unwrap();
        assert!(show < frame_op);
        assert!(ops.contains(&ServerOp::MoveResize {
            window: a,
            bounds: Bounds::new(6, 24, 388, 288),
        }));
        assert!(ops.contains(&ServerOp::DrawSizePopup {
            screen: 0,
            text: "388 x 288".into(),
        }));
    }

    #[test]
    fn dragging_the_top_edge_moves_the_top_only() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.start_reshape(a, Some(Edge::Top));
        manager.display_server.take_ops();

        manager.display_server.pointer.set((0, 200, 50));
        manager.motion_notify_handler(&motion(frame));

        // The pointer holds the frame's top edge; the bordered box starts a
        // title bar lower and the bottom edge stays at 312.
        assert_eq!(
            manager.state.registry.get(a).unwrap().bounds,
            Bounds::new(100, 68, 312, 244)
        );
        assert!(manager.display_server.did(&ServerOp::MoveResize {
            window: frame,
            bounds: Bounds::new(100, 50, 312, 262),
        }));
    }

    #[test]
    fn a_move_keeps_the_grab_offset() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.pointer.set((0, 150, 95));
        manager.start_reshape(a, None);
        manager.display_server.take_ops();

        manager.display_server.pointer.set((0, 600, 300));
        manager.motion_notify_handler(&motion(frame));

        assert_eq!(
            manager.state.registry.get(a).unwrap().bounds,
            Bounds::new(550, 305, 312, 212)
        );
        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::Move {
            window: frame,
            x: 550,
            y: 287,
        }));
        assert!(ops.contains(&ServerOp::ConfigureNotify {
            window: a,
            bounds: Bounds::new(556, 311, 300, 200),
            border_width: 0,
        }));
        assert!(!ops
            .iter()
            .any(|op| matches!(op, ServerOp::ShowSizePopup { .. })));
    }

    #[test]
    fn a_resize_below_the_minimum_is_refused() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager.display_server.size_hints.borrow_mut().insert(
            a,
            SizeHints {
                min: Some((250, 100)),
                ..Default::default()
            },
        );
        let mut manager = manager_with(manager, &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.start_reshape(a, Some(Edge::Right));
        manager.display_server.take_ops();

        // 150 from the left edge would leave the window under its minimum.
        manager.display_server.pointer.set((0, 250, 200));
        manager.motion_notify_handler(&motion(frame));

        assert_eq!(
            manager.state.registry.get(a).unwrap().bounds,
            Bounds::new(100, 100, 312, 212)
        );
        assert!(!manager
            .display_server
            .did(&ServerOp::ConfigureNotify {
                window: a,
                bounds: Bounds::new(106, 106, 300, 200),
                border_width: 0,
            }));
    }

    #[test]
    fn a_move_snaps_flush_against_the_screen_edge() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.pointer.set((0, 100, 100));
        manager.start_reshape(a, None);
        manager.display_server.take_ops();

        // 20 pixels over the left edge is within the resistance.
        manager.display_server.pointer.set((0, -20, 100));
        manager.motion_notify_handler(&motion(frame));

        assert_eq!(manager.state.registry.get(a).unwrap().bounds.x, 0);
    }

    #[test]
    fn menu_motion_tracks_the_highlight() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let mut geometry = MenuGeometry::compute(&[70, 70], 15, 6);
        geometry.origin = (100, 100);
        manager.state.mode = Mode::MenuUp(MenuSession {
            screen: 0,
            geometry,
            item: None,
        });

        let mut event = motion(ROOT);
        event.x_root = 110;
        event.y_root = 120;
        manager.motion_notify_handler(&event);

        assert!(manager.display_server.did(&ServerOp::MenuHighlight {
            screen: 0,
            old: None,
            new: Some(1),
        }));
        assert!(matches!(
            manager.state.mode,
            Mode::MenuUp(MenuSession { item: Some(1), .. })
        ));

        // Staying on the same row costs nothing.
        manager.display_server.take_ops();
        event.y_root = 125;
        manager.motion_notify_handler(&event);
        assert!(manager.display_server.take_ops().is_empty());
    }

    #[test]
    fn idle_motion_swaps_the_resize_cursor_once() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();

        let mut event = motion(frame);
        event.x = 2;
        event.y = 2;
        manager.motion_notify_handler(&event);

        assert!(manager.display_server.did(&ServerOp::SetFrameCursor {
            frame,
            zone: Some(FrameZone::Edge(Edge::TopLeft)),
        }));
        assert_eq!(
            manager.state.registry.get(a).unwrap().cursor,
            Some(FrameZone::Edge(Edge::TopLeft))
        );

        manager.display_server.take_ops();
        event.x = 3;
        event.y = 3;
        manager.motion_notify_handler(&event);
        assert!(manager.display_server.take_ops().is_empty());
    }

    #[test]
    fn leaving_the_edge_restores_the_plain_cursor() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();

        let mut event = motion(frame);
        event.x = 2;
        event.y = 2;
        manager.motion_notify_handler(&event);
        manager.display_server.take_ops();

        event.x = 100;
        event.y = 10;
        manager.motion_notify_handler(&event);

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
    fn motion_over_the_client_window_is_ignored() {
        let a = WindowHandle(10);
        let mut manager = manager_with(Manager::new_test(), &[a]);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();

        let mut event = motion(frame);
        event.subwindow = a;
        event.x = 2;
        event.y = 2;
        manager.motion_notify_handler(&event);

        assert!(manager.display_server.take_ops().is_empty());
    }

    #[test]
    fn terminal_sizes_read_in_character_cells() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager.display_server.size_hints.borrow_mut().insert(
            a,
            SizeHints {
                base: Some((10, 20)),
                inc: Some((7, 14)),
                ..Default::default()
            },
        );
        let manager = manager_with(manager, &[a]);

        // Interior 300x200 less base (10, 20), in 7x14 steps.
        assert_eq!(manager.size_popup_text(a).as_deref(), Some("41 x 12"));
    }

    #[test]
    fn minimum_only_clients_subtract_the_widened_minimum() {
        let a = WindowHandle(10);
        let mut manager = Manager::new_test();
        manager.display_server.size_hints.borrow_mut().insert(
            a,
            SizeHints {
                min: Some((100, 50)),
                inc: Some((10, 10)),
                ..Default::default()
            },
        );
        let manager = manager_with(manager, &[a]);

        // The stored minimum carries the frame borders: 112 and 62.
        assert_eq!(manager.size_popup_text(a).as_deref(), Some("18 x 13"));
    }

    #[test]
    fn plain_windows_report_pixels() {
        let a = WindowHandle(10);
        let manager = manager_with(Manager::new_test(), &[a]);

        assert_eq!(manager.size_popup_text(a).as_deref(), Some("300 x 200"));
    }
}
