//! Screen announcement at start-up, and the window-tree scan that adopts
//! whatever was already running.

use super::{Config, DisplayServer, Manager};
use crate::models::{InternalState, Screen};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Records a screen the display server announced and adopts every
    /// window already living on it.
    pub fn screen_create_handler(&mut self, screen: Screen) {
        let index = screen.index;
        tracing::info!("managing screen {index} with root {}", screen.root);
        self.state.screens.push(screen);
        self.scan_existing_windows(index);
        self.set_client_list(index);
    }

    /// Walks the screen's window tree and tracks everything on it. Frames
    /// resolve back to clients we already know, so they fall out of the
    /// add; new windows get their server-side geometry recorded and, when
    /// viewable, are adopted on the spot. Adoption reparents, and the
    /// UnmapNotify a reparent generates must not read as a withdrawal
    /// later, hence the pending marker.
    pub(crate) fn scan_existing_windows(&mut self, screen_index: usize) {
        let Some(root) = self.state.screens.get(screen_index).map(|s| s.root) else {
            return;
        };
        for scan in self.display_server.scan_windows(screen_index) {
            let matched = match self.state.registry.add(scan.window, root, screen_index) {
                Some(c) if c.window == scan.window => {
                    c.screen = screen_index;
                    c.bounds = scan.bounds;
                    c.original_border = scan.border_width;
                    true
                }
                _ => false,
            };
            if matched && scan.viewable {
                if let Some(c) = self.state.registry.get_mut(scan.window) {
                    c.internal = InternalState::ReparentPending;
                }
                self.manage_window(scan.window);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_servers::{MockDisplayServer, ServerOp, WindowScan};
    use crate::models::{Bounds, InternalState, Manager, Screen, Strut, WindowHandle};

    type TestManager = Manager<TestConfig, MockDisplayServer>;

    const ROOT: WindowHandle = WindowHandle(1);

    fn screen() -> Screen {
        let mut screen = Screen::new(0, ROOT, 1280, 1024);
        screen.popup = WindowHandle(2);
        screen
    }

    fn scan(window: WindowHandle, bounds: Bounds, viewable: bool) -> WindowScan {
        WindowScan {
            window,
            bounds,
            border_width: 1,
            viewable,
        }
    }

    #[test]
    fn the_scan_adopts_viewable_windows_and_notes_the_rest() {
        let mut manager: TestManager = Manager::new_test();
        let mapped = WindowHandle(10);
        let dormant = WindowHandle(11);
        manager.display_server.scan_results.borrow_mut().insert(
            0,
            vec![
                scan(mapped, Bounds::new(30, 40, 300, 200), true),
                scan(dormant, Bounds::new(0, 0, 100, 100), false),
            ],
        );

        manager.screen_create_handler(screen());

        let c = manager.state.registry.get(mapped).unwrap();
        assert!(c.is_normal());
        assert!(c.frame.is_some());
        // Reparenting is about to unmap the window once; that unmap is
        // ours, not the client's.
        assert_eq!(c.internal, InternalState::ReparentPending);

        let d = manager.state.registry.get(dormant).unwrap();
        assert!(d.is_withdrawn());
        assert!(d.frame.is_none());
        assert_eq!(d.bounds, Bounds::new(0, 0, 100, 100));
        assert_eq!(d.original_border, 1);
    }

    #[test]
    fn rescanning_does_not_mistake_frames_for_clients() {
        let mut manager: TestManager = Manager::new_test();
        let window = WindowHandle(10);
        manager
            .display_server
            .scan_results
            .borrow_mut()
            .insert(0, vec![scan(window, Bounds::new(0, 0, 300, 200), true)]);
        manager.screen_create_handler(screen());
        let frame = manager.state.registry.get(window).unwrap().frame.unwrap();

        // After adoption the tree shows the frame, not the window.
        manager
            .display_server
            .scan_results
            .borrow_mut()
            .insert(0, vec![scan(frame, Bounds::new(0, 0, 312, 230), true)]);
        manager.scan_existing_windows(0);

        assert_eq!(manager.state.registry.len(), 1);
        assert_eq!(manager.state.registry.get(frame).unwrap().window, window);
    }

    #[test]
    fn startup_adoption_trusts_existing_positions() {
        let mut manager: TestManager = Manager::new_test();
        let window = WindowHandle(10);
        manager
            .display_server
            .scan_results
            .borrow_mut()
            .insert(0, vec![scan(window, Bounds::new(400, 500, 300, 200), true)]);

        manager.screen_create_handler(screen());

        let c = manager.state.registry.get(window).unwrap();
        // Wherever the previous manager left it, not the placement cursor.
        assert_eq!((c.bounds.x, c.bounds.y), (400, 500));
    }

    #[test]
    fn struts_found_at_startup_shrink_the_workarea() {
        let mut manager: TestManager = Manager::new_test();
        let panel = WindowHandle(10);
        manager.display_server.undecorated.borrow_mut().push(panel);
        manager
            .display_server
            .scan_results
            .borrow_mut()
            .insert(0, vec![scan(panel, Bounds::new(0, 0, 1280, 24), true)]);
        manager.display_server.struts.borrow_mut().insert(
            panel,
            Strut {
                left: 0,
                right: 0,
                top: 24,
                bottom: 0,
            },
        );

        manager.screen_create_handler(screen());

        assert!(manager.display_server.did(&ServerOp::SetWorkarea {
            screen: 0,
            workarea: Bounds::new(0, 24, 1280, 1000),
        }));
    }
}
