//! The main event loop: drain the display connection, dispatch, flush.

use std::sync::atomic::Ordering;
use std::sync::Once;

use crate::config::Config;
use crate::display_servers::{DisplayServer, FocusTarget};
use crate::models::Mode;
use crate::{DisplayEvent, Manager};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    pub async fn event_loop(mut self) {
        let startup_done: Once = Once::new();

        let mut event_buffer: Vec<DisplayEvent> = vec![];
        loop {
            self.display_server.flush();

            tokio::select! {
                () = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                // Wake now and then so a signal delivered while the
                // connection is quiet is still noticed.
                () = timeout(100), if event_buffer.is_empty() => {}
                else => {
                    event_buffer
                        .drain(..)
                        .for_each(|event| self.display_event_handler(event));
                }
            }

            // The first batch announces the screens and adopts the windows
            // already on them; once it is through we are in service.
            startup_done.call_once(|| {
                if self.state.mode == Mode::Initialising {
                    self.state.mode = Mode::Idle;
                }
            });

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }

            if self.terminate_requested.load(Ordering::SeqCst) {
                tracing::info!("termination requested, releasing all windows");
                self.release_windows();
                return;
            }
        }
    }

    /// Hands every window back to the server the way we found it, so a
    /// successor manager (or the bare server) can take over.
    fn release_windows(&self) {
        for c in self.state.registry.iter() {
            if let Some(frame) = c.frame {
                self.display_server.unmap_window(frame);
                self.display_server.unmap_window(c.window);
                let Some(screen) = self.state.screens.get(c.screen) else {
                    continue;
                };
                self.display_server
                    .reparent_window(c.window, screen.root, c.bounds.x, c.bounds.y);
            } else {
                self.display_server.unmap_window(c.window);
            }
            // The save-set remaps everything once the connection closes;
            // hidden windows are lowered now so they come back at the bottom.
            if !c.is_normal() {
                self.display_server.lower_window(c.window);
            }
            self.display_server
                .set_border_width(c.window, c.original_border);
        }
        self.display_server.set_input_focus(FocusTarget::PointerRoot);
        self.display_server.install_colormap(None);
        self.display_server.flush();
    }
}

async fn timeout(mills: u64) {
    use tokio::time::{sleep, Duration};
    sleep(Duration::from_millis(mills)).await;
}

#[cfg(test)]
mod tests {
    use crate::display_servers::{FocusTarget, ServerOp};
    use crate::models::{Bounds, Manager, Screen, WindowHandle};

    const ROOT: WindowHandle = WindowHandle(1);

    #[test]
    fn released_windows_go_back_to_the_root() {
        let mut manager = Manager::new_test();
        let mut screen = Screen::new(0, ROOT, 1280, 1024);
        screen.popup = WindowHandle(2);
        manager.state.screens.push(screen);

        let a = WindowHandle(10);
        manager.state.registry.add(a, ROOT, 0);
        manager
            .display_server
            .geometries
            .borrow_mut()
            .insert(a, Bounds::new(0, 0, 300, 200));
        manager.manage_window(a);
        let frame = manager.state.registry.get(a).unwrap().frame.unwrap();
        manager.display_server.take_ops();

        manager.release_windows();

        let ops = manager.display_server.take_ops();
        assert!(ops.contains(&ServerOp::Unmap(frame)));
        assert!(ops.contains(&ServerOp::Unmap(a)));
        assert!(ops.contains(&ServerOp::Reparent {
            window: a,
            parent: ROOT,
            x: 100,
            y: 100,
        }));
        assert!(ops.contains(&ServerOp::SetInputFocus(FocusTarget::PointerRoot)));
        assert!(ops.contains(&ServerOp::InstallColormap(None)));
    }

    #[test]
    fn hidden_windows_are_released_to_the_bottom() {
        let mut manager = Manager::new_test();
        let mut screen = Screen::new(0, ROOT, 1280, 1024);
        screen.popup = WindowHandle(2);
        manager.state.screens.push(screen);

        let a = WindowHandle(10);
        manager.state.registry.add(a, ROOT, 0);
        manager
            .display_server
            .geometries
            .borrow_mut()
            .insert(a, Bounds::new(0, 0, 300, 200));
        manager.manage_window(a);
        manager.hide_client(a);
        manager.display_server.take_ops();

        manager.release_windows();

        assert!(manager.display_server.did(&ServerOp::Lower(a)));
    }
}
