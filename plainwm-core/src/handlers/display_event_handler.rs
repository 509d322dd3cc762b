//! Fans translated server events out to the handlers that own them.

use super::{Config, DisplayEvent, DisplayServer, Manager, WindowHandle};
use crate::models::Mode;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    pub fn display_event_handler(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::ScreenCreate(screen) => self.screen_create_handler(screen),
            DisplayEvent::MapRequest(window) => self.map_request_handler(window),
            DisplayEvent::Unmap { window, synthetic } => {
                self.unmap_notify_handler(window, synthetic);
            }
            DisplayEvent::Destroy(window) => self.destroy_notify_handler(window),
            DisplayEvent::ConfigureRequest { window, changes } => {
                self.configure_request_handler(window, &changes);
            }
            DisplayEvent::CirculateRequest { window, on_top } => {
                self.circulate_request_handler(window, on_top);
            }
            DisplayEvent::IconifyRequest(window) => self.iconify_request_handler(window),
            DisplayEvent::StateChangeRequest {
                window,
                action,
                properties,
            } => self.state_change_request_handler(window, action, properties),
            DisplayEvent::ActivateRequest(window) => self.activate_request_handler(window),
            DisplayEvent::CloseRequest(window) => self.close_request_handler(window),
            DisplayEvent::DragRequest { window, edge } => {
                self.drag_request_handler(window, edge);
            }
            DisplayEvent::PropertyChange { window, kind } => {
                self.property_change_handler(window, kind);
            }
            DisplayEvent::ColormapChange { window, colormap } => {
                self.colormap_change_handler(window, colormap);
            }
            DisplayEvent::FocusIn => self.focus_in_handler(),
            DisplayEvent::ReparentedAway(window) => self.reparented_away_handler(window),
            DisplayEvent::Enter { window, time } => self.enter_notify_handler(window, time),
            DisplayEvent::ButtonPress(event) => self.button_press_handler(&event),
            DisplayEvent::ButtonRelease(event) => self.button_release_handler(&event),
            DisplayEvent::Motion(event) => self.motion_notify_handler(&event),
            DisplayEvent::Expose(window) => self.expose_handler(window),
        }
    }

    /// Repaints whatever the exposed window shows. The shared popup
    /// carries the hidden-window menu or the size readout depending on
    /// mode; anything else with a frame gets its border redrawn.
    fn expose_handler(&mut self, window: WindowHandle) {
        if let Some(screen) = self.state.screens.iter().position(|s| s.popup == window) {
            match self.state.mode {
                Mode::MenuUp(session) => {
                    let labels = self.hidden_labels();
                    self.display_server
                        .draw_menu(screen, &labels, &session.geometry, session.item);
                }
                Mode::Reshaping(drag) => {
                    if let Some(text) = self.size_popup_text(drag.handle) {
                        self.display_server.draw_size_popup(screen, &text);
                    }
                }
                _ => {}
            }
            return;
        }
        let Some(c) = self.state.registry.get(window) else {
            return;
        };
        if c.framed {
            let snapshot = c.clone();
            self.draw_border(&snapshot, self.state.focused(snapshot.window));
        }
    }
}
