//! Property and colormap change notifications from client windows.

use super::{Config, DisplayServer, Manager, WindowHandle};
use crate::display_event::PropertyKind;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    pub fn property_change_handler(&mut self, window: WindowHandle, kind: PropertyKind) {
        let handle = match self.state.registry.get(window) {
            Some(c) => c.window,
            None => return,
        };
        match kind {
            PropertyKind::Name => {
                self.fetch_window_name(handle);
                self.set_active(handle, self.state.focused(handle), 0);
            }
            PropertyKind::TransientFor => {
                let trans = self.display_server.transient_for(handle);
                if let Some(c) = self.state.registry.get_mut(handle) {
                    c.trans = trans;
                }
            }
            PropertyKind::NormalHints => self.refetch_normal_hints(handle),
            PropertyKind::ColormapWindows => {
                self.refetch_colormaps(handle);
                if self.state.focused(handle) {
                    self.cmap_focus(Some(handle));
                }
            }
            PropertyKind::Strut => self.update_client_strut(handle),
        }
    }

    /// A window picked a new colormap. The owner may be a client, or a
    /// subwindow some client listed in WM_COLORMAP_WINDOWS; either way the
    /// stored colormap is updated, and installed right away if its owner
    /// holds focus.
    pub fn colormap_change_handler(&mut self, window: WindowHandle, colormap: Option<u64>) {
        let tracked = self.state.registry.get_mut(window).map(|c| {
            c.colormap = colormap;
            c.window
        });
        if let Some(handle) = tracked {
            if self.state.focused(handle) {
                self.cmap_focus(Some(handle));
            }
            return;
        }

        let mut owner = None;
        'scan: for c in self.state.registry.iter_mut() {
            for entry in &mut c.colormap_windows {
                if entry.0 == window {
                    entry.1 = colormap;
                    owner = Some(c.window);
                    break 'scan;
                }
            }
        }
        if let Some(handle) = owner {
            if self.state.focused(handle) {
                self.cmap_focus(Some(handle));
            }
        }
    }
}
