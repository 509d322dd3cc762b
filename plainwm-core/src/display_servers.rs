use crate::config::Config;
use crate::display_event::WindowChanges;
use crate::errors::Result;
use crate::models::Bounds;
use crate::models::Edge;
use crate::models::EwmhState;
use crate::models::FrameZone;
use crate::models::MenuGeometry;
use crate::models::Protocols;
use crate::models::SizeHints;
use crate::models::Strut;
use crate::models::WindowHandle;
use crate::models::WindowType;
use crate::models::WmState;
use crate::DisplayEvent;
#[cfg(test)]
mod mock_display_server;
pub mod xlib_display_server;
use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::{MockDisplayServer, ServerOp};
pub use self::xlib_display_server::XlibDisplayServer;

/// Where the X input focus should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Window(WindowHandle),
    /// No window holds the focus; keystrokes are discarded.
    None,
    /// Focus follows the pointer.
    PointerRoot,
}

/// A top-level window found while scanning a root window's children.
///
/// Override-redirect windows and our own popup are already filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScan {
    pub window: WindowHandle,
    pub bounds: Bounds,
    pub border_width: i32,
    pub viewable: bool,
}

/// The slice of WM_HINTS we care about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowHints {
    /// The input field, if the InputHint flag was set.
    pub accepts_input: Option<bool>,
    /// True when the initial state hint asks for an iconified start.
    pub start_iconic: bool,
}

pub trait DisplayServer {
    fn new(config: &impl Config) -> Result<Self>
    where
        Self: Sized;

    fn get_next_events(&mut self) -> Vec<DisplayEvent>;

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);

    // Font metrics.
    fn title_height(&self) -> i32;
    /// Height of one popup menu row, from the popup font.
    fn popup_height(&self) -> i32;
    fn popup_text_width(&self, text: &str) -> i32;

    // Queries.
    /// List the children of a screen's root window, oldest first.
    fn scan_windows(&self, screen: usize) -> Vec<WindowScan>;
    /// Locate the pointer: the screen it is on and its root coordinates.
    fn pointer_position(&self) -> (usize, i32, i32);
    /// The screen's window stacking order, bottom-most first.
    fn stacking_order(&self, screen: usize) -> Vec<WindowHandle>;
    /// Ask the server which window actually holds the input focus.
    fn input_focus(&self) -> FocusTarget;
    fn is_shaped(&self, window: WindowHandle) -> bool;
    /// The window's geometry as the server currently reports it.
    fn window_geometry(&self, window: WindowHandle) -> Option<Bounds>;

    // Per-window property reads.
    fn window_type(&self, window: WindowHandle) -> WindowType;
    /// Whether the window's Motif hints permit a border. Missing hints
    /// mean yes.
    fn decorations_allowed(&self, window: WindowHandle) -> bool;
    /// The window's _NET_WM_STATE flags, or None if the property is absent.
    fn ewmh_state(&self, window: WindowHandle) -> Option<EwmhState>;
    fn window_strut(&self, window: WindowHandle) -> Option<Strut>;
    fn transient_for(&self, window: WindowHandle) -> Option<WindowHandle>;
    fn wm_hints(&self, window: WindowHandle) -> WindowHints;
    fn wm_state(&self, window: WindowHandle) -> Option<WmState>;
    fn normal_hints(&self, window: WindowHandle) -> SizeHints;
    fn protocols(&self, window: WindowHandle) -> Protocols;
    /// _NET_WM_NAME if set, otherwise WM_NAME.
    fn window_name(&self, window: WindowHandle) -> Option<String>;
    fn window_colormap(&self, window: WindowHandle) -> Option<u64>;
    /// WM_COLORMAP_WINDOWS entries paired with their colormaps. Entries
    /// naming the client window itself are returned with None; listed
    /// subwindows are subscribed to colormap change events as a side effect.
    fn colormap_windows(&self, window: WindowHandle) -> Vec<(WindowHandle, Option<u64>)>;

    // Window manipulation.
    fn create_frame(&self, screen: usize, bounds: Bounds) -> WindowHandle;
    fn destroy_window(&self, window: WindowHandle);
    /// Strip the window's own border and select the events a managed
    /// client window must report.
    fn setup_client_window(&self, window: WindowHandle);
    fn reparent_window(&self, window: WindowHandle, parent: WindowHandle, x: i32, y: i32);
    fn map_window(&self, window: WindowHandle);
    fn unmap_window(&self, window: WindowHandle);
    fn raise_window(&self, window: WindowHandle);
    fn lower_window(&self, window: WindowHandle);
    fn move_window(&self, window: WindowHandle, x: i32, y: i32);
    fn resize_window(&self, window: WindowHandle, width: i32, height: i32);
    fn move_resize_window(&self, window: WindowHandle, bounds: Bounds);
    fn set_border_width(&self, window: WindowHandle, width: i32);
    /// Pass a configure request through, honouring only the fields present.
    fn configure_window(&self, window: WindowHandle, changes: &WindowChanges);
    fn add_to_save_set(&self, window: WindowHandle);
    fn remove_from_save_set(&self, window: WindowHandle);
    fn send_configure_notify(&self, window: WindowHandle, bounds: Bounds, border_width: i32);
    fn send_delete(&self, window: WindowHandle);
    fn send_take_focus(&self, window: WindowHandle, timestamp: u64);
    fn kill_client(&self, window: WindowHandle);
    fn set_input_focus(&self, target: FocusTarget);
    fn grab_buttons(&self, window: WindowHandle);
    fn ungrab_buttons(&self, window: WindowHandle);
    /// Retarget the active pointer grab for a move or reshape drag,
    /// switching to the matching drag cursor.
    fn begin_drag_grab(&self, edge: Option<Edge>);
    fn begin_menu_grab(&self);
    /// Set the frame's cursor for the given zone; None restores the default.
    fn set_frame_cursor(&self, frame: WindowHandle, zone: Option<FrameZone>);
    fn install_colormap(&self, colormap: Option<u64>);

    // Frame and popup drawing.
    fn draw_frame(&self, frame: WindowHandle, name: Option<&str>, active: bool, with_box: bool);
    /// Map the size-feedback popup near the given root position, sized for
    /// the widest size string the screen can produce.
    fn show_size_popup(&self, screen: usize, x: i32, y: i32);
    fn draw_size_popup(&self, screen: usize, text: &str);
    fn show_menu(&self, screen: usize, geometry: &MenuGeometry);
    fn draw_menu(
        &self,
        screen: usize,
        labels: &[String],
        geometry: &MenuGeometry,
        highlight: Option<usize>,
    );
    /// Flip the highlight from one menu row to another. The fills invert,
    /// so painting a row twice restores it.
    fn menu_highlight(
        &self,
        screen: usize,
        geometry: &MenuGeometry,
        old: Option<usize>,
        new: Option<usize>,
    );
    fn hide_popup(&self, screen: usize);

    // Root and client window property writes.
    fn set_active_window(&self, screen: usize, window: Option<WindowHandle>);
    fn set_client_list(&self, screen: usize, list: &[WindowHandle], stacking: &[WindowHandle]);
    fn set_workarea(&self, screen: usize, workarea: Bounds);
    fn set_wm_state(&self, window: WindowHandle, state: WmState);
    fn set_net_wm_state(
        &self,
        window: WindowHandle,
        state: &EwmhState,
        hidden: bool,
        withdrawn: bool,
    );
    fn set_allowed_actions(&self, window: WindowHandle);
}
