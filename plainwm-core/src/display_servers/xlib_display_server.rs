//! A display server backed by Xlib through the `x11-dl` bindings.

mod event_translate;
mod event_translate_client_message;
mod event_translate_property_notify;
mod xatom;
mod xcursor;
mod xwrap;

pub use xwrap::XWrap;

use std::pin::Pin;

use futures::prelude::*;

use self::event_translate::XEvent;
use crate::config::Config;
use crate::display_event::{DisplayEvent, WindowChanges};
use crate::display_servers::{DisplayServer, FocusTarget, WindowHints, WindowScan};
use crate::errors::Result;
use crate::models::{
    Bounds, Edge, EwmhState, FrameZone, MenuGeometry, Protocols, SizeHints, Strut, WindowHandle,
    WindowType, WmState,
};

pub struct XlibDisplayServer {
    xw: XWrap,
    initial_events: Vec<DisplayEvent>,
}

impl DisplayServer for XlibDisplayServer {
    fn new(config: &impl Config) -> Result<Self> {
        let xw = XWrap::new(config)?;
        xw.init();
        let initial_events = xw
            .screens()
            .into_iter()
            .map(DisplayEvent::ScreenCreate)
            .collect();
        Ok(Self { xw, initial_events })
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        let mut events = std::mem::take(&mut self.initial_events);

        let events_in_queue = self.xw.queue_len();
        for _ in 0..events_in_queue {
            let xlib_event = self.xw.get_next_event();
            let event: Option<DisplayEvent> = XEvent(&self.xw, xlib_event).into();
            if let Some(e) = event {
                tracing::trace!("DisplayEvent: {:?}", e);
                events.push(e);
            }
        }

        events
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let task_notify = self.xw.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        self.xw.flush();
    }

    fn title_height(&self) -> i32 {
        self.xw.title_height()
    }

    fn popup_height(&self) -> i32 {
        self.xw.popup_height()
    }

    fn popup_text_width(&self, text: &str) -> i32 {
        self.xw.popup_text_width(text)
    }

    fn scan_windows(&self, screen: usize) -> Vec<WindowScan> {
        self.xw.scan_windows(screen)
    }

    fn pointer_position(&self) -> (usize, i32, i32) {
        self.xw.get_pointer_position()
    }

    fn stacking_order(&self, screen: usize) -> Vec<WindowHandle> {
        self.xw.get_stack(screen)
    }

    fn input_focus(&self) -> FocusTarget {
        self.xw.get_input_focus()
    }

    /// Always false: the shape extension is not consulted, so shaped
    /// windows get ordinary frames.
    fn is_shaped(&self, _window: WindowHandle) -> bool {
        false
    }

    fn window_geometry(&self, window: WindowHandle) -> Option<Bounds> {
        self.xw.get_window_geometry(window.0)
    }

    fn window_type(&self, window: WindowHandle) -> WindowType {
        self.xw.get_window_type(window.0)
    }

    fn decorations_allowed(&self, window: WindowHandle) -> bool {
        self.xw.motif_would_decorate(window.0)
    }

    fn ewmh_state(&self, window: WindowHandle) -> Option<EwmhState> {
        self.xw.get_ewmh_state(window.0)
    }

    fn window_strut(&self, window: WindowHandle) -> Option<Strut> {
        self.xw.get_window_strut(window.0)
    }

    fn transient_for(&self, window: WindowHandle) -> Option<WindowHandle> {
        self.xw.get_transient_for(window.0).map(WindowHandle)
    }

    fn wm_hints(&self, window: WindowHandle) -> WindowHints {
        self.xw.get_wmhints(window.0)
    }

    fn wm_state(&self, window: WindowHandle) -> Option<WmState> {
        self.xw.get_wm_state(window.0)
    }

    fn normal_hints(&self, window: WindowHandle) -> SizeHints {
        self.xw.get_normal_hints(window.0)
    }

    fn protocols(&self, window: WindowHandle) -> Protocols {
        self.xw.get_protocols(window.0)
    }

    fn window_name(&self, window: WindowHandle) -> Option<String> {
        self.xw.get_window_name(window.0)
    }

    fn window_colormap(&self, window: WindowHandle) -> Option<u64> {
        self.xw.get_window_colormap(window.0)
    }

    fn colormap_windows(&self, window: WindowHandle) -> Vec<(WindowHandle, Option<u64>)> {
        self.xw
            .get_colormap_windows(window.0)
            .into_iter()
            .map(|(w, colormap)| (WindowHandle(w), colormap))
            .collect()
    }

    fn create_frame(&self, screen: usize, bounds: Bounds) -> WindowHandle {
        WindowHandle(self.xw.create_frame(screen, bounds))
    }

    fn destroy_window(&self, window: WindowHandle) {
        self.xw.destroy_window(window.0);
    }

    fn setup_client_window(&self, window: WindowHandle) {
        self.xw.setup_client_window(window.0);
    }

    fn reparent_window(&self, window: WindowHandle, parent: WindowHandle, x: i32, y: i32) {
        self.xw.reparent_window(window.0, parent.0, x, y);
    }

    fn map_window(&self, window: WindowHandle) {
        self.xw.map_window(window.0);
    }

    fn unmap_window(&self, window: WindowHandle) {
        self.xw.unmap_window(window.0);
    }

    fn raise_window(&self, window: WindowHandle) {
        self.xw.raise_window(window.0);
    }

    fn lower_window(&self, window: WindowHandle) {
        self.xw.lower_window(window.0);
    }

    fn move_window(&self, window: WindowHandle, x: i32, y: i32) {
        self.xw.move_window(window.0, x, y);
    }

    fn resize_window(&self, window: WindowHandle, width: i32, height: i32) {
        self.xw.resize_window(window.0, width, height);
    }

    fn move_resize_window(&self, window: WindowHandle, bounds: Bounds) {
        self.xw.move_resize_window(window.0, bounds);
    }

    fn set_border_width(&self, window: WindowHandle, width: i32) {
        self.xw.set_border_width(window.0, width);
    }

    fn configure_window(&self, window: WindowHandle, changes: &WindowChanges) {
        self.xw.configure_window(window.0, changes);
    }

    fn add_to_save_set(&self, window: WindowHandle) {
        self.xw.add_to_save_set(window.0);
    }

    fn remove_from_save_set(&self, window: WindowHandle) {
        self.xw.remove_from_save_set(window.0);
    }

    fn send_configure_notify(&self, window: WindowHandle, bounds: Bounds, border_width: i32) {
        self.xw.send_configure_notify(window.0, bounds, border_width);
    }

    fn send_delete(&self, window: WindowHandle) {
        self.xw.send_delete(window.0);
    }

    fn send_take_focus(&self, window: WindowHandle, timestamp: u64) {
        self.xw.send_take_focus(window.0, timestamp);
    }

    fn kill_client(&self, window: WindowHandle) {
        self.xw.kill_client(window.0);
    }

    fn set_input_focus(&self, target: FocusTarget) {
        self.xw.set_input_focus(target);
    }

    fn grab_buttons(&self, window: WindowHandle) {
        self.xw.grab_buttons(window.0);
    }

    fn ungrab_buttons(&self, window: WindowHandle) {
        self.xw.ungrab_buttons(window.0);
    }

    fn begin_drag_grab(&self, edge: Option<Edge>) {
        self.xw.begin_drag_grab(edge);
    }

    fn begin_menu_grab(&self) {
        self.xw.begin_menu_grab();
    }

    fn set_frame_cursor(&self, frame: WindowHandle, zone: Option<FrameZone>) {
        self.xw.set_frame_cursor(frame.0, zone);
    }

    fn install_colormap(&self, colormap: Option<u64>) {
        self.xw.install_colormap(colormap);
    }

    fn draw_frame(&self, frame: WindowHandle, name: Option<&str>, active: bool, with_box: bool) {
        self.xw.draw_frame(frame.0, name, active, with_box);
    }

    fn show_size_popup(&self, screen: usize, x: i32, y: i32) {
        self.xw.show_size_popup(screen, x, y);
    }

    fn draw_size_popup(&self, screen: usize, text: &str) {
        self.xw.draw_size_popup(screen, text);
    }

    fn show_menu(&self, screen: usize, geometry: &MenuGeometry) {
        self.xw.show_menu(screen, geometry);
    }

    fn draw_menu(
        &self,
        screen: usize,
        labels: &[String],
        geometry: &MenuGeometry,
        highlight: Option<usize>,
    ) {
        self.xw.draw_menu(screen, labels, geometry, highlight);
    }

    fn menu_highlight(
        &self,
        screen: usize,
        geometry: &MenuGeometry,
        old: Option<usize>,
        new: Option<usize>,
    ) {
        self.xw.menu_highlight(screen, geometry, old, new);
    }

    fn hide_popup(&self, screen: usize) {
        self.xw.hide_popup(screen);
    }

    fn set_active_window(&self, screen: usize, window: Option<WindowHandle>) {
        self.xw.set_active_window(screen, window);
    }

    fn set_client_list(&self, screen: usize, list: &[WindowHandle], stacking: &[WindowHandle]) {
        self.xw.set_client_list(screen, list, stacking);
    }

    fn set_workarea(&self, screen: usize, workarea: Bounds) {
        self.xw.set_workarea(screen, workarea);
    }

    fn set_wm_state(&self, window: WindowHandle, state: WmState) {
        self.xw.set_wm_state(window.0, state);
    }

    fn set_net_wm_state(
        &self,
        window: WindowHandle,
        state: &EwmhState,
        hidden: bool,
        withdrawn: bool,
    ) {
        self.xw.set_net_wm_state(window.0, state, hidden, withdrawn);
    }

    fn set_allowed_actions(&self, window: WindowHandle) {
        self.xw.set_allowed_actions(window.0);
    }
}
