use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::Config;
use super::DisplayEvent;
use super::DisplayServer;
use super::{FocusTarget, WindowHints, WindowScan};
use crate::display_event::WindowChanges;
use crate::errors::Result;
use crate::models::{
    Bounds, Edge, EwmhState, FrameZone, MenuGeometry, Protocols, SizeHints, Strut, WindowHandle,
    WindowType, WmState,
};

/// Everything a test can assert the manager asked the server to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerOp {
    CreateFrame { screen: usize, bounds: Bounds },
    DestroyWindow(WindowHandle),
    SetupClientWindow(WindowHandle),
    Reparent { window: WindowHandle, parent: WindowHandle, x: i32, y: i32 },
    Map(WindowHandle),
    Unmap(WindowHandle),
    Raise(WindowHandle),
    Lower(WindowHandle),
    Move { window: WindowHandle, x: i32, y: i32 },
    Resize { window: WindowHandle, width: i32, height: i32 },
    MoveResize { window: WindowHandle, bounds: Bounds },
    SetBorderWidth { window: WindowHandle, width: i32 },
    Configure { window: WindowHandle, changes: WindowChanges },
    AddToSaveSet(WindowHandle),
    RemoveFromSaveSet(WindowHandle),
    ConfigureNotify { window: WindowHandle, bounds: Bounds, border_width: i32 },
    SendDelete(WindowHandle),
    SendTakeFocus(WindowHandle),
    KillClient(WindowHandle),
    SetInputFocus(FocusTarget),
    GrabButtons(WindowHandle),
    UngrabButtons(WindowHandle),
    BeginDragGrab(Option<Edge>),
    BeginMenuGrab,
    SetFrameCursor { frame: WindowHandle, zone: Option<FrameZone> },
    InstallColormap(Option<u64>),
    DrawFrame { frame: WindowHandle, name: Option<String>, active: bool, with_box: bool },
    ShowSizePopup { screen: usize, x: i32, y: i32 },
    DrawSizePopup { screen: usize, text: String },
    ShowMenu { screen: usize, geometry: MenuGeometry },
    DrawMenu { screen: usize, labels: Vec<String>, highlight: Option<usize> },
    MenuHighlight { screen: usize, old: Option<usize>, new: Option<usize> },
    HidePopup(usize),
    SetActiveWindow { screen: usize, window: Option<WindowHandle> },
    SetClientList { screen: usize, list: Vec<WindowHandle>, stacking: Vec<WindowHandle> },
    SetWorkarea { screen: usize, workarea: Bounds },
    SetWmState { window: WindowHandle, state: WmState },
    SetNetWmState { window: WindowHandle, hidden: bool, withdrawn: bool },
    SetAllowedActions(WindowHandle),
}

/// A scriptable server for handler tests. Mutating calls are recorded in
/// order; queries answer from the maps the test seeded.
pub struct MockDisplayServer {
    pub ops: RefCell<Vec<ServerOp>>,
    pub title_height: i32,
    pub popup_height: i32,
    /// Measured width per character, so label widths are predictable.
    pub char_width: i32,
    pub scan_results: RefCell<HashMap<usize, Vec<WindowScan>>>,
    pub pointer: Cell<(usize, i32, i32)>,
    pub stacking: RefCell<HashMap<usize, Vec<WindowHandle>>>,
    pub focus_holder: Cell<FocusTarget>,
    pub shaped: RefCell<Vec<WindowHandle>>,
    pub geometries: RefCell<HashMap<WindowHandle, Bounds>>,
    pub undecorated: RefCell<Vec<WindowHandle>>,
    pub window_types: RefCell<HashMap<WindowHandle, WindowType>>,
    pub ewmh_states: RefCell<HashMap<WindowHandle, EwmhState>>,
    pub struts: RefCell<HashMap<WindowHandle, Strut>>,
    pub transients: RefCell<HashMap<WindowHandle, WindowHandle>>,
    pub hints: RefCell<HashMap<WindowHandle, WindowHints>>,
    pub wm_states: RefCell<HashMap<WindowHandle, WmState>>,
    pub size_hints: RefCell<HashMap<WindowHandle, SizeHints>>,
    pub protocol_lists: RefCell<HashMap<WindowHandle, Protocols>>,
    pub names: RefCell<HashMap<WindowHandle, String>>,
    pub colormaps: RefCell<HashMap<WindowHandle, u64>>,
    pub colormap_lists: RefCell<HashMap<WindowHandle, Vec<(WindowHandle, Option<u64>)>>>,
    next_window: Cell<u64>,
}

impl Default for MockDisplayServer {
    fn default() -> Self {
        Self {
            ops: RefCell::new(vec![]),
            title_height: 18,
            popup_height: 15,
            char_width: 7,
            scan_results: RefCell::default(),
            pointer: Cell::new((0, 0, 0)),
            stacking: RefCell::default(),
            focus_holder: Cell::new(FocusTarget::PointerRoot),
            shaped: RefCell::default(),
            geometries: RefCell::default(),
            undecorated: RefCell::default(),
            window_types: RefCell::default(),
            ewmh_states: RefCell::default(),
            struts: RefCell::default(),
            transients: RefCell::default(),
            hints: RefCell::default(),
            wm_states: RefCell::default(),
            size_hints: RefCell::default(),
            protocol_lists: RefCell::default(),
            names: RefCell::default(),
            colormaps: RefCell::default(),
            colormap_lists: RefCell::default(),
            next_window: Cell::new(0xf000),
        }
    }
}

impl MockDisplayServer {
    pub fn take_ops(&self) -> Vec<ServerOp> {
        self.ops.take()
    }

    pub fn did(&self, op: &ServerOp) -> bool {
        self.ops.borrow().contains(op)
    }

    fn record(&self, op: ServerOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl DisplayServer for MockDisplayServer {
    fn new(_: &impl Config) -> Result<Self> {
        Ok(Self::default())
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        vec![]
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(async {})
    }

    fn flush(&self) {}

    fn title_height(&self) -> i32 {
        self.title_height
    }

    fn popup_height(&self) -> i32 {
        self.popup_height
    }

    fn popup_text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.char_width
    }

    fn scan_windows(&self, screen: usize) -> Vec<WindowScan> {
        self.scan_results.borrow().get(&screen).cloned().unwrap_or_default()
    }

    fn pointer_position(&self) -> (usize, i32, i32) {
        self.pointer.get()
    }

    fn stacking_order(&self, screen: usize) -> Vec<WindowHandle> {
        self.stacking.borrow().get(&screen).cloned().unwrap_or_default()
    }

    fn input_focus(&self) -> FocusTarget {
        self.focus_holder.get()
    }

    fn is_shaped(&self, window: WindowHandle) -> bool {
        self.shaped.borrow().contains(&window)
    }

    fn window_geometry(&self, window: WindowHandle) -> Option<Bounds> {
        self.geometries.borrow().get(&window).copied()
    }

    fn window_type(&self, window: WindowHandle) -> WindowType {
        self.window_types.borrow().get(&window).copied().unwrap_or_default()
    }

    fn decorations_allowed(&self, window: WindowHandle) -> bool {
        !self.undecorated.borrow().contains(&window)
    }

    fn ewmh_state(&self, window: WindowHandle) -> Option<EwmhState> {
        self.ewmh_states.borrow().get(&window).copied()
    }

    fn window_strut(&self, window: WindowHandle) -> Option<Strut> {
        self.struts.borrow().get(&window).copied()
    }

    fn transient_for(&self, window: WindowHandle) -> Option<WindowHandle> {
        self.transients.borrow().get(&window).copied()
    }

    fn wm_hints(&self, window: WindowHandle) -> WindowHints {
        self.hints.borrow().get(&window).copied().unwrap_or_default()
    }

    fn wm_state(&self, window: WindowHandle) -> Option<WmState> {
        self.wm_states.borrow().get(&window).copied()
    }

    fn normal_hints(&self, window: WindowHandle) -> SizeHints {
        self.size_hints.borrow().get(&window).copied().unwrap_or_default()
    }

    fn protocols(&self, window: WindowHandle) -> Protocols {
        self.protocol_lists.borrow().get(&window).copied().unwrap_or_default()
    }

    fn window_name(&self, window: WindowHandle) -> Option<String> {
        self.names.borrow().get(&window).cloned()
    }

    fn window_colormap(&self, window: WindowHandle) -> Option<u64> {
        self.colormaps.borrow().get(&window).copied()
    }

    fn colormap_windows(&self, window: WindowHandle) -> Vec<(WindowHandle, Option<u64>)> {
        self.colormap_lists.borrow().get(&window).cloned().unwrap_or_default()
    }

    fn create_frame(&self, screen: usize, bounds: Bounds) -> WindowHandle {
        let handle = WindowHandle(self.next_window.get());
        self.next_window.set(handle.0 + 1);
        self.record(ServerOp::CreateFrame { screen, bounds });
        handle
    }

    fn destroy_window(&self, window: WindowHandle) {
        self.record(ServerOp::DestroyWindow(window));
    }

    fn setup_client_window(&self, window: WindowHandle) {
        self.record(ServerOp::SetupClientWindow(window));
    }

    fn reparent_window(&self, window: WindowHandle, parent: WindowHandle, x: i32, y: i32) {
        self.record(ServerOp::Reparent { window, parent, x, y });
    }

    fn map_window(&self, window: WindowHandle) {
        self.record(ServerOp::Map(window));
    }

    fn unmap_window(&self, window: WindowHandle) {
        self.record(ServerOp::Unmap(window));
    }

    fn raise_window(&self, window: WindowHandle) {
        self.record(ServerOp::Raise(window));
    }

    fn lower_window(&self, window: WindowHandle) {
        self.record(ServerOp::Lower(window));
    }

    fn move_window(&self, window: WindowHandle, x: i32, y: i32) {
        self.record(ServerOp::Move { window, x, y });
    }

    fn resize_window(&self, window: WindowHandle, width: i32, height: i32) {
        self.record(ServerOp::Resize { window, width, height });
    }

    fn move_resize_window(&self, window: WindowHandle, bounds: Bounds) {
        self.record(ServerOp::MoveResize { window, bounds });
    }

    fn set_border_width(&self, window: WindowHandle, width: i32) {
        self.record(ServerOp::SetBorderWidth { window, width });
    }

    fn configure_window(&self, window: WindowHandle, changes: &WindowChanges) {
        self.record(ServerOp::Configure { window, changes: *changes });
    }

    fn add_to_save_set(&self, window: WindowHandle) {
        self.record(ServerOp::AddToSaveSet(window));
    }

    fn remove_from_save_set(&self, window: WindowHandle) {
        self.record(ServerOp::RemoveFromSaveSet(window));
    }

    fn send_configure_notify(&self, window: WindowHandle, bounds: Bounds, border_width: i32) {
        self.record(ServerOp::ConfigureNotify { window, bounds, border_width });
    }

    fn send_delete(&self, window: WindowHandle) {
        self.record(ServerOp::SendDelete(window));
    }

    fn send_take_focus(&self, window: WindowHandle, _timestamp: u64) {
        self.record(ServerOp::SendTakeFocus(window));
    }

    fn kill_client(&self, window: WindowHandle) {
        self.record(ServerOp::KillClient(window));
    }

    fn set_input_focus(&self, target: FocusTarget) {
        self.record(ServerOp::SetInputFocus(target));
    }

    fn grab_buttons(&self, window: WindowHandle) {
        self.record(ServerOp::GrabButtons(window));
    }

    fn ungrab_buttons(&self, window: WindowHandle) {
        self.record(ServerOp::UngrabButtons(window));
    }

    fn begin_drag_grab(&self, edge: Option<Edge>) {
        self.record(ServerOp::BeginDragGrab(edge));
    }

    fn begin_menu_grab(&self) {
        self.record(ServerOp::BeginMenuGrab);
    }

    fn set_frame_cursor(&self, frame: WindowHandle, zone: Option<FrameZone>) {
        self.record(ServerOp::SetFrameCursor { frame, zone });
    }

    fn install_colormap(&self, colormap: Option<u64>) {
        self.record(ServerOp::InstallColormap(colormap));
    }

    fn draw_frame(&self, frame: WindowHandle, name: Option<&str>, active: bool, with_box: bool) {
        self.record(ServerOp::DrawFrame {
            frame,
            name: name.map(str::to_owned),
            active,
            with_box,
        });
    }

    fn show_size_popup(&self, screen: usize, x: i32, y: i32) {
        self.record(ServerOp::ShowSizePopup { screen, x, y });
    }

    fn draw_size_popup(&self, screen: usize, text: &str) {
        self.record(ServerOp::DrawSizePopup { screen, text: text.to_owned() });
    }

    fn show_menu(&self, screen: usize, geometry: &MenuGeometry) {
        self.record(ServerOp::ShowMenu { screen, geometry: *geometry });
    }

    fn draw_menu(
        &self,
        screen: usize,
        labels: &[String],
        _geometry: &MenuGeometry,
        highlight: Option<usize>,
    ) {
        self.record(ServerOp::DrawMenu { screen, labels: labels.to_vec(), highlight });
    }

    fn menu_highlight(
        &self,
        screen: usize,
        _geometry: &MenuGeometry,
        old: Option<usize>,
        new: Option<usize>,
    ) {
        self.record(ServerOp::MenuHighlight { screen, old, new });
    }

    fn hide_popup(&self, screen: usize) {
        self.record(ServerOp::HidePopup(screen));
    }

    fn set_active_window(&self, screen: usize, window: Option<WindowHandle>) {
        self.record(ServerOp::SetActiveWindow { screen, window });
    }

    fn set_client_list(&self, screen: usize, list: &[WindowHandle], stacking: &[WindowHandle]) {
        self.record(ServerOp::SetClientList {
            screen,
            list: list.to_vec(),
            stacking: stacking.to_vec(),
        });
    }

    fn set_workarea(&self, screen: usize, workarea: Bounds) {
        self.record(ServerOp::SetWorkarea { screen, workarea });
    }

    fn set_wm_state(&self, window: WindowHandle, state: WmState) {
        self.record(ServerOp::SetWmState { window, state });
    }

    fn set_net_wm_state(
        &self,
        window: WindowHandle,
        _state: &EwmhState,
        hidden: bool,
        withdrawn: bool,
    ) {
        self.record(ServerOp::SetNetWmState { window, hidden, withdrawn });
    }

    fn set_allowed_actions(&self, window: WindowHandle) {
        self.record(ServerOp::SetAllowedActions(window));
    }
}
