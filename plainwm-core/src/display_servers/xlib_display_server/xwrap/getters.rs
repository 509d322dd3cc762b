//! `XWrap` getters.
use super::{XWrap, XlibError, MAX_PROPERTY_VALUE_LEN};
use crate::display_servers::{FocusTarget, WindowHints, WindowScan};
use crate::models::{
    Bounds, EwmhState, Gravity, Protocols, SizeHints, Strut, WindowHandle, WindowType, WmState,
};
use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong};
use std::slice;
use x11_dl::xlib;

// The Motif decoration hints. Only the flags word and the decorations word
// carry anything we act on.
const MWM_HINTS_DECORATIONS: c_long = 1 << 1;
const MWM_DECOR_ALL: c_long = 1 << 0;
const MWM_DECOR_BORDER: c_long = 1 << 1;

impl XWrap {
    // Public functions.

    /// Returns the `WM_COLORMAP_WINDOWS` of a window, each entry paired with
    /// its colormap. An entry naming the window itself comes back with
    /// `None`; the other entries are subscribed to colormap change events
    /// while we look their colormap up.
    // `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
    #[must_use]
    pub fn get_colormap_windows(
        &self,
        window: xlib::Window,
    ) -> Vec<(xlib::Window, Option<xlib::Colormap>)> {
        let Ok((prop_return, nitems_return)) =
            self.get_property(window, self.atoms.WMColormapWindows, xlib::XA_WINDOW)
        else {
            return Vec::new();
        };
        #[allow(clippy::cast_ptr_alignment)]
        let windows: &[xlib::Window] = unsafe {
            slice::from_raw_parts(prop_return.cast::<xlib::Window>(), nitems_return as usize)
        };
        windows
            .iter()
            .map(|&w| {
                if w == window {
                    return (w, None);
                }
                unsafe { (self.xlib.XSelectInput)(self.display, w, xlib::ColormapChangeMask) };
                let colormap = self
                    .get_window_attrs(w)
                    .ok()
                    .map(|attrs| attrs.colormap)
                    .filter(|&c| c != 0);
                (w, colormap)
            })
            .collect()
    }

    /// Returns the `_NET_WM_STATE` flags of a window, or `None` when the
    /// property is absent so the caller can leave its record alone.
    #[must_use]
    pub fn get_ewmh_state(&self, window: xlib::Window) -> Option<EwmhState> {
        let atoms = self.get_atom_array(window, self.atoms.NetWMState)?;
        let mut state = EwmhState::default();
        for atom in atoms {
            match atom {
                a if a == self.atoms.NetWMStateSkipTaskbar => state.skip_taskbar = true,
                a if a == self.atoms.NetWMStateSkipPager => state.skip_pager = true,
                a if a == self.atoms.NetWMStateFullscreen => state.fullscreen = true,
                a if a == self.atoms.NetWMStateAbove => state.above = true,
                a if a == self.atoms.NetWMStateBelow => state.below = true,
                _ => {}
            }
        }
        Some(state)
    }

    /// Asks the server who holds the input focus.
    // `XGetInputFocus`: https://tronche.com/gui/x/xlib/input/XGetInputFocus.html
    #[must_use]
    pub fn get_input_focus(&self) -> FocusTarget {
        let mut focused: xlib::Window = 0;
        let mut revert_to: c_int = 0;
        unsafe {
            (self.xlib.XGetInputFocus)(self.display, &mut focused, &mut revert_to);
        }
        // The protocol reserves 0 for None and 1 for PointerRoot.
        match focused {
            0 => FocusTarget::None,
            1 => FocusTarget::PointerRoot,
            w => FocusTarget::Window(WindowHandle(w)),
        }
    }

    /// Returns the `WM_NORMAL_HINTS` of a window in digested form. Fields
    /// whose flag is unset stay `None`.
    #[must_use]
    pub fn get_normal_hints(&self, window: xlib::Window) -> SizeHints {
        let Some(size) = self.get_hint_sizing(window) else {
            return SizeHints::default();
        };
        let mut hints = SizeHints {
            user_position: size.flags & xlib::USPosition != 0,
            program_position: size.flags & xlib::PPosition != 0,
            ..SizeHints::default()
        };
        if size.flags & xlib::PMinSize != 0 {
            hints.min = Some((size.min_width, size.min_height));
        }
        if size.flags & xlib::PMaxSize != 0 {
            hints.max = Some((size.max_width, size.max_height));
        }
        if size.flags & xlib::PResizeInc != 0 {
            hints.inc = Some((size.width_inc, size.height_inc));
        }
        if size.flags & xlib::PBaseSize != 0 {
            hints.base = Some((size.base_width, size.base_height));
        }
        if size.flags & xlib::PWinGravity != 0 {
            hints.gravity = Gravity::from_raw(size.win_gravity);
        }
        hints
    }

    /// Locates the pointer: the screen it is on and its root coordinates.
    // `XQueryPointer`: https://tronche.com/gui/x/xlib/window-information/XQueryPointer.html
    #[must_use]
    pub fn get_pointer_position(&self) -> (usize, i32, i32) {
        for (index, screen) in self.screens.iter().enumerate() {
            let mut root_return: xlib::Window = 0;
            let mut child_return: xlib::Window = 0;
            let mut root_x_return: c_int = 0;
            let mut root_y_return: c_int = 0;
            let mut win_x_return: c_int = 0;
            let mut win_y_return: c_int = 0;
            let mut mask_return: c_uint = 0;
            let same_screen = unsafe {
                (self.xlib.XQueryPointer)(
                    self.display,
                    screen.root,
                    &mut root_return,
                    &mut child_return,
                    &mut root_x_return,
                    &mut root_y_return,
                    &mut win_x_return,
                    &mut win_y_return,
                    &mut mask_return,
                )
            };
            if same_screen > 0 {
                return (index, root_x_return, root_y_return);
            }
        }
        (0, 0, 0)
    }

    /// Returns which `WM_PROTOCOLS` the window speaks, out of the ones we
    /// honour.
    // `XGetWMProtocols`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMProtocols.html
    #[must_use]
    pub fn get_protocols(&self, window: xlib::Window) -> Protocols {
        unsafe {
            let mut array: *mut xlib::Atom = std::mem::zeroed();
            let mut length: c_int = std::mem::zeroed();
            let status: xlib::Status =
                (self.xlib.XGetWMProtocols)(self.display, window, &mut array, &mut length);
            if status == 0 || array.is_null() {
                return Protocols::default();
            }
            let protocols: &[xlib::Atom] = slice::from_raw_parts(array, length as usize);
            Protocols {
                delete: protocols.contains(&self.atoms.WMDelete),
                take_focus: protocols.contains(&self.atoms.WMTakeFocus),
            }
        }
    }

    /// Returns a screen's children bottom to top, unfiltered.
    #[must_use]
    pub fn get_stack(&self, screen: usize) -> Vec<WindowHandle> {
        let Some(root) = self.screen(screen).map(|s| s.root) else {
            return Vec::new();
        };
        match self.get_windows_for_root(root) {
            Ok(children) => children.iter().map(|&w| WindowHandle(w)).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Returns the transient parent of a window.
    // `XGetTransientForHint`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTransientForHint.html
    #[must_use]
    pub fn get_transient_for(&self, window: xlib::Window) -> Option<xlib::Window> {
        unsafe {
            let mut transient: xlib::Window = std::mem::zeroed();
            let status: c_int =
                (self.xlib.XGetTransientForHint)(self.display, window, &mut transient);
            if status > 0 {
                Some(transient)
            } else {
                None
            }
        }
    }

    /// Returns the attributes of a window.
    /// # Errors
    ///
    /// Will error if window status is 0 (no attributes).
    // `XGetWindowAttributes`: https://tronche.com/gui/x/xlib/window-information/XGetWindowAttributes.html
    pub fn get_window_attrs(
        &self,
        window: xlib::Window,
    ) -> Result<xlib::XWindowAttributes, XlibError> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(attrs)
    }

    /// Returns the colormap of a window, if it carries its own.
    #[must_use]
    pub fn get_window_colormap(&self, window: xlib::Window) -> Option<xlib::Colormap> {
        let attrs = self.get_window_attrs(window).ok()?;
        match attrs.colormap {
            0 => None,
            colormap => Some(colormap),
        }
    }

    /// Returns the geometry of a window as the server reports it.
    // `XGetGeometry`: https://tronche.com/gui/x/xlib/window-information/XGetGeometry.html
    #[must_use]
    pub fn get_window_geometry(&self, window: xlib::Window) -> Option<Bounds> {
        let mut root_return: xlib::Window = 0;
        let mut x_return: c_int = 0;
        let mut y_return: c_int = 0;
        let mut width_return: c_uint = 0;
        let mut height_return: c_uint = 0;
        let mut border_width_return: c_uint = 0;
        let mut depth_return: c_uint = 0;
        let status = unsafe {
            (self.xlib.XGetGeometry)(
                self.display,
                window,
                &mut root_return,
                &mut x_return,
                &mut y_return,
                &mut width_return,
                &mut height_return,
                &mut border_width_return,
                &mut depth_return,
            )
        };
        if status == 0 {
            return None;
        }
        Some(Bounds::new(
            x_return,
            y_return,
            width_return as i32,
            height_return as i32,
        ))
    }

    /// Returns a windows name.
    #[must_use]
    pub fn get_window_name(&self, window: xlib::Window) -> Option<String> {
        if let Ok(text) = self.get_text_prop(window, self.atoms.NetWMName) {
            return Some(text);
        }
        if let Ok(text) = self.get_text_prop(window, xlib::XA_WM_NAME) {
            return Some(text);
        }
        None
    }

    /// Returns the screen-edge space a window reserves, if it declares any.
    #[must_use]
    pub fn get_window_strut(&self, window: xlib::Window) -> Option<Strut> {
        // The partial variant supersedes the original property.
        if let Some(strut) = self.get_strut_partial(window) {
            return Some(strut);
        }
        self.get_strut_legacy(window)
    }

    /// Returns the `_NET_WM_WINDOW_TYPE` of a window. The list is walked
    /// from the back and the first atom we recognise wins; a window with no
    /// recognised type stays `Unset` and its Motif hints decide the frame.
    #[must_use]
    pub fn get_window_type(&self, window: xlib::Window) -> WindowType {
        let atoms = self
            .get_atom_array(window, self.atoms.NetWMWindowType)
            .unwrap_or_default();
        for atom in atoms.into_iter().rev() {
            let found = match atom {
                a if a == self.atoms.NetWMWindowTypeDesktop => WindowType::Desktop,
                a if a == self.atoms.NetWMWindowTypeDock => WindowType::Dock,
                a if a == self.atoms.NetWMWindowTypeToolbar => WindowType::Toolbar,
                a if a == self.atoms.NetWMWindowTypeMenu => WindowType::Menu,
                a if a == self.atoms.NetWMWindowTypeUtility => WindowType::Utility,
                a if a == self.atoms.NetWMWindowTypeSplash => WindowType::Splash,
                a if a == self.atoms.NetWMWindowTypeDialog => WindowType::Dialog,
                a if a == self.atoms.NetWMWindowTypeNormal => WindowType::Normal,
                _ => continue,
            };
            return found;
        }
        WindowType::Unset
    }

    /// Returns the `WM_STATE` of a window.
    #[must_use]
    pub fn get_wm_state(&self, window: xlib::Window) -> Option<WmState> {
        let (prop_return, nitems_return) = self
            .get_property(window, self.atoms.WMState, self.atoms.WMState)
            .ok()?;
        if nitems_return == 0 {
            return None;
        }
        #[allow(clippy::cast_ptr_alignment)]
        let state = unsafe { *prop_return.cast::<c_long>() };
        match state {
            0 => Some(WmState::Withdrawn),
            1 => Some(WmState::Normal),
            3 => Some(WmState::Iconic),
            _ => None,
        }
    }

    /// Returns the slice of the `WM_HINTS` of a window that we act on.
    // `XGetWMHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMHints.html
    #[must_use]
    pub fn get_wmhints(&self, window: xlib::Window) -> WindowHints {
        unsafe {
            let hints_ptr: *const xlib::XWMHints = (self.xlib.XGetWMHints)(self.display, window);
            if hints_ptr.is_null() {
                return WindowHints::default();
            }
            let hints: xlib::XWMHints = *hints_ptr;
            WindowHints {
                accepts_input: (hints.flags & xlib::InputHint != 0).then_some(hints.input != 0),
                // An initial state of 3 asks to start iconified (IconicState).
                start_iconic: hints.flags & xlib::StateHint != 0 && hints.initial_state == 3,
            }
        }
    }

    /// Whether the Motif hints of a window permit a frame. Missing or
    /// malformed hints mean yes.
    #[must_use]
    pub fn motif_would_decorate(&self, window: xlib::Window) -> bool {
        let Ok((prop_return, nitems_return)) =
            self.get_property(window, self.atoms.MotifWMHints, self.atoms.MotifWMHints)
        else {
            return true;
        };
        if nitems_return < 3 {
            return true;
        }
        #[allow(clippy::cast_ptr_alignment)]
        let hints: &[c_long] =
            unsafe { slice::from_raw_parts(prop_return.cast::<c_long>(), nitems_return as usize) };
        let undecorated = hints[0] & MWM_HINTS_DECORATIONS != 0
            && hints[2] & (MWM_DECOR_BORDER | MWM_DECOR_ALL) == 0;
        !undecorated
    }

    /// Returns the adoptable children of a screen's root: override-redirect
    /// windows and our own service windows are skipped.
    #[must_use]
    pub fn scan_windows(&self, screen: usize) -> Vec<WindowScan> {
        let Some(root) = self.screen(screen).map(|s| s.root) else {
            return Vec::new();
        };
        let Ok(children) = self.get_windows_for_root(root) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for &child in children {
            if self.is_own_window(child) {
                continue;
            }
            let Ok(attrs) = self.get_window_attrs(child) else {
                continue;
            };
            if attrs.override_redirect != 0 {
                continue;
            }
            found.push(WindowScan {
                window: WindowHandle(child),
                bounds: Bounds::new(attrs.x, attrs.y, attrs.width, attrs.height),
                border_width: attrs.border_width,
                viewable: attrs.map_state == xlib::IsViewable,
            });
        }
        found
    }

    // Internal functions.

    /// Returns an atom-list property of a window, or `None` when the
    /// property is absent.
    fn get_atom_array(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
    ) -> Option<Vec<xlib::Atom>> {
        let (prop_return, nitems_return) =
            self.get_property(window, property, xlib::XA_ATOM).ok()?;
        unsafe {
            #[allow(clippy::cast_lossless, clippy::cast_ptr_alignment)]
            let ptr = prop_return.cast::<c_ulong>();
            let atoms: &[xlib::Atom] = slice::from_raw_parts(ptr, nitems_return as usize);
            Some(atoms.to_vec())
        }
    }

    /// Returns the `WM_SIZE_HINTS`/`WM_NORMAL_HINTS` of a window.
    // `XGetWMNormalHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMNormalHints.html
    #[must_use]
    fn get_hint_sizing(&self, window: xlib::Window) -> Option<xlib::XSizeHints> {
        let mut xsize: xlib::XSizeHints = unsafe { std::mem::zeroed() };
        let mut msize: c_long = xlib::PSize;
        let status =
            unsafe { (self.xlib.XGetWMNormalHints)(self.display, window, &mut xsize, &mut msize) };
        match status {
            0 => None,
            _ => Some(xsize),
        }
    }

    /// Returns a property of a window.
    /// # Errors
    ///
    /// Errors if window status = 0.
    // `XGetWindowProperty`: https://tronche.com/gui/x/xlib/window-information/XGetWindowProperty.html
    fn get_property(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Result<(*const c_uchar, c_ulong), XlibError> {
        let mut format_return: i32 = 0;
        let mut nitems_return: c_ulong = 0;
        let mut type_return: xlib::Atom = 0;
        let mut bytes_after_return: c_ulong = 0;
        let mut prop_return: *mut c_uchar = unsafe { std::mem::zeroed() };
        unsafe {
            let status = (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut type_return,
                &mut format_return,
                &mut nitems_return,
                &mut bytes_after_return,
                &mut prop_return,
            );
            if status == i32::from(xlib::Success) && !prop_return.is_null() {
                return Ok((prop_return, nitems_return));
            }
        };
        Err(XlibError::FailedStatus)
    }

    /// Returns the `_NET_WM_STRUT` of a window. Some clients pad the four
    /// edge values, so anything longer is accepted too.
    fn get_strut_legacy(&self, window: xlib::Window) -> Option<Strut> {
        let (prop_return, nitems_return) = self
            .get_property(window, self.atoms.NetWMStrut, xlib::XA_CARDINAL)
            .ok()?;
        unsafe {
            #[allow(clippy::cast_ptr_alignment)]
            let array_ptr = prop_return.cast::<c_long>();
            let slice = slice::from_raw_parts(array_ptr, nitems_return as usize);
            if slice.len() >= 4 {
                return Some(strut_from_edges(slice));
            }
            None
        }
    }

    /// Returns the `_NET_WM_STRUT_PARTIAL` of a window. Only the first four
    /// values matter to us; the rest qualify where along the edge the
    /// reservation sits.
    fn get_strut_partial(&self, window: xlib::Window) -> Option<Strut> {
        let (prop_return, nitems_return) = self
            .get_property(window, self.atoms.NetWMStrutPartial, xlib::XA_CARDINAL)
            .ok()?;
        unsafe {
            #[allow(clippy::cast_ptr_alignment)]
            let array_ptr = prop_return.cast::<c_long>();
            let slice = slice::from_raw_parts(array_ptr, nitems_return as usize);
            if slice.len() == 12 {
                return Some(strut_from_edges(slice));
            }
            None
        }
    }

    /// Returns a text property for a window.
    /// # Errors
    ///
    /// Errors if window status = 0.
    // `XGetTextProperty`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTextProperty.html
    fn get_text_prop(&self, window: xlib::Window, atom: xlib::Atom) -> Result<String, XlibError> {
        unsafe {
            let mut text_prop: xlib::XTextProperty = std::mem::zeroed();
            let status: c_int =
                (self.xlib.XGetTextProperty)(self.display, window, &mut text_prop, atom);
            if status == 0 {
                return Err(XlibError::FailedStatus);
            }
            if let Ok(s) = CString::from_raw(text_prop.value.cast::<c_char>()).into_string() {
                return Ok(s);
            }
        };
        Err(XlibError::FailedStatus)
    }

    /// Returns the child windows of a root, bottom to top.
    /// # Errors
    ///
    /// Will error if the query fails outright.
    // `XQueryTree`: https://tronche.com/gui/x/xlib/window-information/XQueryTree.html
    fn get_windows_for_root<'w>(
        &self,
        root: xlib::Window,
    ) -> Result<&'w [xlib::Window], XlibError> {
        unsafe {
            let mut root_return: xlib::Window = std::mem::zeroed();
            let mut parent_return: xlib::Window = std::mem::zeroed();
            let mut array: *mut xlib::Window = std::mem::zeroed();
            let mut length: c_uint = std::mem::zeroed();
            let status: xlib::Status = (self.xlib.XQueryTree)(
                self.display,
                root,
                &mut root_return,
                &mut parent_return,
                &mut array,
                &mut length,
            );
            if status == 0 || array.is_null() {
                return Err(XlibError::FailedStatus);
            }
            Ok(slice::from_raw_parts(array, length as usize))
        }
    }
}

fn strut_from_edges(values: &[c_long]) -> Strut {
    Strut {
        left: values[0] as i32,
        right: values[1] as i32,
        top: values[2] as i32,
        bottom: values[3] as i32,
    }
}
