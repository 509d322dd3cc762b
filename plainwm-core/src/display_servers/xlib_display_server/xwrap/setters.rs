//! `XWrap` setters.
use super::XWrap;
use crate::models::{Bounds, EwmhState, WindowHandle, WmState};
use std::ffi::CString;
use std::os::raw::c_long;
use x11_dl::xlib;

impl XWrap {
    // Public functions.

    /// Replaces a window property.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    pub fn replace_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                r#type,
                32,
                xlib::PropModeReplace,
                data.as_ptr().cast::<u8>(),
                data.len() as i32,
            );
        }
    }

    /// Announces EWMH support on one screen: a name on the compatibility
    /// window, then the root properties pagers read at startup.
    pub fn init_screen_hints(&self, index: usize) {
        let Some(screen) = self.screen(index) else {
            return;
        };
        self.set_string_prop(
            screen.ewmh_compat,
            self.atoms.NetWMName,
            self.atoms.UTF8String,
            "plainwm",
        );

        let supported: Vec<c_long> = self
            .atoms
            .net_supported()
            .iter()
            .map(|&atom| atom as c_long)
            .collect();
        self.replace_property_long(
            screen.root,
            self.atoms.NetSupported,
            xlib::XA_ATOM,
            &supported,
        );
        self.replace_property_long(
            screen.root,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
            &[screen.ewmh_compat as c_long],
        );

        // One desktop, covering the whole screen, always current.
        self.replace_property_long(
            screen.root,
            self.atoms.NetNumberOfDesktops,
            xlib::XA_CARDINAL,
            &[1],
        );
        self.replace_property_long(
            screen.root,
            self.atoms.NetDesktopGeometry,
            xlib::XA_CARDINAL,
            &[c_long::from(screen.width), c_long::from(screen.height)],
        );
        self.replace_property_long(
            screen.root,
            self.atoms.NetDesktopViewport,
            xlib::XA_CARDINAL,
            &[0, 0],
        );
        self.replace_property_long(
            screen.root,
            self.atoms.NetCurrentDesktop,
            xlib::XA_CARDINAL,
            &[0],
        );

        // The client lists start out empty.
        self.replace_property_long(screen.root, self.atoms.NetClientList, xlib::XA_WINDOW, &[]);
        self.replace_property_long(
            screen.root,
            self.atoms.NetClientListStacking,
            xlib::XA_WINDOW,
            &[],
        );
    }

    /// Publishes which window holds the focus on a screen. `None` deletes
    /// the property.
    // `XDeleteProperty`: https://tronche.com/gui/x/xlib/window-information/XDeleteProperty.html
    pub fn set_active_window(&self, screen: usize, window: Option<WindowHandle>) {
        let Some(root) = self.screen(screen).map(|s| s.root) else {
            return;
        };
        match window {
            Some(w) => self.replace_property_long(
                root,
                self.atoms.NetActiveWindow,
                xlib::XA_WINDOW,
                &[w.0 as c_long],
            ),
            None => unsafe {
                (self.xlib.XDeleteProperty)(self.display, root, self.atoms.NetActiveWindow);
            },
        }
    }

    /// Declares what a client may ask of us. Every managed window gets the
    /// same set.
    pub fn set_allowed_actions(&self, window: xlib::Window) {
        let actions = [
            self.atoms.NetWMActionMove as c_long,
            self.atoms.NetWMActionResize as c_long,
            self.atoms.NetWMActionFullscreen as c_long,
            self.atoms.NetWMActionClose as c_long,
        ];
        self.replace_property_long(window, self.atoms.NetWMAction, xlib::XA_ATOM, &actions);
    }

    /// Publishes the client lists of a screen: mapping order and stacking
    /// order.
    pub fn set_client_list(
        &self,
        screen: usize,
        list: &[WindowHandle],
        stacking: &[WindowHandle],
    ) {
        let Some(root) = self.screen(screen).map(|s| s.root) else {
            return;
        };
        let list: Vec<c_long> = list.iter().map(|w| w.0 as c_long).collect();
        self.replace_property_long(root, self.atoms.NetClientList, xlib::XA_WINDOW, &list);
        let stacking: Vec<c_long> = stacking.iter().map(|w| w.0 as c_long).collect();
        self.replace_property_long(
            root,
            self.atoms.NetClientListStacking,
            xlib::XA_WINDOW,
            &stacking,
        );
    }

    /// Publishes the `_NET_WM_STATE` of a window from our record of it. A
    /// withdrawn window gets an empty list whatever the flags say.
    pub fn set_net_wm_state(
        &self,
        window: xlib::Window,
        state: &EwmhState,
        hidden: bool,
        withdrawn: bool,
    ) {
        let mut atoms: Vec<c_long> = Vec::new();
        if !withdrawn {
            if hidden {
                atoms.push(self.atoms.NetWMStateHidden as c_long);
            }
            if state.skip_taskbar {
                atoms.push(self.atoms.NetWMStateSkipTaskbar as c_long);
            }
            if state.skip_pager {
                atoms.push(self.atoms.NetWMStateSkipPager as c_long);
            }
            if state.fullscreen {
                atoms.push(self.atoms.NetWMStateFullscreen as c_long);
            }
            if state.above {
                atoms.push(self.atoms.NetWMStateAbove as c_long);
            }
            if state.below {
                atoms.push(self.atoms.NetWMStateBelow as c_long);
            }
        }
        self.replace_property_long(window, self.atoms.NetWMState, xlib::XA_ATOM, &atoms);
    }

    /// Sets the `WM_STATE` of a window. The second word is the icon window,
    /// which we never use.
    pub fn set_wm_state(&self, window: xlib::Window, state: WmState) {
        let data = [state.to_raw() as c_long, 0];
        self.replace_property_long(window, self.atoms.WMState, self.atoms.WMState, &data);
    }

    /// Publishes the workarea of a screen, the rectangle left over once the
    /// struts are carved off.
    pub fn set_workarea(&self, screen: usize, workarea: Bounds) {
        let Some(root) = self.screen(screen).map(|s| s.root) else {
            return;
        };
        let data = [
            c_long::from(workarea.x),
            c_long::from(workarea.y),
            c_long::from(workarea.width),
            c_long::from(workarea.height),
        ];
        self.replace_property_long(root, self.atoms.NetWorkarea, xlib::XA_CARDINAL, &data);
    }

    // Internal functions.

    /// Sets a string property of a window in the given encoding.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    fn set_string_prop(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        encoding: xlib::Atom,
        value: &str,
    ) {
        if let Ok(cstring) = CString::new(value) {
            unsafe {
                (self.xlib.XChangeProperty)(
                    self.display,
                    window,
                    property,
                    encoding,
                    8,
                    xlib::PropModeReplace,
                    cstring.as_ptr().cast::<u8>(),
                    value.len() as i32,
                );
                std::mem::forget(cstring);
            }
        }
    }
}
