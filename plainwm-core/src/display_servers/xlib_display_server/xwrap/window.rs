//! `XWrap` window operations.
use super::{
    on_error_from_xlib, on_error_from_xlib_dummy, XWrap, BUTTONMASK, CLIENT_EVENT_MASK,
    FRAME_EVENT_MASK,
};
use crate::display_event::WindowChanges;
use crate::display_servers::FocusTarget;
use crate::models::Bounds;
use std::os::raw::{c_long, c_uint};
use x11_dl::xlib;

impl XWrap {
    /// Creates a frame window with our border and colours, ready for a
    /// client to be reparented into it. The bounds already include the
    /// title bar.
    // `XCreateSimpleWindow`: https://tronche.com/gui/x/xlib/window/XCreateWindow.html
    pub fn create_frame(&self, screen: usize, bounds: Bounds) -> xlib::Window {
        let Some(s) = self.screen(screen) else {
            return 0;
        };
        unsafe {
            let frame = (self.xlib.XCreateSimpleWindow)(
                self.display,
                s.root,
                bounds.x,
                bounds.y,
                bounds.width as c_uint,
                bounds.height as c_uint,
                1,
                s.black,
                s.white,
            );
            let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
            attrs.event_mask = FRAME_EVENT_MASK;
            (self.xlib.XChangeWindowAttributes)(self.display, frame, xlib::CWEventMask, &mut attrs);
            frame
        }
    }

    /// Strips the client's own border and selects the events a managed
    /// client must report. Static gravity keeps the client glued to its
    /// frame; button events never propagate past it.
    // `XChangeWindowAttributes`: https://tronche.com/gui/x/xlib/window/XChangeWindowAttributes.html
    pub fn setup_client_window(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XSetWindowBorderWidth)(self.display, window, 0);
            let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
            attrs.event_mask = CLIENT_EVENT_MASK;
            attrs.win_gravity = 10; // StaticGravity
            attrs.do_not_propagate_mask = BUTTONMASK;
            (self.xlib.XChangeWindowAttributes)(
                self.display,
                window,
                xlib::CWEventMask | xlib::CWWinGravity | xlib::CWDontPropagate,
                &mut attrs,
            );
        }
    }

    // `XReparentWindow`: https://tronche.com/gui/x/xlib/window-and-session-manager/XReparentWindow.html
    pub fn reparent_window(&self, window: xlib::Window, parent: xlib::Window, x: i32, y: i32) {
        unsafe { (self.xlib.XReparentWindow)(self.display, window, parent, x, y) };
    }

    /// Keeps the window alive if we exit before returning it to the root.
    // `XAddToSaveSet`: https://tronche.com/gui/x/xlib/window-and-session-manager/XAddToSaveSet.html
    pub fn add_to_save_set(&self, window: xlib::Window) {
        unsafe { (self.xlib.XAddToSaveSet)(self.display, window) };
    }

    // `XRemoveFromSaveSet`: https://tronche.com/gui/x/xlib/window-and-session-manager/XRemoveFromSaveSet.html
    pub fn remove_from_save_set(&self, window: xlib::Window) {
        unsafe { (self.xlib.XRemoveFromSaveSet)(self.display, window) };
    }

    // `XMapWindow`: https://tronche.com/gui/x/xlib/window/XMapWindow.html
    pub fn map_window(&self, window: xlib::Window) {
        unsafe { (self.xlib.XMapWindow)(self.display, window) };
    }

    // `XUnmapWindow`: https://tronche.com/gui/x/xlib/window/XUnmapWindow.html
    pub fn unmap_window(&self, window: xlib::Window) {
        unsafe { (self.xlib.XUnmapWindow)(self.display, window) };
    }

    // `XRaiseWindow`: https://tronche.com/gui/x/xlib/window/XRaiseWindow.html
    pub fn raise_window(&self, window: xlib::Window) {
        unsafe { (self.xlib.XRaiseWindow)(self.display, window) };
    }

    // `XLowerWindow`: https://tronche.com/gui/x/xlib/window/XLowerWindow.html
    pub fn lower_window(&self, window: xlib::Window) {
        unsafe { (self.xlib.XLowerWindow)(self.display, window) };
    }

    // `XMoveWindow`: https://tronche.com/gui/x/xlib/window/XMoveWindow.html
    pub fn move_window(&self, window: xlib::Window, x: i32, y: i32) {
        unsafe { (self.xlib.XMoveWindow)(self.display, window, x, y) };
    }

    // `XResizeWindow`: https://tronche.com/gui/x/xlib/window/XResizeWindow.html
    pub fn resize_window(&self, window: xlib::Window, width: i32, height: i32) {
        unsafe {
            (self.xlib.XResizeWindow)(self.display, window, width as c_uint, height as c_uint);
        }
    }

    // `XMoveResizeWindow`: https://tronche.com/gui/x/xlib/window/XMoveResizeWindow.html
    pub fn move_resize_window(&self, window: xlib::Window, bounds: Bounds) {
        unsafe {
            (self.xlib.XMoveResizeWindow)(
                self.display,
                window,
                bounds.x,
                bounds.y,
                bounds.width as c_uint,
                bounds.height as c_uint,
            );
        }
    }

    // `XSetWindowBorderWidth`: https://tronche.com/gui/x/xlib/window/XSetWindowBorderWidth.html
    pub fn set_border_width(&self, window: xlib::Window, width: i32) {
        unsafe { (self.xlib.XSetWindowBorderWidth)(self.display, window, width as c_uint) };
    }

    /// Applies a configure request, honouring only the fields the client
    /// asked about. A request with no fields is a no-op.
    // `XConfigureWindow`: https://tronche.com/gui/x/xlib/window/XConfigureWindow.html
    pub fn configure_window(&self, window: xlib::Window, changes: &WindowChanges) {
        let mut xchanges = xlib::XWindowChanges {
            x: changes.x.unwrap_or(0),
            y: changes.y.unwrap_or(0),
            width: changes.width.unwrap_or(0),
            height: changes.height.unwrap_or(0),
            border_width: changes.border_width.unwrap_or(0),
            sibling: changes.sibling.map_or(0, |s| s.0),
            stack_mode: changes.stack_mode.unwrap_or(0),
        };
        let mut mask = 0;
        if changes.x.is_some() {
            mask |= xlib::CWX;
        }
        if changes.y.is_some() {
            mask |= xlib::CWY;
        }
        if changes.width.is_some() {
            mask |= xlib::CWWidth;
        }
        if changes.height.is_some() {
            mask |= xlib::CWHeight;
        }
        if changes.border_width.is_some() {
            mask |= xlib::CWBorderWidth;
        }
        if changes.sibling.is_some() {
            mask |= xlib::CWSibling;
        }
        if changes.stack_mode.is_some() {
            mask |= xlib::CWStackMode;
        }
        if mask == 0 {
            return;
        }
        unsafe {
            (self.xlib.XConfigureWindow)(self.display, window, u32::from(mask), &mut xchanges);
        }
    }

    /// Tells a client where its window sits in root coordinates, in the
    /// synthetic `ConfigureNotify` the ICCCM asks for.
    pub fn send_configure_notify(&self, window: xlib::Window, bounds: Bounds, border_width: i32) {
        let mut configure_event: xlib::XConfigureEvent = unsafe { std::mem::zeroed() };
        configure_event.type_ = xlib::ConfigureNotify;
        configure_event.display = self.display;
        configure_event.event = window;
        configure_event.window = window;
        configure_event.x = bounds.x;
        configure_event.y = bounds.y;
        configure_event.width = bounds.width;
        configure_event.height = bounds.height;
        configure_event.border_width = border_width;
        configure_event.above = 0;
        configure_event.override_redirect = 0;
        self.send_xevent(
            window,
            0,
            xlib::StructureNotifyMask,
            &mut configure_event.into(),
        );
    }

    /// Asks a window to close itself with a `WM_DELETE_WINDOW` message.
    /// The caller has checked that the window speaks the protocol.
    pub fn send_delete(&self, window: xlib::Window) {
        self.send_protocol(window, self.atoms.WMDelete, xlib::CurrentTime as c_long);
    }

    /// Offers the input focus to a window with `WM_TAKE_FOCUS`, stamped
    /// with the time of the event that earned it the focus.
    pub fn send_take_focus(&self, window: xlib::Window, timestamp: u64) {
        self.send_protocol(window, self.atoms.WMTakeFocus, timestamp as c_long);
    }

    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    pub fn set_input_focus(&self, target: FocusTarget) {
        // The protocol reserves 0 for None and 1 for PointerRoot.
        let window: xlib::Window = match target {
            FocusTarget::Window(w) => w.0,
            FocusTarget::None => 0,
            FocusTarget::PointerRoot => 1,
        };
        unsafe {
            (self.xlib.XSetInputFocus)(
                self.display,
                window,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
        }
    }

    /// Disconnects a client outright.
    // `XGrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XGrabServer.html
    // `XSetCloseDownMode`: https://tronche.com/gui/x/xlib/display/XSetCloseDownMode.html
    // `XKillClient`: https://tronche.com/gui/x/xlib/window-and-session-manager/XKillClient.html
    // `XUngrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XUngrabServer.html
    pub fn kill_client(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            (self.xlib.XSetCloseDownMode)(self.display, xlib::DestroyAll);
            (self.xlib.XKillClient)(self.display, window);
            self.sync();
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
    }

    /// Destroys one of our own windows, usually a frame whose client has
    /// left it.
    // `XDestroyWindow`: https://tronche.com/gui/x/xlib/window/XDestroyWindow.html
    pub fn destroy_window(&self, window: xlib::Window) {
        unsafe { (self.xlib.XDestroyWindow)(self.display, window) };
    }

    // Internal functions.

    /// Sends a `WM_PROTOCOLS` message to a window.
    fn send_protocol(&self, window: xlib::Window, protocol: xlib::Atom, time: c_long) {
        let mut msg: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
        msg.type_ = xlib::ClientMessage;
        msg.window = window;
        msg.message_type = self.atoms.WMProtocols;
        msg.format = 32;
        msg.data.set_long(0, protocol as c_long);
        msg.data.set_long(1, time);
        let mut ev: xlib::XEvent = msg.into();
        self.send_xevent(window, 0, xlib::NoEventMask, &mut ev);
    }

    /// Sends an xevent for a window.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    fn send_xevent(
        &self,
        window: xlib::Window,
        propagate: i32,
        mask: c_long,
        event: &mut xlib::XEvent,
    ) {
        unsafe { (self.xlib.XSendEvent)(self.display, window, propagate, mask, event) };
        self.sync();
    }
}
