//! `XWrap` pointer grabs, cursors and colormaps.
use std::os::raw::c_uint;

use x11_dl::xlib;

use super::{XWrap, BUTTONMASK};
use crate::models::{Edge, FrameZone};

impl XWrap {
    // Public functions.

    /// Starts a move or resize drag by retargeting the automatic grab the
    /// initiating button press established. The cursor shows the edge being
    /// dragged, or the move cursor when the whole window is moving.
    // `XChangeActivePointerGrab`: https://tronche.com/gui/x/xlib/input/XChangeActivePointerGrab.html
    pub fn begin_drag_grab(&self, edge: Option<Edge>) {
        let cursor = match edge {
            Some(edge) => self.cursors.for_edge(edge),
            None => self.cursors.move_,
        };
        self.change_active_grab(cursor);
    }

    /// Retargets the automatic grab for a menu session, leaving the cursor
    /// alone.
    pub fn begin_menu_grab(&self) {
        self.change_active_grab(0);
    }

    /// Grabs every button on an unfocused window so the click that focuses
    /// it reaches us first.
    // `XGrabButton`: https://tronche.com/gui/x/xlib/input/XGrabButton.html
    pub fn grab_buttons(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XGrabButton)(
                self.display,
                xlib::AnyButton as c_uint,
                xlib::AnyModifier,
                window,
                0,
                (xlib::ButtonPressMask | xlib::ButtonReleaseMask) as c_uint,
                xlib::GrabModeAsync,
                xlib::GrabModeSync,
                0,
                0,
            );
        }
    }

    /// Installs `colormap`, or the default colormap for windows that never
    /// set one of their own.
    // `XInstallColormap`: https://tronche.com/gui/x/xlib/color/XInstallColormap.html
    pub fn install_colormap(&self, colormap: Option<u64>) {
        let colormap = colormap.unwrap_or_else(|| unsafe {
            (self.xlib.XDefaultColormap)(self.display, (self.xlib.XDefaultScreen)(self.display))
        });
        unsafe {
            (self.xlib.XInstallColormap)(self.display, colormap);
        }
    }

    /// Sets the cursor a frame shows for the zone under the pointer, or
    /// reverts to the root cursor.
    // `XDefineCursor`: https://tronche.com/gui/x/xlib/window/XDefineCursor.html
    // `XUndefineCursor`: https://tronche.com/gui/x/xlib/window/XUndefineCursor.html
    pub fn set_frame_cursor(&self, frame: xlib::Window, zone: Option<FrameZone>) {
        unsafe {
            match zone {
                Some(zone) => {
                    (self.xlib.XDefineCursor)(self.display, frame, self.cursors.for_zone(zone));
                }
                None => {
                    (self.xlib.XUndefineCursor)(self.display, frame);
                }
            }
        }
    }

    /// Releases the button grab on a window that gained focus.
    // `XUngrabButton`: https://tronche.com/gui/x/xlib/input/XUngrabButton.html
    pub fn ungrab_buttons(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XUngrabButton)(
                self.display,
                xlib::AnyButton as c_uint,
                xlib::AnyModifier,
                window,
            );
        }
    }

    // Internal functions.

    fn change_active_grab(&self, cursor: xlib::Cursor) {
        unsafe {
            (self.xlib.XChangeActivePointerGrab)(
                self.display,
                (BUTTONMASK | xlib::OwnerGrabButtonMask) as c_uint,
                cursor,
                xlib::CurrentTime,
            );
        }
    }
}
