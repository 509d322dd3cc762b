//! A wrapper around calls to xlib and X related functions.
// We allow this _ because if we don't we'll receive an error that it isn't read on _task_guard.
#![allow(clippy::used_underscore_binding)]
// We allow this so that extern "C" functions are not flagged as confusing. The current placement
// allows for easy reading.
#![allow(clippy::items_after_statements)]

use super::xatom::XAtom;
use super::xcursor::XCursor;
use crate::config::Config;
use crate::errors::{PlainError, Result};
use crate::models::{Screen, WindowHandle};
use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_long, c_ulong};
use std::ptr;
use std::sync::Arc;
use tokio::sync::{oneshot, Notify};
use tokio::time::Duration;

use x11_dl::xlib;

mod draw;
mod getters;
mod mouse;
mod setters;
mod window;

const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

pub const ROOT_EVENT_MASK: c_long = xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask
    | xlib::ColormapChangeMask
    | xlib::ButtonPressMask
    | xlib::PropertyChangeMask
    | xlib::EnterWindowMask;

pub const FRAME_EVENT_MASK: c_long = xlib::ExposureMask
    | xlib::EnterWindowMask
    | xlib::ButtonPressMask
    | xlib::ButtonReleaseMask
    | xlib::PointerMotionMask
    | xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask;

pub const CLIENT_EVENT_MASK: c_long = xlib::ColormapChangeMask
    | xlib::EnterWindowMask
    | xlib::PropertyChangeMask
    | xlib::FocusChangeMask;

const POPUP_EVENT_MASK: c_long = xlib::ButtonPressMask
    | xlib::ButtonReleaseMask
    | xlib::ButtonMotionMask
    | xlib::ExposureMask;

const BUTTONMASK: c_long = xlib::ButtonPressMask | xlib::ButtonReleaseMask | xlib::ButtonMotionMask;

const X_CONFIGUREWINDOW: u8 = 12;
const X_GRABBUTTON: u8 = 28;
const X_SETINPUTFOCUS: u8 = 42;
const X_COPYAREA: u8 = 62;
const X_POLYSEGMENT: u8 = 66;
const X_POLYFILLRECTANGLE: u8 = 70;
const X_POLYTEXT8: u8 = 74;

// This is allowed for now as const extern fns
// are not yet stable (1.56.0, 16 Sept 2021)
// see issue #64926 <https://github.com/rust-lang/rust/issues/64926> for more information.
#[allow(clippy::missing_const_for_fn)]
pub extern "C" fn on_error_from_xlib(_: *mut xlib::Display, er: *mut xlib::XErrorEvent) -> c_int {
    let err = unsafe { *er };
    let ec = err.error_code;
    let rc = err.request_code;
    // Windows and colormaps die while requests naming them are still in
    // flight; those races are part of normal service.
    if ec == xlib::BadWindow || ec == xlib::BadColor {
        return 0;
    }
    let ba = ec == xlib::BadAccess;
    let bd = ec == xlib::BadDrawable;
    let bm = ec == xlib::BadMatch;

    if (rc == X_CONFIGUREWINDOW && bm)
        || (rc == X_GRABBUTTON && ba)
        || (rc == X_SETINPUTFOCUS && bm)
        || (rc == X_COPYAREA && bd)
        || (rc == X_POLYSEGMENT && bd)
        || (rc == X_POLYFILLRECTANGLE && bd)
        || (rc == X_POLYTEXT8 && bd)
    {
        return 0;
    }
    tracing::warn!("unexpected X error: code {}, request {}", ec, rc);
    1
}

pub extern "C" fn on_error_from_xlib_dummy(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    1
}

#[derive(Debug, Clone)]
pub enum XlibError {
    FailedStatus,
    InvalidXAtom,
}

/// Per-screen server resources: the root, the shared popup, the drawing
/// contexts and the three colours the decorations use.
pub struct XScreen {
    pub root: xlib::Window,
    pub popup: xlib::Window,
    pub ewmh_compat: xlib::Window,
    gc: xlib::GC,
    menu_gc: xlib::GC,
    size_gc: xlib::GC,
    black: c_ulong,
    white: c_ulong,
    gray: c_ulong,
    width: i32,
    height: i32,
    /// Sized for the widest size string this screen can produce.
    popup_width: i32,
    display_spec: Option<String>,
}

/// Contains Xserver information and origins.
pub struct XWrap {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    pub atoms: XAtom,
    cursors: XCursor,
    screens: Vec<XScreen>,
    title_font: xlib::XFontSet,
    popup_font: xlib::XFontSet,
    title_height: i32,
    title_ascent: i32,
    popup_height: i32,
    popup_ascent: i32,
    /// The configured frame border width, which the decorations scale from.
    border: i32,
    _task_guard: oneshot::Receiver<()>,
    pub task_notify: Arc<Notify>,
}

impl XWrap {
    /// Opens the display, wires its socket into the async reactor and
    /// claims every screen.
    ///
    /// # Errors
    ///
    /// Errors when Xlib cannot be loaded, the display cannot be opened or
    /// a font set cannot be allocated. Exits the process when another
    /// window manager is already running.
    // `XOpenDisplay`: https://tronche.com/gui/x/xlib/display/opening.html
    // `XConnectionNumber`: https://tronche.com/gui/x/xlib/display/display-macros.html#ConnectionNumber
    // `XSetErrorHandler`: https://tronche.com/gui/x/xlib/event-handling/protocol-errors/XSetErrorHandler.html
    #[allow(clippy::too_many_lines)]
    pub fn new(config: &impl Config) -> Result<Self> {
        const SERVER: mio::Token = mio::Token(0);
        let xlib = xlib::Xlib::open()?;
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(PlainError::XOpenDisplay);
        }

        let fd = unsafe { (xlib.XConnectionNumber)(display) };

        let (guard, _task_guard) = oneshot::channel();
        let notify = Arc::new(Notify::new());
        let task_notify = notify.clone();

        let mut poll = mio::Poll::new()?;
        let mut events = mio::Events::with_capacity(1);
        poll.registry().register(
            &mut mio::unix::SourceFd(&fd),
            SERVER,
            mio::Interest::READABLE,
        )?;
        let timeout = Duration::from_millis(100);
        tokio::task::spawn_blocking(move || loop {
            if guard.is_closed() {
                return;
            }

            if let Err(err) = poll.poll(&mut events, Some(timeout)) {
                tracing::warn!("Xlib socket poll failed with {:?}", err);
                continue;
            }

            events
                .iter()
                .filter(|event| SERVER == event.token())
                .for_each(|_| notify.notify_one());
        });

        let atoms = XAtom::new(&xlib, display);
        let cursors = XCursor::new(&xlib, display);

        let title_font = open_font_set(&xlib, display, &config.title_font())?;
        let popup_font = open_font_set(&xlib, display, &config.popup_font())?;
        let (title_height, title_ascent) = font_set_metrics(&xlib, title_font);
        let (popup_height, popup_ascent) = font_set_metrics(&xlib, popup_font);

        let screen_count = unsafe { (xlib.XScreenCount)(display) };
        let display_name = unsafe {
            let raw = (xlib.XDisplayString)(display);
            std::ffi::CStr::from_ptr(raw).to_string_lossy().into_owned()
        };
        let mut screens = Vec::with_capacity(screen_count as usize);
        for index in 0..screen_count {
            screens.push(init_screen(
                &xlib,
                display,
                index,
                popup_font,
                &display_name,
            ));
        }

        let xw = Self {
            xlib,
            display,
            atoms,
            cursors,
            screens,
            title_font,
            popup_font,
            title_height,
            title_ascent,
            popup_height,
            popup_ascent,
            border: config.border_width(),
            _task_guard,
            task_notify,
        };

        // Check that another WM is not running.
        extern "C" fn startup_check_for_other_wm(
            _: *mut xlib::Display,
            _: *mut xlib::XErrorEvent,
        ) -> c_int {
            eprintln!("ERROR: another window manager is already running");
            ::std::process::exit(-1);
        }
        unsafe {
            (xw.xlib.XSetErrorHandler)(Some(startup_check_for_other_wm));
            for screen in &xw.screens {
                (xw.xlib.XSelectInput)(xw.display, screen.root, xlib::SubstructureRedirectMask);
            }
        };
        xw.sync();

        unsafe { (xw.xlib.XSetErrorHandler)(Some(on_error_from_xlib)) };
        xw.sync();
        Ok(xw)
    }

    /// Takes over each root window and announces EWMH support.
    // `XChangeWindowAttributes`: https://tronche.com/gui/x/xlib/window/XChangeWindowAttributes.html
    pub fn init(&self) {
        for index in 0..self.screens.len() {
            let root = self.screens[index].root;
            let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
            attrs.cursor = self.cursors.normal;
            attrs.event_mask = ROOT_EVENT_MASK;
            unsafe {
                (self.xlib.XChangeWindowAttributes)(
                    self.display,
                    root,
                    xlib::CWEventMask | xlib::CWCursor,
                    &mut attrs,
                );
            }
            self.init_screen_hints(index);
        }
        self.sync();
    }

    /// The screens as the rest of the manager sees them.
    pub fn screens(&self) -> Vec<Screen> {
        self.screens
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let mut screen = Screen::new(index, WindowHandle(s.root), s.width, s.height);
                screen.popup = WindowHandle(s.popup);
                screen.ewmh_compat = WindowHandle(s.ewmh_compat);
                screen.display = s.display_spec.clone();
                screen
            })
            .collect()
    }

    fn screen(&self, index: usize) -> Option<&XScreen> {
        self.screens.get(index)
    }

    pub(super) fn screen_of_root(&self, root: xlib::Window) -> Option<usize> {
        self.screens.iter().position(|s| s.root == root)
    }

    /// Whether the window is one of ours rather than a client's.
    pub(super) fn is_own_window(&self, window: xlib::Window) -> bool {
        self.screens
            .iter()
            .any(|s| s.popup == window || s.ewmh_compat == window)
    }

    // `XSync`: https://tronche.com/gui/x/xlib/event-handling/XSync.html
    pub fn sync(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) {
        unsafe { (self.xlib.XFlush)(self.display) };
    }

    /// Returns how many events are waiting.
    // `XPending`: https://tronche.com/gui/x/xlib/event-handling/XPending.html
    pub fn queue_len(&self) -> i32 {
        unsafe { (self.xlib.XPending)(self.display) }
    }

    // `XNextEvent`: https://tronche.com/gui/x/xlib/event-handling/manipulating-event-queue/XNextEvent.html
    pub fn get_next_event(&self) -> xlib::XEvent {
        let mut event: xlib::XEvent = unsafe { std::mem::zeroed() };
        unsafe {
            (self.xlib.XNextEvent)(self.display, &mut event);
        };
        event
    }
}

fn init_screen(
    xlib: &xlib::Xlib,
    display: *mut xlib::Display,
    index: c_int,
    popup_font: xlib::XFontSet,
    display_name: &str,
) -> XScreen {
    unsafe {
        let root = (xlib.XRootWindow)(display, index);
        let width = (xlib.XDisplayWidth)(display, index);
        let height = (xlib.XDisplayHeight)(display, index);
        let black = (xlib.XBlackPixel)(display, index);
        let white = (xlib.XWhitePixel)(display, index);

        let mut colour: xlib::XColor = std::mem::zeroed();
        let mut exact: xlib::XColor = std::mem::zeroed();
        let name = CString::new("DimGray").unwrap_or_default();
        (xlib.XAllocNamedColor)(
            display,
            (xlib.XDefaultColormap)(display, index),
            name.as_ptr(),
            &mut colour,
            &mut exact,
        );
        let gray = colour.pixel;

        // Frame decorations draw in xor so they show on both the active
        // and the inactive background.
        let mut gv: xlib::XGCValues = std::mem::zeroed();
        gv.foreground = black ^ white;
        gv.background = white;
        gv.function = xlib::GXxor as c_int;
        gv.line_width = 2;
        gv.subwindow_mode = xlib::IncludeInferiors as c_int;
        let gc_mask: c_ulong = xlib::GCForeground as c_ulong
            | xlib::GCBackground as c_ulong
            | xlib::GCFunction as c_ulong
            | xlib::GCLineWidth as c_ulong
            | xlib::GCSubwindowMode as c_ulong;
        let gc = (xlib.XCreateGC)(display, root, gc_mask, &mut gv);

        let popup = (xlib.XCreateSimpleWindow)(display, root, 0, 0, 1, 1, 1, black, white);
        let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
        attrs.event_mask = POPUP_EVENT_MASK;
        (xlib.XChangeWindowAttributes)(display, popup, xlib::CWEventMask, &mut attrs);

        gv.line_width = 1;
        let menu_gc = (xlib.XCreateGC)(display, popup, gc_mask, &mut gv);

        gv.foreground = black;
        gv.function = xlib::GXcopy as c_int;
        let size_gc = (xlib.XCreateGC)(display, popup, gc_mask, &mut gv);

        let ewmh_compat = (xlib.XCreateSimpleWindow)(display, root, -200, -200, 1, 1, 0, 0, 0);

        // Make the size popup 10% wider than the widest string it shows.
        let mut popup_width = text_width(xlib, popup_font, &format!("{width} x {height}"));
        popup_width += popup_width / 10;

        XScreen {
            root,
            popup,
            ewmh_compat,
            gc,
            menu_gc,
            size_gc,
            black,
            white,
            gray,
            width,
            height,
            popup_width,
            display_spec: display_spec(display_name, index as usize),
        }
    }
}

/// Allocates the named font set, falling back to `fixed` because everyone
/// has that.
fn open_font_set(
    xlib: &xlib::Xlib,
    display: *mut xlib::Display,
    name: &str,
) -> Result<xlib::XFontSet> {
    for candidate in [name, "fixed"] {
        let spec = CString::new(candidate).unwrap_or_default();
        let mut missing: *mut *mut c_char = ptr::null_mut();
        let mut missing_count: c_int = 0;
        let mut default_string: *mut c_char = ptr::null_mut();
        let font_set = unsafe {
            (xlib.XCreateFontSet)(
                display,
                spec.as_ptr(),
                &mut missing,
                &mut missing_count,
                &mut default_string,
            )
        };
        if font_set.is_null() {
            continue;
        }
        if missing_count > 0 {
            tracing::warn!(
                "font set \"{}\" is missing {} charsets",
                candidate,
                missing_count
            );
            unsafe { (xlib.XFreeStringList)(missing) };
        }
        return Ok(font_set);
    }
    Err(PlainError::FontAllocation(name.to_owned()))
}

/// The line height and ascent of a font set, from its maximum logical
/// extents.
fn font_set_metrics(xlib: &xlib::Xlib, font_set: xlib::XFontSet) -> (i32, i32) {
    unsafe {
        let extents = (xlib.XExtentsOfFontSet)(font_set);
        let logical = (*extents).max_logical_extent;
        (i32::from(logical.height), i32::from(logical.y).abs())
    }
}

fn text_width(xlib: &xlib::Xlib, font_set: xlib::XFontSet, text: &str) -> i32 {
    let text = CString::new(text).unwrap_or_default();
    let len = text.as_bytes().len() as c_int;
    let mut ink: xlib::XRectangle = unsafe { std::mem::zeroed() };
    let mut logical: xlib::XRectangle = unsafe { std::mem::zeroed() };
    unsafe {
        (xlib.XmbTextExtents)(font_set, text.as_ptr(), len, &mut ink, &mut logical);
    }
    i32::from(logical.width)
}

/// The DISPLAY value naming one screen of this display: `:0` becomes
/// `:0.1` for screen 1, and an existing screen suffix is replaced.
fn display_spec(display_name: &str, screen: usize) -> Option<String> {
    let colon = display_name.rfind(':')?;
    let base = match display_name[colon..].find('.') {
        Some(dot) => &display_name[..colon + dot],
        None => display_name,
    };
    Some(format!("{base}.{screen}"))
}

#[cfg(test)]
mod tests {
    use super::display_spec;

    #[test]
    fn display_specs_name_the_screen() {
        assert_eq!(display_spec(":0", 0), Some(":0.0".to_owned()));
        assert_eq!(display_spec(":0", 1), Some(":0.1".to_owned()));
        assert_eq!(display_spec(":0.0", 2), Some(":0.2".to_owned()));
        assert_eq!(display_spec("host:1.0", 1), Some("host:1.1".to_owned()));
        assert_eq!(display_spec("nonsense", 0), None);
    }
}
