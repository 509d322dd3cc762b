//! `XWrap` drawing for frames and the shared per-screen popup.
use std::ffi::CString;
use std::os::raw::{c_int, c_uint};

use x11_dl::xlib;

use super::XWrap;
use crate::models::MenuGeometry;

impl XWrap {
    // Public functions.

    /// Repaints a frame: black background when `active`, gray otherwise,
    /// the dismiss box in the top-left corner when `with_box`, and the
    /// title text whenever the window has a name.
    // `XSetWindowBackground`: https://tronche.com/gui/x/xlib/window/XSetWindowBackground.html
    // `XClearWindow`: https://tronche.com/gui/x/xlib/graphics/XClearWindow.html
    // `XDrawRectangle`: https://tronche.com/gui/x/xlib/graphics/drawing/XDrawRectangle.html
    pub fn draw_frame(
        &self,
        frame: xlib::Window,
        name: Option<&str>,
        active: bool,
        with_box: bool,
    ) {
        let Ok(attrs) = self.get_window_attrs(frame) else {
            return;
        };
        let Some(screen) = self
            .screen_of_root(attrs.root)
            .and_then(|index| self.screen(index))
        else {
            return;
        };
        let quarter = (self.border + self.title_height) / 4;
        unsafe {
            let background = if active { screen.black } else { screen.gray };
            (self.xlib.XSetWindowBackground)(self.display, frame, background);
            (self.xlib.XClearWindow)(self.display, frame);
            if with_box {
                let side = (2 * quarter) as c_uint;
                (self.xlib.XDrawRectangle)(
                    self.display,
                    frame,
                    screen.gc,
                    quarter + 2,
                    quarter,
                    side,
                    side,
                );
            }
        }
        if let Some(name) = name {
            let x = self.border + 2 + 3 * quarter;
            self.draw_string(frame, self.title_font, screen.gc, x, 2 + self.title_ascent, name);
        }
    }

    /// Redraws the whole menu: one centred label per row, plus the
    /// highlight fill on `highlight` when it names a row.
    pub fn draw_menu(
        &self,
        screen: usize,
        labels: &[String],
        geometry: &MenuGeometry,
        highlight: Option<usize>,
    ) {
        let Some(xscreen) = self.screen(screen) else {
            return;
        };
        unsafe {
            (self.xlib.XClearWindow)(self.display, xscreen.popup);
        }
        for (row, label) in labels.iter().enumerate() {
            let width = super::text_width(&self.xlib, self.popup_font, label);
            // A label can outgrow the snapshotted width if the window
            // renamed itself while the menu was up.
            let x = ((geometry.width - width) / 2).max(0);
            let y = row as i32 * geometry.item_height + self.popup_ascent;
            self.draw_string(xscreen.popup, self.popup_font, xscreen.menu_gc, x, y, label);
        }
        if let Some(row) = highlight.filter(|row| *row < geometry.count) {
            self.fill_menu_row(xscreen, geometry, row);
        }
    }

    /// Redraws the size popup with `text` centred on its width.
    pub fn draw_size_popup(&self, screen: usize, text: &str) {
        let Some(screen) = self.screen(screen) else {
            return;
        };
        unsafe {
            (self.xlib.XClearWindow)(self.display, screen.popup);
        }
        let x = (screen.popup_width - super::text_width(&self.xlib, self.popup_font, text)) / 2;
        self.draw_string(
            screen.popup,
            self.popup_font,
            screen.size_gc,
            x,
            self.popup_ascent + 1,
            text,
        );
    }

    /// Unmaps the popup, whichever of the menu or the size readout it was
    /// last showing.
    // `XUnmapWindow`: https://tronche.com/gui/x/xlib/window/XUnmapWindow.html
    pub fn hide_popup(&self, screen: usize) {
        let Some(screen) = self.screen(screen) else {
            return;
        };
        unsafe {
            (self.xlib.XUnmapWindow)(self.display, screen.popup);
        }
    }

    /// Moves the menu highlight from `old` to `new`. The fills go through
    /// an XOR context, so painting a row a second time restores it.
    pub fn menu_highlight(
        &self,
        screen: usize,
        geometry: &MenuGeometry,
        old: Option<usize>,
        new: Option<usize>,
    ) {
        if old == new {
            return;
        }
        let Some(xscreen) = self.screen(screen) else {
            return;
        };
        if let Some(row) = old.filter(|row| *row < geometry.count) {
            self.fill_menu_row(xscreen, geometry, row);
        }
        if let Some(row) = new.filter(|row| *row < geometry.count) {
            self.fill_menu_row(xscreen, geometry, row);
        }
    }

    #[must_use]
    pub const fn popup_height(&self) -> i32 {
        self.popup_height
    }

    /// Width of `text` rendered in the popup font.
    #[must_use]
    pub fn popup_text_width(&self, text: &str) -> i32 {
        super::text_width(&self.xlib, self.popup_font, text)
    }

    /// Maps the popup over the menu's placed bounds.
    // `XMoveResizeWindow`: https://tronche.com/gui/x/xlib/window/XMoveResizeWindow.html
    // `XMapRaised`: https://tronche.com/gui/x/xlib/window/XMapRaised.html
    pub fn show_menu(&self, screen: usize, geometry: &MenuGeometry) {
        let Some(screen) = self.screen(screen) else {
            return;
        };
        unsafe {
            (self.xlib.XMoveResizeWindow)(
                self.display,
                screen.popup,
                geometry.origin.0,
                geometry.origin.1,
                geometry.width as c_uint,
                geometry.total_height() as c_uint,
            );
            (self.xlib.XMapRaised)(self.display, screen.popup);
        }
    }

    /// Maps the popup at `(x, y)`, sized for the widest size string the
    /// screen can produce.
    pub fn show_size_popup(&self, screen: usize, x: i32, y: i32) {
        let Some(screen) = self.screen(screen) else {
            return;
        };
        unsafe {
            (self.xlib.XMoveResizeWindow)(
                self.display,
                screen.popup,
                x,
                y,
                screen.popup_width as c_uint,
                (self.popup_height + 1) as c_uint,
            );
            (self.xlib.XMapRaised)(self.display, screen.popup);
        }
    }

    #[must_use]
    pub const fn title_height(&self) -> i32 {
        self.title_height
    }

    // Internal functions.

    // `XFillRectangle`: https://tronche.com/gui/x/xlib/graphics/filling-areas/XFillRectangle.html
    fn fill_menu_row(&self, screen: &super::XScreen, geometry: &MenuGeometry, row: usize) {
        unsafe {
            (self.xlib.XFillRectangle)(
                self.display,
                screen.popup,
                screen.menu_gc,
                0,
                row as i32 * geometry.item_height,
                geometry.width as c_uint,
                geometry.item_height as c_uint,
            );
        }
    }

    // `XmbDrawString`: https://tronche.com/gui/x/xlib/graphics/font-metrics/XmbDrawString.html
    fn draw_string(
        &self,
        drawable: xlib::Window,
        font_set: xlib::XFontSet,
        gc: xlib::GC,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let Ok(text) = CString::new(text) else {
            return;
        };
        unsafe {
            (self.xlib.XmbDrawString)(
                self.display,
                drawable,
                font_set,
                gc,
                x,
                y,
                text.as_ptr(),
                text.as_bytes().len() as c_int,
            );
        }
    }
}
