use std::os::raw::c_uint;
use x11_dl::xlib;

use crate::models::{Edge, FrameZone};

// Glyph indexes into the standard cursor font, from X11/cursorfont.h.
const LEFT_PTR: c_uint = 68;
const DRAPED_BOX: c_uint = 48;
const FLEUR: c_uint = 52;
const TOP_LEFT_CORNER: c_uint = 134;
const TOP_SIDE: c_uint = 138;
const TOP_RIGHT_CORNER: c_uint = 136;
const RIGHT_SIDE: c_uint = 96;
const BOTTOM_RIGHT_CORNER: c_uint = 14;
const BOTTOM_SIDE: c_uint = 16;
const BOTTOM_LEFT_CORNER: c_uint = 12;
const LEFT_SIDE: c_uint = 70;

/// The cursors a session needs: one per resize edge, one for moves, the
/// close-box cursor and the plain pointer everything else shows.
#[derive(Clone, Debug)]
pub struct XCursor {
    pub normal: xlib::Cursor,
    pub box_: xlib::Cursor,
    pub move_: xlib::Cursor,
    top_left: xlib::Cursor,
    top: xlib::Cursor,
    top_right: xlib::Cursor,
    right: xlib::Cursor,
    bottom_right: xlib::Cursor,
    bottom: xlib::Cursor,
    bottom_left: xlib::Cursor,
    left: xlib::Cursor,
}

impl XCursor {
    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        let create = |shape| unsafe { (xlib.XCreateFontCursor)(dpy, shape) };
        Self {
            normal: create(LEFT_PTR),
            box_: create(DRAPED_BOX),
            move_: create(FLEUR),
            top_left: create(TOP_LEFT_CORNER),
            top: create(TOP_SIDE),
            top_right: create(TOP_RIGHT_CORNER),
            right: create(RIGHT_SIDE),
            bottom_right: create(BOTTOM_RIGHT_CORNER),
            bottom: create(BOTTOM_SIDE),
            bottom_left: create(BOTTOM_LEFT_CORNER),
            left: create(LEFT_SIDE),
        }
    }

    pub const fn for_edge(&self, edge: Edge) -> xlib::Cursor {
        match edge {
            Edge::TopLeft => self.top_left,
            Edge::Top => self.top,
            Edge::TopRight => self.top_right,
            Edge::Right => self.right,
            Edge::BottomRight => self.bottom_right,
            Edge::Bottom => self.bottom,
            Edge::BottomLeft => self.bottom_left,
            Edge::Left => self.left,
        }
    }

    pub const fn for_zone(&self, zone: FrameZone) -> xlib::Cursor {
        match zone {
            FrameZone::Box => self.box_,
            FrameZone::Edge(edge) => self.for_edge(edge),
            FrameZone::Title | FrameZone::Interior => self.normal,
        }
    }
}
