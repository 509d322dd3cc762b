//! Geometry sanitation for interactive moves and resizes.
//!
//! Every proposed frame rectangle passes through [`sanitize`] before it is
//! applied: sizes are clamped to the client's constraints and rounded to its
//! resize increments, and positions are nudged so the window stays reachable
//! and snaps to the edges of the workarea.

use crate::models::{Bounds, Client, Edge, FrameMetrics, Screen};

/// The outcome of sanitising a proposed rectangle. An axis whose flag is
/// false failed a hard constraint and must keep its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitized {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub horizontal_ok: bool,
    pub vertical_ok: bool,
}

impl Sanitized {
    /// Commit the accepted axes to `bounds`. Position always follows an
    /// accepted axis; size only does so for resize interactions.
    pub fn apply(&self, bounds: &mut Bounds, resize: bool) {
        if self.horizontal_ok {
            bounds.x = self.x;
            if resize {
                bounds.width = self.width;
            }
        }
        if self.vertical_ok {
            bounds.y = self.y;
            if resize {
                bounds.height = self.height;
            }
        }
    }
}

/// Sanitise `proposed`, a frame rectangle in bordered-box coordinates.
/// `edge` names the resize handle being dragged; `None` means the rectangle
/// is only moving. Size constraints are checked against the proposed size,
/// while the reachability and edge-resistance adjustments use the client's
/// current size, which is what is on screen during the drag.
pub fn sanitize(
    client: &Client,
    screen: &Screen,
    metrics: FrameMetrics,
    edge: Option<Edge>,
    proposed: Bounds,
    edge_resistance: i32,
) -> Sanitized {
    let mut x = proposed.x;
    let mut y = proposed.y;
    let mut width = proposed.width;
    let mut height = proposed.height;
    let mut horizontal_ok = true;
    let mut vertical_ok = true;

    let border = metrics.border;
    let cons = &client.constraints;

    if let Some(edge) = edge {
        if width < cons.min_width {
            horizontal_ok = false;
        }
        if height < cons.min_height {
            vertical_ok = false;
        }
        if matches!(cons.max_width, Some(max) if width > max) {
            horizontal_ok = false;
        }
        if matches!(cons.max_height, Some(max) if height > max) {
            vertical_ok = false;
        }

        // Keep dimensions a whole number of increments past the base size.
        // Dragging a left or top handle anchors the opposite side, so the
        // position absorbs the correction there.
        if cons.width_inc > 1 {
            let apparent = width - 2 * border - cons.base_width;
            let fix = apparent % cons.width_inc;
            if edge.moves_left() {
                x += fix;
            }
            if edge.moves_left() || edge.moves_right() {
                width -= fix;
            }
        }
        if cons.height_inc > 1 {
            let apparent = height - 2 * border - cons.base_height;
            let fix = apparent % cons.height_inc;
            if edge.moves_top() {
                y += fix;
            }
            if edge.moves_top() || edge.moves_bottom() {
                height -= fix;
            }
        }

        // A zero increment marks a frozen axis.
        if cons.width_inc == 0 {
            horizontal_ok = false;
        }
        if cons.height_inc == 0 {
            vertical_ok = false;
        }
    }

    let current_width = client.bounds.width;
    let current_height = client.bounds.height;
    let display_width = screen.bounds.width;
    let display_height = screen.bounds.height;
    let strut = screen.strut;

    // Keep at least one border's worth of the window outside the reserved
    // areas so it can still be grabbed. Clients reserving space themselves
    // are exempt; panels legitimately live inside the struts.
    if client.strut.is_zero() {
        if y + border >= display_height - strut.bottom {
            y = display_height - strut.bottom - border;
        }
        if y + current_height - border <= strut.top {
            y = strut.top + border - current_height;
        }
        if x + border >= display_width - strut.right {
            x = display_width - strut.right - border;
        }
        if x + current_width - border <= strut.left {
            x = strut.left + border - current_width;
        }
    }

    // Resistance at the workarea edges, so windows can be thrown flush
    // against them without precise mousing.
    if x < strut.left && x > strut.left - edge_resistance {
        x = strut.left;
    }
    if x + current_width > display_width - strut.right
        && x + current_width < display_width - strut.right + edge_resistance
    {
        x = display_width - strut.right - current_width;
    }
    let title = metrics.title_height;
    if y - title < strut.top && y - title > strut.top - edge_resistance {
        y = strut.top + title;
    }
    if y + current_height > display_height - strut.bottom
        && y + current_height < display_height - strut.bottom + edge_resistance
    {
        y = display_height - strut.bottom - current_height;
    }

    Sanitized {
        x,
        y,
        width,
        height,
        horizontal_ok,
        vertical_ok,
    }
}
