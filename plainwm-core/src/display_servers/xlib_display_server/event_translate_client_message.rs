use std::os::raw::c_long;

use x11_dl::xlib;

use super::XWrap;
use crate::display_event::{DisplayEvent, WindowChanges};
use crate::models::{Edge, EwmhProperty, StateAction, WindowHandle};

pub fn from_event(xw: &XWrap, event: xlib::XClientMessageEvent) -> Option<DisplayEvent> {
    tracing::trace!(
        "ClientMessage: {} : {:?}",
        event.window,
        xw.atoms.get_name(event.message_type)
    );
    let window = WindowHandle(event.window);

    if event.message_type == xw.atoms.WMChangeState {
        // A payload of 3 asks for iconification (IconicState); the other
        // transitions go through map and unmap instead.
        if event.format == 32 && event.data.get_long(0) == 3 {
            return Some(DisplayEvent::IconifyRequest(window));
        }
        return None;
    }
    if event.format != 32 {
        return None;
    }
    if event.message_type == xw.atoms.NetWMState {
        let action = StateAction::from_raw(event.data.get_long(0))?;
        let properties = [
            ewmh_property(xw, event.data.get_long(1)),
            ewmh_property(xw, event.data.get_long(2)),
        ];
        return Some(DisplayEvent::StateChangeRequest {
            window,
            action,
            properties,
        });
    }
    if event.message_type == xw.atoms.NetActiveWindow {
        return Some(DisplayEvent::ActivateRequest(window));
    }
    if event.message_type == xw.atoms.NetCloseWindow {
        return Some(DisplayEvent::CloseRequest(window));
    }
    if event.message_type == xw.atoms.NetMoveResizeWindow {
        return Some(from_moveresize_window(window, &event));
    }
    if event.message_type == xw.atoms.NetWMMoveResize {
        return from_wm_moveresize(window, &event);
    }
    None
}

/// _NET_MOVERESIZE_WINDOW carries a gravity-and-flags word followed by a
/// geometry; bits 8 through 11 say which geometry fields are present. It
/// folds into an ordinary configure request.
fn from_moveresize_window(window: WindowHandle, event: &xlib::XClientMessageEvent) -> DisplayEvent {
    let flags = event.data.get_long(0);
    let changes = WindowChanges {
        x: (flags & (1 << 8) != 0).then(|| event.data.get_long(1) as i32),
        y: (flags & (1 << 9) != 0).then(|| event.data.get_long(2) as i32),
        width: (flags & (1 << 10) != 0).then(|| event.data.get_long(3) as i32),
        height: (flags & (1 << 11) != 0).then(|| event.data.get_long(4) as i32),
        ..WindowChanges::default()
    };
    DisplayEvent::ConfigureRequest { window, changes }
}

/// _NET_WM_MOVERESIZE starts a pointer drag on the client's behalf. The
/// keyboard variants and cancel have no pointer to follow and are dropped.
fn from_wm_moveresize(
    window: WindowHandle,
    event: &xlib::XClientMessageEvent,
) -> Option<DisplayEvent> {
    let edge = match event.data.get_long(2) {
        0 => Some(Edge::TopLeft),
        1 => Some(Edge::Top),
        2 => Some(Edge::TopRight),
        3 => Some(Edge::Right),
        4 => Some(Edge::BottomRight),
        5 => Some(Edge::Bottom),
        6 => Some(Edge::BottomLeft),
        7 => Some(Edge::Left),
        8 => None,
        _ => return None,
    };
    Some(DisplayEvent::DragRequest { window, edge })
}

fn ewmh_property(xw: &XWrap, raw: c_long) -> Option<EwmhProperty> {
    let atom = raw as xlib::Atom;
    if atom == xw.atoms.NetWMStateSkipTaskbar {
        Some(EwmhProperty::SkipTaskbar)
    } else if atom == xw.atoms.NetWMStateSkipPager {
        Some(EwmhProperty::SkipPager)
    } else if atom == xw.atoms.NetWMStateFullscreen {
        Some(EwmhProperty::Fullscreen)
    } else if atom == xw.atoms.NetWMStateAbove {
        Some(EwmhProperty::Above)
    } else if atom == xw.atoms.NetWMStateBelow {
        Some(EwmhProperty::Below)
    } else {
        None
    }
}
