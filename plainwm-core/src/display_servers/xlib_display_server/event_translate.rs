use std::os::raw::{c_ulong, c_ushort};

use x11_dl::xlib;

use super::{event_translate_client_message, event_translate_property_notify, XWrap};
use crate::display_event::{ButtonEvent, DisplayEvent, MotionEvent, WindowChanges};
use crate::models::WindowHandle;

pub struct XEvent<'a>(pub &'a XWrap, pub xlib::XEvent);

impl From<XEvent<'_>> for Option<DisplayEvent> {
    fn from(x_event: XEvent) -> Self {
        let xw = x_event.0;
        let raw_event = x_event.1;

        match raw_event.get_type() {
            // A new window wants on screen.
            xlib::MapRequest => {
                let event = xlib::XMapRequestEvent::from(raw_event);
                Some(DisplayEvent::MapRequest(WindowHandle(event.window)))
            }
            // A window went away, or withdrew itself.
            xlib::UnmapNotify => {
                let event = xlib::XUnmapEvent::from(raw_event);
                Some(DisplayEvent::Unmap {
                    window: WindowHandle(event.window),
                    synthetic: event.send_event != xlib::False,
                })
            }
            xlib::DestroyNotify => {
                let event = xlib::XDestroyWindowEvent::from(raw_event);
                Some(DisplayEvent::Destroy(WindowHandle(event.window)))
            }
            // A root child moved to a parent that is not one of our roots.
            // Withdraws reparent back to the root and are dropped here; the
            // handler ignores clients that still own their frame.
            xlib::ReparentNotify => {
                let event = xlib::XReparentEvent::from(raw_event);
                if xw.screen_of_root(event.event).is_none()
                    || event.override_redirect != xlib::False
                    || xw.screen_of_root(event.parent).is_some()
                {
                    return None;
                }
                Some(DisplayEvent::ReparentedAway(WindowHandle(event.window)))
            }
            xlib::ConfigureRequest => Some(from_configure_request(raw_event)),
            xlib::CirculateRequest => {
                let event = xlib::XCirculateRequestEvent::from(raw_event);
                Some(DisplayEvent::CirculateRequest {
                    window: WindowHandle(event.window),
                    on_top: event.place == xlib::PlaceOnTop,
                })
            }
            // The pointer moved into a window. Grab and inferior crossings
            // say nothing about which window the user is pointing at.
            xlib::EnterNotify => {
                let event = xlib::XCrossingEvent::from(raw_event);
                if event.mode != xlib::NotifyNormal || event.detail == xlib::NotifyInferior {
                    return None;
                }
                Some(DisplayEvent::Enter {
                    window: WindowHandle(event.window),
                    time: event.time,
                })
            }
            // The holder is re-queried when handled, so the event body does
            // not matter; FocusOut says nothing FocusIn does not.
            xlib::FocusIn => Some(DisplayEvent::FocusIn),
            xlib::ClientMessage => {
                let event = xlib::XClientMessageEvent::from(raw_event);
                event_translate_client_message::from_event(xw, event)
            }
            xlib::PropertyNotify => {
                let event = xlib::XPropertyEvent::from(raw_event);
                event_translate_property_notify::from_event(xw, event)
            }
            xlib::ButtonPress => Some(DisplayEvent::ButtonPress(from_button(raw_event))),
            xlib::ButtonRelease => Some(DisplayEvent::ButtonRelease(from_button(raw_event))),
            xlib::MotionNotify => {
                let event = xlib::XMotionEvent::from(raw_event);
                Some(DisplayEvent::Motion(MotionEvent {
                    window: WindowHandle(event.window),
                    subwindow: WindowHandle(event.subwindow),
                    x: event.x,
                    y: event.y,
                    x_root: event.x_root,
                    y_root: event.y_root,
                }))
            }
            // Only the last expose in a series triggers a repaint.
            xlib::Expose => {
                let event = xlib::XExposeEvent::from(raw_event);
                (event.count == 0).then(|| DisplayEvent::Expose(WindowHandle(event.window)))
            }
            // `new` set means the window changed its colormap attribute;
            // clear means an install or uninstall, which we caused.
            xlib::ColormapNotify => {
                let event = xlib::XColormapEvent::from(raw_event);
                (event.new != xlib::False).then(|| DisplayEvent::ColormapChange {
                    window: WindowHandle(event.window),
                    colormap: (event.colormap != 0).then_some(event.colormap),
                })
            }
            _other => None,
        }
    }
}

fn from_configure_request(raw_event: xlib::XEvent) -> DisplayEvent {
    let event = xlib::XConfigureRequestEvent::from(raw_event);
    let has = |bit: c_ushort| event.value_mask & c_ulong::from(bit) != 0;
    let changes = WindowChanges {
        x: has(xlib::CWX).then_some(event.x),
        y: has(xlib::CWY).then_some(event.y),
        width: has(xlib::CWWidth).then_some(event.width),
        height: has(xlib::CWHeight).then_some(event.height),
        border_width: has(xlib::CWBorderWidth).then_some(event.border_width),
        sibling: has(xlib::CWSibling).then_some(WindowHandle(event.above)),
        stack_mode: has(xlib::CWStackMode).then_some(event.detail),
    };
    DisplayEvent::ConfigureRequest {
        window: WindowHandle(event.window),
        changes,
    }
}

fn from_button(raw_event: xlib::XEvent) -> ButtonEvent {
    let event = xlib::XButtonEvent::from(raw_event);
    ButtonEvent {
        window: WindowHandle(event.window),
        root: WindowHandle(event.root),
        button: event.button,
        x: event.x,
        y: event.y,
        x_root: event.x_root,
        y_root: event.y_root,
        time: event.time,
        shift: event.state & xlib::ShiftMask != 0,
    }
}
