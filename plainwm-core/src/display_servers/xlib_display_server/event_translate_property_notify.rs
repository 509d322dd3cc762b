use x11_dl::xlib;

use super::XWrap;
use crate::display_event::{DisplayEvent, PropertyKind};
use crate::models::WindowHandle;

/// Classifies a property change down to the handful the manager reacts
/// to. The new value is re-read when the event is handled, so deletions
/// translate the same way as updates.
pub fn from_event(xw: &XWrap, event: xlib::XPropertyEvent) -> Option<DisplayEvent> {
    tracing::trace!(
        "PropertyNotify: {} : {:?}",
        event.window,
        xw.atoms.get_name(event.atom)
    );
    let kind = match event.atom {
        xlib::XA_WM_NAME => PropertyKind::Name,
        xlib::XA_WM_TRANSIENT_FOR => PropertyKind::TransientFor,
        xlib::XA_WM_NORMAL_HINTS => PropertyKind::NormalHints,
        _ => {
            if event.atom == xw.atoms.NetWMName {
                PropertyKind::Name
            } else if event.atom == xw.atoms.WMColormapWindows {
                PropertyKind::ColormapWindows
            } else if event.atom == xw.atoms.NetWMStrut || event.atom == xw.atoms.NetWMStrutPartial
            {
                PropertyKind::Strut
            } else {
                return None;
            }
        }
    };
    Some(DisplayEvent::PropertyChange {
        window: WindowHandle(event.window),
        kind,
    })
}
