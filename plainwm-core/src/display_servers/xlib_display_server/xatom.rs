use std::ffi::CString;
use x11_dl::xlib;

// Only atoms we actually honour belong here; _NET_SUPPORTED is built from
// this set, and advertising more than we implement misleads pagers.

#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub struct XAtom {
    pub WMProtocols: xlib::Atom,
    pub WMDelete: xlib::Atom,
    pub WMState: xlib::Atom,
    pub WMTakeFocus: xlib::Atom,
    pub WMChangeState: xlib::Atom,
    pub WMColormapWindows: xlib::Atom,
    pub MotifWMHints: xlib::Atom,

    pub NetSupported: xlib::Atom,
    pub NetClientList: xlib::Atom,
    pub NetClientListStacking: xlib::Atom,
    pub NetNumberOfDesktops: xlib::Atom,
    pub NetDesktopGeometry: xlib::Atom,
    pub NetDesktopViewport: xlib::Atom,
    pub NetCurrentDesktop: xlib::Atom,
    pub NetActiveWindow: xlib::Atom,
    pub NetWorkarea: xlib::Atom,
    pub NetSupportingWmCheck: xlib::Atom,

    pub NetCloseWindow: xlib::Atom,
    pub NetMoveResizeWindow: xlib::Atom,
    pub NetWMMoveResize: xlib::Atom,

    pub NetWMName: xlib::Atom,
    pub NetWMWindowType: xlib::Atom,
    pub NetWMState: xlib::Atom,
    pub NetWMAction: xlib::Atom,
    pub NetWMStrut: xlib::Atom,
    pub NetWMStrutPartial: xlib::Atom,

    pub NetWMWindowTypeDesktop: xlib::Atom,
    pub NetWMWindowTypeDock: xlib::Atom,
    pub NetWMWindowTypeToolbar: xlib::Atom,
    pub NetWMWindowTypeMenu: xlib::Atom,
    pub NetWMWindowTypeUtility: xlib::Atom,
    pub NetWMWindowTypeSplash: xlib::Atom,
    pub NetWMWindowTypeDialog: xlib::Atom,
    pub NetWMWindowTypeNormal: xlib::Atom,

    pub NetWMStateSkipTaskbar: xlib::Atom,
    pub NetWMStateSkipPager: xlib::Atom,
    pub NetWMStateHidden: xlib::Atom,
    pub NetWMStateFullscreen: xlib::Atom,
    pub NetWMStateAbove: xlib::Atom,
    pub NetWMStateBelow: xlib::Atom,

    pub NetWMActionMove: xlib::Atom,
    pub NetWMActionResize: xlib::Atom,
    pub NetWMActionFullscreen: xlib::Atom,
    pub NetWMActionClose: xlib::Atom,

    pub UTF8String: xlib::Atom,
}

impl XAtom {
    pub fn net_supported(&self) -> Vec<xlib::Atom> {
        vec![
            self.NetSupported,
            self.NetClientList,
            self.NetClientListStacking,
            self.NetNumberOfDesktops,
            self.NetDesktopGeometry,
            self.NetDesktopViewport,
            self.NetCurrentDesktop,
            self.NetActiveWindow,
            self.NetWorkarea,
            self.NetSupportingWmCheck,
            self.NetCloseWindow,
            self.NetMoveResizeWindow,
            self.NetWMMoveResize,
            self.NetWMName,
            self.NetWMWindowType,
            self.NetWMState,
            self.NetWMAction,
            self.NetWMStrut,
            self.NetWMStrutPartial,
            self.NetWMWindowTypeDesktop,
            self.NetWMWindowTypeDock,
            self.NetWMWindowTypeToolbar,
            self.NetWMWindowTypeMenu,
            self.NetWMWindowTypeUtility,
            self.NetWMWindowTypeSplash,
            self.NetWMWindowTypeDialog,
            self.NetWMWindowTypeNormal,
            self.NetWMStateSkipTaskbar,
            self.NetWMStateSkipPager,
            self.NetWMStateHidden,
            self.NetWMStateFullscreen,
            self.NetWMStateAbove,
            self.NetWMStateBelow,
            self.NetWMActionMove,
            self.NetWMActionResize,
            self.NetWMActionFullscreen,
            self.NetWMActionClose,
        ]
    }

    pub const fn get_name(&self, atom: xlib::Atom) -> &str {
        match atom {
            a if a == self.WMProtocols => "WM_PROTOCOLS",
            a if a == self.WMDelete => "WM_DELETE_WINDOW",
            a if a == self.WMState => "WM_STATE",
            a if a == self.WMTakeFocus => "WM_TAKE_FOCUS",
            a if a == self.WMChangeState => "WM_CHANGE_STATE",
            a if a == self.WMColormapWindows => "WM_COLORMAP_WINDOWS",
            a if a == self.MotifWMHints => "_MOTIF_WM_HINTS",

            a if a == self.NetSupported => "_NET_SUPPORTED",
            a if a == self.NetClientList => "_NET_CLIENT_LIST",
            a if a == self.NetClientListStacking => "_NET_CLIENT_LIST_STACKING",
            a if a == self.NetNumberOfDesktops => "_NET_NUMBER_OF_DESKTOPS",
            a if a == self.NetDesktopGeometry => "_NET_DESKTOP_GEOMETRY",
            a if a == self.NetDesktopViewport => "_NET_DESKTOP_VIEWPORT",
            a if a == self.NetCurrentDesktop => "_NET_CURRENT_DESKTOP",
            a if a == self.NetActiveWindow => "_NET_ACTIVE_WINDOW",
            a if a == self.NetWorkarea => "_NET_WORKAREA",
            a if a == self.NetSupportingWmCheck => "_NET_SUPPORTING_WM_CHECK",

            a if a == self.NetCloseWindow => "_NET_CLOSE_WINDOW",
            a if a == self.NetMoveResizeWindow => "_NET_MOVERESIZE_WINDOW",
            a if a == self.NetWMMoveResize => "_NET_WM_MOVERESIZE",

            a if a == self.NetWMName => "_NET_WM_NAME",
            a if a == self.NetWMWindowType => "_NET_WM_WINDOW_TYPE",
            a if a == self.NetWMState => "_NET_WM_STATE",
            a if a == self.NetWMAction => "_NET_WM_ALLOWED_ACTIONS",
            a if a == self.NetWMStrut => "_NET_WM_STRUT",
            a if a == self.NetWMStrutPartial => "_NET_WM_STRUT_PARTIAL",

            a if a == self.NetWMWindowTypeDesktop => "_NET_WM_WINDOW_TYPE_DESKTOP",
            a if a == self.NetWMWindowTypeDock => "_NET_WM_WINDOW_TYPE_DOCK",
            a if a == self.NetWMWindowTypeToolbar => "_NET_WM_WINDOW_TYPE_TOOLBAR",
            a if a == self.NetWMWindowTypeMenu => "_NET_WM_WINDOW_TYPE_MENU",
            a if a == self.NetWMWindowTypeUtility => "_NET_WM_WINDOW_TYPE_UTILITY",
            a if a == self.NetWMWindowTypeSplash => "_NET_WM_WINDOW_TYPE_SPLASH",
            a if a == self.NetWMWindowTypeDialog => "_NET_WM_WINDOW_TYPE_DIALOG",
            a if a == self.NetWMWindowTypeNormal => "_NET_WM_WINDOW_TYPE_NORMAL",

            a if a == self.NetWMStateSkipTaskbar => "_NET_WM_STATE_SKIP_TASKBAR",
            a if a == self.NetWMStateSkipPager => "_NET_WM_STATE_SKIP_PAGER",
            a if a == self.NetWMStateHidden => "_NET_WM_STATE_HIDDEN",
            a if a == self.NetWMStateFullscreen => "_NET_WM_STATE_FULLSCREEN",
            a if a == self.NetWMStateAbove => "_NET_WM_STATE_ABOVE",
            a if a == self.NetWMStateBelow => "_NET_WM_STATE_BELOW",

            a if a == self.NetWMActionMove => "_NET_WM_ACTION_MOVE",
            a if a == self.NetWMActionResize => "_NET_WM_ACTION_RESIZE",
            a if a == self.NetWMActionFullscreen => "_NET_WM_ACTION_FULLSCREEN",
            a if a == self.NetWMActionClose => "_NET_WM_ACTION_CLOSE",

            a if a == self.UTF8String => "UTF8_STRING",
            _ => "(UNKNOWN)",
        }
    }

    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        Self {
            WMProtocols: from(xlib, dpy, "WM_PROTOCOLS"),
            WMDelete: from(xlib, dpy, "WM_DELETE_WINDOW"),
            WMState: from(xlib, dpy, "WM_STATE"),
            WMTakeFocus: from(xlib, dpy, "WM_TAKE_FOCUS"),
            WMChangeState: from(xlib, dpy, "WM_CHANGE_STATE"),
            WMColormapWindows: from(xlib, dpy, "WM_COLORMAP_WINDOWS"),
            MotifWMHints: from(xlib, dpy, "_MOTIF_WM_HINTS"),

            NetSupported: from(xlib, dpy, "_NET_SUPPORTED"),
            NetClientList: from(xlib, dpy, "_NET_CLIENT_LIST"),
            NetClientListStacking: from(xlib, dpy, "_NET_CLIENT_LIST_STACKING"),
            NetNumberOfDesktops: from(xlib, dpy, "_NET_NUMBER_OF_DESKTOPS"),
            NetDesktopGeometry: from(xlib, dpy, "_NET_DESKTOP_GEOMETRY"),
            NetDesktopViewport: from(xlib, dpy, "_NET_DESKTOP_VIEWPORT"),
            NetCurrentDesktop: from(xlib, dpy, "_NET_CURRENT_DESKTOP"),
            NetActiveWindow: from(xlib, dpy, "_NET_ACTIVE_WINDOW"),
            NetWorkarea: from(xlib, dpy, "_NET_WORKAREA"),
            NetSupportingWmCheck: from(xlib, dpy, "_NET_SUPPORTING_WM_CHECK"),

            NetCloseWindow: from(xlib, dpy, "_NET_CLOSE_WINDOW"),
            NetMoveResizeWindow: from(xlib, dpy, "_NET_MOVERESIZE_WINDOW"),
            NetWMMoveResize: from(xlib, dpy, "_NET_WM_MOVERESIZE"),

            NetWMName: from(xlib, dpy, "_NET_WM_NAME"),
            NetWMWindowType: from(xlib, dpy, "_NET_WM_WINDOW_TYPE"),
            NetWMState: from(xlib, dpy, "_NET_WM_STATE"),
            NetWMAction: from(xlib, dpy, "_NET_WM_ALLOWED_ACTIONS"),
            NetWMStrut: from(xlib, dpy, "_NET_WM_STRUT"),
            NetWMStrutPartial: from(xlib, dpy, "_NET_WM_STRUT_PARTIAL"),

            NetWMWindowTypeDesktop: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DESKTOP"),
            NetWMWindowTypeDock: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DOCK"),
            NetWMWindowTypeToolbar: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_TOOLBAR"),
            NetWMWindowTypeMenu: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_MENU"),
            NetWMWindowTypeUtility: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_UTILITY"),
            NetWMWindowTypeSplash: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_SPLASH"),
            NetWMWindowTypeDialog: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DIALOG"),
            NetWMWindowTypeNormal: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_NORMAL"),

            NetWMStateSkipTaskbar: from(xlib, dpy, "_NET_WM_STATE_SKIP_TASKBAR"),
            NetWMStateSkipPager: from(xlib, dpy, "_NET_WM_STATE_SKIP_PAGER"),
            NetWMStateHidden: from(xlib, dpy, "_NET_WM_STATE_HIDDEN"),
            NetWMStateFullscreen: from(xlib, dpy, "_NET_WM_STATE_FULLSCREEN"),
            NetWMStateAbove: from(xlib, dpy, "_NET_WM_STATE_ABOVE"),
            NetWMStateBelow: from(xlib, dpy, "_NET_WM_STATE_BELOW"),

            NetWMActionMove: from(xlib, dpy, "_NET_WM_ACTION_MOVE"),
            NetWMActionResize: from(xlib, dpy, "_NET_WM_ACTION_RESIZE"),
            NetWMActionFullscreen: from(xlib, dpy, "_NET_WM_ACTION_FULLSCREEN"),
            NetWMActionClose: from(xlib, dpy, "_NET_WM_ACTION_CLOSE"),

            UTF8String: from(xlib, dpy, "UTF8_STRING"),
        }
    }
}

fn from(xlib: &xlib::Xlib, dpy: *mut xlib::Display, s: &str) -> xlib::Atom {
    unsafe {
        (xlib.XInternAtom)(
            dpy,
            CString::new(s).unwrap_or_default().into_raw(),
            xlib::False,
        )
    }
}
