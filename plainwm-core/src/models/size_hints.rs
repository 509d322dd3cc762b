use serde::{Deserialize, Serialize};

/// ICCCM window gravity, used to keep the advertised corner fixed when the
/// frame is added around a freshly adopted window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
    Static,
}

impl Gravity {
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Self::NorthWest),
            2 => Some(Self::North),
            3 => Some(Self::NorthEast),
            4 => Some(Self::West),
            5 => Some(Self::Center),
            6 => Some(Self::East),
            7 => Some(Self::SouthWest),
            8 => Some(Self::South),
            9 => Some(Self::SouthEast),
            10 => Some(Self::Static),
            _ => None,
        }
    }
}

/// WM_NORMAL_HINTS as read from the server. Absent fields stay `None`;
/// [`SizeHints::constraints`] fills in the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeHints {
    /// The user gave the position (USPosition).
    pub user_position: bool,
    /// The program gave the position (PPosition).
    pub program_position: bool,
    pub min: Option<(i32, i32)>,
    pub max: Option<(i32, i32)>,
    pub inc: Option<(i32, i32)>,
    pub base: Option<(i32, i32)>,
    pub gravity: Option<Gravity>,
}

/// The effective size constraints the sanitizer works with. All values are in
/// outer (bordered) coordinates for framed clients. A zero increment freezes
/// that axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConstraints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
    pub width_inc: i32,
    pub height_inc: i32,
    pub base_width: i32,
    pub base_height: i32,
}

impl Default for SizeConstraints {
    fn default() -> Self {
        SizeHints::default().constraints(false, 0)
    }
}

impl SizeHints {
    /// Turns raw hints into the constraint set used for all geometry
    /// decisions. Framed clients get their min/max widened by the border on
    /// both sides; a client declaring no minimum gets one big enough to keep
    /// the box and edges grabbable; identical min and max on an axis freezes
    /// it by zeroing the increment.
    #[must_use]
    pub fn constraints(&self, framed: bool, border: i32) -> SizeConstraints {
        let (mut min_w, mut min_h) = match self.min {
            Some((w, h)) if framed => (w + 2 * border, h + 2 * border),
            Some((w, h)) => (w, h),
            None if framed => (2 * (2 * border), 2 * (2 * border)),
            None => (1, 1),
        };
        if min_w < 1 {
            min_w = 1;
        }
        if min_h < 1 {
            min_h = 1;
        }

        let (max_w, max_h) = match self.max {
            Some((w, h)) if framed => (Some(w + 2 * border), Some(h + 2 * border)),
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };

        let (base_w, base_h) = self.base.unwrap_or((0, 0));
        let (mut inc_w, mut inc_h) = self.inc.unwrap_or((1, 1));

        if Some(min_w) == max_w {
            inc_w = 0;
        }
        if Some(min_h) == max_h {
            inc_h = 0;
        }

        SizeConstraints {
            min_width: min_w,
            min_height: min_h,
            max_width: max_w,
            max_height: max_h,
            width_inc: inc_w,
            height_inc: inc_h,
            base_width: base_w,
            base_height: base_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_axes_resizable() {
        let c = SizeHints::default().constraints(true, 6);
        assert_eq!(c.min_width, 24);
        assert_eq!(c.min_height, 24);
        assert_eq!(c.max_width, None);
        assert_eq!(c.width_inc, 1);
        assert_eq!(c.base_width, 0);
    }

    #[test]
    fn border_widens_declared_min_and_max() {
        let hints = SizeHints {
            min: Some((20, 30)),
            max: Some((100, 200)),
            ..Default::default()
        };
        let c = hints.constraints(true, 6);
        assert_eq!((c.min_width, c.min_height), (32, 42));
        assert_eq!((c.max_width, c.max_height), (Some(112), Some(212)));
    }

    #[test]
    fn unframed_hints_pass_through() {
        let hints = SizeHints {
            min: Some((20, 30)),
            ..Default::default()
        };
        let c = hints.constraints(false, 6);
        assert_eq!((c.min_width, c.min_height), (20, 30));
    }

    #[test]
    fn equal_min_max_freezes_the_axis() {
        let hints = SizeHints {
            min: Some((20, 10)),
            max: Some((20, 40)),
            inc: Some((1, 1)),
            ..Default::default()
        };
        let c = hints.constraints(false, 0);
        assert_eq!(c.width_inc, 0);
        assert_eq!(c.height_inc, 1);
    }
}
