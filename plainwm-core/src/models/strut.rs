use serde::{Deserialize, Serialize};

/// Screen-edge space reserved by a panel-like window (_NET_WM_STRUT), and
/// the per-screen aggregate of all such contributions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strut {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Strut {
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Per-edge maximum of two struts; the screen aggregate folds all
    /// clients through this.
    #[must_use]
    pub fn merge(&self, other: &Strut) -> Strut {
        Strut {
            left: self.left.max(other.left),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }
}
