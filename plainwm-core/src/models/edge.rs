use serde::{Deserialize, Serialize};

/// The edge or corner an interactive resize is dragging.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Edge {
    /// Dragging this edge moves the top of the window.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    /// Dragging this edge moves the bottom of the window.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// Dragging this edge moves the left side of the window.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    /// Dragging this edge moves the right side of the window.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }
}

/// Where inside a frame window a pointer position falls.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameZone {
    /// The close box in the top-left corner.
    Box,
    /// The title strip; dragging here moves the window.
    Title,
    /// One of the eight resize zones.
    Edge(Edge),
    /// Anywhere else (normally covered by the client window).
    Interior,
}
