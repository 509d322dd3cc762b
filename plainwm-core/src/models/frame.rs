use serde::{Deserialize, Serialize};

use super::{Bounds, Edge, FrameZone};

/// The fixed frame dimensions: the border width from the configuration and
/// the title-bar height derived from the loaded font. Established once at
/// start-up.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameMetrics {
    pub border: i32,
    pub title_height: i32,
}

impl FrameMetrics {
    #[must_use]
    pub const fn new(border: i32, title_height: i32) -> Self {
        Self {
            border,
            title_height,
        }
    }

    /// The unit the close box is measured in.
    #[must_use]
    pub const fn quarter(&self) -> i32 {
        (self.border + self.title_height) / 4
    }

    /// The close box rectangle, in frame coordinates.
    #[must_use]
    pub const fn box_bounds(&self) -> Bounds {
        let quarter = self.quarter();
        Bounds::new(quarter + 2, quarter, 2 * quarter, 2 * quarter)
    }

    /// The frame rectangle for a client whose bordered interior is `bounds`.
    /// The frame adds the title bar above the interior.
    #[must_use]
    pub const fn frame_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new(
            bounds.x,
            bounds.y - self.title_height,
            bounds.width,
            bounds.height + self.title_height,
        )
    }

    /// Where the client window sits inside its frame.
    #[must_use]
    pub const fn interior_origin(&self) -> (i32, i32) {
        (self.border, self.border + self.title_height)
    }

    /// The client window's size given its bordered interior size.
    #[must_use]
    pub const fn interior_size(&self, bounds: Bounds) -> (i32, i32) {
        (bounds.width - 2 * self.border, bounds.height - 2 * self.border)
    }

    /// Hit-tests a frame-relative pointer position against the close box,
    /// the eight resize zones and the title strip. `width` and `height` are
    /// the client's bordered interior dimensions (the frame itself is one
    /// title bar taller). The tests run in a fixed order; the box wins over
    /// the top-left corner zone it overlaps.
    #[must_use]
    pub fn zone_at(&self, x: i32, y: i32, width: i32, height: i32) -> FrameZone {
        let border = self.border;
        let title = self.title_height;
        let quarter = self.quarter();

        if x > quarter + 2 && x < 3 * quarter + 3 && y > quarter && y <= 3 * quarter {
            FrameZone::Box
        } else if x <= border && y <= border {
            FrameZone::Edge(Edge::TopLeft)
        } else if x >= width - border && y <= border {
            FrameZone::Edge(Edge::TopRight)
        } else if x >= width - border && y >= height + title - border {
            FrameZone::Edge(Edge::BottomRight)
        } else if x <= border && y >= height + title - border {
            FrameZone::Edge(Edge::BottomLeft)
        } else if x > border && x < width - border && y < border {
            FrameZone::Edge(Edge::Top)
        } else if x > border && x < width - border && y >= border && y < title + border {
            FrameZone::Title
        } else if x > width - border && y > border && y < height + title - border {
            FrameZone::Edge(Edge::Right)
        } else if x > border && x < width - border && y > height - border {
            FrameZone::Edge(Edge::Bottom)
        } else if x < border && y > border && y < height + title - border {
            FrameZone::Edge(Edge::Left)
        } else {
            FrameZone::Interior
        }
    }
}
