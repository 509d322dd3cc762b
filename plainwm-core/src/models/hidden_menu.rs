use serde::{Deserialize, Serialize};

use super::{Bounds, WindowHandle};

/// Horizontal padding added around the widest label.
const LABEL_PAD: i32 = 4;

/// Windows currently iconified, most recently hidden first. The root popup
/// menu lists them in this order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HiddenMenu {
    items: Vec<WindowHandle>,
}

impl HiddenMenu {
    pub fn push(&mut self, window: WindowHandle) {
        self.items.insert(0, window);
    }

    /// Takes `window` off the menu, returning the slot it occupied.
    pub fn remove(&mut self, window: WindowHandle) -> Option<usize> {
        let i = self.items.iter().position(|w| *w == window)?;
        self.items.remove(i);
        Some(i)
    }

    /// Takes the window in slot `n` off the menu. Slots past the end (a
    /// release outside the menu, or a window that vanished while the menu
    /// was up) yield `None`.
    pub fn take_nth(&mut self, n: usize) -> Option<WindowHandle> {
        if n < self.items.len() {
            Some(self.items.remove(n))
        } else {
            None
        }
    }

    #[must_use]
    pub fn index_of(&self, window: WindowHandle) -> Option<usize> {
        self.items.iter().position(|w| *w == window)
    }

    #[must_use]
    pub fn contains(&self, window: WindowHandle) -> bool {
        self.index_of(window).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.items.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Popup menu layout, snapshotted when the menu goes up. Selection tracking
/// works from this copy so pointer motion costs no server round trip.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuGeometry {
    pub origin: (i32, i32),
    pub width: i32,
    pub item_height: i32,
    pub count: usize,
}

impl MenuGeometry {
    /// Sizes the menu from the measured label widths: wide enough for the
    /// widest label plus padding and a border's worth of slack.
    #[must_use]
    pub fn compute(label_widths: &[i32], item_height: i32, border: i32) -> Self {
        let widest = label_widths
            .iter()
            .map(|w| w + LABEL_PAD)
            .max()
            .unwrap_or(0);
        Self {
            origin: (0, 0),
            width: widest + border,
            item_height,
            count: label_widths.len(),
        }
    }

    #[must_use]
    pub fn total_height(&self) -> i32 {
        self.item_height * self.count as i32
    }

    /// Centres the first item on the pointer, pulled back on-screen when
    /// that would hang the menu off an edge.
    pub fn place(&mut self, pointer: (i32, i32), screen: &Bounds) {
        let mut x = pointer.0 - self.width / 2;
        let mut y = pointer.1 - self.item_height / 2;
        if x + self.width > screen.right() {
            x = screen.right() - self.width;
        }
        if x < 0 {
            x = 0;
        }
        if y + self.total_height() > screen.bottom() {
            y = screen.bottom() - self.total_height();
        }
        if y < 0 {
            y = 0;
        }
        self.origin = (x, y);
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.origin.0, self.origin.1, self.width, self.total_height())
    }

    /// Which slot the root-coordinate point falls in, if any.
    #[must_use]
    pub fn item_at(&self, x_root: i32, y_root: i32) -> Option<usize> {
        let x = x_root - self.origin.0;
        let y = y_root - self.origin.1;
        if x < 0 || x > self.width || y < 0 || y >= self.total_height() {
            return None;
        }
        Some((y / self.item_height) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_most_recently_hidden_first() {
        let mut menu = HiddenMenu::default();
        menu.push(WindowHandle(1));
        menu.push(WindowHandle(2));
        let order: Vec<_> = menu.iter().collect();
        assert_eq!(order, vec![WindowHandle(2), WindowHandle(1)]);
        assert_eq!(menu.index_of(WindowHandle(1)), Some(1));
    }

    #[test]
    fn take_nth_past_the_end_is_a_no_op() {
        let mut menu = HiddenMenu::default();
        menu.push(WindowHandle(1));
        assert_eq!(menu.take_nth(3), None);
        assert_eq!(menu.take_nth(0), Some(WindowHandle(1)));
        assert!(menu.is_empty());
    }

    #[test]
    fn geometry_fits_the_widest_label() {
        let g = MenuGeometry::compute(&[30, 50, 10], 15, 6);
        assert_eq!(g.width, 60);
        assert_eq!(g.count, 3);
        assert_eq!(g.total_height(), 45);
    }

    #[test]
    fn placement_centres_the_first_item_and_stays_on_screen() {
        let screen = Bounds::new(0, 0, 800, 600);
        let mut g = MenuGeometry::compute(&[50], 14, 6);

        g.place((400, 300), &screen);
        assert_eq!(g.origin, (400 - g.width / 2, 300 - 7));

        g.place((2, 2), &screen);
        assert_eq!(g.origin, (0, 0));

        g.place((799, 599), &screen);
        assert_eq!(g.origin, (800 - g.width, 600 - g.total_height()));
    }

    #[test]
    fn item_lookup_translates_to_menu_coordinates() {
        let mut g = MenuGeometry::compute(&[50], 15, 6);
        g.count = 3;
        g.origin = (100, 100);

        assert_eq!(g.item_at(100, 100), Some(0));
        assert_eq!(g.item_at(100 + g.width, 144), Some(2));
        assert_eq!(g.item_at(100 + g.width + 1, 100), None);
        assert_eq!(g.item_at(99, 100), None);
        assert_eq!(g.item_at(100, 145), None);
        assert_eq!(g.item_at(100, 99), None);
    }
}
