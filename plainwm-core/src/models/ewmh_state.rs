use serde::{Deserialize, Serialize};

/// A _NET_WM_STATE transition, as carried by client messages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    Remove,
    Add,
    Toggle,
}

impl StateAction {
    /// Decodes the action field of a _NET_WM_STATE message. Values outside
    /// the protocol come back as `None` and must leave state unchanged.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Remove),
            1 => Some(Self::Add),
            2 => Some(Self::Toggle),
            _ => None,
        }
    }

    #[must_use]
    pub fn apply(self, flag: bool) -> bool {
        match self {
            Self::Remove => false,
            Self::Add => true,
            Self::Toggle => !flag,
        }
    }
}

/// One of the _NET_WM_STATE properties this manager tracks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EwmhProperty {
    SkipTaskbar,
    SkipPager,
    Fullscreen,
    Above,
    Below,
}

/// The _NET_WM_STATE flags this manager tracks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EwmhState {
    pub skip_taskbar: bool,
    pub skip_pager: bool,
    pub fullscreen: bool,
    pub above: bool,
    pub below: bool,
}

impl EwmhState {
    #[must_use]
    pub fn get(&self, property: EwmhProperty) -> bool {
        match property {
            EwmhProperty::SkipTaskbar => self.skip_taskbar,
            EwmhProperty::SkipPager => self.skip_pager,
            EwmhProperty::Fullscreen => self.fullscreen,
            EwmhProperty::Above => self.above,
            EwmhProperty::Below => self.below,
        }
    }

    pub fn set(&mut self, property: EwmhProperty, value: bool) {
        match property {
            EwmhProperty::SkipTaskbar => self.skip_taskbar = value,
            EwmhProperty::SkipPager => self.skip_pager = value,
            EwmhProperty::Fullscreen => self.fullscreen = value,
            EwmhProperty::Above => self.above = value,
            EwmhProperty::Below => self.below = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_actions_decode() {
        assert_eq!(StateAction::from_raw(0), Some(StateAction::Remove));
        assert_eq!(StateAction::from_raw(1), Some(StateAction::Add));
        assert_eq!(StateAction::from_raw(2), Some(StateAction::Toggle));
        assert_eq!(StateAction::from_raw(3), None);
        assert_eq!(StateAction::from_raw(-1), None);
    }

    #[test]
    fn toggle_flips_add_and_remove_force() {
        assert!(StateAction::Toggle.apply(false));
        assert!(!StateAction::Toggle.apply(true));
        assert!(StateAction::Add.apply(false));
        assert!(StateAction::Add.apply(true));
        assert!(!StateAction::Remove.apply(true));
    }
}
