use serde::{Deserialize, Serialize};

/// How keyboard focus follows the mouse.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    /// Focus follows the pointer into a window.
    Enter,
    /// Focus changes only on a click.
    Click,
}

impl Default for FocusMode {
    fn default() -> Self {
        Self::Enter
    }
}

/// Start-up preferences. Read once; immutable for the process lifetime.
pub trait Config {
    fn border_width(&self) -> i32;

    fn title_font(&self) -> String;

    fn popup_font(&self) -> String;

    fn focus_mode(&self) -> FocusMode;

    /// Shell command bound to button 1 on the root window.
    fn button1_command(&self) -> Option<String>;

    /// Shell command bound to button 2 on the root window.
    fn button2_command(&self) -> Option<String>;

    /// How close (in pixels) a dragged window edge must come to a reserved
    /// area boundary before it snaps onto it.
    fn edge_resistance(&self) -> i32;

    /// Where auto-placement starts on a fresh screen.
    fn placement_start(&self) -> (i32, i32);

    /// How far each auto-placed window is offset from the previous one.
    fn placement_step(&self) -> i32;

    /// Offset from the reserved area the placement cursor resets to once it
    /// passes the middle of the screen.
    fn placement_reset_offset(&self) -> i32;
}

pub const DEFAULT_BORDER: i32 = 6;
pub const DEFAULT_EDGE_RESISTANCE: i32 = 32;
pub const DEFAULT_TITLE_FONT: &str = "-*-lucida-bold-r-normal-sans-14-*-*-*-p-*-iso10646-1";
pub const DEFAULT_POPUP_FONT: &str = "-*-lucida-medium-r-normal-sans-12-*-*-*-p-*-iso10646-1";
pub const DEFAULT_TERMINAL: &str = "xterm";

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
#[derive(Default)]
pub struct TestConfig {
    pub border_width: i32,
    pub focus_mode: Option<FocusMode>,
}

#[cfg(test)]
impl Config for TestConfig {
    fn border_width(&self) -> i32 {
        self.border_width
    }
    fn title_font(&self) -> String {
        DEFAULT_TITLE_FONT.to_owned()
    }
    fn popup_font(&self) -> String {
        DEFAULT_POPUP_FONT.to_owned()
    }
    fn focus_mode(&self) -> FocusMode {
        self.focus_mode.unwrap_or_default()
    }
    fn button1_command(&self) -> Option<String> {
        None
    }
    fn button2_command(&self) -> Option<String> {
        Some(DEFAULT_TERMINAL.to_owned())
    }
    fn edge_resistance(&self) -> i32 {
        DEFAULT_EDGE_RESISTANCE
    }
    fn placement_start(&self) -> (i32, i32) {
        (100, 100)
    }
    fn placement_step(&self) -> i32 {
        10
    }
    fn placement_reset_offset(&self) -> i32 {
        20
    }
}
