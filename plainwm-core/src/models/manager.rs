use std::sync::{atomic::AtomicBool, Arc};

use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::state::State;
use crate::utils::child_process::Children;

/// Ties together the mutable state, the immutable configuration and the
/// display server connection.
#[derive(Debug)]
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,
    pub display_server: SERVER,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub(crate) terminate_requested: Arc<AtomicBool>,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    /// Connects to the display and prepares an empty state.
    ///
    /// # Errors
    ///
    /// Errors if the display connection cannot be established, most
    /// commonly because the X server is unreachable or the configured
    /// fonts cannot be loaded.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config)?;
        let mut state = State::new(&config);
        state.frame.title_height = display_server.title_height();

        Ok(Self {
            state,
            config,
            display_server,
            children: Children::default(),
            reap_requested: Arc::default(),
            terminate_requested: Arc::default(),
        })
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }

    pub fn register_terminate_hook(&self) {
        crate::utils::signals::register_terminate_hook(self.terminate_requested.clone());
    }
}

#[cfg(test)]
impl Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer> {
    pub fn new_test() -> Self {
        Self::new(crate::config::TestConfig {
            border_width: 6,
            focus_mode: None,
        })
        .unwrap()
    }

    pub fn new_test_click_to_focus() -> Self {
        Self::new(crate::config::TestConfig {
            border_width: 6,
            focus_mode: Some(crate::config::FocusMode::Click),
        })
        .unwrap()
    }
}
