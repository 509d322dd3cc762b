use serde::{Deserialize, Serialize};

use super::{Client, WindowHandle};

/// Every window the manager currently knows about, newest first.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Registry {
    clients: Vec<Client>,
}

impl Registry {
    /// Starts tracking `window` on `screen`. Root windows and the null
    /// window are never tracked. A handle already known, as a client window
    /// or as a frame, yields the existing entry unchanged.
    pub fn add(
        &mut self,
        window: WindowHandle,
        root: WindowHandle,
        screen: usize,
    ) -> Option<&mut Client> {
        if window.is_none() || window == root {
            return None;
        }
        if let Some(i) = self.clients.iter().position(|c| c.owns(window)) {
            return Some(&mut self.clients[i]);
        }
        self.clients.insert(0, Client::new(window, screen));
        Some(&mut self.clients[0])
    }

    /// Finds the client owning `handle`, whether it is the client window
    /// itself or the frame it sits in.
    #[must_use]
    pub fn get(&self, handle: WindowHandle) -> Option<&Client> {
        self.clients.iter().find(|c| c.owns(handle))
    }

    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.owns(handle))
    }

    /// Drops the client whose window is exactly `window`.
    pub fn remove(&mut self, window: WindowHandle) -> Option<Client> {
        let i = self.clients.iter().position(|c| c.window == window)?;
        Some(self.clients.remove(i))
    }

    #[must_use]
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Client> {
        self.clients.iter_mut()
    }

    pub fn on_screen(&self, screen: usize) -> impl Iterator<Item = &Client> {
        self.clients.iter().filter(move |c| c.screen == screen)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
