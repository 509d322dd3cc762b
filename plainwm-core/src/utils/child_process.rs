//! Tracks the shell commands spawned from root-window button presses so
//! they can be reaped when `SIGCHLD` arrives.
use std::collections::HashMap;
use std::env;
use std::process::{Child, Command, Stdio};
use std::sync::{atomic::AtomicBool, Arc};

pub type ChildID = u32;

/// A struct managing children processes.
#[derive(Debug, Default)]
pub struct Children {
    inner: HashMap<ChildID, Child>,
}

impl Children {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Insert a `Child` in the `Children`.
    ///
    /// # Returns
    /// - `true` if `child` is a new child-process
    /// - `false` if `child` is already known
    pub fn insert(&mut self, child: Child) -> bool {
        self.inner.insert(child.id(), child).is_none()
    }

    /// Remove all children processes which finished.
    pub fn remove_finished_children(&mut self) {
        self.inner
            .retain(|_, child| child.try_wait().map_or(true, |ret| ret.is_none()));
    }
}

/// Register the `SIGCHLD` signal handler. Once the signal is received,
/// the flag will be set true. User needs to manually clear the flag.
pub fn register_child_hook(flag: Arc<AtomicBool>) {
    _ = signal_hook::flag::register(signal_hook::consts::signal::SIGCHLD, flag)
        .map_err(|err| tracing::error!("Cannot register SIGCHLD signal handler: {:?}", err));
}

/// Sends command to the user's shell for execution, with DISPLAY pointing
/// at the screen the command was invoked on.
/// Assumes STDIN/STDERR/STDOUT unwanted.
pub fn exec_shell(
    command: &str,
    display: Option<&str>,
    children: &mut Children,
) -> Option<ChildID> {
    let shell = env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_owned());
    let mut builder = Command::new(shell);
    builder
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(display) = display {
        builder.env("DISPLAY", display);
    }
    let child = builder.spawn().ok()?;
    let pid = child.id();
    children.insert(child);
    Some(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_children_are_tracked_until_reaped() {
        let mut children = Children::new();
        let pid = exec_shell("true", None, &mut children);
        assert!(pid.is_some());
        assert_eq!(children.len(), 1);
        // The command exits immediately; give it a moment, then reap.
        std::thread::sleep(std::time::Duration::from_millis(50));
        children.remove_finished_children();
        assert!(children.is_empty());
    }

    #[test]
    fn running_children_survive_a_reap() {
        let mut children = Children::new();
        exec_shell("sleep 5", None, &mut children);
        children.remove_finished_children();
        assert_eq!(children.len(), 1);
    }
}
