//! Shared helpers that sit outside the window-management policy.
pub mod child_process;
pub mod signals;
