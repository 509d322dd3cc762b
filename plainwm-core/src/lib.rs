//! The window manager proper: the state, the event handlers and the seam
//! to the display server.
// We deny clippy pedantic lints, primarily to keep code as correct as possible
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise. However, work to ensure that each use of one of these is correct
// would be very much appreciated.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access
)]
pub mod config;
mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
mod ewmh;
mod handlers;
mod manage;
pub mod models;
mod sanitize;
pub mod state;
pub mod utils;

pub use config::Config;
pub use display_event::DisplayEvent;
pub use display_servers::DisplayServer;
pub use models::Manager;
pub use models::Mode;
pub use state::State;
pub use utils::child_process;
