pub mod display_event_handler;

mod button_handler;
mod client_message_handler;
mod configure_handler;
mod focus_handler;
mod motion_handler;
mod property_handler;
mod screen_create_handler;
mod window_handler;

use super::config::Config;
use super::display_servers::DisplayServer;
use super::models::{Manager, WindowHandle};
use super::DisplayEvent;
