pub mod config;

pub use config::{load, Config};
