//! Shutdown signal plumbing.
use std::sync::{atomic::AtomicBool, Arc};

/// Register handlers for the signals that ask the manager to quit. Any of
/// `SIGTERM`, `SIGINT` or `SIGHUP` sets the flag; the event loop notices
/// and runs the orderly shutdown.
pub fn register_terminate_hook(flag: Arc<AtomicBool>) {
    for signal in [
        signal_hook::consts::signal::SIGTERM,
        signal_hook::consts::signal::SIGINT,
        signal_hook::consts::signal::SIGHUP,
    ] {
        _ = signal_hook::flag::register(signal, flag.clone())
            .map_err(|err| tracing::error!("Cannot register signal handler: {:?}", err));
    }
}
