//! Session-scoped diagnostic logging.
//!
//! No global subscriber is installed. A [`Dispatch`] built here is handed to a
//! [`Session`](crate::Session), which makes it the default only while one of
//! its commands runs.

use tracing::{Dispatch, Level};

/// Build a dispatcher that writes `DEBUG` and above to standard error.
pub fn debug_dispatch() -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}
