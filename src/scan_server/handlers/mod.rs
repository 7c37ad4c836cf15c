//! Scan server HTTP handlers.

mod scan;
mod status;

pub use scan::scan_handler;
pub use status::status_handler;
