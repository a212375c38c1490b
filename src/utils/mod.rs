//! Utility modules

pub mod cancel;
pub mod mime;

pub use cancel::CancelHandle;
pub use mime::{format_bytes, guess_mime};
