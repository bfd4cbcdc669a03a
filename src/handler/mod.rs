//! Request handler module
//!
//! Responsible for request routing dispatch and the image and data routes.

pub mod data;
pub mod image;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
