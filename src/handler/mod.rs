//! Request handler module
//!
//! Responsible for method dispatch and static file serving: path
//! translation, index files, directory listings and conditional GETs.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
