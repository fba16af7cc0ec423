//! Window + GL context management.
//!
//! This module is responsible for:
//! - opening the window and creating a core-profile context on it
//! - verifying that the GL function loader can resolve the entry points we use
//! - presenting frames and keeping the surface in sync with the window size

mod context;
mod error;
mod init;
mod loader;

pub use context::GlContext;
pub use error::InitError;
pub use init::GlInit;
pub use loader::{probe_loader, REQUIRED_SYMBOLS};
