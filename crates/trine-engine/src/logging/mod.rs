//! Logging utilities.
//!
//! Every diagnostic the engine emits (context setup, loader probing, shader
//! compiler and linker output) goes through the `log` facade. This module
//! only wires up the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
