use displaydoc::Display;
use thiserror::Error;

use crate::error::init::InitError;

/// Errors that stop a running service.
#[derive(Debug, Error, Display)]
pub enum RuntimeError {
    /// Initialization error: {0}
    Init(#[from] InitError),
    /// Server error: {0}
    Serve(std::io::Error),
    /// Failed to listen for shutdown signals: {0}
    Signal(std::io::Error),
}
