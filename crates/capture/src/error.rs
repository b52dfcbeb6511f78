// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for capturing and matching.

use nix::errno::Errno;
use thiserror::Error;

/// Errors that can occur while redirecting a handle and draining its output
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to create capture pipe: {0}")]
    Pipe(#[source] Errno),

    #[error("Failed to redirect {stream}: {source}")]
    Redirect {
        stream: &'static str,
        #[source]
        source: Errno,
    },

    #[error("{0} is already redirected")]
    AlreadyRedirected(&'static str),

    #[error("I/O error during capture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read captured output: {0}")]
    Drain(#[source] std::io::Error),

    #[error("Capture drain thread panicked")]
    DrainPanicked,
}

/// Errors returned by [`capture_match`](crate::capture_match)
#[cfg(feature = "regex")]
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Invalid regex pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("String: '{captured}' fails to match regexp: '{pattern}'.")]
    NoMatch { captured: String, pattern: String },
}

#[cfg(feature = "regex")]
impl MatchError {
    /// The captured text, if the pattern compiled and ran against it
    pub fn captured(&self) -> Option<&str> {
        match self {
            MatchError::NoMatch { captured, .. } => Some(captured),
            _ => None,
        }
    }
}
