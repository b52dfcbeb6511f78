// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Temporary redirection of output streams into memory for test assertions.
//!
//! [`capture`] swaps a shared output handle for the write end of a fresh
//! pipe, runs a closure, puts the handle back and returns everything the
//! closure wrote through it. [`capture_match`] checks that output against a
//! regular expression.
//!
//! Two kinds of handle are provided:
//! - [`OutputHandle`] (with the globals [`STDOUT`] and [`STDERR`]), an
//!   in-process slot that code writes to with `write!(&STDOUT, ...)`.
//! - [`StdStream`], the process's own descriptors 1 and 2.
//!
//! ```
//! use std::io::Write;
//! use stream_capture::{capture, OutputHandle};
//!
//! let out = OutputHandle::stdout();
//! let text = capture(&out, || {
//!     let _ = writeln!(&out, "hello");
//! })?;
//! assert_eq!(text, "hello\n");
//! # Ok::<(), stream_capture::CaptureError>(())
//! ```

mod capture;
mod error;
mod handle;
#[cfg(feature = "regex")]
mod matching;
mod pipe;
mod stream;

pub use capture::{capture, capture_bytes};
#[cfg(feature = "regex")]
pub use error::MatchError;
pub use error::CaptureError;
pub use handle::{OutputHandle, Redirect, SavedSink, STDERR, STDOUT};
#[cfg(feature = "regex")]
pub use matching::{capture_match, capture_match_regex};
pub use stream::{SavedFd, StdStream};
