// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capturing everything written through a handle while a closure runs.

use crate::error::CaptureError;
use crate::handle::Redirect;
use crate::pipe::{Drain, Pipe};
use tracing::debug;

/// Run `work` with `handle` redirected into a pipe and return what it wrote.
///
/// The handle is restored exactly once before this returns, including when
/// `work` panics; the panic then resumes unchanged. Invalid UTF-8 in the
/// output is replaced with U+FFFD, see [`capture_bytes`] for the raw bytes.
///
/// Only writes that go through `handle` between the redirect and the
/// restore are seen. Copies of the handle taken earlier, and threads that
/// outlive `work`, are not observed and race with the restore. Concurrent
/// captures of one handle are rejected with
/// [`CaptureError::AlreadyRedirected`]. If something keeps a write end
/// open past `work` (a child process that inherited the pipe, say), this
/// blocks until it is closed. The same applies when restoring a
/// [`StdStream`](crate::StdStream) fails: the descriptor still holds the
/// write end, so the drain never reaches end-of-stream and this hangs
/// instead of returning the error.
pub fn capture<H, F>(handle: &H, work: F) -> Result<String, CaptureError>
where
    H: Redirect + ?Sized,
    F: FnOnce(),
{
    let bytes = capture_bytes(handle, work)?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|invalid| String::from_utf8_lossy(invalid.as_bytes()).into_owned()))
}

/// Like [`capture`], returning the captured bytes unchanged.
pub fn capture_bytes<H, F>(handle: &H, work: F) -> Result<Vec<u8>, CaptureError>
where
    H: Redirect + ?Sized,
    F: FnOnce(),
{
    let Pipe { reader, writer } = Pipe::new()?;
    // Declared before the guard so unwinding restores first, then joins.
    let drain = Drain::spawn(reader)?;

    debug!(handle = handle.name(), "redirecting output");
    let redirection = Redirection {
        handle,
        saved: Some(handle.redirect(writer)?),
    };

    work();

    redirection.finish()?;
    let bytes = drain.finish()?;
    debug!(handle = handle.name(), bytes = bytes.len(), "output restored");
    Ok(bytes)
}

/// Restores a redirected handle when finished or dropped, whichever is first.
struct Redirection<'a, H: Redirect + ?Sized> {
    handle: &'a H,
    saved: Option<H::Saved>,
}

impl<H: Redirect + ?Sized> Redirection<'_, H> {
    fn finish(mut self) -> Result<(), CaptureError> {
        match self.saved.take() {
            Some(saved) => self.handle.restore(saved),
            None => Ok(()),
        }
    }
}

impl<H: Redirect + ?Sized> Drop for Redirection<'_, H> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            let _ = self.handle.restore(saved);
        }
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
