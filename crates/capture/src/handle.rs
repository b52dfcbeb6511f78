// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Redirectable output handles.
//!
//! A handle is a process-wide place that code writes its output through.
//! [`Redirect`] is the save/overwrite/restore contract that
//! [`capture`](crate::capture) drives. [`OutputHandle`] is the in-process
//! flavor: a shared slot that code under test writes to with `write!`.

use crate::error::CaptureError;
use parking_lot::{const_mutex, Mutex};
use std::fs::File;
use std::io::{self, Write};

/// A shared output reference that can be swapped for a pipe and put back.
///
/// Implementations use interior mutability so the work being captured can
/// keep writing through the same `&self` that the capture holds.
pub trait Redirect {
    /// Whatever is needed to undo a redirect
    type Saved;

    /// Route every write through this handle into `writer`.
    ///
    /// The handle takes ownership of the writer. Returns
    /// [`CaptureError::AlreadyRedirected`] if a redirect is already active.
    fn redirect(&self, writer: File) -> Result<Self::Saved, CaptureError>;

    /// Put the original back, closing every write end the redirect installed.
    fn restore(&self, saved: Self::Saved) -> Result<(), CaptureError>;

    /// Short label used in errors and diagnostics
    fn name(&self) -> &'static str;
}

enum Sink {
    Stdout,
    Stderr,
    File(File),
    Captured(File),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout => io::stdout().write(buf),
            Sink::Stderr => io::stderr().write(buf),
            Sink::File(file) | Sink::Captured(file) => file.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().write_all(buf),
            Sink::Stderr => io::stderr().write_all(buf),
            Sink::File(file) | Sink::Captured(file) => file.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::File(file) | Sink::Captured(file) => file.flush(),
        }
    }
}

/// Sink displaced by a redirect, handed back on restore
pub struct SavedSink(Sink);

/// Process-wide standard output handle
pub static STDOUT: OutputHandle = OutputHandle::stdout();

/// Process-wide standard error handle
pub static STDERR: OutputHandle = OutputHandle::stderr();

/// An in-process output slot.
///
/// Writes go to the current sink (the real stdout, stderr or a file) until
/// a capture swaps in a pipe. Write through `&OutputHandle`:
///
/// ```
/// use std::io::Write;
///
/// writeln!(&stream_capture::STDOUT, "status: ok").unwrap();
/// ```
pub struct OutputHandle {
    name: &'static str,
    sink: Mutex<Sink>,
}

impl OutputHandle {
    /// A handle writing to the process's standard output
    pub const fn stdout() -> Self {
        Self {
            name: "stdout",
            sink: const_mutex(Sink::Stdout),
        }
    }

    /// A handle writing to the process's standard error
    pub const fn stderr() -> Self {
        Self {
            name: "stderr",
            sink: const_mutex(Sink::Stderr),
        }
    }

    /// A handle writing to an open file
    pub fn file(file: File) -> Self {
        Self {
            name: "file",
            sink: Mutex::new(Sink::File(file)),
        }
    }

    /// Whether a capture currently owns this handle
    pub fn is_redirected(&self) -> bool {
        matches!(*self.sink.lock(), Sink::Captured(_))
    }
}

impl Write for &OutputHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.sink.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.lock().flush()
    }
}

impl Redirect for OutputHandle {
    type Saved = SavedSink;

    fn redirect(&self, writer: File) -> Result<SavedSink, CaptureError> {
        let mut sink = self.sink.lock();
        if matches!(*sink, Sink::Captured(_)) {
            return Err(CaptureError::AlreadyRedirected(self.name));
        }
        sink.flush()?;
        Ok(SavedSink(std::mem::replace(
            &mut *sink,
            Sink::Captured(writer),
        )))
    }

    fn restore(&self, saved: SavedSink) -> Result<(), CaptureError> {
        let captured = std::mem::replace(&mut *self.sink.lock(), saved.0);
        // Dropping the displaced sink closes the pipe's write end.
        drop(captured);
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
