// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Descriptor-level redirection of the process's standard streams.
//!
//! [`StdStream`] points descriptor 1 or 2 at the capture pipe with `dup2`,
//! so anything in the process writing to that descriptor is captured,
//! including `std::io::stdout()` and C libraries. Writes that never reach
//! the descriptor are not: libtest intercepts `print!`/`eprint!` inside
//! tests before they do, so code under test should write through
//! `std::io::stdout()` for this to observe it.

use crate::error::CaptureError;
use crate::handle::Redirect;
use nix::errno::Errno;
use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, OwnedFd, RawFd};
use std::sync::atomic::{AtomicBool, Ordering};

static REDIRECTED: [AtomicBool; 2] = [AtomicBool::new(false), AtomicBool::new(false)];

/// One of the process's standard output descriptors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StdStream {
    Stdout,
    Stderr,
}

/// Duplicate of the descriptor a redirect displaced
pub struct SavedFd(OwnedFd);

impl StdStream {
    /// Whether a capture currently owns this descriptor
    pub fn is_redirected(self) -> bool {
        self.flag().load(Ordering::Acquire)
    }

    fn flag(self) -> &'static AtomicBool {
        match self {
            StdStream::Stdout => &REDIRECTED[0],
            StdStream::Stderr => &REDIRECTED[1],
        }
    }

    fn raw_fd(self) -> RawFd {
        match self {
            StdStream::Stdout => io::stdout().as_raw_fd(),
            StdStream::Stderr => io::stderr().as_raw_fd(),
        }
    }

    fn duplicate(self) -> io::Result<OwnedFd> {
        match self {
            StdStream::Stdout => io::stdout().as_fd().try_clone_to_owned(),
            StdStream::Stderr => io::stderr().as_fd().try_clone_to_owned(),
        }
    }

    // The std handles buffer, so pending bytes must land before a swap.
    fn flush(self) -> io::Result<()> {
        match self {
            StdStream::Stdout => io::stdout().flush(),
            StdStream::Stderr => io::stderr().flush(),
        }
    }

    fn point_at(self, fd: RawFd) -> Result<(), CaptureError> {
        loop {
            match nix::unistd::dup2(fd, self.raw_fd()) {
                Ok(_) => return Ok(()),
                Err(Errno::EINTR) => continue,
                Err(source) => {
                    return Err(CaptureError::Redirect {
                        stream: self.name(),
                        source,
                    })
                }
            }
        }
    }

    fn install(self, writer: File) -> Result<SavedFd, CaptureError> {
        self.flush()?;
        let saved = self.duplicate()?;
        self.point_at(writer.as_raw_fd())?;
        // The descriptor slot now holds the only write end; `writer` closes here.
        Ok(SavedFd(saved))
    }
}

impl Redirect for StdStream {
    type Saved = SavedFd;

    fn redirect(&self, writer: File) -> Result<SavedFd, CaptureError> {
        let flag = self.flag();
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CaptureError::AlreadyRedirected(self.name()));
        }
        self.install(writer).inspect_err(|_| flag.store(false, Ordering::Release))
    }

    fn restore(&self, saved: SavedFd) -> Result<(), CaptureError> {
        let flushed = self.flush().map_err(CaptureError::from);
        let restored = self.point_at(saved.0.as_raw_fd());
        self.flag().store(false, Ordering::Release);
        flushed.and(restored)
    }

    fn name(&self) -> &'static str {
        match self {
            StdStream::Stdout => "stdout",
            StdStream::Stderr => "stderr",
        }
    }
}
