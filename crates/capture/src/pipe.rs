// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pipe plumbing: a fresh OS pipe per capture and the thread that drains it.

use crate::error::CaptureError;
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
use nix::fcntl::OFlag;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::OwnedFd;
use std::thread::{self, JoinHandle};

const DRAIN_THREAD_NAME: &str = "stream-capture-drain";

/// Both ends of a freshly created pipe
pub(crate) struct Pipe {
    pub reader: File,
    pub writer: File,
}

impl Pipe {
    pub(crate) fn new() -> Result<Self, CaptureError> {
        let (read, write) = open_pipe().map_err(CaptureError::Pipe)?;
        Ok(Self {
            reader: File::from(read),
            writer: File::from(write),
        })
    }
}

// Close-on-exec so children spawned mid-capture can't hold a stray write
// end. Installing the writer with dup2 clears the flag on the target slot.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
fn open_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe2(OFlag::O_CLOEXEC)
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
fn open_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe()
}

/// Background reader that accumulates everything written into a pipe.
///
/// The join handle is the one-shot handoff: it yields the buffer once the
/// reader has seen end-of-stream. Dropping an unfinished drain joins the
/// thread, so the read end is closed before the owner goes away.
pub(crate) struct Drain {
    handle: Option<JoinHandle<io::Result<Vec<u8>>>>,
}

impl Drain {
    pub(crate) fn spawn(mut reader: File) -> Result<Self, CaptureError> {
        let handle = thread::Builder::new()
            .name(DRAIN_THREAD_NAME.to_string())
            .spawn(move || {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(buf)
            })?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Block until every write end is closed and take the drained bytes.
    pub(crate) fn finish(mut self) -> Result<Vec<u8>, CaptureError> {
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(read)) => read.map_err(CaptureError::Drain),
            Some(Err(_)) => Err(CaptureError::DrainPanicked),
            None => Ok(Vec::new()),
        }
    }
}

impl Drop for Drain {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "pipe_tests.rs"]
mod tests;
