// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::io::Write;

#[test]
fn test_drain_collects_until_writer_closed() {
    let Pipe { reader, mut writer } = Pipe::new().unwrap();
    let drain = Drain::spawn(reader).unwrap();

    writer.write_all(b"first ").unwrap();
    writer.write_all(b"second").unwrap();
    drop(writer);

    assert_eq!(drain.finish().unwrap(), b"first second");
}

#[test]
fn test_drain_empty_when_nothing_written() {
    let Pipe { reader, writer } = Pipe::new().unwrap();
    let drain = Drain::spawn(reader).unwrap();
    drop(writer);

    assert!(drain.finish().unwrap().is_empty());
}

#[test]
fn test_dropped_drain_joins_reader() {
    let Pipe { reader, writer } = Pipe::new().unwrap();
    let drain = Drain::spawn(reader).unwrap();
    drop(writer);

    // Returns only once the reader thread has exited.
    drop(drain);
}

#[test]
fn test_writer_outpaces_pipe_buffer() {
    let Pipe { reader, mut writer } = Pipe::new().unwrap();
    let drain = Drain::spawn(reader).unwrap();

    let chunk = [b'x'; 4096];
    for _ in 0..64 {
        writer.write_all(&chunk).unwrap();
    }
    drop(writer);

    assert_eq!(drain.finish().unwrap().len(), 64 * 4096);
}
