// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regular-expression assertions over captured output.

use crate::capture::capture;
use crate::error::MatchError;
use crate::handle::Redirect;
use regex::Regex;

/// Capture the output of `work` and check that `pattern` matches it somewhere.
///
/// `work` runs before the pattern is compiled, so its side effects happen
/// even when the pattern is invalid.
pub fn capture_match<H, F>(handle: &H, work: F, pattern: &str) -> Result<(), MatchError>
where
    H: Redirect + ?Sized,
    F: FnOnce(),
{
    let captured = capture(handle, work)?;
    let regex = Regex::new(pattern)?;
    ensure_match(captured, &regex)
}

/// [`capture_match`] with an already compiled expression
pub fn capture_match_regex<H, F>(handle: &H, work: F, regex: &Regex) -> Result<(), MatchError>
where
    H: Redirect + ?Sized,
    F: FnOnce(),
{
    let captured = capture(handle, work)?;
    ensure_match(captured, regex)
}

fn ensure_match(captured: String, regex: &Regex) -> Result<(), MatchError> {
    if regex.is_match(&captured) {
        Ok(())
    } else {
        Err(MatchError::NoMatch {
            captured,
            pattern: regex.as_str().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
