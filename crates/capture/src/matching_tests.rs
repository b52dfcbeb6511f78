// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::error::CaptureError;
use crate::handle::OutputHandle;
use proptest::prelude::*;
use rstest::rstest;
use std::io::Write;

fn handle() -> OutputHandle {
    OutputHandle::file(tempfile::tempfile().unwrap())
}

#[rstest]
#[case("^hello")]
#[case("world$")]
#[case("lo wo")]
#[case(r"\w+ \w+")]
fn test_pattern_matches(#[case] pattern: &str) {
    let out = handle();
    let result = capture_match(&out, || write!(&out, "hello world").unwrap(), pattern);
    assert!(result.is_ok(), "{pattern}: {result:?}");
}

#[test]
fn test_no_match_carries_captured_text() {
    let out = handle();

    let err = capture_match(&out, || write!(&out, "hello world").unwrap(), "^world").unwrap_err();

    match &err {
        MatchError::NoMatch { captured, pattern } => {
            assert_eq!(captured, "hello world");
            assert_eq!(pattern, "^world");
        }
        other => panic!("expected NoMatch, got {other:?}"),
    }
    assert_eq!(err.captured(), Some("hello world"));
    assert_eq!(
        err.to_string(),
        "String: 'hello world' fails to match regexp: '^world'."
    );
}

#[test]
fn test_empty_output_fails_one_or_more() {
    let out = handle();

    let err = capture_match(&out, || {}, ".+").unwrap_err();

    assert!(matches!(err, MatchError::NoMatch { ref captured, .. } if captured.is_empty()));
}

#[test]
fn test_empty_output_matches_empty_pattern() {
    let out = handle();
    assert!(capture_match(&out, || {}, "").is_ok());
}

#[rstest]
#[case("[")]
#[case("(unclosed")]
#[case("a{2,1}")]
fn test_malformed_pattern(#[case] pattern: &str) {
    let out = handle();
    let mut ran = false;

    let err = capture_match(
        &out,
        || {
            ran = true;
            write!(&out, "anything").unwrap();
        },
        pattern,
    )
    .unwrap_err();

    assert!(matches!(err, MatchError::Pattern(_)));
    assert_eq!(err.captured(), None);
    assert!(ran);
    assert!(!out.is_redirected());
}

#[test]
fn test_precompiled_regex() {
    let out = handle();
    let regex = Regex::new(r"^count: \d+$").unwrap();

    assert!(capture_match_regex(&out, || write!(&out, "count: 42").unwrap(), &regex).is_ok());

    let err = capture_match_regex(&out, || write!(&out, "count: many").unwrap(), &regex)
        .unwrap_err();
    assert!(err.to_string().contains("count: many"));
}

#[test]
fn test_capture_failure_surfaces() {
    let out = handle();

    let outer = capture(&out, || {
        let nested = capture_match(&out, || {}, ".*");
        assert!(matches!(
            nested,
            Err(MatchError::Capture(CaptureError::AlreadyRedirected(_)))
        ));
    });

    assert!(outer.is_ok());
}

proptest! {
    #[test]
    fn match_outcome_agrees_with_is_match(
        text in "[a-z0-9 ]{0,40}",
        pattern in prop::sample::select(vec!["^a", "z$", "[0-9]+", "^$", "a b", ".+"]),
    ) {
        let out = handle();
        let result = capture_match(&out, || write!(&out, "{text}").unwrap(), pattern);
        let expected = Regex::new(pattern).unwrap().is_match(&text);

        prop_assert_eq!(result.is_ok(), expected);
        if let Err(err) = result {
            prop_assert!(matches!(err, MatchError::NoMatch { .. }), "expected MatchError::NoMatch");
            prop_assert_eq!(err.captured(), Some(text.as_str()));
        }
    }
}
