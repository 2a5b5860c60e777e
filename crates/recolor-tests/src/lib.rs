//! Integration tests for the recolor crates.
//!
//! End-to-end checks that go through files on disk: decode, resample,
//! transfer, encode.
