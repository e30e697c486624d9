//! Test Helper Utilities
//!
//! Shared utilities for testing bkx-catalog

#![allow(dead_code)]

pub mod fakes;
pub mod log_capture;

pub use fakes::{FakeCatalog, FakeEncyclopedia};
pub use log_capture::{capture_logs, LogCapture};
