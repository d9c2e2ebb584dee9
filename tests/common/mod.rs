//! Shared test utilities for integration tests.
//! This module is not compiled as a test binary; test files include it.
#![allow(dead_code)]

pub mod fixtures;
