//! Test utilities and helpers for the tessera project.
//!
//! This crate provides:
//! - Stream encoding helpers producing run-length encoded substream bytes
//! - Data generation for synthetic presence and value sequences
//!
//! # Usage
//!
//! This crate is intended for use within the tessera test suites only.

pub mod data_gen;
pub mod encode;
