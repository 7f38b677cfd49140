//! # MME Bridge Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (dispatch, result mapping)
//! └── src/
//!     └── integration/  # End-to-end flows: bridge → bus → task inbox
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bridge-tests
//! cargo bench -p bridge-tests
//! ```

#![allow(dead_code)]

pub mod integration;
