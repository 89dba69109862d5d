//! # History Query Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-subsystem flows
//! │   ├── fixtures.rs    # Chain history seeded into the in-memory backend
//! │   └── flows.rs       # Catalog refresh → services → gateway
//! └── benches/           # Trace reconstruction and paging benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hq-tests
//! cargo test -p hq-tests integration::
//! cargo bench -p hq-tests
//! ```

#![allow(dead_code)]

pub mod integration;
