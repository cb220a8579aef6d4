//! Integration tests for sweep generation and report parsing
//!
//! Tests are organized by topic:
//! - `scenarios` - End-to-end generation runs against a temporary directory
//! - `properties` - Property tests over catalogs, ranges and leaf paths
//! - `reports` - Parsing a complete simulator report
