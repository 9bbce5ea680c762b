//! Test helpers for fixtura integration tests.
//!
//! This module provides the billing/graph model types used across the
//! integration suite and a loader for test fixture data files.

#[path = "helpers/models.rs"]
pub mod models;

#[path = "helpers/test_data.rs"]
pub mod test_data;
