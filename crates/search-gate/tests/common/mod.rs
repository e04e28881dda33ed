//! Shared fixtures for search gate integration tests.

pub mod fixtures;
