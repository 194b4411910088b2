//! Unit tests for SMS module

pub mod create_service_tests;
pub mod msg91_tests;
