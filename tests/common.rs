// tests/common.rs
//! Shared test utilities — logging setup

/// Initialize test-friendly logging.
/// Call once at the start of any test that needs logs — idempotent.
#[allow(dead_code)]
pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}
