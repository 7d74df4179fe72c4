//! Tests for `src/logging.rs`.

use tbvaccine::logging::{env_filter, DEFAULT_LEVEL, VERBOSE_LEVEL};

#[test]
fn default_level_is_quieter_than_verbose() {
    assert_eq!(DEFAULT_LEVEL, "warn");
    assert_eq!(VERBOSE_LEVEL, "debug");
}

#[test]
fn env_filter_falls_back_to_default_level() {
    // RUST_LOG may be set by the developer running the tests; the fallback only
    // applies when it is not.
    if std::env::var_os("RUST_LOG").is_none() {
        let filter = env_filter(VERBOSE_LEVEL);
        assert_eq!(filter.to_string(), "debug");
    }
}
