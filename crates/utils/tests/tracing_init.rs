//! The global subscriber can be installed once per process.

#[test]
fn test_init_twice_fails() {
    reattempt_utils::tracing::init_with_default("debug").unwrap();
    assert!(reattempt_utils::tracing::init().is_err());
}
