//! Global subscriber installation. Kept in its own test binary since the
//! subscriber is process-wide.

use cortex_termio::try_init_logging;

#[test]
fn test_second_install_fails() {
    assert!(try_init_logging("debug", true).is_ok());
    tracing::info!(target: "cortex_termio", "subscriber installed");
    assert!(try_init_logging("info", false).is_err());
}
