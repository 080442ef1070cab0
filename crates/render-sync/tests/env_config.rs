use std::fs;

use render_sync::config::{QUIET_MAPPING_FAILURES_VAR, SESSION_ID_VAR, load_dotenv_from};
use render_sync::{BridgeConfig, LoggingConfig};

#[test]
fn env_file_feeds_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.env");
    assert!(load_dotenv_from(&missing).is_err());

    let env_file = dir.path().join(".env");
    fs::write(
        &env_file,
        format!("{QUIET_MAPPING_FAILURES_VAR}=yes\n{SESSION_ID_VAR}=dotenv-session\n"),
    )
    .unwrap();
    load_dotenv_from(&env_file).unwrap();

    let bridge = BridgeConfig::from_env();
    assert!(bridge.quiet_mapping_failures);
    assert!(bridge.resync_on_attach);

    let logging = LoggingConfig::from_env();
    assert_eq!(logging.session_id.as_deref(), Some("dotenv-session"));
}
