use crate::Environment;

use std::str::FromStr;

#[test]
fn test_environment_reads_durably() {
    assert!(Environment::Online.reads_durably());
    assert!(Environment::Server.reads_durably());
    assert!(!Environment::Offline.reads_durably());
}

#[test]
fn test_environment_from_str() {
    assert_eq!(
        Environment::from_str("offline").unwrap(),
        Environment::Offline
    );
    assert!(Environment::from_str("airplane").is_err());
}
