#![allow(clippy::unwrap_used)]
// Connection-failure tests for `RtgClient`. No MySQL server is required:
// every test points at a port nothing listens on.

use std::time::Duration;

use secrecy::SecretString;

use rtgquota_db::{ConnectOptions, Error, RtgClient};

fn unreachable_options() -> ConnectOptions {
    ConnectOptions {
        host: "127.0.0.1".into(),
        port: 1,
        database: "rtg".into(),
        username: "nagios".into(),
        password: SecretString::from("secret".to_string()),
        timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn test_connect_refused_is_connectivity_error() {
    let result = RtgClient::connect(&unreachable_options()).await;

    let err = match result {
        Ok(_) => panic!("expected connection to 127.0.0.1:1 to fail"),
        Err(e) => e,
    };
    assert!(
        err.is_connectivity(),
        "expected Connection or Timeout error, got: {err:?}"
    );
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_connect_error_names_the_target() {
    let Err(err) = RtgClient::connect(&unreachable_options()).await else {
        panic!("expected connection failure");
    };
    let msg = err.to_string();
    match err {
        Error::Connection { ref host, port, .. } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, 1);
            assert!(msg.contains("127.0.0.1:1"), "unexpected message: {msg}");
        }
        Error::Timeout { timeout_secs } => {
            assert_eq!(timeout_secs, 1);
            assert!(msg.contains("1s"), "unexpected message: {msg}");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[test]
fn test_not_found_errors_are_not_connectivity() {
    let router = Error::RouterNotFound {
        name: "edge1".into(),
    };
    let iface = Error::InterfaceNotFound {
        router: "edge1".into(),
        name: "ge-0/0/0".into(),
    };

    assert!(router.is_not_found() && !router.is_connectivity());
    assert!(iface.is_not_found() && !iface.is_connectivity());
    assert_eq!(
        iface.to_string(),
        "Interface 'ge-0/0/0' not found on router 'edge1'"
    );
}
