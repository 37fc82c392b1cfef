// crates/network/tests/network_tests.rs
//! Integration tests for network module

use leadsync_network::{Client, ClientConfig, NetworkError};
use leadsync_resilience::RetryPolicy;
use std::net::TcpListener;
use std::time::Duration;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Returns a local address with nothing listening on it
fn closed_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

#[test]
fn test_client_basic_operations() {
    let client = Client::new().expect("Failed to create client");
    let _cloned = client.clone();
}

#[test]
fn test_connection_refused_is_retryable_http_error() {
    init_logger();
    let config = ClientConfig::default()
        .with_timeout(Duration::from_secs(2))
        .with_retry_policy(RetryPolicy::new(2).with_initial_delay(Duration::from_millis(1)));
    let client = Client::with_config(config).expect("client");

    let result = client.get_json::<serde_json::Value>(&closed_local_url(), &[]);

    match result {
        Err(err @ NetworkError::Http(_)) => assert!(err.is_retryable()),
        other => panic!("expected transport error, got {:?}", other.map(|_| ())),
    }
}
