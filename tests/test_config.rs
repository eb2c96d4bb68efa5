//! Tests for server configuration loading.

use transceiver::ServerConfig;
use transceiver::http::response::SERVER_PRODUCT;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.backlog, 128);
    assert_eq!(config.server_name, SERVER_PRODUCT);
}

#[test]
fn test_yaml_with_partial_keys_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("transceiver-test-config.yaml");
    std::fs::write(&path, "bind_addr: \"0.0.0.0:9000\"\n").unwrap();

    let config = ServerConfig::from_yaml_file(&path).unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.backlog, 128);
    assert_eq!(config.server_name, SERVER_PRODUCT);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_yaml_full_override() {
    let path = std::env::temp_dir().join("transceiver-test-config-full.yaml");
    std::fs::write(
        &path,
        "bind_addr: \"127.0.0.1:7777\"\nbacklog: 16\nserver_name: \"custom server\"\n",
    )
    .unwrap();

    let config = ServerConfig::from_yaml_file(&path).unwrap();
    assert_eq!(config.bind_addr, "127.0.0.1:7777");
    assert_eq!(config.backlog, 16);
    assert_eq!(config.server_name, "custom server");

    std::fs::remove_file(&path).ok();
}
