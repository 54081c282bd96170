use lantern::config::{Config, CONFIG_ENV, LISTEN_ENV};
use std::io::Write;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.static_root, "static");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.users.len(), 1);
    assert_eq!(cfg.users[0].account, "gugu");
}

// Env vars are process-wide, so every env-dependent assertion lives in this one test.
#[test]
fn test_config_load_from_env() {
    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");

    unsafe {
        std::env::set_var(LISTEN_ENV, "0.0.0.0:3000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen_addr: \"127.0.0.1:9000\"\nstatic_root: \"/srv/www\"").unwrap();
    unsafe {
        std::env::set_var(CONFIG_ENV, file.path());
    }
    let cfg = Config::load().unwrap();
    // LISTEN still wins over the file
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.static_root, "/srv/www");

    unsafe {
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        r#"
listen_addr: "0.0.0.0:5000"
log_level: debug
max_body_bytes: 1024
users:
  - account: neo
    password: matrix
    email: neo@example.com
  - account: trinity
    password: rabbit
    email: trinity@example.com
"#,
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.static_root, "static");
    assert_eq!(cfg.limits().max_body_bytes, 1024);
    assert_eq!(cfg.limits().max_head_bytes, 64 * 1024);
    let accounts: Vec<&str> = cfg.users.iter().map(|u| u.account.as_str()).collect();
    assert_eq!(accounts, vec!["neo", "trinity"]);
}

#[test]
fn test_config_rejects_zero_head_limit() {
    assert!(Config::from_yaml_str("max_head_bytes: 0").is_err());
}

#[test]
fn test_config_rejects_bad_yaml() {
    assert!(Config::from_yaml_str("users: not-a-list").is_err());
}

#[test]
fn test_config_missing_file() {
    assert!(Config::from_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}
