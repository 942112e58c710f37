use std::process::Command;

fn publisher() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pkg-publisher"))
}

#[test]
fn test_malformed_broker_exits_non_zero() {
    let output = publisher()
        .args(["--brokers", "not-an-address"])
        .env("RUST_LOG", "pkg_publisher=info")
        .output()
        .expect("failed to run pkg-publisher");

    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration error"), "stdout: {}", stdout);
}

#[test]
fn test_help_lists_flags() {
    let output = publisher()
        .arg("--help")
        .output()
        .expect("failed to run pkg-publisher");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--brokers"));
    assert!(stdout.contains("--topic"));
}
