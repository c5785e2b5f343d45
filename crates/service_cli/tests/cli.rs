//! Tests driving the `forecast` binary.

use std::process::{Command, Output};

use tempfile::TempDir;

fn forecast(dir: &TempDir, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_forecast"));
    cmd.args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("FORECAST_LOG_LEVEL")
        .env("NO_COLOR", "1");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().unwrap()
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_unparsable_env_override_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = forecast(&dir, &["check"], &[("FORECAST_NUM_PATHS", "lots")]);
    let text = combined(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("Ignoring unparsable environment override"), "{}", text);
    assert!(text.contains("FORECAST_NUM_PATHS"), "{}", text);
    assert!(text.contains("Paths:        10000"), "{}", text);
}

#[test]
fn test_env_override_applies() {
    let dir = TempDir::new().unwrap();
    let output = forecast(&dir, &["check"], &[("FORECAST_NUM_PATHS", "123")]);
    let text = combined(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("Paths:        123"), "{}", text);
    assert!(!text.contains("Ignoring unparsable"), "{}", text);
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = forecast(&dir, &["check"], &[("FORECAST_NUM_PATHS", "0")]);

    assert!(!output.status.success());
    assert!(combined(&output).contains("simulation.num_paths"));
}
