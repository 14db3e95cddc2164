//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXAMPLE_EXPORT: &str = r#"{"decrypted_authenticator_tokens":[
    {"name":"user@example.com","issuer":"Example","decrypted_seed":"JBSWY3DPEHPK3PXP","digits":6}
]}"#;

const GOOGLE_URI: &str = "otpauth://totp/Example:user@example.com?secret=JBSWY3DPEHPK3PXP&digits=6&algorithm=SHA1&period=30";

fn workspace_with(export: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("data.json"), export).expect("write export");
    dir
}

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("otpauth-export"));
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("otpauth-export"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("otpauth://"))
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("--ec-level"));
}

#[test]
fn test_prints_uri_without_qr() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .args(["--target", "google", "--no-qr"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", GOOGLE_URI)));

    assert!(!dir.path().join("Generated QR Codes into .png").exists());
}

#[test]
fn test_writes_qr_codes_into_default_directory() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .args(["--target", "google", "--qr"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(GOOGLE_URI))
        .stdout(predicate::str::contains(
            "QR code generated: Generated QR Codes into .png/qrcode_user@example.com.png",
        ));

    let png = dir
        .path()
        .join("Generated QR Codes into .png")
        .join("qrcode_user@example.com.png");
    assert!(png.is_file());
}

#[test]
fn test_custom_input_and_output_dir() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("export.json"), EXAMPLE_EXPORT).expect("write export");

    cli(&dir)
        .args(["-i", "export.json", "-t", "aegis", "--qr", "-o", "codes", "--box-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("&issuer=Example"));

    let img = image::open(dir.path().join("codes").join("qrcode_user@example.com.png"))
        .expect("png written");
    assert_eq!(img.width(), (37 + 8) * 2);
}

#[test]
fn test_missing_input_fails_with_remediation() {
    let dir = TempDir::new().expect("temp dir");
    cli(&dir)
        .args(["--target", "google", "--qr"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("data.json not found"))
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_invalid_json_fails() {
    let dir = workspace_with("{ not json");
    cli(&dir)
        .args(["--target", "google"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid JSON input"));
}

#[test]
fn test_unknown_target_fails() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .args(["--target", "authy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a supported authenticator app"))
        .stderr(predicate::str::contains("Google Authenticator"));
}

#[test]
fn test_invalid_option_value_fails() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .args(["--target", "google", "--box-size", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("box_size"));
}

#[test]
fn test_empty_export_prints_nothing() {
    let dir = workspace_with(r#"{"decrypted_authenticator_tokens":[]}"#);
    cli(&dir)
        .args(["--target", "2fa", "--qr"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_interactive_menu_and_confirmation() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .write_stdin("9\n2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Aegis"))
        .stdout(predicate::str::contains("Invalid choice"))
        .stdout(predicate::str::contains(GOOGLE_URI))
        .stdout(predicate::str::contains("Generate QR codes? (Y/n)"))
        .stdout(predicate::str::contains("QR code generated:"));
}

#[test]
fn test_interactive_decline_qr() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .write_stdin("3\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("QR code generated").not());

    assert!(!dir.path().join("Generated QR Codes into .png").exists());
}

#[test]
fn test_oversized_record_exits_with_partial_failure() {
    let export = format!(
        r#"{{"decrypted_authenticator_tokens":[
            {{"name":"{}","decrypted_seed":"AAAA"}},
            {{"name":"ok","decrypted_seed":"BBBB"}}
        ]}}"#,
        "n".repeat(1500)
    );
    let dir = workspace_with(&export);
    cli(&dir)
        .args(["--target", "google", "--qr", "--ec-level", "H"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("qrcode_ok.png"))
        .stderr(predicate::str::contains("too long to fit in a QR code"));
}

#[test]
fn test_config_file_supplies_target() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    std::fs::write(
        dir.path().join("export.toml"),
        "[input]\ntarget = \"google\"\n\n[output]\nqr = false\n",
    )
    .expect("write config");

    cli(&dir)
        .args(["--config", "export.toml"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", GOOGLE_URI)));
}

#[test]
fn test_unreadable_input_exits_with_input_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join("data.json")).expect("create dir");

    cli(&dir)
        .args(["--target", "google", "--no-qr"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not read"))
        .stderr(predicate::str::contains("permission to read"));
}

#[test]
fn test_missing_config_file_exits_with_input_error() {
    let dir = workspace_with(EXAMPLE_EXPORT);
    cli(&dir)
        .args(["--target", "google", "--no-qr", "--config", "nothere.toml"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("nothere.toml"));
}
