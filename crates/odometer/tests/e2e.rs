//! End-to-end CLI integration tests.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn odometer() -> Command {
    let mut cmd = Command::cargo_bin("odometer").expect("binary not found");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_flag() {
    odometer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--values"))
        .stdout(predicate::str::contains("--count-up"));
}

#[test]
fn version_flag() {
    odometer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("odometer"));
}

#[test]
fn default_value_is_zero() {
    odometer()
        .arg("-q")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn quiet_prints_settled_values() {
    odometer()
        .args(["--values", "5,99,100,-3,2.5", "-q"])
        .assert()
        .success()
        .stdout("5\n99\n100\n-3\n2.5\n");
}

#[test]
fn report_shows_rolls_and_mounts() {
    odometer()
        .args(["--values", "99,100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("99 -> 100 (up)"))
        .stdout(predicate::str::contains("[0] roll '9' -> '0' offset -432px (down)"))
        .stdout(predicate::str::contains("[2] mount '1' (fade in)"))
        .stdout(predicate::str::contains("  = 100"));
}

#[test]
fn first_value_rolls_from_zero() {
    odometer()
        .args(["--values", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] roll '0' -> '5' offset +240px (up)"));
}

#[test]
fn cell_height_scales_offsets() {
    odometer()
        .args(["--values", "5", "--cell-height", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset +50px"));
}

#[test]
fn non_numeric_characters_fade() {
    odometer()
        .args(["--values", "NaN", "-q"])
        .assert()
        .success()
        .stdout("NaN\n");
}

#[test]
fn verbose_shows_windows() {
    odometer()
        .args(["--values", "3", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("window [0-2] 3 [4-9]"));
}

#[test]
fn invalid_value_exits_generic() {
    odometer()
        .args(["--values", "1,abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn invalid_cell_height_exits_config() {
    odometer()
        .args(["--cell-height", "0", "--values", "1"])
        .assert()
        .success();
    odometer()
        .args(["--cell-height", "-4"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid cell height"));
}

#[test]
fn invalid_decimals_exits_config() {
    odometer()
        .args(["--count-up", "5", "--decimals", "25"])
        .assert()
        .code(4);
}

#[test]
fn invalid_align_rejected_by_parser() {
    odometer().args(["--align", "center"]).assert().failure();
}

#[test]
fn count_up_quiet() {
    odometer()
        .args([
            "--count-up",
            "1500",
            "--prefix",
            "$",
            "--suffix",
            "+",
            "--duration-ms",
            "200",
            "-q",
        ])
        .assert()
        .success()
        .stdout("$1500+\n");
}

#[test]
fn count_up_with_decimals() {
    odometer()
        .args(["--count-up", "2.5", "--decimals", "2", "-q"])
        .assert()
        .success()
        .stdout("2.50\n");
}

#[test]
fn config_file_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "values": [7, 42] }}"#).unwrap();
    odometer()
        .args(["--config", file.path().to_str().unwrap(), "-q"])
        .assert()
        .success()
        .stdout("7\n42\n");
}

#[test]
fn flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "values": [7, 42] }}"#).unwrap();
    odometer()
        .args(["--config", file.path().to_str().unwrap(), "--values", "1", "-q"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn malformed_config_exits_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    odometer()
        .args(["--config", file.path().to_str().unwrap()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn env_var_values() {
    odometer()
        .env("ODOMETER_VALUES", "12,13")
        .arg("-q")
        .assert()
        .success()
        .stdout("12\n13\n");
}

#[test]
fn shell_completion_bash() {
    odometer()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("odometer"));
}

#[test]
fn shell_completion_zsh() {
    odometer()
        .args(["--completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("odometer"));
}
