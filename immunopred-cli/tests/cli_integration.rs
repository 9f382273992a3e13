use assert_cmd::Command;
use immunopred_test::fixtures;
use immunopred_test::mock::{MockPredictor, MockRun};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// `immunopred` with home, tools and workspace confined to `home`
fn immunopred(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("immunopred").unwrap();
    cmd.env("IMMUNOPRED_HOME", home)
        .env("IMMUNOPRED_TOOLS_DIR", home.join("tools"))
        .env("IMMUNOPRED_WORKSPACE_DIR", home.join("workspace"))
        .env_remove("IMMUNOPRED_LOG")
        .env_remove("IMMUNOPRED_CONFIG");
    cmd
}

#[test]
fn test_methods_lists_every_adapter() {
    let home = TempDir::new().unwrap();
    immunopred(home.path())
        .arg("methods")
        .assert()
        .success()
        .stdout(predicate::str::contains("netmhc-3.4"))
        .stdout(predicate::str::contains("netmhciipan-3.0"))
        .stdout(predicate::str::contains("netctlpan-1.1"));
}

#[test]
fn test_methods_json() {
    let home = TempDir::new().unwrap();
    let output = immunopred(home.path())
        .args(["methods", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 8);
    let netmhcii = entries.iter().find(|e| e["id"] == "netmhcii-2.2").unwrap();
    assert_eq!(netmhcii["lengths"], serde_json::json!([15]));
}

#[test]
fn test_predict_tsv_with_command_override() {
    let home = TempDir::new().unwrap();
    let mock = MockPredictor::new().unwrap();
    let script = mock
        .write_script(&MockRun::emit(fixtures::NETMHC_34_OUTPUT))
        .unwrap();

    immunopred(home.path())
        .args(["predict", "--method", "netmhc-3.4", "--peptides", "SIINFEKL,GILGFVFTL"])
        .args(["--alleles", "A*02:01,A*01:01", "--command"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Seq\tMethod\tA*01:01\tA*02:01\n"))
        .stdout(predicate::str::contains("SIINFEKL\tnetmhc\t0.0640"))
        .stdout(predicate::str::contains("\t0.4256"));

    // one run per peptide length
    assert_eq!(mock.invocations().unwrap(), 2);
}

#[test]
fn test_predict_json_from_peptide_file() {
    let home = TempDir::new().unwrap();
    let mock = MockPredictor::new().unwrap();
    let script = mock
        .write_script(&MockRun::emit(fixtures::NETMHCPAN_28_OUTPUT))
        .unwrap();
    let peptides = home.path().join("peptides.fasta");
    std::fs::write(&peptides, ">ova\nSIINFEKL\n").unwrap();

    let output = immunopred(home.path())
        .args(["predict", "-m", "netmhcpan-2.8", "--format", "json", "--alleles", "A*02:01"])
        .arg("--peptides")
        .arg(&peptides)
        .arg("--command")
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let row = &table["rows"][0];
    assert_eq!(row["seq"], "SIINFEKL");
    assert_eq!(row["peptide"]["id"], "ova");
    let score = row["scores"]["A*02:01"].as_f64().unwrap();
    assert!((score - 0.42563).abs() < 1e-4);
}

#[test]
fn test_unknown_method_exits_2() {
    let home = TempDir::new().unwrap();
    immunopred(home.path())
        .args(["predict", "--method", "netmhc-9.9", "--peptides", "SIINFEKL"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown prediction method"));
}

#[test]
fn test_invalid_peptide_exits_2() {
    let home = TempDir::new().unwrap();
    let mock = MockPredictor::new().unwrap();
    let script = mock.write_script(&MockRun::emit("")).unwrap();

    immunopred(home.path())
        .args(["predict", "--method", "netmhc-3.4", "--peptides", "SIIN-FEKL"])
        .arg("--command")
        .arg(&script)
        .assert()
        .code(2);
    assert_eq!(mock.invocations().unwrap(), 0);
}

#[test]
fn test_missing_executable_exit_codes() {
    let home = TempDir::new().unwrap();
    // An explicit command is trusted; the shell reports it missing
    immunopred(home.path())
        .args(["predict", "--method", "netmhc-3.4", "--peptides", "SIINFEKL"])
        .args(["--command", "/nonexistent/immunopred-netMHC"])
        .assert()
        .code(4);

    immunopred(home.path())
        .env("PATH", home.path())
        .args(["predict", "--method", "netmhc-3.4", "--peptides", "SIINFEKL"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("netMHC"));
}

#[test]
fn test_subprocess_failure_exits_4() {
    let home = TempDir::new().unwrap();
    let mock = MockPredictor::new().unwrap();
    let script = mock
        .write_script(&MockRun::fail(1, "license expired"))
        .unwrap();

    immunopred(home.path())
        .args(["predict", "--method", "netmhc-3.4", "--peptides", "SIINFEKL"])
        .args(["--alleles", "A*02:01", "--command"])
        .arg(&script)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("license expired"));
}

#[test]
fn test_unsupported_only_exits_5_with_warning() {
    let home = TempDir::new().unwrap();
    let mock = MockPredictor::new().unwrap();
    let script = mock
        .write_script(&MockRun::emit(fixtures::NETMHC_34_OUTPUT))
        .unwrap();

    immunopred(home.path())
        .args(["predict", "--method", "netmhc-3.4", "--peptides", "SIINFEKLSIINFEKL"])
        .args(["--alleles", "A*02:01", "--command"])
        .arg(&script)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("No predictions"));
    assert_eq!(mock.invocations().unwrap(), 0);
}
