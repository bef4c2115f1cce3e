use predicates::str::contains;
use std::fs;

mod common;
use common::TestEnv;

fn seeded() -> TestEnv {
    let env = TestEnv::new();
    env.init_with_staff();
    env.scan("E001", "entrada", "2025-01-06T09:00:00-06:00");
    env.scan("E001", "salida", "2025-01-06T17:30:00-06:00");
    env.scan("E002", "entrada", "2025-01-07T08:00:00-06:00");
    env
}

#[test]
fn weekly_csv_has_header_and_rows() {
    let env = seeded();
    let out = env.out_file("weekly.csv");
    env.cmd()
        .args([
            "export",
            "--format",
            "csv",
            "--week",
            "2025-W02",
            "--file",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().contains("employee_id"));
    let rest: Vec<&str> = lines.collect();
    assert_eq!(rest.len(), 2);
    assert!(rest[0].starts_with("E001,Ana Torres,8.50"));
    assert!(rest[1].starts_with("E002,"));
}

#[test]
fn detail_json_contains_every_event() {
    let env = seeded();
    let out = env.out_file("detail.json");
    env.cmd()
        .args([
            "export",
            "--kind",
            "detail",
            "--format",
            "json",
            "--range",
            "2025-01-06:2025-01-12",
            "--file",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["action"], "entrada");
    assert_eq!(rows[0]["location"], "unavailable");
    assert_eq!(rows[2]["employee_id"], "E002");
}

#[test]
fn weekly_xlsx_is_written() {
    let env = seeded();
    let out = env.out_file("weekly.xlsx");
    env.cmd()
        .args([
            "export",
            "--week",
            "2025-W02",
            "--file",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let bytes = fs::read(&out).unwrap();
    // xlsx is a zip container
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn empty_window_writes_nothing() {
    let env = seeded();
    let out = env.out_file("empty.csv");
    env.cmd()
        .args([
            "export",
            "--format",
            "csv",
            "--week",
            "2024-W10",
            "--file",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(contains("Nothing to export"));
    assert!(!out.exists());
}

#[test]
fn relative_path_is_refused() {
    let env = seeded();
    env.cmd()
        .args(["export", "--format", "csv", "--week", "2025-W02", "--file", "out.csv"])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn existing_file_needs_force() {
    let env = seeded();
    let out = env.out_file("weekly.json");
    fs::write(&out, "old").unwrap();
    let path = out.to_str().unwrap();

    env.cmd()
        .args(["export", "--format", "json", "--week", "2025-W02", "--file", path])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    env.cmd()
        .args(["export", "--format", "json", "--week", "2025-W02", "--file", path, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("8.50"));
}
