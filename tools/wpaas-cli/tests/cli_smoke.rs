use assert_cmd::Command;

const CONFIG: &str = r#"{
    "baseCurrency": "INR",
    "exchangeRates": { "USD": 0.012 },
    "discountRules": { "annualPercent": 20 },
    "websiteTypes": {
        "business": {
            "label": "Business website",
            "tiers": {
                "essential": { "monthlyBasePrice": 4999, "setupCost": 9999, "deliveryDays": 7 },
                "professional": { "monthlyBasePrice": 9999, "setupCost": 19999, "deliveryDays": 14 },
                "ultimate": { "monthlyBasePrice": 19999, "setupCost": 39999, "deliveryDays": 21 }
            }
        }
    }
}"#;

fn config_file(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("pricing.json");
    std::fs::write(&path, CONFIG).unwrap();
    path.display().to_string()
}

#[test]
fn help_prints() {
    Command::cargo_bin("wpaas")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn price_help() {
    Command::cargo_bin("wpaas")
        .unwrap()
        .args(["price", "--help"])
        .assert()
        .success();
}

#[test]
fn quote_help() {
    Command::cargo_bin("wpaas")
        .unwrap()
        .args(["quote", "--help"])
        .assert()
        .success();
}

#[test]
fn price_runs_locally() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::cargo_bin("wpaas")
        .unwrap()
        .args([
            "price",
            "--config",
            &config_file(&dir),
            "--input",
            r#"{"websiteType":"business","tier":"professional","billingCycle":"annual"}"#,
            "--date",
            "2026-06-01",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("\"discountPercent\": 20"), "{stdout}");
}

#[test]
fn price_reads_input_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("wpaas")
        .unwrap()
        .args(["price", "--config", &config_file(&dir), "--input", "-"])
        .write_stdin(r#"{"websiteType":"business","tier":"essential"}"#)
        .assert()
        .success();
}

#[test]
fn price_unknown_type_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("wpaas")
        .unwrap()
        .args([
            "price",
            "--config",
            &config_file(&dir),
            "--input",
            r#"{"websiteType":"spaceship","tier":"essential"}"#,
        ])
        .assert()
        .failure();
}

#[test]
fn types_lists_tiers() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::cargo_bin("wpaas")
        .unwrap()
        .args(["types", "--config", &config_file(&dir)])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("business - Business website"), "{stdout}");
    assert!(stdout.contains("₹9,999/mo"), "{stdout}");
}

#[test]
fn validate_accepts_good_config() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("wpaas")
        .unwrap()
        .args(["validate", "--config", &config_file(&dir)])
        .assert()
        .success();
}

#[test]
fn validate_fails_on_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "baseCurrency": "INR" }"#).unwrap();
    Command::cargo_bin("wpaas")
        .unwrap()
        .args(["validate", "--config", &path.display().to_string()])
        .assert()
        .failure();
}

#[test]
fn format_groups_indian_style() {
    let out = Command::cargo_bin("wpaas")
        .unwrap()
        .args(["format", "--amount", "1234567", "--currency", "INR"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "₹12,34,567");
}
