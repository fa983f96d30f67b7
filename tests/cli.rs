//! End-to-end tests for the xpense binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn xpense(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("xpense").unwrap();
    cmd.env("XPENSE_DATA_DIR", dir.path());
    cmd
}

#[test]
fn init_creates_default_wallet() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    xpense(&dir)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash").and(predicate::str::contains("(default)")));
}

#[test]
fn add_then_list_today() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["add", "120", "-d", "Lunch", "-c", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense"));

    xpense(&dir)
        .args(["list", "--filter", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch").and(predicate::str::contains("৳120.00")));
}

#[test]
fn non_positive_amount_is_not_stored() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["add", "0", "-d", "Nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses detected"));

    xpense(&dir)
        .args(["list", "--filter", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn custom_range_listing() {
    let dir = TempDir::new().unwrap();

    for (date, description) in [("2024-05-01", "Rent"), ("2024-05-10", "Bus"), ("2024-06-01", "Gift")] {
        xpense(&dir)
            .args(["add", "50", "-d", description, "--date", date])
            .assert()
            .success();
    }

    xpense(&dir)
        .args(["list", "--from", "2024-05-01", "--to", "2024-05-31"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Rent")
                .and(predicate::str::contains("Bus"))
                .and(predicate::str::contains("Gift").not()),
        );
}

#[test]
fn removing_last_wallet_shows_notice() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["wallet", "remove", "Cash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one wallet"));
}

#[test]
fn wallet_hint_resolves_on_add() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["wallet", "add", "Card Visa", "--type", "card"])
        .assert()
        .success();

    xpense(&dir)
        .args(["add", "300", "-d", "Shoes", "-w", "visa", "--date", "2024-05-02"])
        .assert()
        .success();

    xpense(&dir)
        .args(["list", "--filter", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Card Visa"));
}

#[test]
fn import_candidates_from_json() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("voice.json");
    std::fs::write(
        &file,
        r#"[{"amount": 20, "category": "Food", "date": "2024-05-03"},
            {"amount": 0, "description": "ignored"}]"#,
    )
    .unwrap();

    xpense(&dir)
        .args(["import", file.to_str().unwrap(), "--source", "voice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Voice Entry"));

    xpense(&dir)
        .args(["summary", "--filter", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 expenses)"));
}

#[test]
fn sync_round_trip_through_sheet() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("shared.csv");
    std::fs::write(
        &sheet,
        "Date,Category,Description,Amount,Currency,Wallet\n\
         2024-05-01,Food,Coffee,12.50,BDT,Cash\n\
         2024-05-02,Transport,Rickshaw,\"৳1,250.00\",BDT,Cash\n\
         2024-05-03,Food,Broken,abc,BDT,Cash\n",
    )
    .unwrap();

    // Connecting with an empty collection restores from the sheet once
    xpense(&dir)
        .args(["sync", "connect", "me@example.com", "--sheet", sheet.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 2 expenses"));

    // Second run finds nothing new
    xpense(&dir)
        .args(["sync", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up to date."));

    // New local expenses are appended to the sheet
    xpense(&dir)
        .args(["add", "40", "-d", "Tea", "--date", "2024-05-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up 1"));

    let contents = std::fs::read_to_string(&sheet).unwrap();
    assert!(contents.contains("2024-05-04,Other,Tea,40,BDT,Cash"));
}

#[test]
fn sync_without_connection_fails() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["sync", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not connected"));
}

#[test]
fn config_set_and_show() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["config", "set", "week_start_day", "monday"])
        .assert()
        .success();

    xpense(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monday"));

    xpense(&dir)
        .args(["config", "set", "theme", "purple"])
        .assert()
        .failure();

    xpense(&dir)
        .args(["audit", "--entity", "settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week_start_day"));
}

#[test]
fn init_twice_reports_existing_setup() {
    let dir = TempDir::new().unwrap();

    xpense(&dir).arg("init").assert().success();

    xpense(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn export_filtered_view_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("may.csv");

    for (date, description) in [
        ("2024-05-01T09:15:00Z", "Rent"),
        ("2024-05-10", "Bus, \"express\""),
        ("2024-06-01", "Gift"),
    ] {
        xpense(&dir)
            .args(["add", "50", "-d", description, "-c", "Misc", "--date", date])
            .assert()
            .success();
    }

    xpense(&dir)
        .args(["export", "--from", "2024-05-01", "--to", "2024-05-31", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 expenses"));

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Date,Category,Description,Amount,Wallet",
            "2024-05-10,Misc,\"Bus, \"\"express\"\"\",50.00,Cash",
            "2024-05-01,Misc,Rent,50.00,Cash",
        ]
    );
}

#[test]
fn export_to_stdout() {
    let dir = TempDir::new().unwrap();

    xpense(&dir)
        .args(["add", "12.5", "-d", "Tea", "-c", "Food"])
        .assert()
        .success();

    xpense(&dir)
        .args(["export", "--filter", "today"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Date,Category,Description,Amount,Wallet")
                .and(predicate::str::contains("Food,Tea,12.50,Cash")),
        );
}

#[test]
fn unwritable_audit_log_does_not_lose_expense() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("audit.log")).unwrap();

    xpense(&dir)
        .args(["add", "5", "-d", "Tea", "--date", "2024-05-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense"))
        .stderr(predicate::str::contains("could not write audit log"));

    xpense(&dir)
        .args(["list", "--filter", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tea"));
}
