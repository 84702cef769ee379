use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finbud(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finbud").unwrap();
    cmd.env("FINBUD_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    finbud(&dir)
        .args(["init", "--name", "Sam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));
    dir
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    finbud(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("learn"))
        .stdout(predicate::str::contains("onboard"))
        .stdout(predicate::str::contains("shop"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    finbud(&dir)
        .args(["category", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finbud init"));
}

#[test]
fn init_twice_is_a_noop() {
    let dir = initialized();
    finbud(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn onboarding_creates_starter_budget() {
    let dir = initialized();
    finbud(&dir)
        .args(["onboard", "2000", "--avatar", "owl", "--set", "Transport=150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 6 categories"));

    finbud(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::contains("$700.00"))
        .stdout(predicate::str::contains("$150.00"));
}

#[test]
fn expense_shows_in_budget_summary() {
    let dir = initialized();
    finbud(&dir)
        .args(["category", "add", "Food", "400"])
        .assert()
        .success();
    finbud(&dir)
        .args([
            "transaction", "add", "50", "--category", "food", "--merchant", "Market", "--date",
            "2024-06-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense of $50.00"));

    finbud(&dir)
        .args(["budget", "summary", "--period", "month", "--date", "2024-06-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$400.00"))
        .stdout(predicate::str::contains("$350.00"))
        .stdout(predicate::str::contains("12.5%"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = initialized();
    finbud(&dir)
        .args(["transaction", "add", "5", "--category", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn lessons_unlock_in_order_and_pay_once() {
    let dir = initialized();

    finbud(&dir)
        .args(["learn", "complete", "budgeting", "2", "--answer", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    finbud(&dir)
        .args(["learn", "complete", "budgeting", "1", "--answer", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect answer"));

    finbud(&dir)
        .args(["learn", "complete", "budgeting", "1", "--answer", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+25 points"))
        .stdout(predicate::str::contains("First Steps"));

    finbud(&dir)
        .args(["learn", "complete", "budgeting", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already completed"));

    finbud(&dir)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total XP:       25"));
}

#[test]
fn goal_completion_is_announced_once() {
    let dir = initialized();
    finbud(&dir)
        .args(["goal", "add", "Bike", "100"])
        .assert()
        .success();

    finbud(&dir)
        .args(["goal", "contribute", "bike", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal reached"));

    finbud(&dir)
        .args(["goal", "contribute", "bike", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal reached").not());
}

#[test]
fn csv_export_needs_shop_unlock() {
    let dir = initialized();
    let output = dir.path().join("txns.csv");

    finbud(&dir)
        .args(["export", "transactions"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("shop buy feature_export"));

    finbud(&dir)
        .args(["shop", "buy", "feature_export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough tokens"));
}

#[test]
fn json_export_writes_file() {
    let dir = initialized();
    let output = dir.path().join("export.json");

    finbud(&dir)
        .args(["export", "all", "--pretty"])
        .arg(&output)
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("\"schema_version\": \"1.0.0\""));
    assert!(text.contains("\"display_name\": \"Sam\""));
}

#[test]
fn audit_lists_changes() {
    let dir = initialized();
    finbud(&dir)
        .args(["category", "add", "Rent", "900"])
        .assert()
        .success();

    finbud(&dir)
        .args(["audit", "--entity", "category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Category"))
        .stdout(predicate::str::contains("(Rent)"));
}
