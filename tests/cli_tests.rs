//! End-to-end tests for the `wallet` binary against a temporary data dir

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wallet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wallet").unwrap();
    cmd.env("WALLET_DATA_DIR", dir.path());
    cmd
}

#[test]
fn test_balance_on_fresh_wallet() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("الرصيد الرئيسي: 0 دج"));
}

#[test]
fn test_recharge_below_minimum_is_rejected() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .args(["recharge", "500", "AB12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("الحد الأدنى"));

    wallet(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("لا توجد معاملات حتى الآن"));
}

#[test]
fn test_recharge_shows_in_history() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .args(["recharge", "5000", "AB12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("تم إرسال طلب الشحن"))
        .stdout(predicate::str::contains("Pending"));

    wallet(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("شحن المحفظة"))
        .stdout(predicate::str::contains("+5,000 دج"));

    // Recharges wait for verification; the balance is unchanged
    wallet(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("الرصيد الرئيسي: 0 دج"))
        .stdout(predicate::str::contains("Notifications: 1"));
}

#[test]
fn test_transfer_over_balance_is_rejected() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .args(["transfer", "amina@example.com", "1000"])
        .assert()
        .failure();

    wallet(&dir)
        .arg("notifications")
        .assert()
        .success()
        .stdout(predicate::str::contains("لا توجد إشعارات"));
}

#[test]
fn test_add_save_and_convert_update_balance() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .args(["add", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("تم الشحن بنجاح"));

    wallet(&dir)
        .args(["save", "4000", "--invest"])
        .assert()
        .success();

    wallet(&dir)
        .args(["convert", "dzd", "eur", "1000", "5"])
        .assert()
        .success();

    wallet(&dir)
        .args(["convert", "eur", "dzd", "50", "10000"])
        .assert()
        .failure();

    wallet(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("الرصيد الرئيسي: 5,000 دج"));

    wallet(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("استثمار"));
}

#[test]
fn test_card_request_then_show() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .args(["card", "show"])
        .assert()
        .failure();

    wallet(&dir)
        .args(["card", "request", "algeria", "12 Rue Didouche Mourad, Alger"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delivery to: الجزائر"));

    wallet(&dir)
        .args(["card", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("غير مفعلة"));

    wallet(&dir)
        .args(["card", "request", "algeria", "somewhere else"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("لديك بطاقة بالفعل"));
}

#[test]
fn test_card_activation_with_wrong_code() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .args(["card", "request", "tunisia", "Avenue Habib Bourguiba"])
        .assert()
        .success();

    wallet(&dir)
        .args(["card", "activate", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CVV"));
}

#[test]
fn test_config_prints_paths() {
    let dir = TempDir::new().unwrap();

    wallet(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base directory"))
        .stdout(predicate::str::contains("limits"));
}
