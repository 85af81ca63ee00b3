use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const PARSED: &str = r#"{
  "manifests": {
    "manifest-md5.txt": { "data/a.txt": "abc123" },
    "tagmanifest-md5.txt": { "bag-info.txt": "def456" }
  },
  "tag_files": {
    "bag-info.txt": [
      { "key": "Title", "value": "First" },
      { "key": "Title", "value": "Second" }
    ],
    "aptrust-info.txt": [ { "key": "Title", "value": "Third" } ]
  }
}"#;

fn make_bag(td: &assert_fs::TempDir, name: &str) -> assert_fs::fixture::ChildPath {
    let bag = td.child(name);
    bag.child("bagit.txt").write_str("BagIt-Version: 1.0\n").unwrap();
    bag.child("bag-info.txt").write_str("Title: First\nTitle: Second\n").unwrap();
    bag.child("aptrust-info.txt").write_str("Title: Third\n").unwrap();
    bag.child("manifest-md5.txt").write_str("abc123  data/a.txt\n").unwrap();
    bag.child("tagmanifest-md5.txt").write_str("def456  bag-info.txt\n").unwrap();
    bag.child("data/a.txt").write_str("abc").unwrap();
    bag.child("data/sub/b.txt").write_str("hello").unwrap();
    bag
}

fn bagit() -> Command {
    Command::cargo_bin("bagit").unwrap()
}

#[test]
fn inspect_prints_collection_counts() {
    let td = assert_fs::TempDir::new().unwrap();
    let bag = make_bag(&td, "bag");
    bagit()
        .args(["inspect", "--list", bag.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("payload files:  2 (8 bytes)"))
        .stdout(predicate::str::contains("manifests:      1 [md5]"))
        .stdout(predicate::str::contains("tag files:      3"))
        .stdout(predicate::str::contains("data/sub/b.txt"));
}

#[test]
fn inspect_json_covers_several_bags() {
    let td = assert_fs::TempDir::new().unwrap();
    let one = make_bag(&td, "one");
    let two = make_bag(&td, "two");
    two.child("data/c.txt").write_str("c").unwrap();
    let out = bagit()
        .args(["inspect", "--json", one.path().to_str().unwrap(), two.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(out.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["payload"], 2);
    assert_eq!(reports[1]["payload"], 3);
    assert_eq!(reports[0]["tag_manifest_algorithms"][0], "md5");
    assert!(reports[0].get("files").is_none());
}

#[test]
fn inspect_missing_bag_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    bagit()
        .args(["inspect", td.child("nope").path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load bag"));
}

#[test]
fn checksum_lookup_and_missing_manifest() {
    let td = assert_fs::TempDir::new().unwrap();
    let bag = make_bag(&td, "bag");
    let parsed = td.child("parsed.json");
    parsed.write_str(PARSED).unwrap();
    let parsed = parsed.path().to_str().unwrap();
    let bag = bag.path().to_str().unwrap();

    bagit()
        .args(["checksum", "--parsed", parsed, "--algorithm", "md5", bag, "data/a.txt"])
        .assert()
        .success()
        .stdout("abc123\n");

    bagit()
        .args(["checksum", "--parsed", parsed, "--algorithm", "md5", bag, "bag-info.txt"])
        .assert()
        .success()
        .stdout("def456\n");

    bagit()
        .args(["checksum", "--parsed", parsed, "--algorithm", "md5", bag, "data/sub/b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not listed)"));

    bagit()
        .args(["checksum", "--parsed", parsed, "--algorithm", "sha256", bag, "data/a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest-sha256.txt is missing"));
}

#[test]
fn tags_across_files_and_in_one_file() {
    let td = assert_fs::TempDir::new().unwrap();
    let bag = make_bag(&td, "bag");
    let parsed = td.child("parsed.json");
    parsed.write_str(PARSED).unwrap();
    let parsed = parsed.path().to_str().unwrap();
    let bag = bag.path().to_str().unwrap();

    bagit()
        .args(["tags", "--parsed", parsed, bag, "Title"])
        .assert()
        .success()
        .stdout("Third\nFirst\nSecond\n");

    bagit()
        .args(["tags", "--parsed", parsed, "--file", "bag-info.txt", bag, "Title"])
        .assert()
        .success()
        .stdout("First\nSecond\n");

    bagit()
        .args(["tags", "--parsed", parsed, bag, "Nonexistent"])
        .assert()
        .success()
        .stdout("(not found)\n");

    bagit()
        .args(["tags", "--parsed", parsed, "--file", "other-info.txt", bag, "Title"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tag file other-info.txt is not in bag"));
}
