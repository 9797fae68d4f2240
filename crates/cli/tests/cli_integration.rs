//! Integration tests for the hashtegrity binary using `assert_cmd`

use assert_cmd::Command;
use hashtegrity_core::HashAlgorithm;
use hashtegrity_hashing::{
    generate_directory_hash, generate_file_hash, generate_hash, DirectoryHashOptions, HashOptions,
    Value,
};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command running in `dir` with no hashtegrity environment leaking in
fn hashtegrity(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hashtegrity").expect("Failed to find hashtegrity binary");
    cmd.current_dir(dir)
        .env_remove("HASHTEGRITY_ALGORITHM")
        .env_remove("HASHTEGRITY_KEY")
        .env_remove("HASHTEGRITY_CONFIG")
        .env("HASHTEGRITY_LOG", "off");
    cmd
}

fn stdout_line(output: &[u8]) -> String {
    String::from_utf8_lossy(output).trim().to_string()
}

mod hashing {
    use super::*;

    #[test]
    fn test_hash_data_string() {
        let temp = TempDir::new().unwrap();
        let expected = generate_hash(&Value::from("hello"), &HashOptions::default()).unwrap();

        hashtegrity(temp.path())
            .args(["hash", "data", "hello"])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }

    #[test]
    fn test_hash_data_json_with_options() {
        let temp = TempDir::new().unwrap();
        let options = HashOptions::new(HashAlgorithm::Sha512)
            .with_key("secret")
            .with_metadata("env", "prod");
        let value = Value::from(serde_json::json!({ "b": 2, "a": [1, 2] }));
        let expected = generate_hash(&value, &options).unwrap();

        hashtegrity(temp.path())
            .args([
                "hash",
                "data",
                r#"{"a":[1,2],"b":2}"#,
                "--algorithm",
                "sha512",
                "--key",
                "secret",
                "--metadata",
                "env=prod",
            ])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }

    #[test]
    fn test_hash_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.bin");
        fs::write(&path, b"file contents").unwrap();
        let expected = generate_file_hash(&path, &HashOptions::default()).unwrap();

        hashtegrity(temp.path())
            .args(["hash", "file", "data.bin"])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }

    #[test]
    fn test_hash_dir_with_exclude() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tree");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("keep.txt"), "keep").unwrap();
        fs::write(dir.join("sub/skip.log"), "skip").unwrap();

        let options = DirectoryHashOptions::default().exclude(["**/*.log"]);
        let expected = generate_directory_hash(&dir, &options).unwrap();

        hashtegrity(temp.path())
            .args(["hash", "dir"])
            .arg(&dir)
            .args(["--exclude", "**/*.log"])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }

    #[test]
    fn test_config_file_applies() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("hashtegrity.json"),
            r#"{ "algorithm": "sha384" }"#,
        )
        .unwrap();
        let expected = generate_hash(
            &Value::from("hello"),
            &HashOptions::new(HashAlgorithm::Sha384),
        )
        .unwrap();

        hashtegrity(temp.path())
            .args(["hash", "data", "hello"])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }

    #[test]
    fn test_missing_file_fails() {
        let temp = TempDir::new().unwrap();

        hashtegrity(temp.path())
            .args(["hash", "file", "missing.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let temp = TempDir::new().unwrap();

        hashtegrity(temp.path())
            .args(["hash", "data", "x", "--algorithm", "md5"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("md5"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_validate_data_valid_and_invalid() {
        let temp = TempDir::new().unwrap();
        let expected = generate_hash(&Value::from("payload"), &HashOptions::default()).unwrap();

        hashtegrity(temp.path())
            .args(["validate", "data", "payload", "--expected", &expected])
            .assert()
            .success()
            .stdout("valid\n");

        hashtegrity(temp.path())
            .args(["validate", "data", "tampered", "--expected", &expected])
            .assert()
            .code(1)
            .stdout("invalid\n");
    }

    #[test]
    fn test_validate_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "original").unwrap();
        let expected = generate_file_hash(&path, &HashOptions::default()).unwrap();

        hashtegrity(temp.path())
            .args(["validate", "file", "file.txt", "--expected", &expected])
            .assert()
            .success();

        fs::write(&path, "changed").unwrap();
        hashtegrity(temp.path())
            .args(["validate", "file", "file.txt", "--expected", &expected])
            .assert()
            .code(1);
    }

    #[test]
    fn test_validate_requires_expected() {
        let temp = TempDir::new().unwrap();

        hashtegrity(temp.path())
            .args(["validate", "data", "payload"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--expected"));
    }
}

mod hash_list {
    use super::*;

    #[test]
    fn test_build_root_add_verify() {
        let temp = TempDir::new().unwrap();

        let build = hashtegrity(temp.path())
            .args(["list", "build", "list.json", "a", "b", "c", "d"])
            .assert()
            .success();
        let built_root = stdout_line(&build.get_output().stdout);
        assert_eq!(built_root.len(), 64);

        hashtegrity(temp.path())
            .args(["list", "root", "list.json"])
            .assert()
            .success()
            .stdout(format!("{built_root}\n"));

        hashtegrity(temp.path())
            .args(["list", "verify", "list.json", "b", "--root", &built_root])
            .assert()
            .success()
            .stdout("valid\n");

        let add = hashtegrity(temp.path())
            .args(["list", "add", "list.json", "e"])
            .assert()
            .success();
        let new_root = stdout_line(&add.get_output().stdout);
        assert_ne!(new_root, built_root);

        hashtegrity(temp.path())
            .args(["list", "verify", "list.json", "b", "--root", &built_root])
            .assert()
            .code(1)
            .stdout("invalid\n");

        hashtegrity(temp.path())
            .args(["list", "verify", "list.json", "zzz", "--root", &new_root])
            .assert()
            .code(1);
    }

    #[test]
    fn test_document_is_tree_json() {
        let temp = TempDir::new().unwrap();

        hashtegrity(temp.path())
            .args(["list", "build", "list.json", "x", "y", "--algorithm", "sha224"])
            .assert()
            .success();

        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("list.json")).unwrap())
                .unwrap();
        assert_eq!(document["algorithm"], "sha224");
        assert_eq!(document["leaves"].as_array().unwrap().len(), 2);
        assert_eq!(document["layers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_prove_outputs_steps() {
        let temp = TempDir::new().unwrap();

        hashtegrity(temp.path())
            .args(["list", "build", "list.json", "a", "b"])
            .assert()
            .success();

        hashtegrity(temp.path())
            .args(["list", "prove", "list.json", "a"])
            .assert()
            .success()
            .stdout(predicate::str::contains("sibling_hash"));

        hashtegrity(temp.path())
            .args(["list", "prove", "list.json", "missing"])
            .assert()
            .code(1);
    }

    #[test]
    fn test_corrupt_document_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("list.json"), "{}").unwrap();

        hashtegrity(temp.path())
            .args(["list", "root", "list.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "failed to deserialize verifiable hash list",
            ));
    }
}
