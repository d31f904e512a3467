//! End-to-end secret lifecycle against the fake KMS.
//!
//! Exercises the full add -> list -> run -> rm flow through the service
//! layer, including the on-disk document shape and injection into a real
//! child process.

use sctl_integration_tests::test_key;
use sctl_secrets::testing::FakeKms;
use sctl_secrets::{DecryptPolicy, RecordStore, SecretError, SecretService};
use tempfile::TempDir;

fn scenario() -> (SecretService, FakeKms, TempDir) {
    let tmp = TempDir::new().unwrap();
    let store = RecordStore::new(tmp.path().join(".scuttle.json"));
    (SecretService::new(store), FakeKms::new(&test_key()), tmp)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let (service, kms, tmp) = scenario();
    let key = test_key();

    // add FOO bar
    service.add(&kms, &key, "foo", "bar").await.unwrap();

    // the document holds exactly one record, upper-cased, with the
    // ciphertext encoded and the plaintext nowhere on disk
    let raw = std::fs::read_to_string(tmp.path().join(".scuttle.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = doc.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "FOO");
    assert!(records[0]["cypher"].is_string());
    assert!(records[0]["created"].is_string());
    assert!(!raw.contains("bar"), "plaintext must not appear in the document");

    // list prints FOO
    assert_eq!(service.list().await.unwrap(), vec!["FOO"]);

    // run: the child sees FOO=bar
    let code = service
        .run(
            &kms,
            &key,
            DecryptPolicy::Fail,
            "sh",
            &["-c".to_string(), r#"test "$FOO" = bar"#.to_string()],
        )
        .await
        .unwrap();
    assert_eq!(code, 0);

    // rm FOO; list prints nothing
    service.remove("FOO").await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_document_fails_list() {
    let (service, _kms, tmp) = scenario();
    std::fs::write(tmp.path().join(".scuttle.json"), "{ definitely not an array").unwrap();

    let result = service.list().await;
    assert!(
        matches!(result, Err(SecretError::CorruptStore { .. })),
        "a corrupt store must fail loudly, not read as empty"
    );
}

#[tokio::test]
async fn test_update_keeps_name_unique() {
    let (service, kms, _tmp) = scenario();
    let key = test_key();

    service.add(&kms, &key, "db_pass", "v1").await.unwrap();
    service.add(&kms, &key, "DB_PASS", "v2").await.unwrap();

    let names = service.list().await.unwrap();
    assert_eq!(names, vec!["DB_PASS"]);

    let env = service.decrypt_all(&kms, &key, DecryptPolicy::Fail).await.unwrap();
    assert_eq!(env.len(), 1);
    assert_eq!(env[0].1.expose_secret(), "v2");
}

#[tokio::test]
async fn test_run_rejected_key_fails_before_launch() {
    let (service, kms, tmp) = scenario();
    let key = test_key();

    service.add(&kms, &key, "token", "secret").await.unwrap();

    let wrong_key = sctl_core::KeyRef::new("projects/other/cryptoKeys/nope").unwrap();
    let marker = tmp.path().join("launched");
    let result = service
        .run(
            &kms,
            &wrong_key,
            DecryptPolicy::Fail,
            "touch",
            &[marker.to_string_lossy().to_string()],
        )
        .await;

    assert!(matches!(result, Err(SecretError::CryptoRejected(_))));
    assert!(!marker.exists(), "the command must not launch when decryption fails");
}

#[tokio::test]
async fn test_launch_failure_surfaces_os_error() {
    let (service, kms, _tmp) = scenario();
    let key = test_key();

    let result = service
        .run(
            &kms,
            &key,
            DecryptPolicy::Fail,
            "sctl-no-such-binary-anywhere",
            &[],
        )
        .await;
    assert!(matches!(result, Err(SecretError::Launch { .. })));
}

#[tokio::test]
async fn test_child_exit_status_forwarded() {
    let (service, kms, _tmp) = scenario();
    let key = test_key();

    let code = service
        .run(
            &kms,
            &key,
            DecryptPolicy::Fail,
            "sh",
            &["-c".to_string(), "exit 42".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(code, 42);
}
