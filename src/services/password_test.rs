use super::*;

#[test]
fn hash_produces_argon2_phc_string() {
    let hashed = hash("correct horse battery").unwrap();
    assert!(hashed.starts_with("$argon2"));
    assert!(!hashed.contains("correct horse battery"));
}

#[test]
fn hash_uses_fresh_salt_each_call() {
    let a = hash("same-password").unwrap();
    let b = hash("same-password").unwrap();
    assert_ne!(a, b);
}

#[test]
fn verify_accepts_matching_password() {
    let hashed = hash("hunter2hunter2").unwrap();
    assert!(verify("hunter2hunter2", &hashed));
}

#[test]
fn verify_rejects_wrong_password() {
    let hashed = hash("hunter2hunter2").unwrap();
    assert!(!verify("hunter3hunter3", &hashed));
}

#[test]
fn verify_rejects_malformed_hash() {
    assert!(!verify("anything", "not-a-phc-string"));
    assert!(!verify("anything", ""));
}

#[tokio::test]
async fn blocking_helpers_round_trip() {
    let hashed = hash_blocking("blocking-pass".to_owned()).await.unwrap();
    assert!(verify_blocking("blocking-pass".to_owned(), hashed.clone()).await.unwrap());
    assert!(!verify_blocking("other-pass".to_owned(), hashed).await.unwrap());
}

#[test]
fn dummy_hash_is_a_real_argon2_hash() {
    assert!(dummy_hash().starts_with("$argon2"));
    assert!(PasswordHash::new(dummy_hash()).is_ok());
}

#[tokio::test]
async fn dummy_verify_never_matches() {
    assert!(!verify_dummy_blocking("whatever-password".to_owned()).await.unwrap());
    assert!(!verify_dummy_blocking("unrlsd-absent-credential".to_owned()).await.unwrap());
}

#[test]
fn password_len_counts_utf16_units() {
    assert_eq!(password_len("abcdefgh"), 8);
    assert_eq!(password_len("é"), 1);
    assert_eq!(password_len("🎵"), 2);
}
