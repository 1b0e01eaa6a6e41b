use bazaar_backend::util::password::*;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let result = PasswordUtilsImpl::hash_password(password);

    assert!(result.is_ok());
    let hash = result.unwrap();

    // Hash should not be empty and should not equal the original password
    assert!(!hash.is_empty());
    assert_ne!(hash, password);

    // Hash should be in PHC string format for Argon2
    assert!(hash.starts_with("$argon2"));
}

#[test]
fn test_hash_password_different_results() {
    let password = "same_password";
    let hash1 = PasswordUtilsImpl::hash_password(password).unwrap();
    let hash2 = PasswordUtilsImpl::hash_password(password).unwrap();

    // Random salts mean two hashes of the same password differ
    assert_ne!(hash1, hash2);

    // But both verify
    assert!(PasswordUtilsImpl::verify_password(password, &hash1).unwrap());
    assert!(PasswordUtilsImpl::verify_password(password, &hash2).unwrap());
}

#[test]
fn test_verify_password_correct() {
    let password = "CorrectHorseBatteryStaple1!";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    let result = PasswordUtilsImpl::verify_password(password, &hash);
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let password = "CorrectHorseBatteryStaple1!";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    let result = PasswordUtilsImpl::verify_password("wrong_password", &hash);
    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_empty_against_real_hash() {
    let hash = PasswordUtilsImpl::hash_password("not_empty").unwrap();
    assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash_format() {
    let result = PasswordUtilsImpl::verify_password("whatever", "not-a-phc-string");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_hash_password_unicode_characters() {
    let password = "Pässw0rd123!🔒";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();
    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("Passw0rd123!", &hash).unwrap());
}
