use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;

/// Hash a password as `salt$hex(sha256(password + salt))` with a fresh salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    hash_with_salt(password, &hex::encode(salt))
}

fn hash_with_salt(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    format!("{}${}", salt, hex::encode(hasher.finalize()))
}

/// Check a password against a stored `salt$hash` value.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, _)) if !salt.is_empty() => hash_with_salt(password, salt) == stored,
        _ => false,
    }
}
