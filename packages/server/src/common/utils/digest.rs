use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of `text`.
///
/// Used for edit tokens and the admin password, which are only ever stored
/// or configured as digests.
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compare two digests without short-circuiting on the first mismatch.
pub fn digests_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Idempotency key for creating the payment customer of `email`.
///
/// Case-insensitive so "Ana@Example.com" and "ana@example.com" collapse
/// onto the same customer.
pub fn customer_idempotency_key(email: &str) -> String {
    format!("customer-{}", sha256_hex(&email.trim().to_lowercase()))
}
