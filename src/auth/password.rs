use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
}

pub fn verify(password: &str, digest: &str) -> bool {
    PasswordHash::new(digest)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let digest = hash("hunter2").unwrap();
        assert!(verify("hunter2", &digest));
        assert!(!verify("hunter3", &digest));
    }

    #[test]
    fn malformed_digest_never_verifies() {
        assert!(!verify("hunter2", "not-a-phc-string"));
    }
}
