//! Identity data models.

use bursar::users::User;
use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};

/// A provisioned account: an identity plus its credential digest.
///
/// Passwords are never stored; the account keeps a per-account salt and the
/// SHA-256 digest of the salted password.
#[derive(Debug, Clone)]
pub struct UserAccount {
    user: User,
    salt: String,
    password_digest: String,
}

impl UserAccount {
    /// Provision an account from an identity and a plaintext password.
    #[must_use]
    pub fn with_password(user: User, password: &str) -> Self {
        let salt = generate_salt();
        let password_digest = digest_password(&salt, password);

        Self {
            user,
            salt,
            password_digest,
        }
    }

    /// The account's identity.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Whether the supplied password matches this account's digest.
    #[must_use]
    pub(crate) fn verify(&self, password: &str) -> bool {
        digest_password(&self.salt, password) == self.password_digest
    }
}

fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use bursar::{
        roles::Role,
        users::{User, UserId},
    };

    use super::*;

    fn user() -> User {
        User {
            id: UserId::new(),
            name: "Mark Accountant".to_string(),
            email: "accountant@example.com".to_string(),
            role: Role::Accountant,
        }
    }

    #[test]
    fn verify_accepts_the_provisioned_password() {
        let account = UserAccount::with_password(user(), "hunter2");

        assert!(account.verify("hunter2"), "provisioned password must verify");
    }

    #[test]
    fn verify_rejects_other_passwords() {
        let account = UserAccount::with_password(user(), "hunter2");

        assert!(!account.verify("hunter3"), "wrong password must not verify");
        assert!(!account.verify(""), "empty password must not verify");
        assert!(!account.verify("Hunter2"), "password check is case-sensitive");
    }

    #[test]
    fn equal_passwords_produce_distinct_digests_across_accounts() {
        let first = UserAccount::with_password(user(), "password");
        let second = UserAccount::with_password(user(), "password");

        // Per-account salts keep identical passwords from sharing a digest.
        assert_ne!(first.password_digest, second.password_digest);
    }
}
