//! Identity service.

use bursar::users::User;
use mockall::automock;
use tracing::{info, warn};

use crate::auth::{AuthError, UserAccount};

/// Resolves credential pairs to identities.
#[automock]
pub trait IdentityService: Send + Sync {
    /// Authenticate an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when no account matches.
    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;
}

/// Identity provider backed by a fixed in-memory directory.
///
/// No rate limiting and no lockout; a deployment that needs either should
/// put a real credential store behind [`IdentityService`] instead.
#[derive(Debug, Clone)]
pub struct DirectoryIdentityService {
    accounts: Vec<UserAccount>,
}

impl DirectoryIdentityService {
    /// Build a directory from provisioned accounts.
    #[must_use]
    pub fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    /// The demo directory: the fixture CEO and accountant, both provisioned
    /// with the password `password`.
    #[must_use]
    pub fn demo() -> Self {
        let directory = bursar::fixtures::demo_users();

        Self::new(vec![
            UserAccount::with_password(directory.ceo, "password"),
            UserAccount::with_password(directory.accountant, "password"),
        ])
    }
}

impl IdentityService for DirectoryIdentityService {
    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // The email is the login key; the match is case-sensitive.
        let account = self
            .accounts
            .iter()
            .find(|account| account.user().email == email);

        match account {
            Some(account) if account.verify(password) => {
                info!(user = %account.user().id, "authenticated");

                Ok(account.user().clone())
            }
            _ => {
                warn!(email, "authentication failed");

                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bursar::roles::Role;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn demo_directory_authenticates_both_roles() -> TestResult {
        let identity = DirectoryIdentityService::demo();

        let ceo = identity.authenticate("ceo@example.com", "password")?;
        assert_eq!(ceo.role, Role::Ceo);

        let accountant = identity.authenticate("accountant@example.com", "password")?;
        assert_eq!(accountant.role, Role::Accountant);

        Ok(())
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let identity = DirectoryIdentityService::demo();

        let result = identity.authenticate("ceo@example.com", "wrong");

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[test]
    fn unknown_email_is_invalid_credentials() {
        let identity = DirectoryIdentityService::demo();

        let result = identity.authenticate("bad@x.com", "wrong");

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let identity = DirectoryIdentityService::demo();

        let result = identity.authenticate("CEO@example.com", "password");

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[test]
    fn empty_directory_rejects_everyone() {
        let identity = DirectoryIdentityService::new(Vec::new());

        let result = identity.authenticate("ceo@example.com", "password");

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }
}
