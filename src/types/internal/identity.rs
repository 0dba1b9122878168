use crate::errors::ApiError;

/// The reconciled request-scoped identity.
///
/// Produced once per request by the `IdentityResolver` and threaded
/// explicitly through handlers; after it exists, exactly one user directory
/// record exists for `subject_id`.
///
/// Admin status deliberately has two sources of truth: the identity
/// provider's token claim (`admin_claim`, survives local data loss) and the
/// locally stored flag (`local_admin`, lets admins promote a user without
/// waiting for the user's next token refresh). `merged_admin` is their OR and
/// is the only value authorization decisions may consult.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Local directory id; author references point here
    pub user_id: String,
    pub subject_id: String,
    pub email: String,
    pub username: String,
    pub local_admin: bool,
    pub admin_claim: bool,
}

impl Identity {
    pub fn merged_admin(&self) -> bool {
        self.admin_claim || self.local_admin
    }

    /// Authorization gate for admin-designated routes.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.merged_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }

    /// True when this identity may mutate or delete a resource owned by
    /// `author_id`.
    pub fn may_modify(&self, author_id: &str) -> bool {
        self.user_id == author_id || self.merged_admin()
    }
}
