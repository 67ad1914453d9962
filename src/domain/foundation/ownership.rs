//! Ownership trait for user-owned resources.
//!
//! Study sessions belong to exactly one user. Handlers that load a stored
//! session on behalf of a caller use `check_ownership()` before reading,
//! editing or deleting it.
//!
//! # Example
//!
//! ```ignore
//! let session = repo.find_by_id(&id).await?
//!     .ok_or_else(|| SessionError::not_found(id))?;
//!
//! session.check_ownership(&caller)?;  // Err(Forbidden) if not owner
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for records that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning a `Forbidden` error if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}
