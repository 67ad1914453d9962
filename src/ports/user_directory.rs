//! User existence port.
//!
//! The identity subsystem is external; validation only needs to know
//! whether a referenced user exists.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Confirms that a user identity is known.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `true` if the user exists.
    ///
    /// Transient lookup failures are returned as `Err`, never as `false`.
    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directory_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn UserDirectory>();
    }
}
