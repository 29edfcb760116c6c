//! User provisioning and identity resolution.

use crate::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::models::{NewUser, Requester, User, UserProfile};
use crate::store::UserDirectory;
use std::sync::Arc;

/// User operations used by the auth provider and the identity extractor.
pub struct UserService<S: UserDirectory> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: UserDirectory> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S: UserDirectory> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Store a user created by the auth provider.
    ///
    /// # Errors
    /// [`AppError::Conflict`] when the email is already registered.
    pub fn provision(&self, input: NewUser) -> Result<User, AppError> {
        let user = User::new(input, self.clock.now());
        self.store.insert_user(&user)?;
        Ok(user)
    }

    /// Public profile of a user.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the id is unknown.
    pub fn profile(&self, id: &str) -> Result<UserProfile, AppError> {
        self.store
            .find_user(id)?
            .map(|user| UserProfile::from(&user))
            .ok_or(AppError::NotFound)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.store.find_user_by_email(email)
    }

    /// Turn a user id asserted by the auth provider into a requester.
    ///
    /// # Returns
    /// `None` when no such user exists.
    pub fn authenticate(&self, user_id: &str) -> Result<Option<Requester>, AppError> {
        Ok(self
            .store
            .find_user(user_id)?
            .map(|user| Requester::Authenticated(user.id)))
    }
}
