//! Session management on top of the external authentication service.
//!
//! The provider is the only writer of the current session. Views receive a
//! [`SessionHandle`] and can read who is signed in, never change it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::{ApiError, Author, ForumClient, Session};

const MIN_PASSWORD_LEN: usize = 8;

/// Read-only view of the current session.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    /// Get a clone of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Display name of the signed-in user.
    pub fn username(&self) -> Option<String> {
        self.inner.read().as_ref().map(|s| s.user.name.clone())
    }

    /// The current session, or [`ApiError::LoginRequired`].
    pub fn require(&self) -> Result<Session, ApiError> {
        self.current().ok_or(ApiError::LoginRequired)
    }

    /// The current session if its user wrote the item by `author`.
    ///
    /// `items` names what is being changed ("posts", "comments") in the
    /// [`ApiError::Forbidden`] message.
    pub fn require_author(&self, author: &Author, items: &str) -> Result<Session, ApiError> {
        let session = self.require()?;
        if author.display_name() == Some(session.user.name.as_str()) {
            Ok(session)
        } else {
            Err(ApiError::Forbidden(format!(
                "You can only delete your own {}",
                items
            )))
        }
    }
}

/// Owns the session and talks to the auth endpoints.
#[derive(Clone)]
pub struct SessionProvider {
    client: ForumClient,
    handle: SessionHandle,
}

impl SessionProvider {
    pub fn new(client: ForumClient) -> Self {
        Self {
            client,
            handle: SessionHandle::default(),
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn current(&self) -> Option<Session> {
        self.handle.current()
    }

    /// Sign in with email and password.
    ///
    /// Input is checked locally first. Any rejection from the auth service
    /// is reported with one generic message.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(ApiError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }

        match self.client.sign_in_email(email.trim(), password).await {
            Ok(session) => {
                tracing::info!(user = %session.user.name, "Signed in");
                self.set(Some(session.clone()));
                Ok(session)
            }
            Err(err) => {
                tracing::warn!("Sign-in failed: {}", err);
                Err(ApiError::Validation("Unable to log in currently!".to_string()))
            }
        }
    }

    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("Name cannot be empty".to_string()));
        }
        validate_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let session = self
            .client
            .sign_up_email(name.trim(), email.trim(), password)
            .await?;
        tracing::info!(user = %session.user.name, "Signed up");
        self.set(Some(session.clone()));
        Ok(session)
    }

    /// Ask the auth service who we are and store the answer.
    pub async fn refresh(&self) -> Result<Option<Session>, ApiError> {
        let session = self.client.get_session().await?;
        self.set(session.clone());
        Ok(session)
    }

    /// Sign out. The local session is cleared even if the request fails.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = self.client.sign_out().await;
        self.set(None);
        if let Err(err) = &result {
            tracing::warn!("Sign-out request failed: {}", err);
        }
        result
    }

    fn set(&self, session: Option<Session>) {
        *self.handle.inner.write() = session;
    }
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation("Invalid email address".to_string()))
    }
}
