//! Authenticated identity as presented by the identity provider.

use serde::{Deserialize, Serialize};

/// An authenticated identity: the email and any claims from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The sign-in email address.
    pub email: String,
    /// Raw claim values (group names, app roles) from the provider.
    #[serde(default)]
    pub claims: Vec<String>,
}

impl Identity {
    /// Creates an identity carrying only an email.
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            claims: Vec::new(),
        }
    }

    /// Adds claims to the identity.
    pub fn with_claims<I, S>(mut self, claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.claims.extend(claims.into_iter().map(Into::into));
        self
    }

    /// The lowercased part of the email before `@`.
    ///
    /// ```
    /// use hrms_engine::models::Identity;
    ///
    /// assert_eq!(Identity::from_email("HR.Sara@acme.test").local_part(), "hr.sara");
    /// ```
    pub fn local_part(&self) -> String {
        self.email
            .split('@')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}
