use thiserror::Error;

/// Interactive sign-in failure, passed through from the provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct IdentityError(pub String);

/// Third-party interactive sign-in issuing short-lived identity tokens.
///
/// The provider owns the whole user interaction (account picker popup); this
/// trait only sees the resulting token. Implementations live in sibling
/// modules: the browser popup flow on web, [`UnsupportedIdentity`] elsewhere.
pub trait IdentityProvider {
    /// Run the interactive sign-in flow and return the provider-issued
    /// identity token.
    fn sign_in(&self) -> impl std::future::Future<Output = Result<String, IdentityError>>;

    /// Terminate the provider-side session.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), IdentityError>>;
}

/// Identity provider for targets without a browser popup.
///
/// Sign-in always fails with a clear message; sign-out is a no-op so local
/// session teardown still works.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedIdentity;

impl IdentityProvider for UnsupportedIdentity {
    async fn sign_in(&self) -> Result<String, IdentityError> {
        Err(IdentityError(
            "interactive sign-in is not available on this platform".to_string(),
        ))
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(())
    }
}
