use crate::auth::TokenStore;

/// Session context owning the credential store.
///
/// Components that need the credential receive this explicitly; there is no
/// ambient global. The session is logged in exactly when a token is present:
/// set by the most recent successful login, destroyed by [`Session::logout`]
/// (user action or an unauthorized response).
pub struct Session {
    store: Box<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// The current token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.get().is_some()
    }

    /// Record a successful login.
    pub fn login(&mut self, token: String) {
        self.store.set(token);
    }

    /// Clear the credential. Returns whether a token was actually present,
    /// so the caller can tell a real logout from a redundant one.
    pub fn logout(&mut self) -> bool {
        let had_token = self.store.get().is_some();
        self.store.clear();
        had_token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
