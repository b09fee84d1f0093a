//! Account credentials and Basic-Auth encoding

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Address-book account
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header
    ///
    /// Plain base64 of the UTF-8 bytes of `email:password`. Servers that
    /// expect another charset for non-ASCII credentials will reject them.
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.email, self.password);
        format!("Basic {}", STANDARD.encode(raw.as_bytes()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
