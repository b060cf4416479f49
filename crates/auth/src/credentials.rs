/// Administrator login configured for the dashboard.
///
/// The dashboard has a single operator account; its credentials come from
/// configuration rather than the document store.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Check a login attempt. Emails compare case-insensitively; the password
    /// comparison does not short-circuit on the first differing byte.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let email_ok = self.email.eq_ignore_ascii_case(email.trim());
        let password_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        email_ok & password_ok
    }
}

impl core::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
