//! Authenticated identity attached to a request.

/// Scheme tag recorded for principals authenticated with Basic credentials.
pub const BASIC_SCHEME: &str = "Basic";

/// Context attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    name: String,
    scheme: String,
    roles: Vec<String>,
}

impl Principal {
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
            roles: Vec::new(),
        }
    }

    /// Principal for a user authenticated with Basic credentials.
    pub fn basic(name: impl Into<String>) -> Self {
        Self::new(name, BASIC_SCHEME)
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
