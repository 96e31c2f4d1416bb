//! Configured user table.
//!
//! # Design Decisions
//! - Built once from config, immutable afterwards (shared without locks)
//! - Password comparison is constant-time
//! - Unknown users and wrong passwords are indistinguishable to the caller

use std::collections::HashMap;

use subtle::ConstantTimeEq;

use crate::config::UserConfig;
use crate::security::basic_auth::Verifier;
use crate::security::credentials::Credentials;
use crate::security::principal::Principal;

struct UserEntry {
    password: String,
    roles: Vec<String>,
}

/// Verifier backed by a fixed set of users.
#[derive(Default)]
pub struct StaticUsers {
    users: HashMap<String, UserEntry>,
}

impl StaticUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(users: &[UserConfig]) -> Self {
        users.iter().fold(Self::new(), |table, user| {
            table.with_user(&user.name, &user.password, user.roles.iter().cloned())
        })
    }

    pub fn with_user<I>(mut self, name: &str, password: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.users.insert(
            name.to_string(),
            UserEntry {
                password: password.to_string(),
                roles: roles.into_iter().collect(),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Verifier for StaticUsers {
    fn verify(&self, credentials: &Credentials) -> Option<Principal> {
        let entry = self.users.get(credentials.user())?;
        let matches: bool = entry
            .password
            .as_bytes()
            .ct_eq(credentials.password().as_bytes())
            .into();
        matches.then(|| Principal::basic(credentials.user()).with_roles(entry.roles.iter().cloned()))
    }
}

impl std::fmt::Debug for StaticUsers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticUsers")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}
