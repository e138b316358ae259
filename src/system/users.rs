use std::collections::HashMap;

use nix::unistd::{Uid, User};

/// uid to user-name lookup.
pub trait UserResolver {
    fn lookup(&self, uid: u32) -> Option<String>;
}

/// Resolves through the system passwd database.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUsers;

impl UserResolver for SystemUsers {
    fn lookup(&self, uid: u32) -> Option<String> {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(user) => user.map(|u| u.name),
            Err(err) => {
                tracing::debug!(uid, %err, "passwd lookup failed");
                None
            }
        }
    }
}

impl UserResolver for HashMap<u32, String> {
    fn lookup(&self, uid: u32) -> Option<String> {
        self.get(&uid).cloned()
    }
}

/// Caches resolved names. Unknown uids are shown as the number itself.
#[derive(Debug, Default)]
pub struct UserNames<R = SystemUsers> {
    resolver: R,
    cache: HashMap<u32, String>,
}

impl<R: UserResolver> UserNames<R> {
    pub fn new(resolver: R) -> Self {
        UserNames {
            resolver,
            cache: HashMap::new(),
        }
    }

    pub fn name(&mut self, uid: u32) -> &str {
        let resolver = &self.resolver;
        self.cache
            .entry(uid)
            .or_insert_with(|| resolver.lookup(uid).unwrap_or_else(|| uid.to_string()))
    }
}
