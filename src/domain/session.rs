use std::collections::HashMap;

/// Key under which the signed-in user's name is stored.
pub const USERNAME_KEY: &str = "username";

/// Per-process key/value store, shaped like browser session storage.
///
/// Nothing here is written to disk; the marker disappears with the window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore {
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Name of the signed-in user, if any. Empty names count as signed out.
    pub fn username(&self) -> Option<&str> {
        self.get_item(USERNAME_KEY).filter(|name| !name.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.username().is_some()
    }
}
