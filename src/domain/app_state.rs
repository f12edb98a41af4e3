use serde::{Deserialize, Serialize};

/// Application-wide settings the user can change at runtime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Backend origin saved from the settings page.
    pub saved_origin: Option<String>,
}

impl AppState {
    pub fn from_persisted(persisted: PersistedState) -> Self {
        let mut state = Self::default();
        state.apply_persisted(persisted);
        state
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.saved_origin = persisted.origin.filter(|origin| !origin.trim().is_empty());
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            origin: self.saved_origin.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub origin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_saved_origin_is_ignored() {
        let state = AppState::from_persisted(PersistedState {
            origin: Some("  ".into()),
        });
        assert_eq!(state.saved_origin, None);
    }

    #[test]
    fn persisted_round_trip() {
        let state = AppState {
            saved_origin: Some("https://dealers.example.com".into()),
        };
        assert_eq!(AppState::from_persisted(state.to_persisted()), state);
    }
}
