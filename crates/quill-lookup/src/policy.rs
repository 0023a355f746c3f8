use serde::{Deserialize, Serialize};

/// Governs whether a candidate may be inserted without explicit user
/// confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoCompletionPolicy {
    /// Insert on a sole match regardless of user settings.
    AlwaysAutoComplete,
    /// Never insert without explicit confirmation.
    NeverAutoComplete,
    /// Defer to the user's auto-insertion settings.
    #[default]
    SettingsDependent,
    /// Let the candidate be auto-inserted once, but reopen the popup if the
    /// user keeps typing.
    GiveChance,
}
