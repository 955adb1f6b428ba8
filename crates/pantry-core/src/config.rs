use serde::de::DeserializeOwned;

/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-case
/// env vars (`database_url` ← `DATABASE_URL`). Use `#[serde(default = ...)]`
/// for optional settings.
pub trait Config: Sized + DeserializeOwned {
    /// Load from the process environment.
    fn load() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit list of `(KEY, value)` pairs.
    fn load_from<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Load from the process environment at startup.
    ///
    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::load().expect("failed to load config from environment")
    }
}
