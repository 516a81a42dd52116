use anyhow::Result;

/// Fixed key the credential is persisted under.
pub const CREDENTIAL_KEY: &str = "cerebras_api_key";

/// Holds the single engine credential across sessions.
///
/// The value is opaque: it is never validated here, and a bad key only shows
/// up as an error from the engine. It is stored unencrypted.
pub trait CredentialStore: Send + Sync {
    /// The persisted credential, or an empty string when none is stored or
    /// the backing store cannot be read.
    fn load(&self) -> String;

    /// Overwrites the persisted credential.
    fn save(&self, value: &str) -> Result<()>;
}
