pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use traits::{CredentialStore, CREDENTIAL_KEY};
