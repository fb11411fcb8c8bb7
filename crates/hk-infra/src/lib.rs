pub mod security;
pub mod storage;

pub use security::InMemoryEncryptionKeyHolder;
pub use storage::EncryptedFileSessionStorage;
