mod envelope;
mod session_file;

pub use envelope::{SessionCipher, SessionEnvelope};
pub use session_file::EncryptedFileSessionStorage;
