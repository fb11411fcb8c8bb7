pub mod encryption_key;
pub mod session_storage;
