use thiserror::Error;

const MIN_ACCOUNT_NAME_LEN: usize = 3;
const MAX_ACCOUNT_NAME_LEN: usize = 16;
const MIN_SEGMENT_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HiveUsernameError {
    #[error("username is empty")]
    Empty,
    #[error("username must be between {min} and {max} characters")]
    Length { min: usize, max: usize },
    #[error("segment `{0}` must be at least 3 characters")]
    SegmentTooShort(String),
    #[error("segment `{0}` must start with a letter")]
    BadStart(String),
    #[error("segment `{0}` must end with a letter or digit")]
    BadEnd(String),
    #[error("segment `{0}` may only contain lowercase letters, digits and single dashes")]
    BadCharacter(String),
}

/// Normalize user input (trim, strip a leading `@`, lowercase) and validate
/// it as a Hive account name.
pub fn normalize_username(input: &str) -> Result<String, HiveUsernameError> {
    let trimmed = input.trim();
    let name = trimmed
        .strip_prefix('@')
        .unwrap_or(trimmed)
        .to_ascii_lowercase();
    validate_username(&name)?;
    Ok(name)
}

pub fn validate_username(name: &str) -> Result<(), HiveUsernameError> {
    if name.is_empty() {
        return Err(HiveUsernameError::Empty);
    }
    if !(MIN_ACCOUNT_NAME_LEN..=MAX_ACCOUNT_NAME_LEN).contains(&name.len()) {
        return Err(HiveUsernameError::Length {
            min: MIN_ACCOUNT_NAME_LEN,
            max: MAX_ACCOUNT_NAME_LEN,
        });
    }

    for segment in name.split('.') {
        let bytes = segment.as_bytes();
        if bytes.len() < MIN_SEGMENT_LEN {
            return Err(HiveUsernameError::SegmentTooShort(segment.to_string()));
        }
        if !bytes[0].is_ascii_lowercase() {
            return Err(HiveUsernameError::BadStart(segment.to_string()));
        }
        let last = bytes[bytes.len() - 1];
        if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
            return Err(HiveUsernameError::BadEnd(segment.to_string()));
        }
        let allowed = bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-');
        if !allowed || segment.contains("--") {
            return Err(HiveUsernameError::BadCharacter(segment.to_string()));
        }
    }
    Ok(())
}
