pub const CHARACTER_DESCRIPTION_MIN_LENGTH: usize = 20;
pub const CHARACTER_DESCRIPTION_MAX_LENGTH: usize = 400;
pub const TEXT_MIN_LENGTH: usize = 100;
pub const TEXT_MAX_LENGTH: usize = 400;

/// Check the trimmed character count of `value` against inclusive bounds.
/// The error message is user-facing.
pub fn validate_length(value: &str, field: &str, min: usize, max: usize) -> Result<(), String> {
    let length = value.trim().chars().count();

    if length < min {
        return Err(format!(
            "{field} must be at least {min} characters long. Current length: {length}."
        ));
    }
    if length > max {
        return Err(format!(
            "{field} must be no longer than {max} characters. Current length: {length}."
        ));
    }
    Ok(())
}

pub fn validate_character_description(description: &str) -> Result<(), String> {
    validate_length(
        description,
        "Character description",
        CHARACTER_DESCRIPTION_MIN_LENGTH,
        CHARACTER_DESCRIPTION_MAX_LENGTH,
    )
}

pub fn validate_text(text: &str) -> Result<(), String> {
    validate_length(text, "Text", TEXT_MIN_LENGTH, TEXT_MAX_LENGTH)
}
