//! Field validation for registration and item payloads.
//!
//! Messages are prefixed with the field name and surface verbatim in the
//! `detail` of a 400 response.

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const ITEM_NAME_MAX_LEN: usize = 255;

/// Unwrap a required field
pub fn required<T>(value: Option<T>, field_name: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("{field_name}: This field is required."))
}

/// Strip surrounding whitespace from a submitted text field
pub fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Reject empty or whitespace-only strings
pub fn validate_not_blank(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name}: This field may not be blank."));
    }
    Ok(())
}

/// Validate that a string's length (in characters) does not exceed `max`.
pub fn validate_max_length(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!(
            "{field_name}: Ensure this field has no more than {max} characters."
        ));
    }
    Ok(())
}

/// Letters, digits and `@ . + - _` only, 1-150 characters.
pub fn validate_username(username: &str) -> Result<(), String> {
    validate_not_blank(username, "username")?;
    validate_max_length(username, USERNAME_MAX_LEN, "username")?;

    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !username.chars().all(allowed) {
        return Err("username: Enter a valid username. This value may contain only letters, \
                    numbers, and @/./+/-/_ characters."
            .to_string());
    }
    Ok(())
}

/// Email is optional; when present it must look like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Ok(());
    }
    validate_max_length(email, EMAIL_MAX_LEN, "email")?;

    let invalid = || Err("email: Enter a valid email address.".to_string());
    if email.chars().any(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return invalid();
    };
    if local.is_empty() || local.contains('@') {
        return invalid();
    }
    let labels_ok = domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));
    if !domain.contains('.') || !labels_ok {
        return invalid();
    }
    Ok(())
}

pub fn validate_item_name(name: &str) -> Result<(), String> {
    validate_not_blank(name, "name")?;
    validate_max_length(name, ITEM_NAME_MAX_LEN, "name")
}

pub fn validate_item_description(description: &str) -> Result<(), String> {
    validate_not_blank(description, "description")
}
