/// Validate a required text field: anything but blank is accepted.
pub fn validate_required(value: &str, field_name: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{field_name} is required"));
    }
    None
}

/// Parse an optional count field. Blank means "no limit" (`None`); anything
/// else must be a whole number between 0 and `i32::MAX`.
pub fn parse_optional_count(value: &str, field_name: &str) -> Result<Option<i32>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i32>() {
        Ok(n) if n >= 0 => Ok(Some(n)),
        _ => Err(format!("{field_name} must be a whole number of 0 or more")),
    }
}
