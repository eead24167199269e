//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use chrono::NaiveDate;

use crate::domain::{self, NewTeamMember};

/// Date format accepted on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a storage key.
///
/// Delegates to the backend's key rules so `init` rejects keys the store
/// would refuse later.
pub fn validate_key(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    taskdeck_kv::validate_key(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a name or title: non-empty, single line, bounded length.
pub fn validate_title(s: &str) -> Result<String, String> {
    let s = s.trim();
    domain::validate_title("Title", s)?;

    // Control characters other than tab are almost always pasting mistakes
    if let Some(pos) = s
        .chars()
        .position(|c| c.is_control() && c != '\t')
    {
        return Err(format!(
            "Title contains invalid control character at position {pos}"
        ));
    }

    Ok(s.to_string())
}

/// Validate description length.
pub fn validate_description(s: &str) -> Result<String, String> {
    domain::validate_description("Description", s)?;
    Ok(s.to_string())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{s}', expected YYYY-MM-DD"))
}

/// Validate an email address: one `@` with text on both sides, no spaces.
pub fn validate_email(s: &str) -> Result<String, String> {
    let s = s.trim();
    let valid = s
        .split_once('@')
        .is_some_and(|(local, host)| !local.is_empty() && !host.is_empty() && !host.contains('@'))
        && !s.contains(char::is_whitespace);

    if valid {
        Ok(s.to_string())
    } else {
        Err(format!("Invalid email address '{s}'"))
    }
}

/// Parse a team member given as `NAME:EMAIL[:ROLE]`.
pub fn parse_member(s: &str) -> Result<NewTeamMember, String> {
    let mut parts = s.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let Some(email) = parts.next() else {
        return Err(format!("Invalid member '{s}', expected NAME:EMAIL[:ROLE]"));
    };
    let role = parts.next().unwrap_or_default();

    Ok(NewTeamMember {
        name: validate_title(name).map_err(|e| e.replace("Title", "Member name"))?,
        email: validate_email(email)?,
        role: role.trim().to_string(),
    })
}
