//! Raw signup form values and their parsing rules.

use super::errors::IntakeError;
use super::role::Role;
use super::session::RoleCapacity;

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Signup form values exactly as the member typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub title: String,
    pub date_time: String,
    pub tank: String,
    pub healer: String,
    pub dps: String,
}

impl IntakeForm {
    fn raw_capacity(&self, role: Role) -> &str {
        match role {
            Role::Tank => &self.tank,
            Role::Healer => &self.healer,
            Role::Dps => &self.dps,
        }
    }

    /// Parses all three capacity inputs.
    ///
    /// # Errors
    ///
    /// - `NonNumericCapacity` for the first input that is not an integer
    /// - `NegativeCapacity` for the first input below zero
    pub fn capacity(&self) -> Result<RoleCapacity, IntakeError> {
        let mut capacity = RoleCapacity::default();
        for role in Role::ALL {
            capacity[role] = parse_capacity(role, self.raw_capacity(role))?;
        }
        Ok(capacity)
    }

    /// Validates and returns the trimmed title.
    pub fn validated_title(&self) -> Result<String, IntakeError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(IntakeError::EmptyTitle);
        }
        let length = title.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(IntakeError::TitleTooLong {
                length,
                limit: MAX_TITLE_LENGTH,
            });
        }
        Ok(title.to_string())
    }
}

fn parse_capacity(role: Role, raw: &str) -> Result<u32, IntakeError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| IntakeError::NonNumericCapacity {
            role,
            raw: raw.to_string(),
        })?;
    if value < 0 {
        return Err(IntakeError::NegativeCapacity { role, value });
    }
    u32::try_from(value).map_err(|_| IntakeError::NonNumericCapacity {
        role,
        raw: raw.to_string(),
    })
}

/// Splits the schedule field on its first run of whitespace.
///
/// The first token is the date; everything after the whitespace run is the
/// time, which is empty when there is no second token.
pub fn split_date_time(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((date, rest)) => (date.to_string(), rest.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
