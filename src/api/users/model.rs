// User model, its write payloads and field validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::UserError;

pub const USERNAME_MAX_LENGTH: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Body of a create (`POST`) or full replace (`PUT`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// Body of a partial update (`PATCH`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_staff: Option<bool>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), UserError> {
        validate_username(&self.username)?;
        validate_email(&self.email)
    }
}

impl User {
    /// Overwrites every writable field
    pub fn replace_with(&mut self, new: NewUser) {
        self.username = new.username;
        self.email = new.email;
        self.first_name = new.first_name;
        self.last_name = new.last_name;
        self.is_staff = new.is_staff;
    }

    /// Overwrites only the fields present in `patch`
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(is_staff) = patch.is_staff {
            self.is_staff = is_staff;
        }
    }

    pub fn validate(&self) -> Result<(), UserError> {
        validate_username(&self.username)?;
        validate_email(&self.email)
    }
}

// Letters, digits and @/./+/-/_ only
pub fn validate_username(username: &str) -> Result<(), UserError> {
    if username.is_empty() {
        return Err(UserError::Validation {
            field: "username",
            message: "This field may not be blank.".to_string(),
        });
    }

    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(UserError::Validation {
            field: "username",
            message: format!("Ensure this field has no more than {USERNAME_MAX_LENGTH} characters."),
        });
    }

    if !username.chars().all(|c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')) {
        return Err(UserError::Validation {
            field: "username",
            message: "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        });
    }

    Ok(())
}

// Empty is allowed; otherwise exactly one '@' with something on both sides
pub fn validate_email(email: &str) -> Result<(), UserError> {
    if email.is_empty() {
        return Ok(());
    }

    let valid: bool = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(UserError::Validation {
            field: "email",
            message: "Enter a valid email address.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a.l+i-c_e@x").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("with space").is_err());
        assert!(validate_username("semi;colon").is_err());
        assert!(validate_username(&"a".repeat(USERNAME_MAX_LENGTH)).is_ok());
        assert!(validate_username(&"a".repeat(USERNAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("a@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("a b@c").is_err());
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut user: User = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            is_staff: false,
            date_joined: Utc::now(),
        };

        user.apply(UserPatch {
            is_staff: Some(true),
            last_name: Some("Liddell".to_string()),
            ..UserPatch::default()
        });

        assert_eq!(user.username, "alice");
        assert_eq!(user.last_name, "Liddell");
        assert!(user.is_staff);
    }
}
