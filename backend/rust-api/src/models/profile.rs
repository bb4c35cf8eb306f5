use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_int_field, required_field};

/// Player profile kept only in the server-side session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub username: String,
    pub level: i64,
    pub experience: i64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveProfileForm {
    pub username: Option<String>,
    pub level: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,

    #[validate(range(min = 1, max = 50, message = "Level must be a number between 1 and 50"))]
    pub level: i64,

    #[validate(range(min = 0, message = "Experience must be a positive number"))]
    pub experience: i64,
}

impl TryFrom<SaveProfileForm> for ProfileInput {
    type Error = String;

    fn try_from(form: SaveProfileForm) -> Result<Self, Self::Error> {
        let (Some(username), Some(level), Some(experience)) = (
            required_field(form.username),
            required_field(form.level),
            required_field(form.experience),
        ) else {
            return Err("All fields are required".to_string());
        };

        let level = parse_int_field(&level)
            .ok_or_else(|| "Level must be a number between 1 and 50".to_string())?;
        let experience = parse_int_field(&experience)
            .ok_or_else(|| "Experience must be a positive number".to_string())?;

        Ok(ProfileInput {
            username,
            level,
            experience,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub title: &'static str,
    pub session_id: String,
    pub profile: Option<Profile>,
    #[serde(flatten)]
    pub flash: Option<super::flash::Flash>,
}
