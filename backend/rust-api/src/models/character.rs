use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_int_field, required_field};

/// Character sheet persisted in the JSON record file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(rename = "class")]
    pub class_label: String,
    pub level: i64,
}

/// Raw form fields of `POST /json/create`; every field may be missing
#[derive(Debug, Default, Deserialize)]
pub struct CreateCharacterForm {
    pub name: Option<String>,
    #[serde(rename = "class")]
    pub class_label: Option<String>,
    pub level: Option<String>,
}

/// Checked input for a new character
#[derive(Debug, Clone, Validate)]
pub struct NewCharacter {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    pub class_label: String,

    #[validate(range(min = 1, max = 10, message = "Level must be a number between 1 and 10"))]
    pub level: i64,
}

impl TryFrom<CreateCharacterForm> for NewCharacter {
    type Error = String;

    /// Presence first, then level; range bounds are left to `validate`
    fn try_from(form: CreateCharacterForm) -> Result<Self, Self::Error> {
        let (Some(name), Some(class_label), Some(level)) = (
            required_field(form.name),
            required_field(form.class_label),
            required_field(form.level),
        ) else {
            return Err("All fields are required".to_string());
        };

        let level = parse_int_field(&level)
            .ok_or_else(|| "Level must be a number between 1 and 10".to_string())?;

        Ok(NewCharacter {
            name,
            class_label,
            level,
        })
    }
}

/// View model for `GET /json`
#[derive(Debug, Serialize)]
pub struct CharacterListView {
    pub title: &'static str,
    pub characters: Vec<Character>,
    #[serde(flatten)]
    pub flash: Option<super::flash::Flash>,
}
