use validator::ValidationErrors;

pub mod character;
pub mod flash;
pub mod profile;
pub mod quiz;
pub mod session;

pub use character::{Character, CharacterListView, CreateCharacterForm, NewCharacter};
pub use flash::{Flash, FlashKind};
pub use profile::{Profile, ProfileInput, ProfileView, SaveProfileForm};
pub use quiz::{
    Feedback, FeedbackTier, Question, QuestionView, QuizProgress, QuizStatus, QuizView,
    SubmitAnswerForm,
};
pub use session::SessionData;

/// Picks the message of the first failing field, checked in `field_order`
pub fn first_validation_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .chain(field_errors.values())
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// Treats a missing or blank form value as absent
pub fn required_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Integer parse that tolerates surrounding whitespace
pub fn parse_int_field(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}
