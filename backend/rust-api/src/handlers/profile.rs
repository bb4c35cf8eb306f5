use axum::{extract::State, response::Redirect, Extension, Form, Json};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::{
    middlewares::session::SessionContext,
    models::{first_validation_message, Flash, Profile, ProfileInput, ProfileView, SaveProfileForm},
    services::AppState,
};

const PROFILE_VIEW: &str = "/session";

/// GET /session - Profile stored in the server-side session
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Json<ProfileView> {
    let (profile, flash) = state
        .sessions
        .with_session(&session.id, |data| (data.profile.clone(), data.take_flash()))
        .await;

    Json(ProfileView {
        title: "Sessions",
        session_id: session.id,
        profile,
        flash,
    })
}

/// POST /session/profile - Save the profile into the session
pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<SaveProfileForm>,
) -> Redirect {
    let result = ProfileInput::try_from(form).and_then(|input| {
        input
            .validate()
            .map_err(|e| first_validation_message(&e, &["username", "level", "experience"]))?;
        Ok(input)
    });

    state
        .sessions
        .with_session(&session.id, |data| match result {
            Ok(input) => {
                data.profile = Some(Profile {
                    username: input.username,
                    level: input.level,
                    experience: input.experience,
                    last_updated: Utc::now(),
                });
                tracing::debug!(session_id = %session.id, profile = ?data.profile, "Profile saved");
                data.set_flash(Flash::success("Profile saved to session!"));
            }
            Err(message) => data.set_flash(Flash::error(message)),
        })
        .await;

    Redirect::to(PROFILE_VIEW)
}
