use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use std::sync::Arc;

use crate::{
    middlewares::session::SessionContext,
    models::{CharacterListView, CreateCharacterForm, Flash, NewCharacter},
    services::{character_store::StoreError, AppState},
};

const CHARACTERS_VIEW: &str = "/json";

/// GET /json - List character sheets
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Json<CharacterListView> {
    match state.characters.list().await {
        Ok(characters) => {
            let flash = state
                .sessions
                .with_session(&session.id, |data| data.take_flash())
                .await;
            Json(CharacterListView {
                title: "JSON Files",
                characters,
                flash,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Error loading characters");
            Json(CharacterListView {
                title: "JSON Files",
                characters: Vec::new(),
                flash: Some(Flash::error("Error loading characters")),
            })
        }
    }
}

/// POST /json/create - Append a character sheet
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<CreateCharacterForm>,
) -> Redirect {
    let flash = match NewCharacter::try_from(form) {
        Err(message) => Flash::error(message),
        Ok(input) => match state.characters.create(input).await {
            Ok(_) => Flash::success("Character created successfully!"),
            Err(StoreError::Validation(message)) => Flash::error(message),
            Err(e) => {
                tracing::error!(error = %e, "Error creating character");
                Flash::error("Error creating character")
            }
        },
    };

    state
        .sessions
        .with_session(&session.id, |data| data.set_flash(flash))
        .await;
    Redirect::to(CHARACTERS_VIEW)
}

/// POST /json/delete/{id} - Remove a character sheet
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(character_id): Path<String>,
) -> Redirect {
    let flash = match state.characters.delete(&character_id).await {
        Ok(()) => Flash::success("Character deleted successfully!"),
        Err(StoreError::NotFound(message)) => {
            tracing::info!(id = %character_id, "Delete target not found");
            Flash::error(message)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error deleting character");
            Flash::error("Error deleting character")
        }
    };

    state
        .sessions
        .with_session(&session.id, |data| data.set_flash(flash))
        .await;
    Redirect::to(CHARACTERS_VIEW)
}
