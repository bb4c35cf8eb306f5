use std::{sync::Arc, time::Duration};

use anyhow::Context;

use crate::config::Config;

pub mod character_store;
pub mod question_bank;
pub mod quiz_service;
pub mod session_store;

use character_store::CharacterStore;
use quiz_service::QuizService;
use session_store::SessionStore;

pub struct AppState {
    pub config: Config,
    pub characters: CharacterStore,
    pub sessions: Arc<SessionStore>,
    pub quiz: QuizService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let characters = CharacterStore::new(config.storage.characters_file.clone());

        // Missing data directory is fatal at startup, later failures only degrade views
        characters.ensure_exists().await.with_context(|| {
            format!(
                "Failed to prepare character file {}",
                config.storage.characters_file.display()
            )
        })?;
        tracing::info!(
            "Character file ready at {}",
            config.storage.characters_file.display()
        );

        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.session.ttl_seconds,
        )));

        Ok(Self {
            config,
            characters,
            sessions,
            quiz: QuizService::default(),
        })
    }
}
