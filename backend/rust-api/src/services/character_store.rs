use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::metrics::track_store_operation;
use crate::models::{first_validation_message, Character, NewCharacter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("character storage unavailable: {context}")]
    StorageUnavailable {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    fn unavailable(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StoreError::StorageUnavailable {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Character sheets kept as one pretty-printed JSON array in a single file.
///
/// Every mutation rewrites the whole file. Mutations are serialized through
/// `write_lock` and land via rename, so a reader sees either the old or the
/// new array, never a torn one. Other processes writing the same file are
/// not coordinated with.
pub struct CharacterStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CharacterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the containing directory and an empty `[]` file when absent.
    ///
    /// The array is staged in a temp file and hard-linked into place, so the
    /// target never exists empty and an existing file is never replaced.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                StoreError::unavailable(format!("cannot create {}", dir.display()), e)
            })?;
        }

        let tmp_path = self.write_tmp("[]").await?;
        let linked = tokio::fs::hard_link(&tmp_path, &self.path).await;
        let _ = tokio::fs::remove_file(&tmp_path).await;

        match linked {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Created empty character file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::unavailable(
                format!("cannot create {}", self.path.display()),
                e,
            )),
        }
    }

    pub async fn list(&self) -> Result<Vec<Character>, StoreError> {
        track_store_operation("list", async {
            self.ensure_exists().await?;
            self.read_all().await
        })
        .await
    }

    pub async fn create(&self, input: NewCharacter) -> Result<Character, StoreError> {
        track_store_operation("create", async {
            input.validate().map_err(|e| {
                StoreError::Validation(first_validation_message(
                    &e,
                    &["name", "class_label", "level"],
                ))
            })?;

            let _guard = self.write_lock.lock().await;
            self.ensure_exists().await?;
            let mut characters = self.read_all().await?;

            let character = Character {
                id: format!("char_{}", Uuid::new_v4().simple()),
                name: input.name,
                class_label: input.class_label,
                level: input.level,
            };
            characters.push(character.clone());
            self.write_all(&characters).await?;

            tracing::info!(
                id = %character.id,
                name = %character.name,
                total = characters.len(),
                "Character created"
            );
            Ok(character)
        })
        .await
    }

    /// Removes every record carrying `id`; the file is left untouched when none match
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        track_store_operation("delete", async {
            let _guard = self.write_lock.lock().await;
            self.ensure_exists().await?;
            let mut characters = self.read_all().await?;

            let before = characters.len();
            characters.retain(|c| c.id != id);
            if characters.len() == before {
                return Err(StoreError::NotFound("Character not found".to_string()));
            }

            self.write_all(&characters).await?;
            tracing::info!(id, removed = before - characters.len(), "Character deleted");
            Ok(())
        })
        .await
    }

    async fn read_all(&self) -> Result<Vec<Character>, StoreError> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StoreError::unavailable(format!("cannot read {}", self.path.display()), e)
        })?;
        serde_json::from_str(&data).map_err(|e| {
            StoreError::unavailable(format!("malformed JSON in {}", self.path.display()), e)
        })
    }

    async fn write_all(&self, characters: &[Character]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(characters)
            .map_err(|e| StoreError::unavailable("cannot serialize characters", e))?;

        let tmp_path = self.write_tmp(&body).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::unavailable(
                format!("cannot replace {}", self.path.display()),
                e,
            ));
        }

        Ok(())
    }

    /// Writes `body` to a uniquely named sibling of the store file
    async fn write_tmp(&self, body: &str) -> Result<PathBuf, StoreError> {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        let tmp_path = PathBuf::from(tmp_name);

        let written = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(body.as_bytes()).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::unavailable(
                format!("cannot write {}", tmp_path.display()),
                e,
            ));
        }

        Ok(tmp_path)
    }
}
