use super::{flash::Flash, profile::Profile, quiz::QuizProgress};

/// Everything the server keeps for one browser session
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub quiz: Option<QuizProgress>,
    pub profile: Option<Profile>,
    pub flash: Option<Flash>,
}

impl SessionData {
    pub fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }

    /// Removes the pending flash so it is shown exactly once
    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }
}
