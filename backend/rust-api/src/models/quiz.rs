use serde::{Deserialize, Serialize};

/// Static quiz question, identified by its position in the bank.
/// Never serialized; views go through `QuestionView` so the answer stays server side.
#[derive(Debug, Clone)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct_answer: usize,
    pub explanation: &'static str,
}

/// Per-session quiz state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizProgress {
    pub started: bool,
    pub complete: bool,
    pub current_question_index: usize,
    pub answers: Vec<Option<usize>>,
    pub score: u32,
}

impl QuizProgress {
    /// Fresh, started progress for a bank of `total` questions
    pub fn started(total: usize) -> Self {
        Self {
            started: true,
            complete: false,
            current_question_index: 0,
            answers: vec![None; total],
            score: 0,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn in_progress(&self) -> bool {
        self.started && !self.complete
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Mastered,
    GreatJob,
    GoodEffort,
    KeepLearning,
}

impl FeedbackTier {
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Mastered => "Excellent! You've mastered web storage concepts!",
            FeedbackTier::GreatJob => {
                "Great job! You have a good understanding of web storage methods."
            }
            FeedbackTier::GoodEffort => {
                "Good effort! Review the sections you missed to improve your knowledge."
            }
            FeedbackTier::KeepLearning => {
                "Keep learning! Try exploring each storage method again to build your understanding."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTier::Mastered => "mastered",
            FeedbackTier::GreatJob => "great_job",
            FeedbackTier::GoodEffort => "good_effort",
            FeedbackTier::KeepLearning => "keep_learning",
        }
    }
}

/// Question as shown while answering; the correct index stays server side
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Feedback {
    pub tier: FeedbackTier,
    pub message: &'static str,
}

/// Read-only projection of the quiz, served by `GET /quiz`
#[derive(Debug, Serialize)]
pub struct QuizStatus {
    pub started: bool,
    pub complete: bool,
    pub total_questions: usize,
    /// 1-based for display
    pub current_question: usize,
    pub answered_count: usize,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<usize>,
    pub previous_question_available: bool,
    pub is_last_question: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

/// Form body of `POST /quiz/submit`
#[derive(Debug, Default, Deserialize)]
pub struct SubmitAnswerForm {
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub title: &'static str,
    pub session_id: String,
    #[serde(flatten)]
    pub status: QuizStatus,
}
