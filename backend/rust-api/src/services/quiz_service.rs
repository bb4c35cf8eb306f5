use crate::metrics::{QUIZ_ANSWERS_SUBMITTED_TOTAL, QUIZ_COMPLETED_TOTAL};
use crate::models::{Feedback, FeedbackTier, Question, QuestionView, QuizProgress, QuizStatus};

use super::question_bank::WEB_STORAGE_QUESTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Quiz not started or already complete, nothing recorded
    Ignored,
    Recorded { correct: bool, completed: bool },
}

/// Quiz progression over a fixed, ordered question bank
#[derive(Debug, Clone, Copy)]
pub struct QuizService {
    questions: &'static [Question],
}

impl Default for QuizService {
    fn default() -> Self {
        Self::new(&WEB_STORAGE_QUESTIONS)
    }
}

impl QuizService {
    pub fn new(questions: &'static [Question]) -> Self {
        Self { questions }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    /// Start and restart share the same reset shape
    pub fn start(&self) -> QuizProgress {
        let mut progress = QuizProgress::started(self.total_questions());
        if self.questions.is_empty() {
            progress.complete = true;
        }
        progress
    }

    /// Maps the raw form value to an option index; junk and out of range values count as no answer
    pub fn parse_answer(&self, index: usize, raw: Option<&str>) -> Option<usize> {
        let question = self.question(index)?;
        raw.and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|choice| *choice < question.options.len())
    }

    pub fn submit(&self, progress: &mut QuizProgress, selected: Option<usize>) -> SubmitOutcome {
        if !progress.in_progress() {
            return SubmitOutcome::Ignored;
        }

        let total = self.total_questions();
        let index = progress.current_question_index;
        let Some(question) = self.question(index) else {
            tracing::warn!(index, total, "Quiz index out of range, ignoring submission");
            return SubmitOutcome::Ignored;
        };

        if progress.answers.len() != total {
            progress.answers.resize(total, None);
        }
        progress.answers[index] = selected;

        // Recomputed from answers so re-answering after going back never double counts
        progress.score = self.score_answers(&progress.answers);

        let correct = selected == Some(question.correct_answer);
        QUIZ_ANSWERS_SUBMITTED_TOTAL
            .with_label_values(&[if correct { "true" } else { "false" }])
            .inc();

        if index + 1 < total {
            progress.current_question_index += 1;
        } else {
            progress.complete = true;
            QUIZ_COMPLETED_TOTAL
                .with_label_values(&[self.feedback(progress.score).as_str()])
                .inc();
            tracing::info!(score = progress.score, total, "Quiz completed");
        }

        SubmitOutcome::Recorded {
            correct,
            completed: progress.complete,
        }
    }

    /// Steps back one question; returns whether the index moved
    pub fn previous(&self, progress: &mut QuizProgress) -> bool {
        if !progress.in_progress() || progress.current_question_index == 0 {
            return false;
        }
        progress.current_question_index -= 1;
        true
    }

    pub fn score_answers(&self, answers: &[Option<usize>]) -> u32 {
        self.questions
            .iter()
            .zip(answers)
            .filter(|(q, a)| **a == Some(q.correct_answer))
            .count() as u32
    }

    pub fn feedback(&self, score: u32) -> FeedbackTier {
        feedback_tier(score, self.total_questions())
    }

    pub fn status(&self, progress: Option<&QuizProgress>) -> QuizStatus {
        let default_progress = QuizProgress::default();
        let progress = progress.unwrap_or(&default_progress);
        let total = self.total_questions();
        let index = progress.current_question_index;

        let current = if progress.in_progress() {
            self.question(index)
        } else {
            None
        };

        let feedback = progress.complete.then(|| {
            let tier = self.feedback(progress.score);
            Feedback {
                tier,
                message: tier.message(),
            }
        });

        QuizStatus {
            started: progress.started,
            complete: progress.complete,
            total_questions: total,
            current_question: index + 1,
            answered_count: progress.answered_count(),
            score: progress.score,
            question: current.map(|q| QuestionView {
                prompt: q.prompt,
                options: q.options,
            }),
            selected_answer: current.and_then(|_| progress.answers.get(index).copied().flatten()),
            previous_question_available: current.is_some() && index > 0,
            is_last_question: current.is_some() && index + 1 == total,
            feedback,
        }
    }
}

/// Four fixed bands on the percentage score
pub fn feedback_tier(score: u32, total: usize) -> FeedbackTier {
    if total == 0 {
        return FeedbackTier::KeepLearning;
    }
    // score / total >= pct / 100, kept in integers so 7/10 lands on 70 exactly
    let reaches = |pct: u64| u64::from(score) * 100 >= pct * total as u64;

    if reaches(90) {
        FeedbackTier::Mastered
    } else if reaches(70) {
        FeedbackTier::GreatJob
    } else if reaches(50) {
        FeedbackTier::GoodEffort
    } else {
        FeedbackTier::KeepLearning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TWO_QUESTIONS: [Question; 2] = [
        Question {
            prompt: "First?",
            options: &["a", "b"],
            correct_answer: 1,
            explanation: "b",
        },
        Question {
            prompt: "Second?",
            options: &["a", "b", "c"],
            correct_answer: 0,
            explanation: "a",
        },
    ];

    fn answer_all_correctly(service: &QuizService, progress: &mut QuizProgress) {
        for i in 0..service.total_questions() {
            let correct = service.question(i).unwrap().correct_answer;
            service.submit(progress, Some(correct));
        }
    }

    #[test]
    fn test_start_resets_shape() {
        let service = QuizService::default();
        let progress = service.start();
        assert!(progress.started);
        assert!(!progress.complete);
        assert_eq!(progress.current_question_index, 0);
        assert_eq!(progress.answers.len(), 12);
        assert!(progress.answers.iter().all(|a| a.is_none()));
        assert_eq!(progress.score, 0);
    }

    #[test]
    fn test_all_correct_completes_with_full_score() {
        let service = QuizService::default();
        let mut progress = service.start();
        answer_all_correctly(&service, &mut progress);

        assert!(progress.complete);
        assert_eq!(progress.score, 12);

        let status = service.status(Some(&progress));
        assert_eq!(status.score, 12);
        assert!(status.complete);
        assert!(status.question.is_none());
        assert_eq!(status.feedback.unwrap().tier, FeedbackTier::Mastered);
    }

    #[test]
    fn test_submit_before_start_is_ignored() {
        let service = QuizService::default();
        let mut progress = QuizProgress::default();
        assert_eq!(service.submit(&mut progress, Some(2)), SubmitOutcome::Ignored);
        assert_eq!(progress, QuizProgress::default());
    }

    #[test]
    fn test_submit_after_complete_is_ignored() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let mut progress = service.start();
        answer_all_correctly(&service, &mut progress);
        let snapshot = progress.clone();
        assert_eq!(service.submit(&mut progress, Some(0)), SubmitOutcome::Ignored);
        assert_eq!(progress, snapshot);
    }

    #[test]
    fn test_previous_floors_at_zero() {
        let service = QuizService::default();
        let mut progress = service.start();
        assert!(!service.previous(&mut progress));
        assert_eq!(progress.current_question_index, 0);
    }

    #[test]
    fn test_previous_keeps_answers_and_score() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let mut progress = service.start();
        service.submit(&mut progress, Some(1));
        assert_eq!(progress.current_question_index, 1);

        assert!(service.previous(&mut progress));
        assert_eq!(progress.current_question_index, 0);
        assert_eq!(progress.answers, vec![Some(1), None]);
        assert_eq!(progress.score, 1);
    }

    #[test]
    fn test_reanswering_does_not_double_count() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let mut progress = service.start();
        service.submit(&mut progress, Some(1));
        service.previous(&mut progress);
        service.submit(&mut progress, Some(1));
        assert_eq!(progress.score, 1);

        // Changing a correct answer to a wrong one takes the point back
        service.previous(&mut progress);
        service.submit(&mut progress, Some(0));
        assert_eq!(progress.score, 0);
        assert_eq!(progress.current_question_index, 1);
    }

    #[test]
    fn test_null_answer_is_recorded_and_advances() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let mut progress = service.start();
        let outcome = service.submit(&mut progress, None);
        assert_eq!(
            outcome,
            SubmitOutcome::Recorded {
                correct: false,
                completed: false
            }
        );
        assert_eq!(progress.answers[0], None);
        assert_eq!(progress.current_question_index, 1);
        assert_eq!(progress.answered_count(), 0);
    }

    #[test]
    fn test_previous_is_noop_once_complete() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let mut progress = service.start();
        answer_all_correctly(&service, &mut progress);
        assert!(!service.previous(&mut progress));
        assert_eq!(progress.current_question_index, 1);
    }

    #[test]
    fn test_parse_answer() {
        let service = QuizService::new(&TWO_QUESTIONS);
        assert_eq!(service.parse_answer(0, Some("1")), Some(1));
        assert_eq!(service.parse_answer(0, Some(" 0 ")), Some(0));
        assert_eq!(service.parse_answer(0, Some("2")), None);
        assert_eq!(service.parse_answer(1, Some("2")), Some(2));
        assert_eq!(service.parse_answer(0, Some("abc")), None);
        assert_eq!(service.parse_answer(0, None), None);
        assert_eq!(service.parse_answer(5, Some("0")), None);
    }

    #[test]
    fn test_status_in_progress() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let mut progress = service.start();
        service.submit(&mut progress, Some(0));

        let status = service.status(Some(&progress));
        assert!(status.started);
        assert!(!status.complete);
        assert_eq!(status.current_question, 2);
        assert_eq!(status.answered_count, 1);
        assert_eq!(status.score, 0);
        assert_eq!(status.question.unwrap().prompt, "Second?");
        assert!(status.previous_question_available);
        assert!(status.is_last_question);
        assert!(status.feedback.is_none());
    }

    #[test]
    fn test_status_json_hides_answer_key() {
        let service = QuizService::new(&TWO_QUESTIONS);
        let progress = service.start();

        let value = serde_json::to_value(service.status(Some(&progress))).unwrap();
        let question = value["question"].as_object().unwrap();
        assert_eq!(question["prompt"], "First?");
        assert!(!question.contains_key("correct_answer"));
        assert!(!question.contains_key("explanation"));
    }

    #[test]
    fn test_status_without_progress() {
        let service = QuizService::default();
        let status = service.status(None);
        assert!(!status.started);
        assert_eq!(status.current_question, 1);
        assert_eq!(status.answered_count, 0);
        assert_eq!(status.total_questions, 12);
        assert!(status.question.is_none());
    }

    #[test]
    fn test_feedback_bands() {
        assert_eq!(feedback_tier(12, 12), FeedbackTier::Mastered);
        assert_eq!(feedback_tier(9, 10), FeedbackTier::Mastered);
        assert_eq!(feedback_tier(10, 12), FeedbackTier::GreatJob);
        assert_eq!(feedback_tier(7, 10), FeedbackTier::GreatJob);
        assert_eq!(feedback_tier(6, 12), FeedbackTier::GoodEffort);
        assert_eq!(feedback_tier(5, 12), FeedbackTier::KeepLearning);
        assert_eq!(feedback_tier(0, 12), FeedbackTier::KeepLearning);
        assert_eq!(feedback_tier(0, 0), FeedbackTier::KeepLearning);
    }

    #[test]
    fn test_empty_bank_starts_complete() {
        static EMPTY: [Question; 0] = [];
        let service = QuizService::new(&EMPTY);
        let mut progress = service.start();
        assert!(progress.complete);
        assert_eq!(service.submit(&mut progress, Some(0)), SubmitOutcome::Ignored);
    }
}
