use axum::{extract::State, response::Redirect, Extension, Form, Json};
use std::sync::Arc;

use crate::{
    middlewares::session::SessionContext,
    models::{QuizView, SubmitAnswerForm},
    services::{quiz_service::SubmitOutcome, AppState},
};

const QUIZ_VIEW: &str = "/quiz";

/// GET /quiz - Current progress, question or final feedback
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Json<QuizView> {
    let progress = state
        .sessions
        .with_session(&session.id, |data| data.quiz.clone())
        .await;

    Json(QuizView {
        title: "Quiz",
        status: state.quiz.status(progress.as_ref()),
        session_id: session.id,
    })
}

/// GET /quiz/start and GET /quiz/restart - Reset progress to the first question
pub async fn start_quiz(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Redirect {
    let fresh = state.quiz.start();
    state
        .sessions
        .with_session(&session.id, |data| data.quiz = Some(fresh))
        .await;
    tracing::info!(session_id = %session.id, "Quiz started");
    Redirect::to(QUIZ_VIEW)
}

/// POST /quiz/submit - Record the answer for the current question
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<SubmitAnswerForm>,
) -> Redirect {
    let quiz = state.quiz;
    let outcome = state
        .sessions
        .with_session(&session.id, |data| match data.quiz.as_mut() {
            Some(progress) => {
                let selected =
                    quiz.parse_answer(progress.current_question_index, form.answer.as_deref());
                quiz.submit(progress, selected)
            }
            None => SubmitOutcome::Ignored,
        })
        .await;

    match outcome {
        SubmitOutcome::Ignored => {
            tracing::debug!(session_id = %session.id, "Submit without active quiz ignored")
        }
        SubmitOutcome::Recorded { correct, completed } => tracing::debug!(
            session_id = %session.id,
            correct,
            completed,
            "Quiz answer recorded"
        ),
    }

    Redirect::to(QUIZ_VIEW)
}

/// GET /quiz/previous - Step back one question
pub async fn previous_question(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Redirect {
    let quiz = state.quiz;
    state
        .sessions
        .with_session(&session.id, |data| {
            if let Some(progress) = data.quiz.as_mut() {
                quiz.previous(progress);
            }
        })
        .await;
    Redirect::to(QUIZ_VIEW)
}
