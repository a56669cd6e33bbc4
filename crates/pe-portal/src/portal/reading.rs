//! Weekly reading material with a short comprehension quiz.

use axum::{http::StatusCode, response::IntoResponse, routing::get, routing::post, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub choices: Vec<&'static str>,
    #[serde(skip)]
    pub answer_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingMaterial {
    pub title: &'static str,
    pub body: &'static str,
    pub questions: Vec<QuizQuestion>,
}

/// This week's material: squash basics, matching the squash-heavy showcase
/// the school runs.
pub fn current_material() -> ReadingMaterial {
    ReadingMaterial {
        title: "Squash: an introduction and the rules",
        body: "Squash is an indoor racket sport played in an enclosed court. \
               Two essentials: 1. A serve must strike the front wall above the \
               service line. 2. The opponent must return the ball before it \
               bounces twice.",
        questions: vec![
            QuizQuestion {
                prompt: "When serving in squash, the ball must hit the front wall above which line?",
                choices: vec!["The service line", "The tin"],
                answer_index: 0,
            },
            QuizQuestion {
                prompt: "How many bounces are allowed before the ball must be returned?",
                choices: vec!["One", "Two", "Three"],
                answer_index: 0,
            },
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizSubmission {
    /// Chosen answer index per question, in question order.
    pub answers: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub score: u8,
}

/// Grade a submission against the material's answer key.
///
/// Missing answers count as wrong; the original site awarded a flat 100 here,
/// which was display scaffolding rather than a rule worth keeping.
pub fn grade(material: &ReadingMaterial, submission: &QuizSubmission) -> QuizResult {
    let total = material.questions.len();
    let correct = material
        .questions
        .iter()
        .enumerate()
        .filter(|(index, question)| submission.answers.get(*index) == Some(&question.answer_index))
        .count();

    let score = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u8
    };

    QuizResult {
        correct,
        total,
        score,
    }
}

pub fn reading_router() -> Router {
    Router::new()
        .route("/api/v1/reading", get(material_handler))
        .route("/api/v1/reading/quiz", post(quiz_handler))
}

pub(crate) async fn material_handler() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(current_material()))
}

pub(crate) async fn quiz_handler(
    axum::Json(submission): axum::Json<QuizSubmission>,
) -> impl IntoResponse {
    let result = grade(&current_material(), &submission);
    (StatusCode::OK, axum::Json(json!(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_awards_full_marks_for_correct_answers() {
        let material = current_material();
        let submission = QuizSubmission {
            answers: vec![0, 0],
        };

        let result = grade(&material, &submission);
        assert_eq!(result.correct, 2);
        assert_eq!(result.total, 2);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn grade_counts_missing_answers_as_wrong() {
        let material = current_material();
        let submission = QuizSubmission { answers: vec![0] };

        let result = grade(&material, &submission);
        assert_eq!(result.correct, 1);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn grade_scores_zero_for_all_wrong() {
        let material = current_material();
        let submission = QuizSubmission {
            answers: vec![1, 2],
        };

        let result = grade(&material, &submission);
        assert_eq!(result.correct, 0);
        assert_eq!(result.score, 0);
    }
}
