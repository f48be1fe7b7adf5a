use axum::{extract::State, routing::post, Json, Router};
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{
        app::AppState,
        error::{db_failure, ApiError},
        extractors::AppJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

/// Category id that stands for every category.
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// clients also send the category `type` along, only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

/// Uniform pick among the questions not yet seen, `None` once all are used up.
fn next_question(pool: Vec<Question>, previous: &[i64]) -> Option<Question> {
    pool.into_iter()
        .filter(|q| !previous.contains(&q.id))
        .choose(&mut rand::thread_rng())
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> ApiResponse<Json<QuizQuestion>> {
    let category = request.quiz_category.id;
    let selection = if category == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await
    } else {
        questions::get_questions_for_category(&pool, category).await
    }
    .map_err(db_failure(ApiError::NotFound))?;

    if selection.is_empty() {
        tracing::debug!(category, "No questions to play with");
        return Err(ApiError::NotFound);
    }

    let question = next_question(selection, &request.previous_questions);
    if question.is_some() {
        QUIZ_QUESTIONS_SERVED
            .with_label_values(&[category.to_string().as_str()])
            .inc();
    }

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: format!("Answer {id}"),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn never_repeats_previous_questions() {
        let previous = [1, 2, 4];
        for _ in 0..50 {
            let picked = next_question((1..=5).map(question).collect(), &previous).unwrap();
            assert!(matches!(picked.id, 3 | 5));
        }
    }

    #[test]
    fn exhausted_pool_yields_nothing() {
        let pool = (1..=3).map(question).collect();
        assert_eq!(next_question(pool, &[3, 2, 1]), None);
    }

    #[test]
    fn category_id_may_be_a_string() {
        let request: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": [], "quiz_category": {"type": "Science", "id": "1"}}"#,
        )
        .unwrap();
        assert_eq!(request.quiz_category.id, 1);
        assert!(request.previous_questions.is_empty());
    }
}
