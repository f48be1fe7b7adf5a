use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_search_term,
        error::{db_failure, ApiError},
        extractors::{AppJson, AppPath, AppQuery},
        pagination::{paginate, Pagination},
    },
    telemetry::QUESTIONS_CREATED,
};

use super::{categories_map, ApiResponse, Success};

/// Body of `POST /questions`: a search when `searchTerm` is given, otherwise a
/// new question. Creation fields are not checked here, the table does that.
#[derive(Deserialize)]
struct QuestionsBody {
    #[serde(
        rename = "searchTerm",
        default,
        deserialize_with = "deserialize_search_term"
    )]
    search_term: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: &'static str,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: &'static str,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    new_question: i64,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuestionsPostResult {
    Search(SearchResults),
    Created(CreatedQuestion),
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    AppQuery(pagination): AppQuery<Pagination>,
) -> ApiResponse<Json<QuestionsPage>> {
    let all = questions::get_all_questions(&pool)
        .await
        .map_err(db_failure(ApiError::Internal))?;
    let page = paginate(&all, pagination.page);
    let categories = get_all_categories(&pool)
        .await
        .map_err(db_failure(ApiError::Internal))?;
    let categories = categories_map(categories);

    if page.is_empty() || categories.is_empty() {
        tracing::debug!(page = pagination.page, "Nothing to list");
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: page,
        total_questions: all.len(),
        current_category: "",
        categories,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<Json<Success>> {
    let question = questions::get_question_by_id(&pool, id)
        .await
        .map_err(db_failure(ApiError::NotFound))?;
    if question.is_none() {
        tracing::debug!(id, "No question to delete");
        return Err(ApiError::NotFound);
    }

    questions::delete_question(&pool, id)
        .await
        .map_err(db_failure(ApiError::NotFound))?;
    tracing::info!(id, "Question deleted");

    Ok(Json(Success { success: true }))
}

// Searches never 404, an empty result is a valid answer.
async fn search_or_create(
    State(pool): State<SqlitePool>,
    AppQuery(pagination): AppQuery<Pagination>,
    AppJson(body): AppJson<QuestionsBody>,
) -> ApiResponse<Json<QuestionsPostResult>> {
    if let Some(term) = body.search_term {
        let found = questions::search_questions(&pool, &term)
            .await
            .map_err(db_failure(ApiError::Unprocessable))?;

        return Ok(Json(QuestionsPostResult::Search(SearchResults {
            success: true,
            questions: paginate(&found, pagination.page),
            total_questions: found.len(),
            current_category: "",
        })));
    }

    let id = questions::create_question(
        &pool,
        body.question.as_deref(),
        body.answer.as_deref(),
        body.category,
        body.difficulty,
    )
    .await
    .map_err(db_failure(ApiError::Unprocessable))?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, "Question created");

    Ok(Json(QuestionsPostResult::Created(CreatedQuestion {
        success: true,
        new_question: id,
    })))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(search_or_create))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
