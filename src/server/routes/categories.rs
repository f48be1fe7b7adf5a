use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions::get_questions_for_category},
        Question,
    },
    server::{
        app::AppState,
        error::{db_failure, ApiError},
        extractors::{AppPath, AppQuery},
        pagination::{paginate, Pagination},
    },
};

use super::{categories_map, ApiResponse};

#[derive(Serialize)]
struct CategoriesPage {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesPage>> {
    let categories = get_all_categories(&pool)
        .await
        .map_err(db_failure(ApiError::Internal))?;
    let categories = categories_map(categories);
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesPage {
        success: true,
        categories,
    }))
}

// Emptiness is judged on the whole category, so a page past the end is still
// a success with no questions on it.
async fn category_questions(
    State(pool): State<SqlitePool>,
    AppPath(category_id): AppPath<i64>,
    AppQuery(pagination): AppQuery<Pagination>,
) -> ApiResponse<Json<CategoryQuestionsPage>> {
    let questions = get_questions_for_category(&pool, category_id)
        .await
        .map_err(db_failure(ApiError::Internal))?;
    if questions.is_empty() {
        tracing::debug!(category_id, "No questions in category");
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsPage {
        success: true,
        questions: paginate(&questions, pagination.page),
        total_questions: questions.len(),
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{category_id}/questions", get(category_questions))
        .with_state(state)
}
