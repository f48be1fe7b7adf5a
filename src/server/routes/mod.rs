mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::Category;

pub use super::error::ApiResponse;
pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

#[derive(Serialize)]
struct Success {
    success: bool,
}

/// `{id: type}`, the shape the listing endpoints expose categories in.
fn categories_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
