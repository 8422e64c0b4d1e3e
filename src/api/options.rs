use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::{OptionCategory, OptionItem};
use crate::db::option_repository::OptionRepository;
use crate::error::AppError;

/// Request payload for adding a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOptionRequest {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// The value/label pair returned to form pickers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
}

impl From<&OptionItem> for OptionView {
    fn from(item: &OptionItem) -> Self {
        Self {
            value: item.value.clone(),
            label: item.label.clone(),
        }
    }
}

fn parse_category(segment: &str) -> Result<OptionCategory, AppError> {
    OptionCategory::parse(segment).ok_or_else(|| {
        let valid: Vec<&str> = OptionCategory::ALL.iter().map(|c| c.as_str()).collect();
        AppError::BadRequest(format!("Invalid type. Valid types: {}", valid.join(", ")))
    })
}

/// Core creation logic — assign an id and persist the entry under its
/// category, so it survives across requests. Values are unique within
/// their category.
pub async fn process_create_option(
    repo: &dyn OptionRepository,
    category: OptionCategory,
    request: CreateOptionRequest,
) -> Result<OptionItem, AppError> {
    if request.value.trim().is_empty() {
        return Err(AppError::BadRequest("Field 'value' is required".into()));
    }
    if request.label.trim().is_empty() {
        return Err(AppError::BadRequest("Field 'label' is required".into()));
    }

    if repo.find_by_value(category, &request.value).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Value '{}' already exists in {}",
            request.value,
            category.as_str()
        )));
    }

    let item = OptionItem {
        id: Uuid::new_v4().to_string(),
        category,
        value: request.value,
        label: request.label,
    };

    repo.insert(item.clone()).await?;

    Ok(item)
}

/// `GET /api/options/{type}` — list a category's value/label pairs.
pub async fn get_options_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(segment): axum::extract::Path<String>,
) -> Result<axum::Json<Vec<OptionView>>, AppError> {
    let category = parse_category(&segment)?;
    let items = state.option_repo.list_by_category(category).await?;

    Ok(axum::Json(items.iter().map(OptionView::from).collect()))
}

/// `POST /api/options/{type}` — add a reference value to a category.
pub async fn create_option_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(segment): axum::extract::Path<String>,
    axum::Json(request): axum::Json<CreateOptionRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<OptionItem>), AppError> {
    let category = parse_category(&segment)?;
    let item = process_create_option(state.option_repo.as_ref(), category, request).await?;

    Ok((axum::http::StatusCode::CREATED, axum::Json(item)))
}
