use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::{Subscriber, SubscriberStatus};
use crate::db::subscriber_repository::SubscriberRepository;
use crate::error::AppError;

/// Request payload for subscribing an email.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

/// Response from a successful subscription.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
    pub subscriber: SubscriberView,
}

/// The stable external view of a subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberView {
    pub id: String,
    pub email: String,
    /// Records without a stored status are reported as `pending`.
    pub status: SubscriberStatus,
    pub joined_at: DateTime<Utc>,
    pub last_active: Option<DateTime<Utc>>,
}

impl From<&Subscriber> for SubscriberView {
    fn from(sub: &Subscriber) -> Self {
        Self {
            id: sub.id.clone(),
            email: sub.email.clone(),
            status: sub.status.unwrap_or(SubscriberStatus::Pending),
            joined_at: sub.joined_at,
            last_active: sub.last_active,
        }
    }
}

/// Aggregate statistics for the admin dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberStats {
    pub total_subscribers: usize,
    /// Joined since the first day of the current calendar month.
    pub new_subscribers: usize,
    /// Last active within the trailing 30 days.
    pub active_subscribers: usize,
    /// Rounded percentage of active over total; 0 when there are none.
    pub active_percentage: i64,
    /// Month-over-month growth of new-subscriber counts, one decimal.
    /// A zero-subscriber prior month reports "100.0" rather than a
    /// division-by-zero artifact.
    pub growth_rate: String,
    /// Change of this month's new count against last month's, one decimal;
    /// "0.0" when last month had none.
    pub mom_change: String,
}

/// Combined payload for `GET /api/subscribe`.
#[derive(Debug, Serialize)]
pub struct SubscribersWithStats {
    pub subscribers: Vec<SubscriberView>,
    pub stats: SubscriberStats,
}

/// Request payload for deleting a subscriber.
#[derive(Debug, Deserialize)]
pub struct DeleteSubscriberRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Response from a successful subscriber delete.
#[derive(Debug, Serialize)]
pub struct DeleteSubscriberResponse {
    pub message: String,
}

/// Check the basic `local@domain.tld` shape: exactly one `@`, no
/// whitespace, and a dotted domain with text on both sides of the last dot.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Core subscription logic — validate the email shape, enforce uniqueness,
/// and insert with status `active`.
pub async fn process_subscribe(
    repo: &dyn SubscriberRepository,
    email: &str,
) -> Result<Subscriber, AppError> {
    if !is_valid_email(email) {
        return Err(AppError::BadRequest("Valid email is required".into()));
    }

    if repo.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already subscribed".into()));
    }

    let subscriber = Subscriber {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        status: Some(SubscriberStatus::Active),
        joined_at: Utc::now(),
        last_active: None,
    };

    repo.insert(subscriber.clone()).await?;

    Ok(subscriber)
}

/// First instant of the calendar month `months_back` months before `now`.
fn month_start(now: DateTime<Utc>, months_back: u32) -> Result<DateTime<Utc>, AppError> {
    let months = now.year() * 12 + now.month() as i32 - 1 - months_back as i32;
    let year = months.div_euclid(12);
    let month = (months.rem_euclid(12) + 1) as u32;

    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| {
            AppError::Internal(format!("Invalid month start: {}-{:02}", year, month))
        })
}

/// Derive the dashboard statistics from the full subscriber set.
///
/// `now` is passed in so the month windows are deterministic under test.
pub fn compute_stats(
    subscribers: &[Subscriber],
    now: DateTime<Utc>,
) -> Result<SubscriberStats, AppError> {
    let total = subscribers.len();

    let this_month = month_start(now, 0)?;
    let last_month = month_start(now, 1)?;
    let two_months_ago = month_start(now, 2)?;
    let thirty_days_ago = now - Duration::days(30);

    let new_subscribers = subscribers
        .iter()
        .filter(|s| s.joined_at >= this_month)
        .count();

    let active_subscribers = subscribers
        .iter()
        .filter(|s| s.last_active.is_some_and(|t| t >= thirty_days_ago))
        .count();

    let last_month_new = subscribers
        .iter()
        .filter(|s| s.joined_at >= last_month && s.joined_at < this_month)
        .count();

    let previous_month_new = subscribers
        .iter()
        .filter(|s| s.joined_at >= two_months_ago && s.joined_at < last_month)
        .count();

    let growth_rate = if previous_month_new == 0 {
        100.0
    } else {
        (last_month_new as f64 - previous_month_new as f64) / previous_month_new as f64 * 100.0
    };

    let mom_change = if last_month_new == 0 {
        0.0
    } else {
        (new_subscribers as f64 - last_month_new as f64) / last_month_new as f64 * 100.0
    };

    let active_percentage = if total == 0 {
        0
    } else {
        (active_subscribers as f64 / total as f64 * 100.0).round() as i64
    };

    Ok(SubscriberStats {
        total_subscribers: total,
        new_subscribers,
        active_subscribers,
        active_percentage,
        growth_rate: format!("{:.1}", growth_rate),
        mom_change: format!("{:.1}", mom_change),
    })
}

/// `POST /api/subscribe` — subscribe an email address.
pub async fn subscribe_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::Json(request): axum::Json<SubscribeRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<SubscribeResponse>), AppError> {
    let subscriber = process_subscribe(state.subscriber_repo.as_ref(), &request.email).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        axum::Json(SubscribeResponse {
            message: "Successfully subscribed!".to_string(),
            subscriber: SubscriberView::from(&subscriber),
        }),
    ))
}

/// `GET /api/subscribe` — every subscriber plus derived statistics.
pub async fn subscribers_with_stats_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
) -> Result<axum::Json<SubscribersWithStats>, AppError> {
    let subscribers = state.subscriber_repo.list_all().await?;
    let stats = compute_stats(&subscribers, Utc::now())?;
    let views = subscribers.iter().map(SubscriberView::from).collect();

    Ok(axum::Json(SubscribersWithStats {
        subscribers: views,
        stats,
    }))
}

/// `GET /api/subscribers` — plain subscriber list.
pub async fn list_subscribers_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
) -> Result<axum::Json<Vec<SubscriberView>>, AppError> {
    let subscribers = state.subscriber_repo.list_all().await?;
    Ok(axum::Json(
        subscribers.iter().map(SubscriberView::from).collect(),
    ))
}

/// `DELETE /api/subscribers` — delete by id carried in the request body.
pub async fn delete_subscriber_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::Json(request): axum::Json<DeleteSubscriberRequest>,
) -> Result<axum::Json<DeleteSubscriberResponse>, AppError> {
    let id = request
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Subscriber ID is required".into()))?;

    state.subscriber_repo.delete_by_id(&id).await?;

    Ok(axum::Json(DeleteSubscriberResponse {
        message: "Subscriber deleted successfully".to_string(),
    }))
}
