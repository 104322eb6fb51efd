// 🌐 HTTP API - Axum router over the ledger engine
//
//   GET  /health
//   GET  /authors
//   GET  /authors/:id
//   GET  /authors/:id/sales
//   GET  /authors/:id/withdrawals
//   POST /withdrawals            {"author_id": 2, "amount": 1000}
//
// Every error body is {"error": "<message>"}.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::entities::{Amount, AuthorId};
use crate::error::{AmountError, LedgerError};
use crate::ledger::{AuthorDetail, AuthorSummary, LedgerEngine, SaleLine, WithdrawalReceipt};
use crate::withdrawal::Withdrawal;

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state.
///
/// Reads share the lock; a withdrawal holds the write lock from balance check to append.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<RwLock<LedgerEngine>>,
}

impl AppState {
    pub fn new(ledger: LedgerEngine) -> Self {
        AppState {
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerEngine>, ApiError> {
        self.ledger
            .read()
            .map_err(|_| ApiError::Internal("ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerEngine>, ApiError> {
        self.ledger
            .write()
            .map_err(|_| ApiError::Internal("ledger lock poisoned".to_string()))
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<AmountError> for ApiError {
    fn from(err: AmountError) -> Self {
        ApiError::Ledger(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Ledger(LedgerError::AuthorNotFound) => StatusCode::NOT_FOUND,
            ApiError::Ledger(LedgerError::InvalidAmount(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(LedgerError::InsufficientBalance { .. }) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(reason) => {
                tracing::error!(%reason, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ============================================================================
// REQUEST PARSING
// ============================================================================

/// POST /withdrawals body. Fields stay loosely typed so validation can run in order.
#[derive(Debug, Default, PartialEq)]
pub struct WithdrawalRequest {
    pub author_id: Value,
    pub amount: Value,
}

impl WithdrawalRequest {
    /// Read the body the way a lenient JSON body parser would.
    ///
    /// Only `application/json` (or `+json`) bodies are parsed. Anything that
    /// does not yield a JSON object gives an empty request, which then matches
    /// no author. Unparseable JSON is the only rejection.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, ApiError> {
        if !content_type.is_some_and(is_json_content_type) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(WithdrawalRequest::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|err| {
            tracing::debug!(error = %err, "unparseable withdrawal body");
            ApiError::BadRequest("Invalid JSON body".to_string())
        })?;

        Ok(match value {
            Value::Object(fields) => WithdrawalRequest::from_fields(fields),
            _ => WithdrawalRequest::default(),
        })
    }

    fn from_fields(mut fields: Map<String, Value>) -> Self {
        WithdrawalRequest {
            author_id: fields.remove("author_id").unwrap_or_default(),
            amount: fields.remove("amount").unwrap_or_default(),
        }
    }
}

fn is_json_content_type(raw: &str) -> bool {
    let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Path segment to author id; anything unparseable matches no author.
///
/// Deliberately strict: a numeric prefix is not enough, so `2.5` or `2abc`
/// are unknown authors rather than author 2.
fn parse_path_id(raw: &str) -> Option<AuthorId> {
    raw.trim().parse().ok()
}

/// JSON author id: an integer (or whole float) in range, otherwise no author
fn parse_author_id(value: &Value) -> Option<AuthorId> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(id) = n.as_u64() {
        return AuthorId::try_from(id).ok();
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= 0.0 && f <= AuthorId::MAX as f64 {
        Some(f as AuthorId)
    } else {
        None
    }
}

/// JSON amount: a whole number. Sign is checked by the ledger.
fn parse_amount(value: &Value) -> Result<Amount, AmountError> {
    let Value::Number(n) = value else {
        return Err(AmountError::NotPositiveWhole);
    };
    if let Some(amount) = n.as_i64() {
        return Ok(amount);
    }
    match n.as_f64() {
        // Saturates beyond i64, which then fails the balance check
        Some(f) if f.fract() == 0.0 => Ok(f as Amount),
        _ => Err(AmountError::NotPositiveWhole),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health - Health check
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

/// GET /authors - All authors with earnings and balance
async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<AuthorSummary>>, ApiError> {
    let ledger = state.read()?;
    Ok(Json(ledger.list_authors_with_finances()))
}

/// GET /authors/:id - Author profile with per-book breakdown
async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuthorDetail>, ApiError> {
    let author_id = parse_path_id(&id).ok_or(LedgerError::AuthorNotFound)?;
    let ledger = state.read()?;
    Ok(Json(ledger.author_detail(author_id)?))
}

/// GET /authors/:id/sales - Sales history, newest first
async fn author_sales(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SaleLine>>, ApiError> {
    let ledger = state.read()?;
    let sales = parse_path_id(&id)
        .map(|author_id| ledger.author_sales(author_id))
        .unwrap_or_default();
    Ok(Json(sales))
}

/// GET /authors/:id/withdrawals - Withdrawal history, newest first
async fn author_withdrawals(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Withdrawal>>, ApiError> {
    let ledger = state.read()?;
    let withdrawals = parse_path_id(&id)
        .map(|author_id| ledger.author_withdrawals(author_id))
        .unwrap_or_default();
    Ok(Json(withdrawals))
}

/// POST /withdrawals - Request a payout
async fn create_withdrawal(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<WithdrawalReceipt>), ApiError> {
    let body = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let request = WithdrawalRequest::from_body(content_type, &body)?;

    let author_id = parse_author_id(&request.author_id).ok_or(LedgerError::AuthorNotFound)?;

    let mut ledger = state.write()?;
    // Unknown author outranks a malformed amount
    ledger.require_author(author_id)?;
    let amount = parse_amount(&request.amount)?;

    let receipt = ledger.create_withdrawal(author_id, amount)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the application router (CORS open to any origin, request tracing on)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/authors", get(list_authors))
        .route("/authors/:id", get(get_author))
        .route("/authors/:id/sales", get(author_sales))
        .route("/authors/:id/withdrawals", get(author_withdrawals))
        .route("/withdrawals", post(create_withdrawal))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_id() {
        assert_eq!(parse_path_id("2"), Some(2));
        assert_eq!(parse_path_id("abc"), None);
        assert_eq!(parse_path_id("-1"), None);
        assert_eq!(parse_path_id("2.5"), None);
        assert_eq!(parse_path_id("2abc"), None);
        assert_eq!(parse_path_id("0x2"), None);
    }

    #[test]
    fn test_parse_author_id() {
        assert_eq!(parse_author_id(&json!(2)), Some(2));
        assert_eq!(parse_author_id(&json!(2.0)), Some(2));
        assert_eq!(parse_author_id(&json!(2.5)), None);
        assert_eq!(parse_author_id(&json!("2")), None);
        assert_eq!(parse_author_id(&json!(-2)), None);
        assert_eq!(parse_author_id(&Value::Null), None);
        assert_eq!(parse_author_id(&json!(u64::MAX)), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&json!(1000)), Ok(1000));
        assert_eq!(parse_amount(&json!(1000.0)), Ok(1000));
        assert_eq!(parse_amount(&json!(-5)), Ok(-5));
        assert_eq!(parse_amount(&json!(1000.5)), Err(AmountError::NotPositiveWhole));
        assert_eq!(parse_amount(&json!("1000")), Err(AmountError::NotPositiveWhole));
        assert_eq!(parse_amount(&Value::Null), Err(AmountError::NotPositiveWhole));
        assert_eq!(parse_amount(&json!(u64::MAX)), Ok(Amount::MAX));
    }

    #[test]
    fn test_request_from_json_object() {
        let request =
            WithdrawalRequest::from_body(Some("application/json"), br#"{"author_id": 2, "amount": 1000}"#)
                .unwrap();

        assert_eq!(request.author_id, json!(2));
        assert_eq!(request.amount, json!(1000));
    }

    #[test]
    fn test_request_content_type_variants() {
        let body = br#"{"author_id": 2, "amount": 1000}"#;

        for content_type in ["application/json; charset=utf-8", "Application/JSON", "application/vnd.api+json"] {
            let request = WithdrawalRequest::from_body(Some(content_type), body).unwrap();
            assert_eq!(request.author_id, json!(2), "{}", content_type);
        }

        for content_type in [None, Some("text/plain"), Some("application/x-www-form-urlencoded")] {
            let request = WithdrawalRequest::from_body(content_type, body).unwrap();
            assert_eq!(request, WithdrawalRequest::default());
        }
    }

    #[test]
    fn test_request_non_object_bodies_are_empty() {
        let bodies: [&[u8]; 6] = [b"[1,2]", b"42", b"\"text\"", b"null", b"", b"   "];
        for body in bodies {
            let request = WithdrawalRequest::from_body(Some("application/json"), body).unwrap();
            assert_eq!(request, WithdrawalRequest::default());
        }
    }

    #[test]
    fn test_request_malformed_json() {
        let err = WithdrawalRequest::from_body(Some("application/json"), b"{oops").unwrap_err();
        assert!(matches!(&err, ApiError::BadRequest(msg) if msg == "Invalid JSON body"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ApiError::from(LedgerError::AuthorNotFound), StatusCode::NOT_FOUND),
            (ApiError::from(AmountError::NotPositiveWhole), StatusCode::BAD_REQUEST),
            (
                ApiError::from(LedgerError::InsufficientBalance { requested: 2, available: 1 }),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::BadRequest("Invalid JSON body".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
