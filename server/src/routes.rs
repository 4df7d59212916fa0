//! HTTP routes: thin JSON mappers over WalletService.
//!
//! Field names on the wire are the client-facing camelCase names;
//! business-rule failures map to 400, unknown accounts to 404, store
//! failures to 500 with a generic message.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use wallet_core::{
    account::Registration, error::WalletError, service::WalletService, types::Amount,
};

pub type SharedService = Arc<Mutex<WalletService>>;

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/api/referral", post(track_referral))
        .route("/user/:id", get(fetch_user))
        .route("/user/deposit", post(deposit))
        .route("/user/buy-product", post(buy_product))
        .with_state(service)
}

// ── Request / response payloads ────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RegisterRequest {
    first_name:  String,
    last_name:   String,
    email:       String,
    phone:       String,
    password:    String,
    referrer_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRequest {
    phone:    String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReferralRequest {
    user_id:     String,
    referrer_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DepositRequest {
    user_id:        String,
    deposit_amount: Amount,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PurchaseRequest {
    user_id: String,
    price:   Amount,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    message: String,
    user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResponse {
    message: String,
    balance: Amount,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    first_name:      String,
    last_name:       String,
    email:           String,
    phone:           String,
    referrals_count: i64,
    balance:         Amount,
}

// ── Handlers ───────────────────────────────────────────────────────

async fn register(
    State(service): State<SharedService>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let registration = Registration {
        first_name:  req.first_name,
        last_name:   req.last_name,
        email:       req.email,
        phone:       req.phone,
        password:    req.password,
        referrer_id: req.referrer_id,
    };
    match lock(&service).and_then(|s| s.register(&registration)) {
        Ok(_) => reply(StatusCode::CREATED, "User created successfully"),
        Err(e) => error_response(e),
    }
}

async fn login(State(service): State<SharedService>, Json(req): Json<LoginRequest>) -> Response {
    match lock(&service).and_then(|s| s.login(&req.phone, &req.password)) {
        Ok(user_id) => (
            StatusCode::OK,
            Json(LoginResponse {
                message: "Login successful".into(),
                user_id,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn track_referral(
    State(service): State<SharedService>,
    Json(req): Json<ReferralRequest>,
) -> Response {
    match lock(&service).and_then(|s| s.link_referral(&req.user_id, &req.referrer_id)) {
        Ok(()) => reply(StatusCode::OK, "Referral tracked successfully"),
        Err(e) => error_response(e),
    }
}

async fn fetch_user(State(service): State<SharedService>, Path(id): Path<String>) -> Response {
    match lock(&service).and_then(|s| s.account(&id)) {
        Ok(account) => (
            StatusCode::OK,
            Json(UserResponse {
                first_name:      account.first_name,
                last_name:       account.last_name,
                email:           account.email,
                phone:           account.phone,
                referrals_count: account.referrals_count,
                balance:         account.balance,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn deposit(
    State(service): State<SharedService>,
    Json(req): Json<DepositRequest>,
) -> Response {
    match lock(&service).and_then(|s| s.deposit(&req.user_id, req.deposit_amount)) {
        Ok(balance) => (
            StatusCode::OK,
            Json(BalanceResponse {
                message: "Balance updated successfully".into(),
                balance,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn buy_product(
    State(service): State<SharedService>,
    Json(req): Json<PurchaseRequest>,
) -> Response {
    match lock(&service).and_then(|s| s.purchase(&req.user_id, req.price)) {
        Ok(()) => reply(StatusCode::OK, "Purchase successful, bonus pending"),
        Err(e) => error_response(e),
    }
}

// ── Plumbing ───────────────────────────────────────────────────────

fn lock(service: &SharedService) -> Result<MutexGuard<'_, WalletService>, WalletError> {
    service
        .lock()
        .map_err(|_| WalletError::Other(anyhow::anyhow!("service lock poisoned")))
}

fn status_for(err: &WalletError) -> StatusCode {
    match err {
        WalletError::MissingField(_)
        | WalletError::InvalidAmount(_)
        | WalletError::InvalidCredentials
        | WalletError::DuplicateAccount
        | WalletError::AlreadyReferred(_)
        | WalletError::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
        WalletError::NotFound(_) => StatusCode::NOT_FOUND,
        WalletError::Database(_) | WalletError::Serialization(_) | WalletError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(err: WalletError) -> Response {
    let status = status_for(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        // Never leak store detail to the client.
        log::error!("internal error: {err}");
        return reply(status, "Internal server error");
    }
    reply(status, &err.to_string())
}

fn reply(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_failures_map_to_400() {
        for err in [
            WalletError::MissingField("email"),
            WalletError::InvalidAmount(-1.0),
            WalletError::InvalidCredentials,
            WalletError::DuplicateAccount,
            WalletError::AlreadyReferred("a".into()),
            WalletError::InsufficientFunds {
                available: 10.0,
                required: 20.0,
            },
        ] {
            assert_eq!(status_for(&err), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn unknown_accounts_map_to_404() {
        assert_eq!(
            status_for(&WalletError::NotFound("a".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_failures_map_to_500() {
        assert_eq!(
            status_for(&WalletError::Other(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
