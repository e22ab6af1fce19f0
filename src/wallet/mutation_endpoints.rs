//! Defines the form endpoints for the four wallet mutations.
//!
//! Each handler runs the validation gate, stamps the transaction with the
//! local calendar date, and applies the mutation. Success redirects back to
//! the payments page; validation failures render an alert.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    timezone::current_local_date,
    wallet::{Recipient, TransactionKind, Wallet, parse_amount},
};

/// The state needed to apply a wallet mutation.
#[derive(Debug, Clone)]
pub struct WalletActionState {
    /// The wallet ledger.
    pub wallet: Arc<Mutex<Wallet>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for WalletActionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            wallet: state.wallet.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for deposits and withdrawals.
#[derive(Debug, Deserialize)]
pub struct AmountForm {
    /// The user-entered amount in dollars, parsed by the validation gate.
    pub amount: String,
}

/// The form data for transfers and fundings.
#[derive(Debug, Deserialize)]
pub struct CounterpartyForm {
    /// The user-entered amount in dollars, parsed by the validation gate.
    pub amount: String,
    /// The counterparty's display name.
    #[serde(default)]
    pub recipient: String,
}

/// A route handler for depositing funds, redirects to the payments view on
/// success.
pub async fn deposit_endpoint(
    State(state): State<WalletActionState>,
    Form(form): Form<AmountForm>,
) -> Response {
    apply_mutation(&state, TransactionKind::Deposit, &form.amount, None)
}

/// A route handler for withdrawing funds, redirects to the payments view on
/// success.
pub async fn withdraw_endpoint(
    State(state): State<WalletActionState>,
    Form(form): Form<AmountForm>,
) -> Response {
    apply_mutation(&state, TransactionKind::Withdraw, &form.amount, None)
}

/// A route handler for transferring funds to another user, redirects to the
/// payments view on success.
pub async fn transfer_endpoint(
    State(state): State<WalletActionState>,
    Form(form): Form<CounterpartyForm>,
) -> Response {
    apply_mutation(
        &state,
        TransactionKind::Transfer,
        &form.amount,
        Some(&form.recipient),
    )
}

/// A route handler for funding a deal, redirects to the payments view on
/// success. The created transaction stays pending until the deal is
/// finalised.
pub async fn funding_endpoint(
    State(state): State<WalletActionState>,
    Form(form): Form<CounterpartyForm>,
) -> Response {
    apply_mutation(
        &state,
        TransactionKind::Funding,
        &form.amount,
        Some(&form.recipient),
    )
}

fn apply_mutation(
    state: &WalletActionState,
    kind: TransactionKind,
    raw_amount: &str,
    raw_recipient: Option<&str>,
) -> Response {
    let amount = match parse_amount(raw_amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let recipient = match raw_recipient.map(Recipient::new) {
        Some(Ok(recipient)) => Some(recipient),
        Some(Err(error)) => return error.into_alert_response(),
        None => None,
    };

    let date = match current_local_date(&state.local_timezone) {
        Ok(date) => date,
        Err(error) => return error.into_response(),
    };

    let mut wallet = match state.wallet.lock() {
        Ok(wallet) => wallet,
        Err(error) => {
            tracing::error!("could not acquire wallet lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    match wallet.apply(kind, amount, recipient, date) {
        Ok(transaction) => {
            tracing::info!(
                "applied {} of {} cents as transaction {}",
                transaction.kind.label(),
                transaction.amount.minor_units(),
                transaction.id
            );

            (
                HxRedirect(endpoints::PAYMENTS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
