//! Defines the route handler for the payments page: the wallet balance,
//! quick actions, derived stats, and the transaction history table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BadgeTone, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        cents_rounded_with_tooltip, dollar_input_styles, format_cents, status_badge,
    },
    navigation::NavBar,
    wallet::{Transaction, TransactionKind, TransactionStatus, Wallet, WalletSnapshot, WalletStats},
};

/// The state needed for the payments page.
#[derive(Debug, Clone)]
pub struct PaymentsViewState {
    /// The wallet ledger.
    pub wallet: Arc<Mutex<Wallet>>,
}

impl FromRef<AppState> for PaymentsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            wallet: state.wallet.clone(),
        }
    }
}

/// Render an overview of the user's wallet.
pub async fn get_payments_page(State(state): State<PaymentsViewState>) -> Result<Response, Error> {
    let (snapshot, stats) = {
        let wallet = state
            .wallet
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire wallet lock: {error}"))
            .map_err(|_| Error::StateLockError)?;

        (wallet.snapshot(), wallet.stats())
    };

    Ok(payments_view(&snapshot, stats).into_response())
}

fn payments_view(snapshot: &WalletSnapshot, stats: WalletStats) -> Markup {
    let nav_bar = NavBar::new(endpoints::PAYMENTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Payments & Wallet" }
                    p class="text-gray-600 dark:text-gray-400"
                    { "Manage your funds and transactions" }
                }

                (balance_card(snapshot))
                (quick_actions(snapshot))
                (stats_cards(stats))
                (history_table(&snapshot.transactions))
            }
        }
    );

    base("Payments", &[dollar_input_styles()], &content)
}

fn balance_card(snapshot: &WalletSnapshot) -> Markup {
    html!(
        section
            class="w-full rounded-lg bg-gradient-to-br from-blue-600 to-blue-800 text-white p-8 shadow-md"
        {
            p class="text-blue-100" { "Total Balance" }

            h2 class="text-4xl font-bold mt-2" id="wallet-balance"
            {
                (cents_rounded_with_tooltip(snapshot.balance))
            }

            p class="text-blue-100 text-sm mt-4" { "Available for Investment" }
        }
    )
}

fn quick_actions(snapshot: &WalletSnapshot) -> Markup {
    html!(
        section class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4"
        {
            (action_form(
                "Deposit",
                "Add money to your wallet",
                endpoints::DEPOSIT_API,
                None,
            ))
            (action_form(
                "Withdraw",
                &format!(
                    "Transfer money to your bank account (available: {})",
                    format_cents(snapshot.balance)
                ),
                endpoints::WITHDRAW_API,
                None,
            ))
            (action_form(
                "Transfer",
                "Send money to another user",
                endpoints::TRANSFER_API,
                Some("Recipient name"),
            ))
            (action_form(
                "Fund a Deal",
                "This investment will be marked as pending until the deal is finalised.",
                endpoints::FUNDING_API,
                Some("Startup name"),
            ))
        }
    )
}

fn action_form(
    title: &str,
    subtitle: &str,
    post_endpoint: &str,
    recipient_placeholder: Option<&str>,
) -> Markup {
    html!(
        form
            hx-post=(post_endpoint)
            hx-target-error="#alert-container"
            class=(format!("{CARD_STYLE} space-y-3"))
        {
            h3 class="text-lg font-semibold" { (title) }
            p class="text-sm text-gray-600 dark:text-gray-400" { (subtitle) }

            @if let Some(placeholder) = recipient_placeholder {
                div
                {
                    label for=(format!("recipient-{post_endpoint}")) class=(FORM_LABEL_STYLE)
                    { "Recipient" }

                    input
                        name="recipient"
                        id=(format!("recipient-{post_endpoint}"))
                        type="text"
                        placeholder=(placeholder)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for=(format!("amount-{post_endpoint}")) class=(FORM_LABEL_STYLE)
                { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id=(format!("amount-{post_endpoint}"))
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="Enter amount"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (title) }
        }
    )
}

fn stats_cards(stats: WalletStats) -> Markup {
    let stat_card = |label: &str, amount| {
        html!(
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
                p class="text-lg font-semibold" { (format_cents(amount)) }
            }
        )
    };

    html!(
        section class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (stat_card("Total Deposits", stats.total_deposits))
            (stat_card("Total Withdrawals", stats.total_withdrawals))
            (stat_card("Total Investments", stats.total_invested))
        }
    )
}

fn history_table(transactions: &[Transaction]) -> Markup {
    html!(
        section class="w-full overflow-x-auto dark:bg-gray-800"
        {
            header class="flex justify-between items-end mb-2"
            {
                h2 class="text-lg font-medium" { "Transaction History" }
            }

            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sender/Receiver" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (history_row(transaction))
                    }

                    @if transactions.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No transactions yet. Use the quick actions above to get started."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn history_row(transaction: &Transaction) -> Markup {
    // Deposits and transfers received show as credits; everything else is a
    // debit from this wallet's point of view.
    let is_credit = transaction.kind == TransactionKind::Deposit
        || (transaction.kind == TransactionKind::Transfer
            && transaction.receiver.as_deref() == Some("You"));
    let (amount_sign, amount_style) = if is_credit {
        ("+", "text-sm font-semibold text-green-600 dark:text-green-400")
    } else {
        ("-", "text-sm font-semibold")
    };

    let counterparties = match (&transaction.sender, &transaction.receiver) {
        (Some(sender), Some(receiver)) => format!("{sender} → {receiver}"),
        _ => "-".to_owned(),
    };

    let badge_tone = match transaction.status {
        TransactionStatus::Completed => BadgeTone::Success,
        TransactionStatus::Pending => BadgeTone::Warning,
        TransactionStatus::Failed => BadgeTone::Danger,
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            th
                scope="row"
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (transaction.kind.label())
            }

            td class=(TABLE_CELL_STYLE) { (transaction.description) }

            td class="px-6 py-4 text-right whitespace-nowrap"
            {
                span class=(amount_style)
                {
                    (amount_sign) (format_cents(transaction.amount))
                }
            }

            td class=(TABLE_CELL_STYLE) { (counterparties) }

            td class=(TABLE_CELL_STYLE)
            {
                (status_badge(transaction.status.label(), badge_tone))
            }

            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
        }
    )
}
