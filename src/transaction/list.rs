//! HTML rendering for the transaction history.

use maud::{Markup, html};
use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    html::{
        CARD_STYLE, EXPENSE_BADGE_STYLE, INCOME_BADGE_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    transaction::{Transaction, TransactionType},
};

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

const DATE_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// Render the transaction history, newest first.
///
/// Dates are shown in `local_offset`.
pub fn transaction_history_view(
    transactions: &[Transaction],
    local_offset: UtcOffset,
) -> Markup {
    html! {
        section class={ (CARD_STYLE) " overflow-hidden" }
        {
            h2 class="text-lg font-semibold text-gray-900 dark:text-white p-6 pb-4"
            {
                "Transaction History"
            }

            @if transactions.is_empty() {
                p
                    data-empty-state
                    class="px-6 pb-8 text-center text-gray-500 dark:text-gray-400"
                {
                    "No transactions yet"
                }
            } @else {
                div class="overflow-x-auto"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction, local_offset))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let created_at = transaction.created_at.to_offset(local_offset);
    let (badge_style, sign, amount_style) = match transaction.type_ {
        TransactionType::Income => (
            INCOME_BADGE_STYLE,
            "+",
            "text-green-700 dark:text-green-300",
        ),
        TransactionType::Expense => (EXPENSE_BADGE_STYLE, "-", "text-red-700 dark:text-red-300"),
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                time datetime=(date_attribute(created_at)) { (display_date(created_at)) }
            }
            td class={ (TABLE_CELL_STYLE) " text-gray-900 dark:text-white" }
            {
                (transaction.description)
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(badge_style) { (transaction.type_) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right font-medium " (amount_style) }
            {
                (sign) (format_currency(transaction.amount))
            }
        }
    }
}

fn display_date(date_time: OffsetDateTime) -> String {
    date_time
        .format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date_time.date().to_string())
}

fn date_attribute(date_time: OffsetDateTime) -> String {
    date_time
        .format(DATE_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| date_time.date().to_string())
}
