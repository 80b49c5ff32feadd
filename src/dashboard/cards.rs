//! Card components for the income, expense and balance totals.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    dashboard::aggregation::Summary,
    html::{CARD_STYLE, format_currency},
};

/// Renders the three summary cards: Total Balance, Income and Expenses.
///
/// While the first load is in flight there is nothing to sum yet, so
/// placeholders are shown instead of misleading zeros.
pub fn summary_cards_view(summary: &Summary, show_skeleton: bool) -> Markup {
    let balance_style = if summary.balance < Decimal::ZERO {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section
            id="summary"
            aria-busy=(show_skeleton)
            class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (summary_card("Total Balance", summary.balance, balance_style, show_skeleton))
            (summary_card(
                "Income",
                summary.income,
                "text-green-600 dark:text-green-400",
                show_skeleton,
            ))
            (summary_card(
                "Expenses",
                summary.expense,
                "text-red-600 dark:text-red-400",
                show_skeleton,
            ))
        }
    }
}

fn summary_card(title: &str, amount: Decimal, amount_style: &str, show_skeleton: bool) -> Markup {
    html! {
        div class={ (CARD_STYLE) " p-6" } data-card=(title)
        {
            p class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }

            @if show_skeleton {
                div class="mt-2 h-8 w-32 rounded bg-gray-200 dark:bg-gray-700 animate-pulse" {}
            } @else {
                p class={ "mt-2 text-2xl font-bold " (amount_style) }
                {
                    (format_currency(amount))
                }
            }
        }
    }
}
