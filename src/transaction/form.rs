use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::{TransactionForm, TransactionType},
};

/// Render the new transaction form.
///
/// The draft values are written back into the inputs so that a rejected or
/// failed submission does not lose what the user typed.
pub fn transaction_form_view(form: &TransactionForm) -> Markup {
    let draft = &form.draft;
    let is_expense = draft.type_ == TransactionType::Expense;
    let is_submitting = form.is_submitting();

    html! {
        section class={ (CARD_STYLE) " p-6" }
        {
            h2 class="text-lg font-semibold text-gray-900 dark:text-white mb-4"
            {
                "Add Transaction"
            }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target="#app"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-disabled-elt="find button[type=submit]"
                hx-indicator="#indicator"
                class="space-y-4"
            {
                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    div class="flex gap-2"
                    {
                        input
                            name="type_"
                            id="transaction-type-expense"
                            type="radio"
                            value=(TransactionType::Expense)
                            checked[is_expense]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="transaction-type-expense"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Expense"
                        }

                        input
                            name="type_"
                            id="transaction-type-income"
                            type="radio"
                            value=(TransactionType::Income)
                            checked[!is_expense]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="transaction-type-income"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Income"
                        }
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="e.g. Coffee"
                        value=(draft.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    // Plain text so that the server sees exactly what was typed.
                    input
                        name="amount"
                        id="amount"
                        type="text"
                        inputmode="decimal"
                        placeholder="0.00"
                        value=(draft.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button
                    type="submit"
                    id="indicator"
                    disabled[is_submitting]
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    @if is_submitting {
                        "Saving..."
                    } @else {
                        "Add Transaction"
                    }
                }
            }
        }
    }
}
