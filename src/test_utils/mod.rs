#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod table;

pub(crate) use form::{
    assert_checked_radio, assert_form_input_with_value, assert_hx_endpoint,
    assert_submit_button_disabled, must_get_form,
};
pub(crate) use html::{assert_valid_html, element_text, must_select, parse_html_document};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use table::{FakeTransactionTable, fake_transaction};
