use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_post = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_post, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_post:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    let input_value = input.value().attr("value").unwrap_or_default();

    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );
    assert_eq!(
        input_value, value,
        "want input {name} with value \"{value}\", got {input_value:?}"
    );
}

#[track_caller]
pub(crate) fn assert_checked_radio(form: &ElementRef<'_>, name: &str, want_value: &str) {
    let selector = Selector::parse(&format!("input[type=radio][name={name}]")).unwrap();
    let checked = form
        .select(&selector)
        .filter(|input| input.value().attr("checked").is_some())
        .map(|input| input.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(
        checked,
        vec![want_value],
        "want only \"{want_value}\" checked for radio group {name}, got {checked:?}"
    );
}

#[track_caller]
pub(crate) fn assert_submit_button_disabled(form: &ElementRef<'_>, want_disabled: bool) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let disabled = submit_button.value().attr("disabled").is_some();

    assert_eq!(
        disabled, want_disabled,
        "want submit button disabled={want_disabled}, got disabled={disabled}"
    );
}
