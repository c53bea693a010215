use garlic::{
    dom::document::Document,
    error::GarlicError,
    path::resolver::{resolve, resolve_node, resolve_selector},
};

use crate::common::fixtures::{empty_page, mixed_page, plan_page, signup_page};

mod common;

// =========================================================================
// Key shape
// =========================================================================

#[test]
fn text_input_key_is_form_then_named_input() {
    let page = signup_page();
    let key = resolve_node(&page.doc, page.email).unwrap();

    assert_eq!(key.as_str(), "garlic:example.com/signup>form>input.email");
}

#[test]
fn named_form_and_sibling_index_appear_in_key() {
    let page = mixed_page();

    assert_eq!(
        resolve_node(&page.doc, page.name).unwrap().as_str(),
        "garlic:example.com/signup>form.profile>input.name:eq(0)",
        "Two inputs directly under the form, so the text input gets an index"
    );
    assert_eq!(
        resolve_node(&page.doc, page.bio).unwrap().as_str(),
        "garlic:example.com/signup>form.profile>textarea.bio"
    );
    assert_eq!(
        resolve_node(&page.doc, page.color).unwrap().as_str(),
        "garlic:example.com/signup>form.profile>select.color"
    );
}

#[test]
fn sibling_forms_are_indexed() {
    let (mut doc, body) = empty_page();
    let first = doc.append(body, "form", &[]).unwrap();
    let a = doc.append(first, "input", &[("type", "text"), ("name", "q")]).unwrap();
    let second = doc.append(body, "form", &[]).unwrap();
    let b = doc.append(second, "input", &[("type", "text"), ("name", "q")]).unwrap();

    assert_eq!(
        resolve_node(&doc, a).unwrap().as_str(),
        "garlic:example.com/signup>form:eq(0)>input.q"
    );
    assert_eq!(
        resolve_node(&doc, b).unwrap().as_str(),
        "garlic:example.com/signup>form:eq(1)>input.q"
    );
}

#[test]
fn wrappers_are_skipped_for_text_inputs() {
    let (mut doc, body) = empty_page();
    let form = doc.append(body, "form", &[]).unwrap();
    let fieldset = doc.append(form, "fieldset", &[]).unwrap();
    let wrapper = doc.append(fieldset, "div", &[("class", "row")]).unwrap();
    let input = doc.append(wrapper, "input", &[("type", "text"), ("name", "city")]).unwrap();

    assert_eq!(
        resolve_node(&doc, input).unwrap().as_str(),
        "garlic:example.com/signup>form>input.city"
    );
}

#[test]
fn field_outside_any_form_walks_to_document_root() {
    let (mut doc, body) = empty_page();
    let search = doc.append(body, "input", &[("type", "text"), ("name", "q")]).unwrap();

    assert_eq!(
        resolve_node(&doc, search).unwrap().as_str(),
        "garlic:example.com/signup>input.q"
    );
}

// =========================================================================
// Stability
// =========================================================================

#[test]
fn key_is_stable_across_resolutions_and_reloads() {
    let page = signup_page();
    let first = resolve_node(&page.doc, page.email).unwrap();
    let second = resolve_node(&page.doc, page.email).unwrap();
    assert_eq!(first, second, "Same load, same key");

    let reloaded = page.doc.to_snapshot().to_document().unwrap();
    let email = resolve_selector(&reloaded, "input[name=email]").unwrap();
    assert_eq!(first, email, "Same structure after reload, same key");
}

#[test]
fn different_route_gives_different_key() {
    let page = signup_page();
    let mut snapshot = page.doc.to_snapshot();
    snapshot.route = "/login".into();
    let other = snapshot.to_document().unwrap();

    let here = resolve_selector(&page.doc, "input[name=email]").unwrap();
    let there = resolve_selector(&other, "input[name=email]").unwrap();
    assert_ne!(here, there);
    assert!(there.as_str().starts_with("garlic:example.com/login>"));
}

// =========================================================================
// Radios and checkboxes
// =========================================================================

#[test]
fn radios_in_a_group_share_one_key() {
    let page = plan_page();
    let basic = resolve_node(&page.doc, page.basic).unwrap();
    let pro = resolve_node(&page.doc, page.pro).unwrap();

    assert_eq!(basic, pro);
    assert_eq!(basic.as_str(), "garlic:example.com/signup>form>input.plan");
}

#[test]
fn same_named_checkboxes_get_distinct_keys() {
    let page = mixed_page();
    let a = resolve_node(&page.doc, page.check_a).unwrap();
    let b = resolve_node(&page.doc, page.check_b).unwrap();

    assert_ne!(a, b);
    assert_eq!(a.as_str(), "garlic:example.com/signup>form.profile>div:eq(0)>input.tags");
    assert_eq!(b.as_str(), "garlic:example.com/signup>form.profile>div:eq(1)>input.tags");
}

#[test]
fn checkboxes_in_one_parent_are_indexed() {
    let (mut doc, body) = empty_page();
    let form = doc.append(body, "form", &[]).unwrap();
    let a = doc.append(form, "input", &[("type", "checkbox"), ("name", "opt")]).unwrap();
    let b = doc.append(form, "input", &[("type", "checkbox"), ("name", "opt")]).unwrap();

    assert_eq!(
        resolve_node(&doc, a).unwrap().as_str(),
        "garlic:example.com/signup>form>input.opt:eq(0)"
    );
    assert_eq!(
        resolve_node(&doc, b).unwrap().as_str(),
        "garlic:example.com/signup>form>input.opt:eq(1)"
    );
}

#[test]
fn checkbox_outside_form_keeps_every_ancestor() {
    let (mut doc, body) = empty_page();
    let span = doc.append(body, "span", &[]).unwrap();
    let check = doc.append(span, "input", &[("type", "checkbox"), ("name", "agree")]).unwrap();

    assert_eq!(
        resolve_node(&doc, check).unwrap().as_str(),
        "garlic:example.com/signup>html>body>span>input.agree"
    );
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn ambiguous_or_empty_selection_is_rejected() {
    let page = plan_page();

    let both = resolve_selector(&page.doc, "input[name=plan]");
    assert!(
        matches!(both, Err(GarlicError::UnresolvablePath(_))),
        "Two matches must not be guessed"
    );

    let none = resolve(&page.doc, &[]);
    assert!(matches!(none, Err(GarlicError::UnresolvablePath(_))));

    let one = resolve(&page.doc, &[page.pro]);
    assert!(one.is_ok());
}

#[test]
fn unnamed_root_before_form_is_unresolvable() {
    let mut doc = Document::new("example.com", "/", "");
    let input = doc.append(doc.root(), "input", &[("type", "text"), ("name", "q")]).unwrap();

    assert!(matches!(
        resolve_node(&doc, input),
        Err(GarlicError::UnresolvablePath(_))
    ));

    let form = doc.append(doc.root(), "form", &[]).unwrap();
    let inside = doc.append(form, "input", &[("type", "text"), ("name", "q")]).unwrap();
    assert_eq!(
        resolve_node(&doc, inside).unwrap().as_str(),
        "garlic:example.com/>form>input.q",
        "The walk stops at the form before reaching the unnamed root"
    );
}

#[test]
fn non_control_node_is_unresolvable() {
    let page = mixed_page();
    assert!(matches!(
        resolve_node(&page.doc, page.button),
        Err(GarlicError::UnresolvablePath(_))
    ));
}
