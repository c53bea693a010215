use garlic::binder::binder::Binder;
use garlic::dom::document::Document;
use garlic::dom::node::NodeId;
use garlic::storage::backend::MemoryBackend;
use garlic::storage::store::Storage;

pub const ORIGIN: &str = "example.com";
pub const ROUTE: &str = "/signup";

pub fn memory_binder() -> Binder {
    Binder::new(Storage::new(Box::new(MemoryBackend::new())))
}

pub fn empty_page() -> (Document, NodeId) {
    let mut doc = Document::new(ORIGIN, ROUTE, "html");
    let body = doc.append(doc.root(), "body", &[]).unwrap();
    (doc, body)
}

/// `<form id="f"><input type="text" name="email"></form>`
pub struct SignupPage {
    pub doc: Document,
    pub form: NodeId,
    pub email: NodeId,
}

pub fn signup_page() -> SignupPage {
    let (mut doc, body) = empty_page();
    let form = doc.append(body, "form", &[("id", "f")]).unwrap();
    let email = doc
        .append(form, "input", &[("type", "text"), ("name", "email")])
        .unwrap();
    SignupPage { doc, form, email }
}

/// Two `plan` radios (`basic`, `pro`) inside `<form id="f">`.
pub struct PlanPage {
    pub doc: Document,
    pub form: NodeId,
    pub basic: NodeId,
    pub pro: NodeId,
}

pub fn plan_page() -> PlanPage {
    build_plan_page(false)
}

/// Same page, with `basic` marked `checked` in the markup.
pub fn plan_page_defaulting_to_basic() -> PlanPage {
    build_plan_page(true)
}

fn build_plan_page(basic_checked: bool) -> PlanPage {
    let (mut doc, body) = empty_page();
    let form = doc.append(body, "form", &[("id", "f")]).unwrap();
    let mut basic_attrs = vec![("type", "radio"), ("name", "plan"), ("value", "basic")];
    if basic_checked {
        basic_attrs.push(("checked", "checked"));
    }
    let basic = doc.append(form, "input", &basic_attrs).unwrap();
    let pro = doc
        .append(form, "input", &[("type", "radio"), ("name", "plan"), ("value", "pro")])
        .unwrap();
    PlanPage { doc, form, basic, pro }
}

/// A form mixing every field kind, with two same-named checkboxes in
/// separate wrappers.
pub struct MixedPage {
    pub doc: Document,
    pub form: NodeId,
    pub name: NodeId,
    pub bio: NodeId,
    pub color: NodeId,
    pub radio_a: NodeId,
    pub check_a: NodeId,
    pub check_b: NodeId,
    pub button: NodeId,
}

pub fn mixed_page() -> MixedPage {
    let (mut doc, body) = empty_page();
    let form = doc.append(body, "form", &[("name", "profile")]).unwrap();
    let name = doc
        .append(form, "input", &[("type", "text"), ("name", "name")])
        .unwrap();
    let bio = doc.append(form, "textarea", &[("name", "bio")]).unwrap();
    let color = doc.append(form, "select", &[("name", "color")]).unwrap();
    let radio_a = doc
        .append(form, "input", &[("type", "radio"), ("name", "size"), ("value", "s")])
        .unwrap();
    let first = doc.append(form, "div", &[]).unwrap();
    let check_a = doc
        .append(first, "input", &[("type", "checkbox"), ("name", "tags"), ("value", "rust")])
        .unwrap();
    let second = doc.append(form, "div", &[]).unwrap();
    let check_b = doc
        .append(second, "input", &[("type", "checkbox"), ("name", "tags"), ("value", "go")])
        .unwrap();
    let button = doc.append(form, "button", &[("type", "submit")]).unwrap();

    MixedPage {
        doc,
        form,
        name,
        bio,
        color,
        radio_a,
        check_a,
        check_b,
        button,
    }
}
