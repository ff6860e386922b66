//! HTML overlay: content markup, reveal styles, menu and contact form UI

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::content::form::SUCCESS_MESSAGE;
use crate::content::reveal::SECTION_REVEAL_IDS;
use crate::content::{ContactForm, Content, RevealSet, Skill, TimelineEntry};
use crate::scene::SectionIndex;

const MENU_ENTRIES: [(&str, SectionIndex); 4] = [
    ("About", SectionIndex::HOME),
    ("Skills", SectionIndex::SKILLS),
    ("Projects", SectionIndex::PROJECTS),
    ("Contact", SectionIndex::CONTACT),
];

/// Create `<tag class=..>text</tag>`
fn el(document: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    if let Some(text) = text {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

fn section(document: &Document, index: SectionIndex) -> Result<Element, JsValue> {
    let element = el(document, "section", "section", None)?;
    element.set_id(&format!("section-{index}"));
    Ok(element)
}

fn about(document: &Document, content: &Content) -> Result<Element, JsValue> {
    let section = section(document, SectionIndex::HOME)?;
    let body = el(document, "div", "section-body", None)?;
    body.set_attribute("data-reveal", SECTION_REVEAL_IDS[SectionIndex::HOME.get()])?;

    let heading = el(document, "h1", "title", None)?;
    heading.append_child(&document.create_text_node("Hi, I'm"))?;
    heading.append_child(&document.create_element("br")?)?;
    heading.append_child(&el(document, "span", "owner", Some(&content.owner))?)?;
    body.append_child(&heading)?;

    let text = el(document, "p", "tagline", None)?;
    for (i, line) in content.tagline.iter().enumerate() {
        if i > 0 {
            text.append_child(&document.create_element("br")?)?;
        }
        text.append_child(&document.create_text_node(line))?;
    }
    text.set_attribute("data-reveal", "about-text")?;
    body.append_child(&text)?;

    let button = el(document, "button", "button", Some("Contact me"))?;
    button.set_id("contact-me");
    button.set_attribute("data-section", &SectionIndex::CONTACT.to_string())?;
    button.set_attribute("data-reveal", "about-button")?;
    body.append_child(&button)?;

    section.append_child(&body)?;
    Ok(section)
}

fn skill_rows(document: &Document, kind: &str, skills: &[Skill]) -> Result<Element, JsValue> {
    let list = el(document, "div", "skill-list", None)?;
    for (i, skill) in skills.iter().enumerate() {
        let row = el(document, "div", "skill", None)?;
        let title = el(document, "h3", "skill-title", Some(&skill.title))?;
        title.set_attribute("data-reveal", &format!("{kind}-title-{i}"))?;
        row.append_child(&title)?;
        let track = el(document, "div", "skill-track", None)?;
        let bar = el(document, "div", "skill-bar", None)?;
        bar.set_attribute("style", &format!("width: {}%", skill.level))?;
        bar.set_attribute("data-reveal", &format!("{kind}-{i}"))?;
        track.append_child(&bar)?;
        row.append_child(&track)?;
        list.append_child(&row)?;
    }
    Ok(list)
}

fn timeline(document: &Document, title: &str, entries: &[TimelineEntry]) -> Result<Element, JsValue> {
    let block = el(document, "div", "timeline", None)?;
    block.append_child(&el(document, "h2", "", Some(title))?)?;
    for entry in entries {
        let item = el(document, "div", "timeline-item", None)?;
        item.append_child(&el(document, "h3", "", Some(&entry.position))?)?;
        let org = el(document, "a", "organization", Some(&entry.organization))?;
        org.set_attribute("href", &entry.link)?;
        org.set_attribute("target", "_blank")?;
        item.append_child(&org)?;
        item.append_child(&el(document, "p", "time", Some(&format!("{} · {}", entry.time, entry.address)))?)?;
        if let Some(summary) = &entry.summary {
            item.append_child(&el(document, "p", "summary", Some(summary))?)?;
        }
        block.append_child(&item)?;
    }
    Ok(block)
}

fn skills(document: &Document, content: &Content) -> Result<Element, JsValue> {
    let section = section(document, SectionIndex::SKILLS)?;
    let body = el(document, "div", "section-body", None)?;
    body.set_attribute("data-reveal", SECTION_REVEAL_IDS[SectionIndex::SKILLS.get()])?;
    body.append_child(&el(document, "h2", "", Some("Skills"))?)?;
    body.append_child(&skill_rows(document, "skill", &content.skills)?)?;
    body.append_child(&el(document, "h2", "", Some("Databases"))?)?;
    body.append_child(&skill_rows(document, "database", &content.databases)?)?;
    body.append_child(&timeline(document, "Experience", &content.experience)?)?;
    body.append_child(&timeline(document, "Education", &content.education)?)?;
    section.append_child(&body)?;
    Ok(section)
}

fn projects(document: &Document) -> Result<Element, JsValue> {
    let section = section(document, SectionIndex::PROJECTS)?;
    let body = el(document, "div", "section-body", None)?;
    body.set_attribute("data-reveal", SECTION_REVEAL_IDS[SectionIndex::PROJECTS.get()])?;
    let controls = el(document, "div", "project-controls", None)?;
    let previous = el(document, "button", "button", Some("Previous"))?;
    previous.set_id("project-prev");
    let next = el(document, "button", "button", Some("Next"))?;
    next.set_id("project-next");
    controls.append_child(&previous)?;
    controls.append_child(&next)?;
    body.append_child(&controls)?;
    section.append_child(&body)?;
    Ok(section)
}

fn contact(document: &Document) -> Result<Element, JsValue> {
    let section = section(document, SectionIndex::CONTACT)?;
    let body = el(document, "div", "section-body", None)?;
    body.set_attribute("data-reveal", SECTION_REVEAL_IDS[SectionIndex::CONTACT.get()])?;
    body.append_child(&el(document, "h2", "", Some("Contact me"))?)?;

    let form = el(document, "form", "contact-form", None)?;
    form.set_id("contact-form");

    let name = el(document, "input", "", None)?;
    name.set_id("name");
    name.set_attribute("type", "text")?;
    name.set_attribute("placeholder", "Name")?;

    let email = el(document, "input", "", None)?;
    email.set_id("email");
    email.set_attribute("type", "email")?;
    email.set_attribute("placeholder", "Email")?;

    let email_errors = el(document, "p", "field-errors", None)?;
    email_errors.set_id("email-errors");

    let message = el(document, "textarea", "", None)?;
    message.set_id("message");
    message.set_attribute("placeholder", "Message")?;

    let form_errors = el(document, "p", "field-errors", None)?;
    form_errors.set_id("form-errors");

    let submit = el(document, "button", "button", Some("Submit"))?;
    submit.set_id("submit");
    submit.set_attribute("type", "submit")?;

    for child in [&name, &email, &email_errors, &message, &form_errors, &submit] {
        form.append_child(child)?;
    }
    body.append_child(&form)?;

    let success = el(document, "p", "form-success hidden", Some(SUCCESS_MESSAGE))?;
    success.set_id("form-success");
    body.append_child(&success)?;

    section.append_child(&body)?;
    Ok(section)
}

fn menu(document: &Document) -> Result<Element, JsValue> {
    let nav = el(document, "nav", "menu", None)?;
    nav.set_id("menu");
    for (label, section) in MENU_ENTRIES {
        let entry = el(document, "button", "menu-entry", Some(label))?;
        entry.set_attribute("data-section", &section.to_string())?;
        nav.append_child(&entry)?;
    }
    Ok(nav)
}

/// Fill the scroll container with one page per section and the interface
/// layer with the menu
pub fn build(document: &Document, content: &Content) -> Result<(), JsValue> {
    let scroller = document
        .get_element_by_id("scroll")
        .ok_or_else(|| JsValue::from_str("missing #scroll"))?;
    scroller.append_child(&about(document, content)?)?;
    scroller.append_child(&skills(document, content)?)?;
    scroller.append_child(&projects(document)?)?;
    scroller.append_child(&contact(document)?)?;

    if let Some(interface) = document.get_element_by_id("interface") {
        interface.append_child(&menu(document)?)?;
    }
    log::info!(
        "Content built ({} projects, {} skills)",
        content.projects.len(),
        content.skills.len()
    );
    Ok(())
}

/// Animated blocks of the overlay, keyed by their `data-reveal` id
pub struct Reveals {
    elements: Vec<HtmlElement>,
    set: RevealSet,
}

impl Reveals {
    pub fn collect(document: &Document) -> Self {
        let mut reveals = Self {
            elements: Vec::new(),
            set: RevealSet::new(),
        };
        let Ok(nodes) = document.query_selector_all("[data-reveal]") else {
            return reveals;
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            let Some(id) = element.get_attribute("data-reveal") else {
                continue;
            };
            if reveals.set.insert(&id).is_none() {
                log::warn!("Unknown or duplicate reveal block {id}");
                continue;
            }
            reveals.elements.push(element);
        }
        reveals.apply(0.0);
        reveals
    }

    /// Start the blocks that just entered the viewport, children included
    pub fn trigger<I, S>(&mut self, ids: I, now: f64)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.set.trigger(id.as_ref(), now);
        }
    }

    /// Write the current sample of every block. With `instant` triggered
    /// blocks skip straight to their resting state.
    pub fn apply_with(&self, now: f64, instant: bool) {
        for (element, block) in self.elements.iter().zip(self.set.blocks()) {
            let sample = if instant {
                block.settled()
            } else {
                block.sample(now)
            };
            let style = element.style();
            let _ = style.set_property("opacity", &format!("{:.3}", sample.opacity));
            let _ = style.set_property(
                "transform",
                &format!("translateY({:.2}px) scaleX({:.3})", sample.offset_y, sample.scale_x),
            );
        }
    }

    pub fn apply(&self, now: f64) {
        self.apply_with(now, false);
    }
}

/// Open/close the menu overlay
pub fn set_menu_open(document: &Document, opened: bool) {
    if let Some(body) = document.body() {
        let _ = body.class_list().toggle_with_force("menu-open", opened);
    }
}

/// Highlight the menu entry of the current section
pub fn set_section(document: &Document, section: SectionIndex) {
    let Ok(entries) = document.query_selector_all(".menu-entry") else {
        return;
    };
    let current = section.to_string();
    for i in 0..entries.length() {
        if let Some(entry) = entries.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let active = entry.get_attribute("data-section").as_deref() == Some(current.as_str());
            let _ = entry.class_list().toggle_with_force("active", active);
        }
    }
}

/// Copy the input values into the form state
pub fn read_form(document: &Document, form: &mut ContactForm) {
    if let Some(input) = document
        .get_element_by_id("name")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    {
        form.name = input.value();
    }
    if let Some(input) = document
        .get_element_by_id("email")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    {
        form.email = input.value();
    }
    if let Some(input) = document
        .get_element_by_id("message")
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
    {
        form.message = input.value();
    }
}

/// Reflect status and errors of the form
pub fn render_form(document: &Document, form: &ContactForm) {
    if let Some(el) = document.get_element_by_id("email-errors") {
        el.set_text_content(Some(&form.email_messages().join("\n")));
    }
    if let Some(el) = document.get_element_by_id("form-errors") {
        el.set_text_content(Some(&form.messages_for(None, None).join("\n")));
    }
    if let Some(el) = document.get_element_by_id("submit") {
        if form.is_submitting() {
            let _ = el.set_attribute("disabled", "");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }
    // Success replaces the form
    if form.succeeded() {
        if let Some(el) = document.get_element_by_id("contact-form") {
            let _ = el.class_list().add_1("hidden");
        }
        if let Some(el) = document.get_element_by_id("form-success") {
            let _ = el.class_list().remove_1("hidden");
        }
    }
}

pub fn set_fps(document: &Document, fps: u32, visible: bool) {
    if let Some(el) = document.get_element_by_id("fps") {
        el.set_text_content(Some(&format!("{fps} fps")));
        let _ = el.class_list().toggle_with_force("hidden", !visible);
    }
}
