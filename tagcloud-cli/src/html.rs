//! HTML fragment output for a rendered cloud.

use htmlize::{escape_attribute, escape_text};
use tagcloud::config::is_element_name;
use tagcloud::{CloudView, TagElement};
use tracing::warn;

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

fn push_attribute(html: &mut String, name: &str, value: &str) {
    if !is_attribute_name(name) {
        warn!(attribute = name, "skipping attribute with invalid name");
        return;
    }
    html.push(' ');
    html.push_str(name);
    html.push_str("=\"");
    html.push_str(&escape_attribute(value));
    html.push('"');
}

fn push_element(html: &mut String, element: &TagElement) {
    let style = element
        .style
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");

    html.push_str("  <span");
    push_attribute(html, "class", &element.class_name);
    push_attribute(html, "style", &style);
    push_attribute(html, "data-key", &element.key);
    for (name, value) in &element.attributes {
        push_attribute(html, name, value);
    }
    html.push('>');
    html.push_str(&escape_text(element.text.as_str()));
    html.push_str("</span>\n");
}

const FALLBACK_CONTAINER: &str = "div";

/// The view's container element with one `<span>` per tag, in display order.
pub fn render_view(view: &CloudView) -> String {
    let container = if is_element_name(&view.container) {
        view.container.as_str()
    } else {
        warn!(container = %view.container, "invalid container element, using div");
        FALLBACK_CONTAINER
    };

    let mut html = format!("<{container}");
    push_attribute(&mut html, "class", &view.class_name);
    for (name, value) in &view.attributes {
        push_attribute(&mut html, name, value);
    }
    html.push_str(">\n");
    for element in &view.children {
        push_element(&mut html, element);
    }
    html.push_str(&format!("</{container}>\n"));
    html
}
