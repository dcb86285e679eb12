//! Host-neutral render instructions.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use crate::config::HostAttributes;
use crate::handlers::ElementHandlers;
use crate::tag::Tag;

pub const TAG_CLASS_NAME: &str = "tag-cloud-tag";

/// Render instruction for a single tag.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TagElement {
    pub key: String,
    pub text: String,
    pub class_name: String,
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    pub handlers: ElementHandlers,
}

/// The whole cloud, in display order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CloudView {
    pub container: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: HostAttributes,
    pub children: Vec<TagElement>,
}

/// Turns a tag, its font size in pixels and its colour into an element.
pub type TagRenderer = Rc<dyn Fn(&Tag, u32, Option<&str>) -> TagElement>;

pub fn default_tag_renderer() -> TagRenderer {
    Rc::new(default_renderer)
}

/// Inline-block element sized and coloured through inline style.
///
/// The tag's own `props` extend the class, override style entries and add
/// attributes.
pub fn default_renderer(tag: &Tag, size: u32, color: Option<&str>) -> TagElement {
    let mut style = BTreeMap::from([
        ("margin".to_string(), "0px 3px".to_string()),
        ("vertical-align".to_string(), "middle".to_string()),
        ("display".to_string(), "inline-block".to_string()),
        ("font-size".to_string(), format!("{size}px")),
    ]);
    if let Some(color) = color {
        style.insert("color".to_string(), color.to_string());
    }

    let mut class_name = TAG_CLASS_NAME.to_string();
    let mut attributes = BTreeMap::new();
    if let Some(props) = &tag.props {
        if let Some(extra) = props.class_name.as_deref().filter(|c| !c.is_empty()) {
            class_name.push(' ');
            class_name.push_str(extra);
        }
        style.extend(props.style.clone());
        attributes.extend(props.attributes.clone());
    }

    let key = if tag.key.is_empty() {
        tag.value.clone()
    } else {
        tag.key.clone()
    };

    TagElement {
        key,
        text: tag.value.clone(),
        class_name,
        style,
        attributes,
        handlers: ElementHandlers::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagProps;

    #[test]
    fn default_renderer_sets_size_and_color() {
        let element = default_renderer(&Tag::new("rust", 3.0), 18, Some("#336699"));

        assert_eq!(element.key, "rust");
        assert_eq!(element.text, "rust");
        assert_eq!(element.class_name, "tag-cloud-tag");
        assert_eq!(element.style["font-size"], "18px");
        assert_eq!(element.style["color"], "#336699");
        assert_eq!(element.style["display"], "inline-block");
    }

    #[test]
    fn default_renderer_omits_missing_color() {
        let element = default_renderer(&Tag::new("rust", 3.0), 18, None);
        assert!(!element.style.contains_key("color"));
    }

    #[test]
    fn default_renderer_prefers_explicit_key() {
        let element = default_renderer(&Tag::new("Rust", 3.0).with_key("lang-rust"), 12, None);
        assert_eq!(element.key, "lang-rust");
        assert_eq!(element.text, "Rust");
    }

    #[test]
    fn tag_props_extend_the_element() {
        let props = TagProps {
            class_name: Some("featured".to_string()),
            style: BTreeMap::from([("margin".to_string(), "0px".to_string())]),
            attributes: BTreeMap::from([("title".to_string(), "Rust".to_string())]),
        };
        let element = default_renderer(&Tag::new("rust", 3.0).with_props(props), 14, None);

        assert_eq!(element.class_name, "tag-cloud-tag featured");
        assert_eq!(element.style["margin"], "0px");
        assert_eq!(element.attributes["title"], "Rust");
    }

    #[test]
    fn element_serializes_without_empty_attributes() {
        let element = default_renderer(&Tag::new("go", 1.0), 12, None);
        let value = serde_json::to_value(&element).expect("serialize element");
        assert!(value.get("attributes").is_none());
        assert_eq!(value["handlers"], serde_json::json!([]));
        assert_eq!(value["style"]["font-size"], "12px");
    }
}
