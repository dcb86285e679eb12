use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Optional presentation extras carried by a single tag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// A weighted, labelled item of the cloud.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub key: String,
    pub value: String,
    pub count: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<TagProps>,
}

impl Tag {
    pub fn new(value: impl Into<String>, count: f64) -> Self {
        Self {
            key: String::new(),
            value: value.into(),
            count,
            color: None,
            props: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_props(mut self, props: TagProps) -> Self {
        self.props = Some(props);
        self
    }

    /// Identity string built from `key`, `value` and `count`.
    ///
    /// Not collision-proof: `("ab", "c", 1)` and `("a", "bc", 1)` hash alike.
    /// It only has to be stable for change detection and per-tag seeding.
    pub fn hash_code(&self) -> String {
        format!("{}{}{}", self.key, self.value, self.count)
    }
}

/// Composite fingerprint of a whole tag list, in list order.
pub fn fingerprint(tags: &[Tag]) -> String {
    tags.iter()
        .map(Tag::hash_code)
        .collect::<Vec<_>>()
        .join(":")
}

/// Smallest and largest weight in `tags`, or `None` for an empty list.
pub fn count_bounds<'a, I>(tags: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a Tag>,
{
    tags.into_iter().fold(None, |bounds, tag| match bounds {
        None => Some((tag.count, tag.count)),
        Some((min, max)) => Some((min.min(tag.count), max.max(tag.count))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_code_concatenates_fields() {
        let tag = Tag::new("rust", 25.0).with_key("lang");
        assert_eq!(tag.hash_code(), "langrust25");
    }

    #[test]
    fn hash_code_keeps_fractional_counts() {
        let tag = Tag::new("half", 2.5);
        assert_eq!(tag.hash_code(), "half2.5");
    }

    #[test]
    fn hash_code_ignores_color() {
        let plain = Tag::new("rust", 3.0);
        let colored = Tag::new("rust", 3.0).with_color("#ff0000");
        assert_eq!(plain.hash_code(), colored.hash_code());
    }

    #[test]
    fn fingerprint_joins_hashes_in_order() {
        let tags = vec![Tag::new("a", 1.0), Tag::new("b", 2.0)];
        assert_eq!(fingerprint(&tags), "a1:b2");

        let reversed = vec![Tag::new("b", 2.0), Tag::new("a", 1.0)];
        assert_ne!(fingerprint(&tags), fingerprint(&reversed));
    }

    #[test]
    fn fingerprint_of_empty_list_is_empty() {
        assert_eq!(fingerprint(&[]), "");
    }

    #[test]
    fn count_bounds_tracks_min_and_max() {
        let tags = vec![
            Tag::new("a", 12.0),
            Tag::new("b", 3.0),
            Tag::new("c", 40.0),
        ];
        assert_eq!(count_bounds(&tags), Some((3.0, 40.0)));
        let empty: Vec<Tag> = Vec::new();
        assert_eq!(count_bounds(&empty), None);
    }

    #[test]
    fn tag_deserializes_without_optional_fields() {
        let tag: Tag = serde_json::from_str(r#"{"value":"go","count":7}"#).expect("parse tag");
        assert_eq!(tag.key, "");
        assert_eq!(tag.value, "go");
        assert_eq!(tag.count, 7.0);
        assert!(tag.color.is_none());
        assert!(tag.props.is_none());
    }

    #[test]
    fn tag_serializes_without_absent_fields() {
        let json = serde_json::to_string(&Tag::new("go", 7.0)).expect("serialize tag");
        assert_eq!(json, r#"{"key":"","value":"go","count":7.0}"#);
    }
}
