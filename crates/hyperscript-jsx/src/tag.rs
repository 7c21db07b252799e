//! Tag descriptor parsing.
//!
//! Hyperscript accepts a compact selector-like tag string such as
//! `"li#item.active.large"`. This module splits it into the element tag, the
//! id and the space-joined class list.

use smol_str::SmolStr;

/// The tag used when a descriptor starts with `#` or `.`.
pub const DEFAULT_TAG: &str = "div";

const SEGMENT_MARKERS: &[char] = &['#', '.'];

/// A parsed `tag#id.class` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescriptor {
    /// The element tag.
    pub tag: SmolStr,
    /// The id, if the descriptor has a `#` segment.
    pub id: Option<SmolStr>,
    /// All `.` segments joined with spaces, in encounter order.
    pub class_name: Option<String>,
}

impl TagDescriptor {
    /// Parses a tag descriptor.
    ///
    /// Never fails: the tag is the run of characters before the first `#` or
    /// `.`, defaulting to [`DEFAULT_TAG`]. When several `#` segments appear,
    /// the last one wins. Empty segments are ignored.
    pub fn parse(descriptor: &str) -> Self {
        let split = descriptor
            .find(SEGMENT_MARKERS)
            .unwrap_or(descriptor.len());
        let (head, mut rest) = descriptor.split_at(split);

        let tag = if head.is_empty() {
            SmolStr::new_static(DEFAULT_TAG)
        } else {
            SmolStr::new(head)
        };

        let mut id = None;
        let mut classes: Vec<&str> = Vec::new();

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(SEGMENT_MARKERS).unwrap_or(body.len());
            let segment = &body[..end];
            if !segment.is_empty() {
                if marker == '#' {
                    id = Some(SmolStr::new(segment));
                } else {
                    classes.push(segment);
                }
            }
            rest = &body[end..];
        }

        let class_name = if classes.is_empty() {
            None
        } else {
            Some(classes.join(" "))
        };

        Self {
            tag,
            id,
            class_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_descriptor() {
        let parsed = TagDescriptor::parse("tag#id.c1.c2");
        assert_eq!(parsed.tag, "tag");
        assert_eq!(parsed.id.as_deref(), Some("id"));
        assert_eq!(parsed.class_name.as_deref(), Some("c1 c2"));
    }

    #[test]
    fn test_plain_tag() {
        let parsed = TagDescriptor::parse("div");
        assert_eq!(
            parsed,
            TagDescriptor {
                tag: "div".into(),
                id: None,
                class_name: None,
            }
        );
    }

    #[test]
    fn test_defaults_to_div() {
        let parsed = TagDescriptor::parse(".class");
        assert_eq!(parsed.tag, "div");
        assert_eq!(parsed.class_name.as_deref(), Some("class"));

        let parsed = TagDescriptor::parse("#main");
        assert_eq!(parsed.tag, "div");
        assert_eq!(parsed.id.as_deref(), Some("main"));
    }

    #[test]
    fn test_interleaved_segments() {
        let parsed = TagDescriptor::parse("a.one#link.two");
        assert_eq!(parsed.tag, "a");
        assert_eq!(parsed.id.as_deref(), Some("link"));
        assert_eq!(parsed.class_name.as_deref(), Some("one two"));
    }

    #[test]
    fn test_last_id_wins() {
        let parsed = TagDescriptor::parse("p#first#second");
        assert_eq!(parsed.id.as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_segments_ignored() {
        let parsed = TagDescriptor::parse("span..a.#");
        assert_eq!(parsed.tag, "span");
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.class_name.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_string() {
        let parsed = TagDescriptor::parse("");
        assert_eq!(parsed.tag, "div");
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.class_name, None);
    }

    #[test]
    fn test_non_grammar_input_is_best_effort() {
        let parsed = TagDescriptor::parse("my element.x y");
        assert_eq!(parsed.tag, "my element");
        assert_eq!(parsed.class_name.as_deref(), Some("x y"));
    }
}
