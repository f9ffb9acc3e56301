//! HTML parsing helpers (spec §4.7 / C10): reusable primitives scraper
//! plugins compose to pull structured data out of a parsed DOM.

use std::collections::BTreeMap;

use campus_search_core::normalize::collapse_whitespace;
use scraper::ElementRef;

use crate::error::ParsingError;

/// Iterate every element under `container` whose tag equals `header_tag`;
/// for each, call `extract_body` and, if it returns a body node, record the
/// pair `(collapse_whitespace(header.text), body)`. Header text collisions
/// are an error — keys must be unique (spec §4.7).
pub fn parse_sections<'a, F>(
    container: ElementRef<'a>,
    header_tag: &str,
    mut extract_body: F,
) -> Result<BTreeMap<String, ElementRef<'a>>, ParsingError>
where
    F: FnMut(ElementRef<'a>) -> Option<ElementRef<'a>>,
{
    let mut sections = BTreeMap::new();
    for header in container.descendants().filter_map(ElementRef::wrap) {
        if header.value().name() != header_tag {
            continue;
        }
        let Some(body) = extract_body(header) else { continue };
        let key = collapse_whitespace(&header.text().collect::<String>());
        if sections.insert(key.clone(), body).is_some() {
            return Err(ParsingError::DuplicateHeader(key));
        }
    }
    Ok(sections)
}

/// Extract `node`'s text, asserting its tag (if given) and whether child
/// elements are permitted (spec §4.7).
pub fn get_text(
    node: Option<ElementRef<'_>>,
    expected_tag: Option<&str>,
    allow_children: bool,
) -> Result<String, ParsingError> {
    let node = node.ok_or(ParsingError::MissingElement)?;

    if let Some(expected) = expected_tag {
        if node.value().name() != expected {
            return Err(ParsingError::UnexpectedElementTag(expected.to_string()));
        }
    }

    if !allow_children && node.children().filter_map(ElementRef::wrap).next().is_some() {
        return Err(ParsingError::NodeHasChildren);
    }

    Ok(collapse_whitespace(&node.text().collect::<String>()))
}

/// Compose [`get_text`] with a `parser`; `parser` returning `None` becomes
/// [`ParsingError::UnparseableText`] naming `target_type` (spec §4.7).
pub fn parse_text<T>(
    node: Option<ElementRef<'_>>,
    expected_tag: Option<&str>,
    allow_children: bool,
    target_type: &str,
    parser: impl FnOnce(&str) -> Option<T>,
) -> Result<T, ParsingError> {
    let text = get_text(node, expected_tag, allow_children)?;
    parser(&text).ok_or_else(|| ParsingError::UnparseableText(target_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn parse_sections_collects_header_body_pairs() {
        let html = Html::parse_document(
            "<div id='root'><h2>Intro</h2><p>a</p><h2>Body</h2><p>b</p></div>",
        );
        let root = html.select(&Selector::parse("#root").unwrap()).next().unwrap();
        let sections = parse_sections(root, "h2", |h| {
            h.next_sibling_element().filter(|e| e.value().name() == "p")
        })
        .unwrap();
        assert_eq!(sections.len(), 2);
        assert!(sections.contains_key("Intro"));
        assert!(sections.contains_key("Body"));
    }

    #[test]
    fn parse_sections_rejects_duplicate_headers() {
        let html = Html::parse_document(
            "<div id='root'><h2>Dup</h2><p>a</p><h2>Dup</h2><p>b</p></div>",
        );
        let root = html.select(&Selector::parse("#root").unwrap()).next().unwrap();
        let err = parse_sections(root, "h2", |h| {
            h.next_sibling_element().filter(|e| e.value().name() == "p")
        })
        .unwrap_err();
        assert!(matches!(err, ParsingError::DuplicateHeader(_)));
    }

    #[test]
    fn get_text_rejects_wrong_tag() {
        let html = Html::parse_document("<div id='x'>hi</div>");
        let node = html.select(&Selector::parse("#x").unwrap()).next().unwrap();
        let err = get_text(Some(node), Some("span"), false).unwrap_err();
        assert!(matches!(err, ParsingError::UnexpectedElementTag(_)));
    }

    #[test]
    fn get_text_rejects_children_unless_allowed() {
        let html = Html::parse_document("<div id='x'><span>nested</span></div>");
        let node = html.select(&Selector::parse("#x").unwrap()).next().unwrap();
        assert!(matches!(
            get_text(Some(node), None, false).unwrap_err(),
            ParsingError::NodeHasChildren
        ));
        assert_eq!(get_text(Some(node), None, true).unwrap(), "nested");
    }

    #[test]
    fn get_text_collapses_whitespace() {
        let html = Html::parse_document("<div id='x'>  a\n  b   c  </div>");
        let node = html.select(&Selector::parse("#x").unwrap()).next().unwrap();
        assert_eq!(get_text(Some(node), None, false).unwrap(), "a b c");
    }

    #[test]
    fn parse_text_reports_unparseable() {
        let html = Html::parse_document("<div id='x'>not-a-number</div>");
        let node = html.select(&Selector::parse("#x").unwrap()).next().unwrap();
        let err =
            parse_text::<u32>(Some(node), None, false, "u32", |t| t.parse().ok()).unwrap_err();
        assert!(matches!(err, ParsingError::UnparseableText(_)));
    }

    #[test]
    fn missing_element_is_an_error() {
        assert!(matches!(get_text(None, None, false), Err(ParsingError::MissingElement)));
    }
}
