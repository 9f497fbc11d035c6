//! Inbound deep-link parsing and outbound link generation.
//!
//! Accepted inbound forms:
//! - `/showroom/<section>[/<use-case-slug>]`
//! - `showroom://showroom/<section>[/<use-case-slug>]`
//! - any of the above with `?queryIndex=<section>&itemIndex=<slug>`; query
//!   values take precedence over path segments.
//!
//! Parsing never resolves names against a catalog; it only produces the
//! `DeepLinkParams` payload handed to the navigation path.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use showroom_types::{DeepLinkParams, Section};
use thiserror::Error;
use url::Url;

use crate::slug::slugify;

/// Route segment under which the showroom screen is mounted.
pub const SHOWROOM_ROUTE: &str = "showroom";
/// Custom URL scheme accepted for absolute links.
pub const SHOWROOM_SCHEME: &str = "showroom";

const RELATIVE_BASE: &str = "http://localhost/";

/// Characters escaped when writing a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Error surfaced when an inbound link cannot be turned into navigation params.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    #[error("deep link is empty")]
    Empty,
    #[error("deep link is not a valid URL: {0}")]
    InvalidUrl(String),
    #[error("deep link route '{0}' does not point at the showroom")]
    UnknownRoute(String),
    #[error("deep link has too many path segments: '{0}'")]
    TooManySegments(String),
    #[error("deep link segment '{0}' is not valid UTF-8 once decoded")]
    InvalidEncoding(String),
}

/// Parses an inbound link into navigation params.
///
/// A link that names the showroom route without a section yields empty params,
/// which the navigation path treats as "no navigation".
pub fn parse_deep_link(input: &str) -> Result<DeepLinkParams, DeepLinkError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DeepLinkError::Empty);
    }

    let url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(RELATIVE_BASE).and_then(|base| base.join(trimmed))
    }
    .map_err(|error| DeepLinkError::InvalidUrl(error.to_string()))?;

    let mut segments = url
        .path_segments()
        .map(|parts| parts.filter(|part| !part.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();

    // `showroom://showroom/...` carries the route in the host position.
    let route_in_host = url.scheme() == SHOWROOM_SCHEME && url.host_str().is_some_and(|host| host.eq_ignore_ascii_case(SHOWROOM_ROUTE));
    if !route_in_host && !segments.is_empty() {
        if !segments[0].eq_ignore_ascii_case(SHOWROOM_ROUTE) {
            return Err(DeepLinkError::UnknownRoute(url.path().to_string()));
        }
        segments.remove(0);
    }
    if segments.len() > 2 {
        return Err(DeepLinkError::TooManySegments(url.path().to_string()));
    }

    let mut params = DeepLinkParams {
        query_index: segments.first().map(|segment| decode_segment(segment)).transpose()?,
        item_index: segments.get(1).map(|segment| decode_segment(segment)).transpose()?,
    };

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "queryIndex" if !value.is_empty() => params.query_index = Some(value.into_owned()),
            "itemIndex" if !value.is_empty() => params.item_index = Some(value.into_owned()),
            _ => {}
        }
    }

    params.query_index = params.query_index.map(|section| section.to_lowercase());
    Ok(params)
}

/// Outbound link for a section header: `/showroom/<lower-cased name>`.
pub fn section_link(section_name: &str) -> String {
    let lowered = section_name.to_lowercase();
    format!("/{SHOWROOM_ROUTE}/{}", utf8_percent_encode(&lowered, SEGMENT))
}

/// Outbound link for a use case: `/showroom/<lower-cased section>/<slug>`.
pub fn use_case_link(section_name: &str, use_case_name: &str) -> String {
    format!("{}/{}", section_link(section_name), slugify(use_case_name))
}

/// Every outbound link for a section in rendered order: header first, then use cases.
pub fn section_links(section: &Section) -> Vec<String> {
    std::iter::once(section_link(&section.name))
        .chain(section.items.iter().map(|item| use_case_link(&section.name, &item.name)))
        .collect()
}

fn decode_segment(segment: &str) -> Result<String, DeepLinkError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DeepLinkError::InvalidEncoding(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_types::UseCase;

    #[test]
    fn parses_path_with_section_and_item() {
        let params = parse_deep_link("/showroom/Buttons/outline").unwrap();
        assert_eq!(params, DeepLinkParams::new("buttons", Some("outline")));
    }

    #[test]
    fn parses_section_only_path() {
        let params = parse_deep_link("/showroom/toggle/").unwrap();
        assert_eq!(params, DeepLinkParams::new("toggle", None));
    }

    #[test]
    fn parses_custom_scheme_links() {
        let params = parse_deep_link("showroom://showroom/text/presets").unwrap();
        assert_eq!(params, DeepLinkParams::new("text", Some("presets")));
    }

    #[test]
    fn query_parameters_override_path_segments() {
        let params = parse_deep_link("/showroom/card?queryIndex=Header&itemIndex=title").unwrap();
        assert_eq!(params, DeepLinkParams::new("header", Some("title")));

        let query_only = parse_deep_link("?itemIndex=solid").unwrap();
        assert_eq!(query_only.query_index, None);
        assert_eq!(query_only.item_index.as_deref(), Some("solid"));
    }

    #[test]
    fn bare_route_yields_empty_params() {
        assert!(parse_deep_link("/showroom").unwrap().is_empty());
    }

    #[test]
    fn decodes_percent_encoded_segments() {
        let params = parse_deep_link("/showroom/list%20item/leading-icon").unwrap();
        assert_eq!(params.query_index.as_deref(), Some("list item"));
    }

    #[test]
    fn rejects_malformed_links() {
        assert_eq!(parse_deep_link("   "), Err(DeepLinkError::Empty));
        assert!(matches!(parse_deep_link("/community/button"), Err(DeepLinkError::UnknownRoute(_))));
        assert!(matches!(parse_deep_link("/showroom/a/b/c"), Err(DeepLinkError::TooManySegments(_))));
        assert!(matches!(parse_deep_link("/showroom/%FF"), Err(DeepLinkError::InvalidEncoding(_))));
        assert!(matches!(parse_deep_link("http://[::1"), Err(DeepLinkError::InvalidUrl(_))));
    }

    #[test]
    fn outbound_links_round_trip_through_parser() {
        let section = Section::new(
            "List Item",
            "",
            vec![UseCase::new("Leading Icon"), UseCase::new("Custom (Right) Text")],
        );
        let links = section_links(&section);
        assert_eq!(
            links,
            vec![
                "/showroom/list%20item".to_string(),
                "/showroom/list%20item/leading-icon".to_string(),
                "/showroom/list%20item/custom-right-text".to_string(),
            ]
        );
        let params = parse_deep_link(&links[2]).unwrap();
        assert_eq!(params, DeepLinkParams::new("list item", Some("custom-right-text")));
    }
}
