use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A single named demo inside a catalog section.
///
/// The position of a use case inside its section determines its structural
/// index; see [`StructuralAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    /// Display name, unique within the owning section (e.g., "Outline").
    pub name: String,
    /// Body text rendered underneath the name in the section list.
    #[serde(default)]
    pub description: String,
}

impl UseCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A catalog section: a named group of use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Display name, unique (case-sensitive) across the catalog.
    pub name: String,
    /// Short summary rendered under the section header.
    #[serde(default)]
    pub description: String,
    /// Ordered use cases.
    #[serde(default, alias = "useCases", alias = "data")]
    pub items: Vec<UseCase>,
}

impl Section {
    pub fn new(name: impl Into<String>, description: impl Into<String>, items: Vec<UseCase>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            items,
        }
    }

    /// Number of rendered items for this section: the header plus each use case.
    pub fn rendered_len(&self) -> usize {
        self.items.len() + 1
    }
}

/// An address expressed with human-readable names, usually parsed from a deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAddress {
    pub section_name: String,
    /// `None` addresses the section header.
    pub use_case_name: Option<String>,
}

/// A structural position inside the catalog.
///
/// `item_index == 0` is the section header, `item_index == k` is the k-th
/// use case (1-based) of the section's rendered sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralAddress {
    pub section_index: usize,
    pub item_index: usize,
}

impl StructuralAddress {
    pub const fn new(section_index: usize, item_index: usize) -> Self {
        Self {
            section_index,
            item_index,
        }
    }

    /// Address of a section header.
    pub const fn header(section_index: usize) -> Self {
        Self::new(section_index, 0)
    }

    pub const fn is_header(&self) -> bool {
        self.item_index == 0
    }
}

impl fmt::Display for StructuralAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section_index, self.item_index)
    }
}

/// Payload of an external navigation event.
///
/// `query_index` names a section, `item_index` holds a slugified use case
/// name. Both absent means "do not navigate".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLinkParams {
    pub query_index: Option<String>,
    pub item_index: Option<String>,
}

impl DeepLinkParams {
    pub fn new(query_index: impl Into<String>, item_index: Option<&str>) -> Self {
        Self {
            query_index: Some(query_index.into()),
            item_index: item_index.map(str::to_string),
        }
    }

    /// Returns true when neither field carries a value.
    pub fn is_empty(&self) -> bool {
        self.query_index.is_none() && self.item_index.is_none()
    }
}

/// Reported by a virtualized list when a scroll target has not been measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollFailure {
    /// Flattened frame index of the requested target.
    pub index: usize,
    /// Highest frame index measured so far; `None` before the first layout pass.
    pub highest_measured_frame_index: Option<usize>,
    /// Mean height, in rows, of the measured frames.
    pub average_item_length: f32,
}

/// Section selection on the TV-class platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// The card grid is shown.
    #[default]
    None,
    /// The detail list for a single section is shown.
    Selected(usize),
}

impl SelectionState {
    pub const fn selected_index(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Selected(index) => Some(*index),
        }
    }

    pub const fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

/// Host platform class; decides the screen layout and the menu renderer.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Touch handset: drawer menu + section list, menu taps scroll directly.
    #[default]
    Handset,
    /// Browser: drawer menu + section list, menu entries are links.
    Web,
    /// TV-class device: card grid + focus-driven detail view.
    Tv,
}

impl Platform {
    pub const fn is_tv(&self) -> bool {
        matches!(self, Self::Tv)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Handset => "handset",
            Self::Web => "web",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "handset" | "native" | "mobile" => Ok(Self::Handset),
            "web" => Ok(Self::Web),
            "tv" => Ok(Self::Tv),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlatformError(String);

impl fmt::Display for ParsePlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid platform '{}'; expected 'handset', 'web' or 'tv'", self.0)
    }
}

impl Error for ParsePlatformError {}

/// Messages that re-enter the runtime's event path.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Periodic UI tick (animated scrolling)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// External navigation event (deep link)
    Navigate(DeepLinkParams),
    /// Deferred scroll retry; `ticket` identifies the scheduling that produced it
    RetryScroll { address: StructuralAddress, ticket: u64 },
}

/// Side effects requested by components and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Route a deep link through the navigation path
    Navigate(DeepLinkParams),
    /// Open the deep-link prompt
    OpenLinkPrompt,
    /// Close the deep-link prompt without navigating
    CloseLinkPrompt,
    /// Default back navigation: leave the application
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_deserializes_from_registration_yaml() {
        let yaml = r#"
name: Button
description: Buttons and their presets
items:
  - name: Presets
    description: There are a few presets pre-configured.
  - name: Disabling
"#;
        let section: Section = serde_yaml::from_str(yaml).expect("deserialize Section");
        assert_eq!(section.name, "Button");
        assert_eq!(section.items.len(), 2);
        assert_eq!(section.items[1].name, "Disabling");
        assert!(section.items[1].description.is_empty());
        assert_eq!(section.rendered_len(), 3);
    }

    #[test]
    fn section_accepts_use_cases_alias() {
        let json = r#"{ "name": "Toggle", "useCases": [{ "name": "Switch" }] }"#;
        let section: Section = serde_json::from_str(json).expect("deserialize Section");
        assert_eq!(section.items, vec![UseCase::new("Switch")]);
        assert!(section.description.is_empty());
    }

    #[test]
    fn deep_link_params_use_camel_case_keys() {
        let params: DeepLinkParams = serde_json::from_str(r#"{ "queryIndex": "button", "itemIndex": "presets" }"#).unwrap();
        assert_eq!(params, DeepLinkParams::new("button", Some("presets")));
        assert!(DeepLinkParams::default().is_empty());
    }

    #[test]
    fn platform_parses_known_names() {
        assert_eq!("TV".parse::<Platform>(), Ok(Platform::Tv));
        assert_eq!(" web ".parse::<Platform>(), Ok(Platform::Web));
        assert_eq!("native".parse::<Platform>(), Ok(Platform::Handset));
        let error = "watch".parse::<Platform>().unwrap_err();
        assert!(error.to_string().contains("watch"));
    }

    #[test]
    fn selection_state_reports_index() {
        assert_eq!(SelectionState::default(), SelectionState::None);
        assert_eq!(SelectionState::Selected(3).selected_index(), Some(3));
        assert!(!SelectionState::None.is_selected());
    }
}
