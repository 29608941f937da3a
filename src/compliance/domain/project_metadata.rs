use serde::{Deserialize, Serialize};

/// Kind of a third-party source location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlType {
    Homepage,
    Archive,
    Git,
    Svn,
    Hg,
    Darcs,
    LocalSource,
    #[serde(other)]
    Other,
}

/// A typed source location for a project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectUrl {
    #[serde(rename = "type")]
    pub url_type: UrlType,
    pub value: String,
}

/// The third-party block of a project metadata record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThirdParty {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub url: Vec<ProjectUrl>,
}

/// ProjectMetadata value object - descriptive facts about one project directory
///
/// Unknown keys in the record are ignored; a key present with the wrong
/// value type fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub third_party: Option<ThirdParty>,
}

impl ProjectMetadata {
    /// Preference order for choosing a download location.
    const DOWNLOAD_PREFERENCE: [UrlType; 6] = [
        UrlType::Git,
        UrlType::Svn,
        UrlType::Hg,
        UrlType::Darcs,
        UrlType::Archive,
        UrlType::Homepage,
    ];

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    pub fn version(&self) -> Option<&str> {
        self.third_party.as_ref().and_then(|tp| tp.version.as_deref())
    }

    pub fn urls(&self, url_type: UrlType) -> impl Iterator<Item = &str> {
        self.third_party
            .iter()
            .flat_map(|tp| tp.url.iter())
            .filter(move |u| u.url_type == url_type)
            .map(|u| u.value.as_str())
    }

    /// The best source download location, if any URL is recorded.
    pub fn download_url(&self) -> Option<&str> {
        Self::DOWNLOAD_PREFERENCE
            .iter()
            .find_map(|t| self.urls(*t).next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ProjectMetadata {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_full_record() {
        let pm = parse(
            r#"
name: libfoo
description: A library
third_party:
  version: "1.2.3"
  url:
    - type: HOMEPAGE
      value: https://foo.example
    - type: GIT
      value: https://foo.example/foo.git
"#,
        );
        assert_eq!(pm.name(), Some("libfoo"));
        assert_eq!(pm.version(), Some("1.2.3"));
        assert_eq!(pm.download_url(), Some("https://foo.example/foo.git"));
        assert_eq!(pm.urls(UrlType::Homepage).count(), 1);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let pm = parse(
            r#"
name: libbar
license_note: something new
third_party:
  security: { tag: x }
"#,
        );
        assert_eq!(pm.name(), Some("libbar"));
        assert_eq!(pm.version(), None);
    }

    #[test]
    fn test_unknown_url_type_maps_to_other() {
        let pm = parse(
            r#"
third_party:
  url:
    - type: PIPER
      value: //depot/x
"#,
        );
        assert_eq!(pm.urls(UrlType::Other).next(), Some("//depot/x"));
        assert_eq!(pm.download_url(), None);
    }

    #[test]
    fn test_wrong_value_type_fails() {
        let result: Result<ProjectMetadata, _> = serde_yaml_ng::from_str("name: [1, 2]");
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_name_is_none() {
        let pm = parse("name: \"  \"");
        assert_eq!(pm.name(), None);
    }
}
