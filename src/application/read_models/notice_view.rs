use crate::compliance::services::NoticeIndex;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The license texts that apply to one install path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPathView {
    pub path: String,
    pub hashes: Vec<String>,
}

/// One library sharing a license text, and where it is installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryView {
    pub name: String,
    pub install_paths: Vec<String>,
}

/// One distinct license text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseTextView {
    pub hash: String,
    pub libraries: Vec<LibraryView>,
    pub text: String,
}

/// View of a [`NoticeIndex`] for notice documents
///
/// Both directions of the index are carried: install path to hashes, and
/// hash to libraries and text. Entries keep the index's sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub product: Option<String>,
    pub created: DateTime<Utc>,
    pub install_paths: Vec<InstallPathView>,
    pub texts: Vec<LicenseTextView>,
}

impl NoticeView {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn from_index(index: &NoticeIndex, product: Option<String>, created: DateTime<Utc>) -> Self {
        let install_paths = index
            .install_paths()
            .map(|path| InstallPathView {
                path: path.to_string(),
                hashes: index.hashes_for(path).into_iter().map(String::from).collect(),
            })
            .collect();

        let texts = index
            .hashes()
            .map(|hash| LicenseTextView {
                hash: hash.to_string(),
                libraries: index
                    .libraries(hash)
                    .into_iter()
                    .map(|name| LibraryView {
                        name: name.to_string(),
                        install_paths: index
                            .install_paths_for(hash, name)
                            .into_iter()
                            .map(String::from)
                            .collect(),
                    })
                    .collect(),
                text: index.text(hash).unwrap_or_default().to_string(),
            })
            .collect();

        Self {
            product,
            created,
            install_paths,
            texts,
        }
    }
}
