use license_graph::prelude::*;
use std::collections::HashMap;

/// Mock LicenseTextReader serving texts from memory
#[derive(Default)]
pub struct MockLicenseTextReader {
    texts: HashMap<String, String>,
}

impl MockLicenseTextReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(path.to_string(), text.to_string());
        self
    }
}

impl LicenseTextReader for MockLicenseTextReader {
    fn read_license_text(&self, path: &str) -> Result<String> {
        match self.texts.get(path) {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("Mock license text not found: {}", path),
        }
    }
}
