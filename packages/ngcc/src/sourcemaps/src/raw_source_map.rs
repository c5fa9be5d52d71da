// Raw Source Map
//
// Serde model of a version 3 source map.

use serde::{Deserialize, Serialize};

/// Raw source map (version 3), as serialized in `.map` files and data URIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    pub mappings: String,
}

impl RawSourceMap {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            version: 3,
            file: Some(file.into()),
            source_root: None,
            sources: Vec::new(),
            names: None,
            sources_content: None,
            mappings: String::new(),
        }
    }

    /// The content recorded for the `index`th source, if any.
    pub fn content_of_source(&self, index: usize) -> Option<&str> {
        self.sources_content
            .as_ref()
            .and_then(|contents| contents.get(index))
            .and_then(|content| content.as_deref())
    }
}
