//! Page metadata and YAML front matter.
//!
//! Documents may start with a front matter block:
//!
//! ```text
//! ---
//! title: Getting Started
//! description: Install the toolchain and clone the repo.
//! order: 1
//! ---
//!
//! Body markdown...
//! ```
//!
//! Directory sidecar files (`meta.yaml`) use the same fields.

use serde::{Deserialize, Serialize};

/// Delimiter line that opens and closes a front matter block.
const FRONT_MATTER_DELIMITER: &str = "---";

/// Page metadata from front matter or a directory sidecar.
///
/// All fields are optional. Unknown keys are ignored so content written for
/// other tooling still parses.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Custom page title (overrides H1 extraction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sort key among siblings in navigation. Lower comes first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl Metadata {
    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.order.is_none()
    }

    /// Parse a standalone YAML document (sidecar file or front matter body).
    ///
    /// Blank input yields empty metadata.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Parse`] if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, MetadataError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| MetadataError::Parse(format!("Invalid YAML: {e}")))
    }
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
    /// Front matter opened with `---` but never closed.
    #[error("Front matter is not closed with '---'")]
    Unterminated,
}

/// Split a document into its front matter and markdown body.
///
/// Documents without a leading `---` line have empty metadata and the whole
/// text as body. A leading UTF-8 BOM is ignored.
///
/// # Errors
///
/// Returns [`MetadataError::Unterminated`] if the block is never closed and
/// [`MetadataError::Parse`] if the YAML inside it is invalid.
pub fn split_front_matter(text: &str) -> Result<(Metadata, &str), MetadataError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = strip_opening_delimiter(text) else {
        return Ok((Metadata::default(), text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let metadata = Metadata::from_yaml(&rest[..offset])?;
            return Ok((metadata, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(MetadataError::Unterminated)
}

/// Return the text after the opening delimiter line, if the text has one.
fn strip_opening_delimiter(text: &str) -> Option<&str> {
    let line_end = text.find('\n').map_or(text.len(), |i| i + 1);
    (text[..line_end].trim_end() == FRONT_MATTER_DELIMITER).then(|| &text[line_end..])
}
