use chrono::Utc;
use uuid::Uuid;

/// SbomMetadata value object for documents this tool writes itself
/// (evidence-only and merged SBOMs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    serial_number: String,
}

impl SbomMetadata {
    /// Stamps a new document with the current time and a random serial number
    pub fn generate(tool_name: &str, tool_version: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            tool_name: tool_name.to_string(),
            tool_version: tool_version.to_string(),
            serial_number: format!("urn:uuid:{}", Uuid::new_v4()),
        }
    }

    /// Metadata naming this crate and its compile-time version
    pub fn for_this_tool() -> Self {
        Self::generate(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }
}
