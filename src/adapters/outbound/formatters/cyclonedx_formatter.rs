use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::SbomMetadata;
use crate::shared::Result;
use serde::Serialize;

/// CycloneDX specification version of documents written here
const SPEC_VERSION: &str = "1.6";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Bom {
    bom_format: &'static str,
    spec_version: &'static str,
    serial_number: String,
    version: u32,
    metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Tools,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<MetadataComponent>,
}

#[derive(Debug, Serialize)]
struct Tools {
    components: Vec<ToolComponent>,
}

#[derive(Debug, Serialize)]
struct ToolComponent {
    #[serde(rename = "type")]
    component_type: &'static str,
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct MetadataComponent {
    #[serde(rename = "type")]
    component_type: &'static str,
    name: String,
    evidence: Evidence,
}

#[derive(Debug, Serialize)]
struct Evidence {
    occurrences: Vec<Occurrence>,
}

#[derive(Debug, Serialize)]
struct Occurrence {
    location: String,
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.6 JSON
///
/// This adapter implements the SbomFormatter port.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }

    fn bom(
        metadata: &SbomMetadata,
        component: Option<MetadataComponent>,
        components: Option<Vec<serde_json::Value>>,
    ) -> Bom {
        Bom {
            bom_format: "CycloneDX",
            spec_version: SPEC_VERSION,
            serial_number: metadata.serial_number().to_string(),
            version: 1,
            metadata: Metadata {
                timestamp: metadata.timestamp().to_string(),
                tools: Tools {
                    components: vec![ToolComponent {
                        component_type: "application",
                        name: metadata.tool_name().to_string(),
                        version: metadata.tool_version().to_string(),
                    }],
                },
                component,
            },
            components,
        }
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format_evidence_only(
        &self,
        project_name: &str,
        locations: &[String],
        metadata: &SbomMetadata,
    ) -> Result<String> {
        let component = MetadataComponent {
            component_type: "application",
            name: project_name.to_string(),
            evidence: Evidence {
                occurrences: locations
                    .iter()
                    .map(|location| Occurrence {
                        location: location.clone(),
                    })
                    .collect(),
            },
        };

        serde_json::to_string_pretty(&Self::bom(metadata, Some(component), None))
            .map_err(Into::into)
    }

    fn format_merged(
        &self,
        components: Vec<serde_json::Value>,
        metadata: &SbomMetadata,
    ) -> Result<String> {
        serde_json::to_string_pretty(&Self::bom(metadata, None, Some(components)))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn metadata() -> SbomMetadata {
        SbomMetadata::generate("env-sbom", "0.4.0")
    }

    #[test]
    fn test_evidence_only_document() {
        let output = CycloneDxFormatter::new()
            .format_evidence_only(
                "infra",
                &["main.tf".to_string(), "k8s/Chart.yaml".to_string()],
                &metadata(),
            )
            .unwrap();
        let doc: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(doc["bomFormat"], "CycloneDX");
        assert_eq!(doc["specVersion"], "1.6");
        assert_eq!(doc["metadata"]["component"]["type"], "application");
        assert_eq!(doc["metadata"]["component"]["name"], "infra");
        assert_eq!(
            doc["metadata"]["component"]["evidence"]["occurrences"][1]["location"],
            "k8s/Chart.yaml"
        );
        assert!(doc.get("components").is_none());
        assert_eq!(doc["metadata"]["tools"]["components"][0]["name"], "env-sbom");
    }

    #[test]
    fn test_merged_document_keeps_components_verbatim() {
        let components = vec![
            json!({"type": "library", "name": "a", "version": "1"}),
            json!({"type": "library", "name": "a", "version": "1"}),
        ];
        let output = CycloneDxFormatter::new()
            .format_merged(components.clone(), &metadata())
            .unwrap();
        let doc: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(doc["components"], Value::Array(components));
        assert!(doc["serialNumber"].as_str().unwrap().starts_with("urn:uuid:"));
        assert!(doc["metadata"].get("component").is_none());
    }
}
