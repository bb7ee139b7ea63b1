//! MCP resources/* method types.

use serde::{Deserialize, Serialize};

/// Request params for `resources/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesReadParams {
    /// URI of the resource to read.
    pub uri: String,
}

/// A resource definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResourceDefinition {
    /// Resource URI.
    pub uri: String,
    /// Resource name.
    pub name: String,
    /// Resource description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type.
    #[serde(default, rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Response for `resources/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesListResult {
    /// Available resources.
    pub resources: Vec<McpResourceDefinition>,
}

/// One content item in a `resources/read` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContents {
    /// URI of the resource this content belongs to.
    pub uri: String,
    /// MIME type of the content.
    #[serde(default, rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Text content.
    pub text: String,
}

/// Response for `resources/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesReadResult {
    /// Content items for the requested resource.
    pub contents: Vec<ResourceContents>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_read_params_serde() {
        let p = ResourcesReadParams {
            uri: "file://mcpreadme".into(),
        };
        let s = serde_json::to_string(&p).expect("ser");
        let back: ResourcesReadParams = serde_json::from_str(&s).expect("de");
        assert_eq!(back.uri, "file://mcpreadme");
    }

    #[test]
    fn resource_definition_camel_cases_mime_type() {
        let def = McpResourceDefinition {
            uri: "file://mcpreadme".into(),
            name: "mcpreadme".into(),
            description: Some("Desktop readme".into()),
            mime_type: Some("text/plain".into()),
        };
        let s = serde_json::to_string(&def).expect("ser");
        assert!(s.contains("mimeType"));
        let back: McpResourceDefinition = serde_json::from_str(&s).expect("de");
        assert_eq!(back.mime_type, Some("text/plain".into()));
    }

    #[test]
    fn read_result_roundtrip() {
        let r = ResourcesReadResult {
            contents: vec![ResourceContents {
                uri: "file://mcpreadme".into(),
                mime_type: Some("text/plain".into()),
                text: "hello".into(),
            }],
        };
        let s = serde_json::to_string(&r).expect("ser");
        let back: ResourcesReadResult = serde_json::from_str(&s).expect("de");
        assert_eq!(back.contents.len(), 1);
        assert_eq!(back.contents[0].text, "hello");
    }

    #[test]
    fn optional_fields_skipped_when_absent() {
        let def = McpResourceDefinition {
            uri: "x".into(),
            name: "r".into(),
            description: None,
            mime_type: None,
        };
        let s = serde_json::to_string(&def).expect("ser");
        assert!(!s.contains("description"));
        assert!(!s.contains("mimeType"));
    }
}
