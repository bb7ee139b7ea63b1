//! The `file://mcpreadme` resource: desktop readme file contents.
//!
//! Unlike the tools, this capability returns raw text, not a payload
//! object. Every failure is mapped to a descriptive string.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ToolConfig;

/// URI under which the readme resource is exposed.
pub const README_URI: &str = "file://mcpreadme";

/// Reads the readme at `path`, mapping every failure to a message.
///
/// Invalid UTF-8 triggers one re-read decoded as Latin-1. Latin-1
/// decoding itself is total (each byte maps to the code point of the
/// same value), so the fallback only fails if the re-read does.
pub async fn read_readme(path: &Path) -> String {
    if !path.exists() {
        return format!("Error: File not found at {}", path.display());
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return format!("Error: Permission denied accessing {}", path.display());
        }
        Err(e) => return format!("Error reading file: {e}"),
    };

    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            debug!(path = %path.display(), "not valid UTF-8, retrying as Latin-1");
            match tokio::fs::read(path).await {
                Ok(bytes) => bytes.iter().map(|&b| b as char).collect(),
                Err(e) => format!("Error reading file with different encoding: {e}"),
            }
        }
    }
}

/// The readable resource advertised over MCP.
pub struct ReadmeResource {
    path: PathBuf,
}

impl ReadmeResource {
    /// Creates the resource with the configured file path.
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            path: config.readme_path.clone(),
        }
    }

    /// Resource URI.
    pub fn uri(&self) -> &str {
        README_URI
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        "mcpreadme"
    }

    /// Human-readable description for the resource listing.
    pub fn description(&self) -> &str {
        "Contents of mcpreadme.MD from the desktop folder"
    }

    /// MIME type of the content.
    pub fn mime_type(&self) -> &str {
        "text/plain"
    }

    /// Reads the resource content (or a descriptive error string).
    pub async fn read(&self) -> String {
        read_readme(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop_readme(dir: &Path) -> PathBuf {
        let desktop = dir.join("Desktop");
        std::fs::create_dir_all(&desktop).expect("mkdir");
        desktop.join("mcpreadme.MD")
    }

    #[tokio::test]
    async fn existing_file_returned_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = desktop_readme(dir.path());
        std::fs::write(&path, "hi").expect("write");

        assert_eq!(read_readme(&path).await, "hi");
    }

    #[tokio::test]
    async fn missing_file_names_the_resolved_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Desktop").join("mcpreadme.MD");

        let message = read_readme(&path).await;
        assert!(message.starts_with("Error: File not found at "));
        assert!(message.contains("mcpreadme.MD"));
    }

    #[tokio::test]
    async fn invalid_utf8_decodes_as_latin1() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = desktop_readme(dir.path());
        // 0xE9 is 'é' in Latin-1 but not a valid UTF-8 sequence.
        std::fs::write(&path, [0x63, 0x61, 0x66, 0xE9]).expect("write");

        assert_eq!(read_readme(&path).await, "café");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn permission_denied_is_reported_with_path() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = desktop_readme(dir.path());
        std::fs::write(&path, "secret").expect("write");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).expect("chmod");

        let message = read_readme(&path).await;
        // Root bypasses mode bits; only assert when the OS enforced them.
        if message != "secret" {
            assert!(message.starts_with("Error: Permission denied accessing "));
        }
    }

    #[tokio::test]
    async fn resource_metadata_is_fixed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ToolConfig {
            readme_path: desktop_readme(dir.path()),
            ..ToolConfig::default()
        };
        let resource = ReadmeResource::new(&config);
        assert_eq!(resource.uri(), "file://mcpreadme");
        assert_eq!(resource.name(), "mcpreadme");
        assert_eq!(resource.mime_type(), "text/plain");
    }
}
