//! # Configuration Management
//!
//! Centralized configuration for the attachment codec.
//!
//! The codec itself is pure; configuration only governs the policy knobs and
//! the resource limits enforced at the trust boundary (parsing envelopes and
//! buffering inbound binary frames).
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Security Considerations
//! - The declared attachment count is validated against `max_attachments`
//!   before any buffer is sized from it
//! - Each binary frame is validated against `max_attachment_size` before it
//!   is appended to an in-flight packet

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Max attachments a single packet may declare (guards buffer pre-allocation)
pub const DEFAULT_MAX_ATTACHMENTS: usize = 256;

/// Max size of a single binary frame (e.g. 16 MB)
pub const DEFAULT_MAX_ATTACHMENT_SIZE: usize = 16 * 1024 * 1024;

/// Policy for attachments that were delivered but never referenced by a
/// placeholder during reconstruction.
///
/// Unreferenced attachments indicate a framing desynchronization between the
/// sender's numbering and the receiver's collection, so the default treats
/// them as fatal to the packet. `Lenient` tolerates them with a warning for
/// deployments that would rather drop data than drop packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnusedAttachmentsPolicy {
    /// Fail reconstruction with `CodecError::UnusedAttachments` (default).
    #[default]
    Strict,
    /// Log a warning and return the reconstructed value anyway.
    Lenient,
}

/// Codec configuration: reconstruction policy plus inbound resource limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodecConfig {
    /// How the decoder treats attachments no placeholder referenced
    #[serde(default)]
    pub unused_attachments: UnusedAttachmentsPolicy,

    /// Upper bound on the attachment count an envelope may declare
    #[serde(default = "default_max_attachments")]
    pub max_attachments: usize,

    /// Upper bound on a single binary frame's size in bytes
    #[serde(default = "default_max_attachment_size")]
    pub max_attachment_size: usize,
}

fn default_max_attachments() -> usize {
    DEFAULT_MAX_ATTACHMENTS
}

fn default_max_attachment_size() -> usize {
    DEFAULT_MAX_ATTACHMENT_SIZE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            unused_attachments: UnusedAttachmentsPolicy::default(),
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
            max_attachment_size: DEFAULT_MAX_ATTACHMENT_SIZE,
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| CodecError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CodecError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(policy) = std::env::var("ATTACHMENT_CODEC_UNUSED_POLICY") {
            config.unused_attachments = match policy.to_ascii_lowercase().as_str() {
                "strict" => UnusedAttachmentsPolicy::Strict,
                "lenient" => UnusedAttachmentsPolicy::Lenient,
                other => {
                    return Err(CodecError::ConfigError(format!(
                        "Unknown unused-attachments policy: {other}"
                    )))
                }
            };
        }

        if let Ok(max) = std::env::var("ATTACHMENT_CODEC_MAX_ATTACHMENTS") {
            if let Ok(val) = max.parse::<usize>() {
                config.max_attachments = val;
            }
        }

        if let Ok(max) = std::env::var("ATTACHMENT_CODEC_MAX_ATTACHMENT_SIZE") {
            if let Ok(val) = max.parse::<usize>() {
                config.max_attachment_size = val;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate limits; zero caps would make every packet undeliverable.
    pub fn validate(&self) -> Result<()> {
        if self.max_attachments == 0 {
            return Err(CodecError::ConfigError(
                "max_attachments must be at least 1".to_string(),
            ));
        }
        if self.max_attachment_size == 0 {
            return Err(CodecError::ConfigError(
                "max_attachment_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let config = CodecConfig::default();
        assert_eq!(
            config.unused_attachments,
            UnusedAttachmentsPolicy::Strict
        );
        assert_eq!(config.max_attachments, DEFAULT_MAX_ATTACHMENTS);
        assert_eq!(config.max_attachment_size, DEFAULT_MAX_ATTACHMENT_SIZE);
    }

    #[test]
    fn parses_toml_overrides() {
        let config = CodecConfig::from_toml(
            r#"
            unused_attachments = "lenient"
            max_attachments = 8
            "#,
        )
        .expect("valid TOML");

        assert_eq!(
            config.unused_attachments,
            UnusedAttachmentsPolicy::Lenient
        );
        assert_eq!(config.max_attachments, 8);
        // Unspecified fields keep their defaults
        assert_eq!(config.max_attachment_size, DEFAULT_MAX_ATTACHMENT_SIZE);
    }

    #[test]
    fn rejects_zero_limits() {
        let result = CodecConfig::from_toml("max_attachments = 0");
        assert!(matches!(result, Err(CodecError::ConfigError(_))));
    }

    #[test]
    fn rejects_unknown_policy_string() {
        let result = CodecConfig::from_toml(r#"unused_attachments = "whatever""#);
        assert!(matches!(result, Err(CodecError::ConfigError(_))));
    }
}
