//! Engine configuration
//!
//! Loaded from YAML; every section and field has a default, so an empty
//! document is a valid configuration:
//!
//! ```yaml
//! generator:
//!   max_nodes: 20
//! worker:
//!   timeout_ms: 5000
//! ```

use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Upper bound on generated node counts, also the `C` of the edge damping curve
pub const DEFAULT_MAX_NODES: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_nodes: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Cancel running algorithm jobs after this many milliseconds
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub worker: WorkerConfig,
}

impl EngineConfig {
    pub fn from_yaml_str(s: &str) -> GraphResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(s).map_err(|e| GraphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GraphError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.generator.max_nodes < 2 {
            return Err(GraphError::Config(format!(
                "generator.max_nodes must be at least 2, got {}",
                self.generator.max_nodes
            )));
        }
        if self.worker.timeout_ms == Some(0) {
            return Err(GraphError::Config("worker.timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.generator.max_nodes, DEFAULT_MAX_NODES);
        assert_eq!(config.worker.timeout_ms, None);
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_yaml_str("worker:\n  timeout_ms: 250\n").unwrap();
        assert_eq!(config.worker.timeout_ms, Some(250));
        assert_eq!(config.generator.max_nodes, DEFAULT_MAX_NODES);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EngineConfig::from_yaml_str("generator:\n  max_nodes: 1\n"),
            Err(GraphError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("generator: [1, 2]"),
            Err(GraphError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "generator:\n  max_nodes: 40").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.generator.max_nodes, 40);

        assert!(EngineConfig::from_file("/nonexistent/graphedit.yaml").is_err());
    }
}
