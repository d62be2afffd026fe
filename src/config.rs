//! TOML configuration loading for facade construction, gated behind the
//! `config-toml` feature. Mirrors the reference host's `PrinterConfig::load`
//! shape, adapted to `serde` + `toml` since this is a plain library rather
//! than an INI-compatible host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::problem::{LimitProfile, SolverParameters};
use crate::types::DynamicLimits;

/// Errors produced while loading or parsing a [`MotionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LimitsDoc {
    v_max: f64,
    a_max: f64,
    j_max: f64,
}

impl From<LimitsDoc> for DynamicLimits {
    fn from(doc: LimitsDoc) -> Self {
        DynamicLimits::new(doc.v_max, doc.a_max, doc.j_max)
    }
}

impl From<DynamicLimits> for LimitsDoc {
    fn from(lim: DynamicLimits) -> Self {
        LimitsDoc {
            v_max: lim.v_max,
            a_max: lim.a_max,
            j_max: lim.j_max,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct AxisProfileDoc {
    coarse: LimitsDoc,
    fine: LimitsDoc,
}

impl From<AxisProfileDoc> for LimitProfile {
    fn from(doc: AxisProfileDoc) -> Self {
        LimitProfile {
            coarse: doc.coarse.into(),
            fine: doc.fine.into(),
        }
    }
}

impl From<LimitProfile> for AxisProfileDoc {
    fn from(profile: LimitProfile) -> Self {
        AxisProfileDoc {
            coarse: profile.coarse.into(),
            fine: profile.fine.into(),
        }
    }
}

/// The on-disk/`[solver]` + `[translation]` + `[rotation]` document shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MotionConfigDoc {
    solver: SolverParameters,
    translation: AxisProfileDoc,
    rotation: AxisProfileDoc,
}

/// A fully parsed, ready-to-use motion configuration: solver tuning plus a
/// coarse/fine limit profile for each axis.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    pub solver: SolverParameters,
    pub translation: LimitProfile,
    pub rotation: LimitProfile,
}

impl MotionConfig {
    /// Parse a TOML document already held in memory.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let doc: MotionConfigDoc = toml::from_str(text)?;
        Ok(Self {
            solver: doc.solver,
            translation: doc.translation.into(),
            rotation: doc.rotation.into(),
        })
    }

    /// Load and parse a TOML configuration file from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize back to a TOML document, e.g. to persist a runtime-tuned
    /// configuration.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let doc = MotionConfigDoc {
            solver: self.solver,
            translation: self.translation.into(),
            rotation: self.rotation.into(),
        };
        Ok(toml::to_string_pretty(&doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [solver]
        num_loops = 10
        alpha_decay = 0.1
        beta_decay = 0.1
        exponent_decay = 2.0

        [translation.coarse]
        v_max = 0.5
        a_max = 0.5
        j_max = 1.0

        [translation.fine]
        v_max = 0.25
        a_max = 0.25
        j_max = 0.5

        [rotation.coarse]
        v_max = 3.0
        a_max = 3.0
        j_max = 6.0

        [rotation.fine]
        v_max = 1.5
        a_max = 1.5
        j_max = 3.0
    "#;

    #[test]
    fn parses_sample_document() {
        let config = MotionConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.solver.num_loops, 10);
        assert_eq!(config.translation.coarse, DynamicLimits::new(0.5, 0.5, 1.0));
        assert_eq!(config.rotation.fine, DynamicLimits::new(1.5, 1.5, 3.0));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = MotionConfig::from_toml_str(SAMPLE).unwrap();
        let text = config.to_toml_string().unwrap();
        let reloaded = MotionConfig::from_toml_str(&text).unwrap();

        assert_eq!(config.solver, reloaded.solver);
        assert_eq!(config.translation, reloaded.translation);
        assert_eq!(config.rotation, reloaded.rotation);
    }

    #[test]
    fn missing_file_is_a_typed_error_not_a_panic() {
        let result = MotionConfig::load(Path::new("/nonexistent/path/motion.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
