// Resource Limits Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};

/// Resource limits of a run.
///
/// Each field is a positive integer or `None`, which means no limit.
/// Time limits are in seconds, memory in bytes.
///
/// The two CPU-time limits are either both set (with `cputime_hard >= cputime`)
/// or both unset. `cputime` is the limit after which the tool receives a
/// termination signal and the run counts as timeout, `cputime_hard` the limit
/// after which it is killed forcibly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResourceLimits")]
pub struct ResourceLimits {
    cputime: Option<u64>,
    cputime_hard: Option<u64>,
    walltime: Option<u64>,
    memory: Option<u64>,
    cpu_cores: Option<u64>,
}

impl ResourceLimits {
    /// No limits at all
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn builder() -> ResourceLimitsBuilder {
        ResourceLimitsBuilder::default()
    }

    /// Soft CPU-time limit in seconds
    pub fn cputime(&self) -> Option<u64> {
        self.cputime
    }

    /// Hard CPU-time limit in seconds
    pub fn cputime_hard(&self) -> Option<u64> {
        self.cputime_hard
    }

    /// Wall-time limit in seconds
    pub fn walltime(&self) -> Option<u64> {
        self.walltime
    }

    /// Memory limit in bytes
    pub fn memory(&self) -> Option<u64> {
        self.memory
    }

    /// Number of CPU cores the tool may use
    pub fn cpu_cores(&self) -> Option<u64> {
        self.cpu_cores
    }

    pub fn is_unlimited(&self) -> bool {
        *self == Self::unlimited()
    }

    fn validate(self) -> Result<Self> {
        let fields = [
            ("cputime", self.cputime),
            ("cputime_hard", self.cputime_hard),
            ("walltime", self.walltime),
            ("memory", self.memory),
            ("cpu_cores", self.cpu_cores),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| *value == Some(0)) {
            return Err(DomainError::InvalidResourceLimits(format!(
                "{} must be positive",
                name
            )));
        }

        match (self.cputime, self.cputime_hard) {
            (Some(soft), Some(hard)) if hard < soft => {
                Err(DomainError::InvalidResourceLimits(format!(
                    "cputime_hard ({}) must not be lower than cputime ({})",
                    hard, soft
                )))
            }
            (Some(_), None) | (None, Some(_)) => Err(DomainError::InvalidResourceLimits(
                "cputime and cputime_hard must be given together".to_string(),
            )),
            _ => Ok(self),
        }
    }
}

/// Builder for `ResourceLimits`; `build()` checks all invariants
#[derive(Debug, Clone, Default)]
pub struct ResourceLimitsBuilder {
    limits: ResourceLimits,
}

impl ResourceLimitsBuilder {
    /// Soft and hard CPU-time limits in seconds
    pub fn cputime(mut self, soft: u64, hard: u64) -> Self {
        self.limits.cputime = Some(soft);
        self.limits.cputime_hard = Some(hard);
        self
    }

    pub fn walltime(mut self, seconds: u64) -> Self {
        self.limits.walltime = Some(seconds);
        self
    }

    pub fn memory(mut self, bytes: u64) -> Self {
        self.limits.memory = Some(bytes);
        self
    }

    pub fn cpu_cores(mut self, cores: u64) -> Self {
        self.limits.cpu_cores = Some(cores);
        self
    }

    pub fn build(self) -> Result<ResourceLimits> {
        self.limits.validate()
    }
}

/// Unchecked shape used for deserialization
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResourceLimits {
    #[serde(default)]
    cputime: Option<u64>,
    #[serde(default)]
    cputime_hard: Option<u64>,
    #[serde(default)]
    walltime: Option<u64>,
    #[serde(default)]
    memory: Option<u64>,
    #[serde(default)]
    cpu_cores: Option<u64>,
}

impl TryFrom<RawResourceLimits> for ResourceLimits {
    type Error = DomainError;

    fn try_from(raw: RawResourceLimits) -> Result<Self> {
        ResourceLimits {
            cputime: raw.cputime,
            cputime_hard: raw.cputime_hard,
            walltime: raw.walltime,
            memory: raw.memory,
            cpu_cores: raw.cpu_cores,
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited() {
        let limits = ResourceLimits::unlimited();

        assert!(limits.is_unlimited());
        assert_eq!(limits.cputime(), None);
        assert_eq!(limits.cputime_hard(), None);
        assert_eq!(limits.memory(), None);
    }

    #[test]
    fn test_builder_all_fields() {
        let limits = ResourceLimits::builder()
            .cputime(900, 960)
            .walltime(1000)
            .memory(15_000_000_000)
            .cpu_cores(4)
            .build()
            .unwrap();

        assert_eq!(limits.cputime(), Some(900));
        assert_eq!(limits.cputime_hard(), Some(960));
        assert_eq!(limits.walltime(), Some(1000));
        assert_eq!(limits.memory(), Some(15_000_000_000));
        assert_eq!(limits.cpu_cores(), Some(4));
        assert!(!limits.is_unlimited());
    }

    #[test]
    fn test_equal_soft_and_hard_cputime() {
        let limits = ResourceLimits::builder().cputime(60, 60).build().unwrap();

        assert_eq!(limits.cputime(), limits.cputime_hard());
    }

    #[test]
    fn test_hard_below_soft_rejected() {
        let result = ResourceLimits::builder().cputime(60, 30).build();

        assert!(matches!(
            result,
            Err(DomainError::InvalidResourceLimits(_))
        ));
    }

    #[test]
    fn test_zero_rejected() {
        let err = ResourceLimits::builder().memory(0).build().unwrap_err();

        assert!(err.to_string().contains("memory must be positive"));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ResourceLimits =
            serde_json::from_str(r#"{"cputime": 10, "cputime_hard": 20, "memory": 1024}"#)
                .unwrap();
        assert_eq!(ok.cputime_hard(), Some(20));
        assert_eq!(ok.walltime(), None);

        let unpaired = serde_json::from_str::<ResourceLimits>(r#"{"cputime": 10}"#);
        assert!(unpaired.is_err());

        let unknown = serde_json::from_str::<ResourceLimits>(r#"{"timelimit": 10}"#);
        assert!(unknown.is_err());
    }
}
