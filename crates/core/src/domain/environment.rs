// Environment Adjustments
// What a tool needs changed in the environment of its process

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment changes requested by a tool adapter.
///
/// Applied in this order:
/// 1. `keep_env`: if set, the run starts from an empty environment and only the
///    listed variables are copied from the ambient one (values are ignored).
/// 2. `new_env`: variables are assigned, overriding existing values.
/// 3. `additional_env`: values are appended to the current value. The adapter
///    has to include any separator itself, e.g. `":/opt/tool/bin"` for PATH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentAdjustments {
    #[serde(rename = "keepEnv", default, skip_serializing_if = "Option::is_none")]
    pub keep_env: Option<BTreeMap<String, String>>,

    #[serde(rename = "newEnv", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub new_env: BTreeMap<String, String>,

    #[serde(
        rename = "additionalEnv",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub additional_env: BTreeMap<String, String>,
}

impl EnvironmentAdjustments {
    /// No adjustments
    pub fn none() -> Self {
        Self::default()
    }

    /// Start from an empty environment and keep only these variables
    pub fn keep<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keep = self.keep_env.get_or_insert_with(BTreeMap::new);
        for name in names {
            keep.insert(name.into(), String::new());
        }
        self
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.new_env.insert(name.into(), value.into());
        self
    }

    pub fn append(mut self, name: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.additional_env.insert(name.into(), suffix.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keep_env.is_none() && self.new_env.is_empty() && self.additional_env.is_empty()
    }

    /// Compute the environment of a run from the ambient environment
    pub fn apply<I, K, V>(&self, ambient: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let ambient = ambient.into_iter().map(|(k, v)| (k.into(), v.into()));

        let mut env: BTreeMap<String, String> = match &self.keep_env {
            Some(keep) => ambient.filter(|(k, _)| keep.contains_key(k)).collect(),
            None => ambient.collect(),
        };

        for (name, value) in &self.new_env {
            env.insert(name.clone(), value.clone());
        }

        for (name, suffix) in &self.additional_env {
            env.entry(name.clone()).or_default().push_str(suffix);
        }

        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambient() -> Vec<(&'static str, &'static str)> {
        vec![("PATH", "/usr/bin"), ("HOME", "/home/bench"), ("LANG", "C")]
    }

    #[test]
    fn test_default_is_empty() {
        let adjustments = EnvironmentAdjustments::default();

        assert!(adjustments.is_empty());
        assert_eq!(serde_json::to_string(&adjustments).unwrap(), "{}");
        assert_eq!(adjustments.apply(ambient()).len(), 3);
    }

    #[test]
    fn test_keep_env_starts_fresh() {
        let env = EnvironmentAdjustments::none()
            .keep(["PATH", "MISSING"])
            .apply(ambient());

        assert_eq!(env.len(), 1);
        assert_eq!(env["PATH"], "/usr/bin");
    }

    #[test]
    fn test_new_env_overrides() {
        let env = EnvironmentAdjustments::none()
            .set("HOME", "/tmp/home")
            .set("TOOL_MODE", "bench")
            .apply(ambient());

        assert_eq!(env["HOME"], "/tmp/home");
        assert_eq!(env["TOOL_MODE"], "bench");
    }

    #[test]
    fn test_additional_env_appends() {
        let env = EnvironmentAdjustments::none()
            .append("PATH", ":/opt/tool/bin")
            .append("LD_LIBRARY_PATH", "/opt/tool/lib")
            .apply(ambient());

        assert_eq!(env["PATH"], "/usr/bin:/opt/tool/bin");
        assert_eq!(env["LD_LIBRARY_PATH"], "/opt/tool/lib");
    }

    #[test]
    fn test_order_keep_then_new_then_additional() {
        let env = EnvironmentAdjustments::none()
            .keep(["PATH"])
            .set("PATH", "/bin")
            .append("PATH", ":/opt/bin")
            .apply(ambient());

        assert_eq!(env.len(), 1);
        assert_eq!(env["PATH"], "/bin:/opt/bin");
    }

    #[test]
    fn test_serde_keys() {
        let adjustments: EnvironmentAdjustments = serde_json::from_str(
            r#"{"keepEnv": {"PATH": ""}, "newEnv": {"A": "1"}, "additionalEnv": {"B": ":2"}}"#,
        )
        .unwrap();

        assert!(adjustments.keep_env.unwrap().contains_key("PATH"));
        assert_eq!(adjustments.new_env["A"], "1");
        assert_eq!(adjustments.additional_env["B"], ":2");
    }
}
