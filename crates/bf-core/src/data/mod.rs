//! Inference data: named sample arrays grouped under labels such as
//! `posterior` and `prior`.
//!
//! Datasets are read from JSON shaped like
//! `{"posterior": {"a": [...]}, "prior": {"a": [...]}}`. A variable is either
//! a flat list of draws or a list of chains; chains are stacked chain-major
//! into a single sample dimension on load.

pub mod synthetic;

use std::collections::BTreeMap;
use std::path::Path;

use bf_common::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Group holding posterior draws.
pub const POSTERIOR: &str = "posterior";
/// Group holding prior draws.
pub const PRIOR: &str = "prior";

/// Ordered draws for one variable under one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleArray {
    Discrete(Vec<i64>),
    Continuous(Vec<f64>),
}

/// Accepted JSON shapes, tried in order. Integer literals win over floats.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVariable {
    Discrete(Vec<i64>),
    Continuous(Vec<f64>),
    DiscreteChains(Vec<Vec<i64>>),
    ContinuousChains(Vec<Vec<f64>>),
}

impl From<RawVariable> for SampleArray {
    fn from(raw: RawVariable) -> Self {
        match raw {
            RawVariable::Discrete(v) => SampleArray::Discrete(v),
            RawVariable::Continuous(v) => SampleArray::Continuous(v),
            RawVariable::DiscreteChains(chains) => {
                SampleArray::Discrete(chains.into_iter().flatten().collect())
            }
            RawVariable::ContinuousChains(chains) => {
                SampleArray::Continuous(chains.into_iter().flatten().collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for SampleArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawVariable::deserialize(deserializer).map(Into::into)
    }
}

impl From<Vec<f64>> for SampleArray {
    fn from(v: Vec<f64>) -> Self {
        SampleArray::Continuous(v)
    }
}

impl From<Vec<i64>> for SampleArray {
    fn from(v: Vec<i64>) -> Self {
        SampleArray::Discrete(v)
    }
}

impl SampleArray {
    pub fn len(&self) -> usize {
        match self {
            SampleArray::Discrete(v) => v.len(),
            SampleArray::Continuous(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, SampleArray::Discrete(_))
    }

    /// Draws widened to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            SampleArray::Discrete(v) => v.iter().map(|&d| d as f64).collect(),
            SampleArray::Continuous(v) => v.clone(),
        }
    }

    /// Smallest and largest draw.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            SampleArray::Discrete(v) => {
                let lo = v.iter().min()?;
                let hi = v.iter().max()?;
                Some((*lo as f64, *hi as f64))
            }
            SampleArray::Continuous(v) => bf_math::math::summary::min_max(v),
        }
    }

    /// Parse a bare array of draws, e.g. a prior file for sensitivity runs.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::InvalidDataset(format!("expected an array of draws: {e}")))
    }

    /// Read a bare array of draws from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            Error::InvalidDataset(format!(
                "{}: expected an array of draws: {e}",
                path.display()
            ))
        })
    }
}

/// Variables of one group, keyed by name.
pub type Group = BTreeMap<String, SampleArray>;

/// Read-only container of grouped sample arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InferenceData {
    groups: BTreeMap<String, Group>,
}

impl InferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one variable.
    pub fn with_var(
        mut self,
        group: impl Into<String>,
        var: impl Into<String>,
        draws: impl Into<SampleArray>,
    ) -> Self {
        self.insert(group, var, draws);
        self
    }

    pub fn insert(
        &mut self,
        group: impl Into<String>,
        var: impl Into<String>,
        draws: impl Into<SampleArray>,
    ) {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(var.into(), draws.into());
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidDataset(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let data: Self = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidDataset(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), groups = data.groups.len(), "loaded inference data");
        Ok(data)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Group labels in sorted order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn group(&self, group: &str) -> Option<&Group> {
        self.groups.get(group)
    }

    /// Draws of `var_name` under `group`.
    ///
    /// Fails with `GroupNotFound`, `VariableNotFound` or `EmptySamples`.
    pub fn extract(&self, var_name: &str, group: &str) -> Result<&SampleArray> {
        let vars = self.groups.get(group).ok_or_else(|| Error::GroupNotFound {
            group: group.to_string(),
        })?;
        let draws = vars.get(var_name).ok_or_else(|| Error::VariableNotFound {
            group: group.to_string(),
            var: var_name.to_string(),
        })?;
        if draws.is_empty() {
            return Err(Error::EmptySamples {
                group: group.to_string(),
                var: var_name.to_string(),
            });
        }
        Ok(draws)
    }
}

/// Free-function form of [`InferenceData::extract`], returning owned draws.
pub fn extract(dataset: &InferenceData, var_name: &str, group: &str) -> Result<SampleArray> {
    dataset.extract(var_name, group).cloned()
}
