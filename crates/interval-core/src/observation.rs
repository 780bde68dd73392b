//! Observation records, group identity, and reference values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Facet placeholder for experiments with a single stratum
pub const SINGLE_FACET: &str = "all";

/// One raw experimental outcome
///
/// The value is the measured response; condition and facet identify the
/// group the observation belongs to. Observations are plain data and are
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Measured outcome
    pub value: f64,
    /// Primary grouping label (e.g. the visualization condition)
    pub condition: String,
    /// Secondary stratum label (e.g. the displayed effect size)
    pub facet: String,
}

impl Observation {
    /// Create an observation with an explicit facet
    pub fn new(value: f64, condition: impl Into<String>, facet: impl Into<String>) -> Self {
        Self {
            value,
            condition: condition.into(),
            facet: facet.into(),
        }
    }

    /// Create an observation in a single-stratum experiment
    pub fn unfaceted(value: f64, condition: impl Into<String>) -> Self {
        Self::new(value, condition, SINGLE_FACET)
    }

    /// The group this observation belongs to
    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.condition.clone(), self.facet.clone())
    }
}

/// Identity of one (condition, facet) group
///
/// Downstream consumers must match estimates by this key; the order in
/// which groups are emitted is not part of any contract.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Primary grouping label
    pub condition: String,
    /// Secondary stratum label
    pub facet: String,
}

impl GroupKey {
    /// Create a group key
    pub fn new(condition: impl Into<String>, facet: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            facet: facet.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.condition, self.facet)
    }
}

/// Collect observation values per group, in sorted key order
pub fn group_observations(observations: &[Observation]) -> BTreeMap<GroupKey, Vec<f64>> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.key()).or_default().push(obs.value);
    }
    debug!(
        observations = observations.len(),
        groups = groups.len(),
        "grouped observations"
    );
    groups
}

/// Known ground-truth value for one facet
///
/// Drawn as a reference line, never estimated from the data. When
/// `condition` is set the value applies to that condition only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrueEffect {
    /// Facet the reference belongs to
    pub facet: String,
    /// Restrict the reference to one condition, if set
    pub condition: Option<String>,
    /// The reference value on the outcome scale
    pub value: f64,
}

impl TrueEffect {
    /// Reference value spanning every condition of a facet
    pub fn new(facet: impl Into<String>, value: f64) -> Self {
        Self {
            facet: facet.into(),
            condition: None,
            value,
        }
    }

    /// Reference value for a single condition within a facet
    pub fn for_condition(
        facet: impl Into<String>,
        condition: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            facet: facet.into(),
            condition: Some(condition.into()),
            value,
        }
    }

    /// Whether this reference applies to the given group
    pub fn applies_to(&self, key: &GroupKey) -> bool {
        if self.facet != key.facet {
            return false;
        }
        match &self.condition {
            Some(condition) => condition == &key.condition,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_constructors() {
        let obs = Observation::new(4.2, "ci", "small");
        assert_eq!(obs.value, 4.2);
        assert_eq!(obs.condition, "ci");
        assert_eq!(obs.facet, "small");

        let obs = Observation::unfaceted(1.0, "pi");
        assert_eq!(obs.facet, SINGLE_FACET);
        assert_eq!(obs.key(), GroupKey::new("pi", SINGLE_FACET));
    }

    #[test]
    fn test_group_key_ordering() {
        let a = GroupKey::new("ci", "large");
        let b = GroupKey::new("ci", "small");
        let c = GroupKey::new("pi", "large");

        assert!(a < b);
        assert!(b < c);
        assert_eq!(format!("{}", a), "ci/large");
    }

    #[test]
    fn test_group_observations() {
        let observations = vec![
            Observation::new(1.0, "b", "x"),
            Observation::new(2.0, "a", "x"),
            Observation::new(3.0, "b", "x"),
            Observation::new(4.0, "a", "y"),
        ];

        let groups = group_observations(&observations);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&GroupKey::new("a", "x")], vec![2.0]);
        assert_eq!(groups[&GroupKey::new("b", "x")], vec![1.0, 3.0]);
        assert_eq!(groups[&GroupKey::new("a", "y")], vec![4.0]);

        // Sorted key order is stable across runs
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                GroupKey::new("a", "x"),
                GroupKey::new("a", "y"),
                GroupKey::new("b", "x"),
            ]
        );
    }

    #[test]
    fn test_true_effect_applies_to() {
        let shared = TrueEffect::new("small", 2.0);
        assert!(shared.applies_to(&GroupKey::new("ci", "small")));
        assert!(shared.applies_to(&GroupKey::new("pi", "small")));
        assert!(!shared.applies_to(&GroupKey::new("ci", "large")));

        let narrow = TrueEffect::for_condition("small", "ci", 2.0);
        assert!(narrow.applies_to(&GroupKey::new("ci", "small")));
        assert!(!narrow.applies_to(&GroupKey::new("pi", "small")));
    }
}
