use super::{MetricDefinition, MetricGroup};
use crate::Result;
use ohno::bail;
use std::collections::HashSet;
use std::sync::Arc;

/// The ordered catalog of metric definitions evaluated on every run.
///
/// Iteration order is the order definitions were registered in, which is also the order
/// metrics appear in reports.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<Arc<MetricDefinition>>,
}

impl Registry {
    /// Build a registry, validating every definition and the uniqueness of names.
    pub fn new(definitions: impl IntoIterator<Item = MetricDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut registered = Vec::new();

        for def in definitions {
            def.validate()?;

            if !seen.insert(def.name.clone()) {
                bail!("metric '{}' is defined more than once", def.name);
            }

            registered.push(Arc::new(def));
        }

        Ok(Self { definitions: registered })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MetricDefinition>> {
        self.definitions.iter()
    }

    /// Definitions belonging to a group, in registry order.
    pub fn in_group(&self, group: MetricGroup) -> impl Iterator<Item = &Arc<MetricDefinition>> {
        self.definitions.iter().filter(move |def| def.group == group)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<MetricDefinition>> {
        self.definitions.iter().find(|def| def.name == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Number of definitions that will be sent to a source.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.definitions.iter().filter(|def| def.enabled).count()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Arc<MetricDefinition>;
    type IntoIter = core::slice::Iter<'a, Arc<MetricDefinition>>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
