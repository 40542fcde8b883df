//! Label name to code offset table.

use indexmap::IndexMap;

use crate::error::SyntaxError;

/// Labels in definition order.
///
/// Names compare by full string equality. Redefining a name at the same
/// offset is accepted so a pass can be replayed.
#[derive(Debug, Default, Clone)]
pub struct LabelTable {
    labels: IndexMap<String, usize>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, offset: usize) -> Result<(), SyntaxError> {
        match self.labels.get(name) {
            Some(&previous) if previous == offset => Ok(()),
            Some(&previous) => Err(SyntaxError::LabelRedefined {
                name: name.to_string(),
                previous,
                offset,
            }),
            None => {
                self.labels.insert(name.to_string(), offset);
                Ok(())
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(|(name, &offset)| (name.as_str(), offset))
    }
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod labels_tests;
