//! Tap-mode reason catalog and the selection set built on top of it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A selectable reason shown in tap mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Static, ordered catalog of tap-mode reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceCatalog {
    options: Vec<ChoiceOption>,
}

impl ChoiceCatalog {
    /// Build a catalog, rejecting empty lists and duplicate ids.
    pub fn new(options: Vec<ChoiceOption>) -> Result<Self, ValidationError> {
        if options.is_empty() {
            return Err(ValidationError::EmptyCollection("choice catalog".into()));
        }
        let mut seen = BTreeSet::new();
        for option in &options {
            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::InvalidValue {
                    field: "choice.id".into(),
                    message: format!("duplicate id '{}'", option.id),
                });
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn get(&self, id: &str) -> Result<&ChoiceOption, ValidationError> {
        self.options
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| ValidationError::UnknownChoice(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.options.iter().any(|o| o.id == id)
    }

    /// Labels of the selected options joined with ", ", in catalog order.
    pub fn joined_labels(&self, selection: &ChoiceSelection) -> String {
        self.options
            .iter()
            .filter(|o| selection.is_selected(&o.id))
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ChoiceCatalog {
    fn default() -> Self {
        let options = [
            ("carbs", "Ate more carbs"),
            ("ate_out", "Ate out"),
            ("skipped_meals", "Skipped meals"),
            ("poor_sleep", "Poor sleep"),
            ("stress", "Stressful week"),
            ("less_water", "Less water"),
            ("less_exercise", "Less exercise"),
            ("travel", "Travelled"),
            ("period", "Period"),
            ("not_sure", "Not sure"),
        ]
        .into_iter()
        .map(|(id, label)| ChoiceOption::new(id, label))
        .collect();
        Self { options }
    }
}

/// Set of currently selected option ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSelection {
    selected: BTreeSet<String>,
}

impl ChoiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
