//! Single-selection picker over a fixed list of candidate images or posters.
//!
//! At most one candidate is selected at any time. Each `select` call reports
//! exactly which positions changed so a caller can refresh only those.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("\"{0}\" is not one of the available images")]
    UnknownCandidate(String),
}

/// A candidate together with its position in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub id: String,
}

/// Outcome of a `select` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSignal {
    /// Nothing was selected; `Slot` now is.
    Selected(Slot),
    /// `old` lost the selection to `new`.
    Replaced { old: Slot, new: Slot },
    /// The selected candidate was picked again and is now cleared.
    Deselected(Slot),
}

impl SelectionSignal {
    /// Positions whose selection state changed.
    pub fn changed_indices(&self) -> Vec<usize> {
        match self {
            SelectionSignal::Selected(slot) | SelectionSignal::Deselected(slot) => {
                vec![slot.index]
            }
            SelectionSignal::Replaced { old, new } => vec![old.index, new.index],
        }
    }

    /// The identifier selected after the call, if any.
    pub fn current(&self) -> Option<&str> {
        match self {
            SelectionSignal::Selected(slot) => Some(&slot.id),
            SelectionSignal::Replaced { new, .. } => Some(&new.id),
            SelectionSignal::Deselected(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Picker {
    candidates: Vec<String>,
    selected: Option<usize>,
}

impl Picker {
    /// Build a picker over `candidates`. Duplicates collapse onto their first
    /// occurrence. `initial` is only honoured when it is one of the
    /// candidates.
    pub fn new<I, S>(candidates: I, initial: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for candidate in candidates {
            let candidate = candidate.into();
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        let selected = initial.and_then(|id| unique.iter().position(|c| c == id));
        Self {
            candidates: unique,
            selected,
        }
    }

    pub fn select(&mut self, candidate: &str) -> Result<SelectionSignal, PickerError> {
        let index = self
            .position(candidate)
            .ok_or_else(|| PickerError::UnknownCandidate(candidate.to_string()))?;
        let new = self.slot(index);

        let signal = match self.selected {
            Some(current) if current == index => {
                self.selected = None;
                SelectionSignal::Deselected(new)
            }
            Some(current) => {
                let old = self.slot(current);
                self.selected = Some(index);
                SelectionSignal::Replaced { old, new }
            }
            None => {
                self.selected = Some(index);
                SelectionSignal::Selected(new)
            }
        };
        Ok(signal)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|index| self.candidates[index].as_str())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, candidate: &str) -> bool {
        self.selected() == Some(candidate)
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Every candidate paired with its selection flag, in candidate order.
    pub fn states(&self) -> Vec<(&str, bool)> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, id)| (id.as_str(), self.selected == Some(index)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn position(&self, candidate: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c == candidate)
    }

    fn slot(&self, index: usize) -> Slot {
        Slot {
            index,
            id: self.candidates[index].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize, id: &str) -> Slot {
        Slot {
            index,
            id: id.to_string(),
        }
    }

    fn selected_count(picker: &Picker) -> usize {
        picker.states().iter().filter(|(_, on)| *on).count()
    }

    #[test]
    fn select_replace_deselect() {
        let mut picker = Picker::new(["p1", "p2"], None);

        assert_eq!(
            picker.select("p1"),
            Ok(SelectionSignal::Selected(slot(0, "p1")))
        );
        assert_eq!(
            picker.select("p2"),
            Ok(SelectionSignal::Replaced {
                old: slot(0, "p1"),
                new: slot(1, "p2"),
            })
        );
        assert_eq!(
            picker.select("p2"),
            Ok(SelectionSignal::Deselected(slot(1, "p2")))
        );
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn selecting_twice_toggles_off() {
        let mut picker = Picker::new(["x"], None);
        assert!(matches!(picker.select("x"), Ok(SelectionSignal::Selected(_))));
        assert!(matches!(
            picker.select("x"),
            Ok(SelectionSignal::Deselected(_))
        ));
    }

    #[test]
    fn initial_selection_must_be_a_candidate() {
        let picker = Picker::new(["a", "b"], Some("b"));
        assert_eq!(picker.selected(), Some("b"));
        assert_eq!(picker.selected_index(), Some(1));

        let picker = Picker::new(["a", "b"], Some("zzz"));
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn unknown_candidates_leave_state_alone() {
        let mut picker = Picker::new(["a", "b"], Some("a"));
        assert_eq!(
            picker.select("c"),
            Err(PickerError::UnknownCandidate("c".to_string()))
        );
        assert_eq!(picker.selected(), Some("a"));
    }

    #[test]
    fn duplicates_collapse() {
        let picker = Picker::new(["a", "b", "a"], None);
        assert_eq!(picker.candidates(), ["a".to_string(), "b".to_string()]);
        assert_eq!(picker.len(), 2);
        assert!(!picker.is_empty());
    }

    #[test]
    fn at_most_one_selected_after_any_sequence() {
        let mut picker = Picker::new(["a", "b", "c", "d"], Some("c"));
        for id in ["a", "a", "b", "d", "d", "c", "b", "b", "a"] {
            picker.select(id).unwrap();
            assert!(selected_count(&picker) <= 1);
        }
    }

    #[test]
    fn signals_name_the_rows_to_refresh() {
        let mut picker = Picker::new(["a", "b", "c"], Some("a"));
        let signal = picker.select("c").unwrap();
        assert_eq!(signal.changed_indices(), vec![0, 2]);
        assert_eq!(signal.current(), Some("c"));
        assert!(picker.is_selected("c"));

        let signal = picker.select("c").unwrap();
        assert_eq!(signal.changed_indices(), vec![2]);
        assert_eq!(signal.current(), None);
    }
}
