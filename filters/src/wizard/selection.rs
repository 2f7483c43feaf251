//! Per-question choice selection for the guided filter wizard.

use common::guided_wizard::{SelectionType, WizardQuestion};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Replaced,
    Deselected,
    Cleared,
    Unchanged,
}

impl SelectionChange {
    pub fn is_change(self) -> bool {
        self != SelectionChange::Unchanged
    }
}


/// Selected choice ids of one question, in the order they were picked.
///
/// SINGLE keeps at most one id and replaces it. MULTIPLE toggles ids and refuses new
/// ones once `max_selections` is reached; nothing is evicted. A cap of 0 means no cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSelection {
    selection_type: SelectionType,
    max_selections: Option<usize>,
    selected: Vec<String>,
}

impl QuestionSelection {
    pub fn new(selection_type: SelectionType, max_selections: Option<usize>) -> Self {
        Self {
            selection_type,
            max_selections: max_selections.filter(|max| *max > 0),
            selected: Vec::new(),
        }
    }

    pub fn for_question(question: &WizardQuestion) -> Self {
        Self::new(question.selection_type, question.max_selections)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, choice_id: &str) -> bool {
        self.selected.iter().any(|selected| selected == choice_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        match self.selection_type {
            SelectionType::Single => false,
            SelectionType::Multiple => self
                .max_selections
                .is_some_and(|max| self.selected.len() >= max),
        }
    }

    pub fn toggle(&mut self, choice_id: &str) -> SelectionChange {
        match self.selection_type {
            SelectionType::Single => {
                if self.is_selected(choice_id) {
                    return SelectionChange::Unchanged;
                }
                let had_selection = !self.selected.is_empty();
                self.selected = vec![choice_id.to_string()];
                if had_selection {
                    SelectionChange::Replaced
                } else {
                    SelectionChange::Selected
                }
            }
            SelectionType::Multiple => {
                if let Some(position) = self.selected.iter().position(|selected| selected == choice_id) {
                    self.selected.remove(position);
                    return SelectionChange::Deselected;
                }
                if self.is_full() {
                    return SelectionChange::Unchanged;
                }
                self.selected.push(choice_id.to_string());
                SelectionChange::Selected
            }
        }
    }

    pub fn clear(&mut self) -> SelectionChange {
        if self.selected.is_empty() {
            return SelectionChange::Unchanged;
        }
        self.selected.clear();
        SelectionChange::Cleared
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_replaces_and_ignores_repeat_clicks() {
        let mut selection = QuestionSelection::new(SelectionType::Single, None);
        assert_eq!(selection.toggle("movies"), SelectionChange::Selected);
        assert_eq!(selection.toggle("movies"), SelectionChange::Unchanged);
        assert_eq!(selection.toggle("sports"), SelectionChange::Replaced);
        assert_eq!(selection.selected(), ["sports".to_string()]);
    }

    #[test]
    fn multiple_caps_without_eviction() {
        let mut selection = QuestionSelection::new(SelectionType::Multiple, Some(2));
        assert_eq!(selection.toggle("hdr"), SelectionChange::Selected);
        assert_eq!(selection.toggle("gaming"), SelectionChange::Selected);
        assert_eq!(selection.toggle("cinema"), SelectionChange::Unchanged);
        assert_eq!(selection.selected(), ["hdr".to_string(), "gaming".to_string()]);

        assert_eq!(selection.toggle("hdr"), SelectionChange::Deselected);
        assert_eq!(selection.toggle("cinema"), SelectionChange::Selected);
        assert_eq!(selection.selected(), ["gaming".to_string(), "cinema".to_string()]);
    }

    #[test]
    fn zero_cap_is_unbounded() {
        let mut selection = QuestionSelection::new(SelectionType::Multiple, Some(0));
        for id in ["a", "b", "c", "d"] {
            assert_eq!(selection.toggle(id), SelectionChange::Selected);
        }
        assert!(!selection.is_full());
    }

    #[test]
    fn clear_reports_whether_anything_changed() {
        let mut selection = QuestionSelection::new(SelectionType::Multiple, None);
        assert_eq!(selection.clear(), SelectionChange::Unchanged);
        selection.toggle("a");
        assert_eq!(selection.clear(), SelectionChange::Cleared);
        assert!(selection.is_empty());
    }
}
