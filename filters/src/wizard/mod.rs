//! Guided filter wizard: step navigation, selections and the resulting filters.

mod expression;
pub use expression::{QuestionFilters, convert_wizard_clause, expression_clauses, question_filters};

mod selection;
pub use selection::{QuestionSelection, SelectionChange};

use common::filter_request::FilterRequest;
use common::guided_wizard::{ModalFilterWizardDto, WizardQuestion};


type FiltersListener = Box<dyn FnMut(&FilterRequest) + Send>;

/// Wizard state owned by whoever renders it.
///
/// Listeners receive the filters of every step after each effective selection change.
pub struct GuidedWizard {
    wizard: ModalFilterWizardDto,
    step: usize,
    selections: Vec<QuestionSelection>,
    listeners: Vec<FiltersListener>,
}

impl GuidedWizard {
    pub fn new(wizard: ModalFilterWizardDto) -> Self {
        let selections = wizard.questions.iter().map(QuestionSelection::for_question).collect();
        Self {
            wizard,
            step: 0,
            selections,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FilterRequest) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn questions(&self) -> &[WizardQuestion] {
        &self.wizard.questions
    }

    pub fn step_count(&self) -> usize {
        self.wizard.questions.len()
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn current_question(&self) -> Option<&WizardQuestion> {
        self.wizard.questions.get(self.step)
    }

    pub fn is_first_step(&self) -> bool {
        self.step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.step_count()
    }

    pub fn selection(&self, question_id: &str) -> Option<&QuestionSelection> {
        let index = self.question_index(question_id)?;
        self.selections.get(index)
    }

    pub fn selected_choices(&self, question_id: &str) -> &[String] {
        self.selection(question_id).map(QuestionSelection::selected).unwrap_or(&[])
    }

    /// Clicks a choice. Unknown questions or choices leave the state untouched.
    pub fn select_choice(&mut self, question_id: &str, choice_id: &str) -> SelectionChange {
        let Some(index) = self.question_index(question_id) else {
            return SelectionChange::Unchanged;
        };
        if self.wizard.questions[index].choice(choice_id).is_none() {
            return SelectionChange::Unchanged;
        }

        let change = self.selections[index].toggle(choice_id);
        if change.is_change() {
            self.notify();
        }
        change
    }

    pub fn select_current(&mut self, choice_id: &str) -> SelectionChange {
        let Some(question_id) = self.current_question().map(|question| question.id.clone()) else {
            return SelectionChange::Unchanged;
        };
        self.select_choice(&question_id, choice_id)
    }

    pub fn next(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.is_first_step() {
            return false;
        }
        self.step -= 1;
        true
    }

    /// Drops the current step's selection and moves on.
    pub fn skip(&mut self) -> bool {
        if let Some(selection) = self.selections.get_mut(self.step) {
            if selection.clear().is_change() {
                self.notify();
            }
        }
        self.next()
    }

    pub fn reset(&mut self) {
        let mut changed = false;
        for selection in &mut self.selections {
            changed |= selection.clear().is_change();
        }
        self.step = 0;
        if changed {
            self.notify();
        }
    }

    /// Filters of every step, concatenated in step order.
    pub fn apply_request(&self) -> FilterRequest {
        let mut request = FilterRequest::default();
        for (question, selection) in self.wizard.questions.iter().zip(&self.selections) {
            let contribution = question_filters(question, selection.selected());
            request.filters.extend(contribution.filters);
            request.filter_groups.extend(contribution.filter_groups);
        }
        request
    }

    fn question_index(&self, question_id: &str) -> Option<usize> {
        self.wizard.questions.iter().position(|question| question.id == question_id)
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let request = self.apply_request();
        for listener in &mut self.listeners {
            listener(&request);
        }
    }
}
