//! Wizard choice expressions to filter clauses.

use common::filter_request::{FilterClause, FilterGroup};
use common::guided_wizard::{
    LogicalOperator, SelectionType, WizardChoice, WizardClause, WizardClauseOperator, WizardExpression,
    WizardQuestion,
};


/// Filters and groups contributed by one question.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestionFilters {
    pub filters: Vec<FilterClause>,
    pub filter_groups: Vec<FilterGroup>,
}

pub fn convert_wizard_clause(clause: &WizardClause) -> Option<FilterClause> {
    if clause.field.is_empty() {
        return None;
    }
    match clause.operator {
        WizardClauseOperator::Term if clause.terms.is_empty() => None,
        WizardClauseOperator::Term => Some(FilterClause::term(clause.field.clone(), clause.terms.clone())),
        WizardClauseOperator::Range if clause.min.is_none() && clause.max.is_none() => None,
        WizardClauseOperator::Range => Some(FilterClause::range(clause.field.clone(), clause.min, clause.max)),
    }
}

pub fn expression_clauses(expression: &WizardExpression) -> Vec<FilterClause> {
    expression.clauses.iter().filter_map(convert_wizard_clause).collect()
}

fn choice_clauses(choice: &WizardChoice) -> Vec<FilterClause> {
    choice.expression.as_ref().map(expression_clauses).unwrap_or_default()
}

/// Flattens the selected choices of `question`, in selection order.
///
/// OR-combined multiple choice questions and OR expressions with several clauses
/// become a single `should` group instead of flat filters.
pub fn question_filters(question: &WizardQuestion, selected_ids: &[String]) -> QuestionFilters {
    let choices = selected_ids
        .iter()
        .filter_map(|choice_id| question.choice(choice_id))
        .collect::<Vec<_>>();
    let mut result = QuestionFilters::default();

    let or_combined = question.selection_type == SelectionType::Multiple
        && question.combination_operator == Some(LogicalOperator::Or)
        && choices.len() >= 2;
    if or_combined {
        let should = choices.iter().flat_map(|choice| choice_clauses(choice)).collect::<Vec<_>>();
        if !should.is_empty() {
            result.filter_groups.push(FilterGroup::should(should));
        }
        return result;
    }

    for choice in choices {
        let Some(expression) = &choice.expression else {
            continue;
        };
        let clauses = expression_clauses(expression);
        if expression.operator == LogicalOperator::Or && clauses.len() >= 2 {
            result.filter_groups.push(FilterGroup::should(clauses));
        } else {
            result.filters.extend(clauses);
        }
    }
    result
}
