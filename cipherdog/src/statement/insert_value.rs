//! One row of `INSERT ... VALUES`.

use super::{Error, ExpressionSegment, Value};

/// Row expressions and the parameters bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertValueContext {
    value_expressions: Vec<ExpressionSegment>,
    /// Values for this row's placeholders, in order of appearance.
    parameters: Vec<Value>,
}

impl InsertValueContext {
    pub fn new(value_expressions: Vec<ExpressionSegment>, parameters: Vec<Value>) -> Self {
        Self {
            value_expressions,
            parameters,
        }
    }

    pub fn value_expressions(&self) -> &[ExpressionSegment] {
        &self.value_expressions
    }

    /// Parameters bound to this row, empty if it only has literals.
    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// Value of the column at `index`, written in the query or bound to a placeholder.
    /// Expressions such as `now()` have no value until the database runs them.
    pub fn value(&self, index: usize) -> Result<Value, Error> {
        let expression = self
            .value_expressions
            .get(index)
            .ok_or(Error::ValueIndex(index))?;

        match expression {
            ExpressionSegment::Literal { value, .. }
            | ExpressionSegment::DerivedLiteral { value } => Ok(value.clone()),
            // Only the database knows what this evaluates to.
            ExpressionSegment::Complex { text, .. } => Err(Error::UnsupportedExpression {
                index,
                text: text.clone(),
            }),
            ExpressionSegment::ParameterMarker { .. } => {
                let position = self.value_expressions[..index]
                    .iter()
                    .filter(|e| e.is_placeholder())
                    .count();
                self.parameters
                    .get(position)
                    .cloned()
                    .ok_or(Error::MissingParameter(position))
            }
            ExpressionSegment::DerivedParameterMarker { index } => self
                .parameters
                .get(*index)
                .cloned()
                .ok_or(Error::MissingParameter(*index)),
        }
    }
}
