//! Expressions inside a `VALUES` row.

use super::Value;

/// One value slot of an `INSERT` row.
///
/// Positions are byte offsets into the original query, inclusive on both ends.
/// Derived expressions are added by rewrites and have no position.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionSegment {
    /// Constant written in the query text.
    Literal {
        start: usize,
        stop: usize,
        value: Value,
    },
    /// Bind placeholder, e.g. `$2`. `index` is the 0-based parameter number.
    ParameterMarker {
        start: usize,
        stop: usize,
        index: usize,
    },
    /// Anything else, e.g. `now()`. Passed through untouched.
    Complex {
        start: usize,
        stop: usize,
        text: String,
    },
    /// Literal added by a rewrite.
    DerivedLiteral { value: Value },
    /// Placeholder added by a rewrite. The value is appended to
    /// the bound parameters at render time, in order of appearance.
    DerivedParameterMarker { index: usize },
}

impl ExpressionSegment {
    pub fn literal(start: usize, stop: usize, value: impl Into<Value>) -> Self {
        Self::Literal {
            start,
            stop,
            value: value.into(),
        }
    }

    pub fn parameter_marker(start: usize, stop: usize, index: usize) -> Self {
        Self::ParameterMarker { start, stop, index }
    }

    /// Original or derived placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            Self::ParameterMarker { .. } | Self::DerivedParameterMarker { .. }
        )
    }

    /// Literal written in the original query.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            Self::DerivedLiteral { .. } | Self::DerivedParameterMarker { .. }
        )
    }

    /// Span in the original query, if any.
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::Literal { start, stop, .. }
            | Self::ParameterMarker { start, stop, .. }
            | Self::Complex { start, stop, .. } => Some((*start, *stop)),
            Self::DerivedLiteral { .. } | Self::DerivedParameterMarker { .. } => None,
        }
    }
}

/// Number of placeholders, original and derived, in a row.
pub fn count_placeholders(expressions: &[ExpressionSegment]) -> usize {
    expressions.iter().filter(|e| e.is_placeholder()).count()
}
