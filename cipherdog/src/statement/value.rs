//! Value extracted from a query or bound to a placeholder.

use std::fmt::Display;

use pg_query::protobuf::{a_const::Val, AConst, Float};

/// A column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String form, `None` for NULL.
    pub fn as_text(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string())
        }
    }

}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<&AConst> for Value {
    fn from(value: &AConst) -> Self {
        if value.isnull {
            return Value::Null;
        }

        match value.val.as_ref() {
            Some(Val::Sval(s)) => Value::String(s.sval.clone()),
            Some(Val::Boolval(b)) => Value::Boolean(b.boolval),
            Some(Val::Ival(i)) => Value::Integer(i.ival as i64),
            Some(Val::Fval(Float { fval })) => {
                if fval.contains('.') || fval.contains('e') || fval.contains('E') {
                    fval.parse()
                        .map(Value::Float)
                        .unwrap_or_else(|_| Value::String(fval.clone()))
                } else {
                    // Integers outside of i32 are sent as "floats".
                    fval.parse()
                        .map(Value::Integer)
                        .unwrap_or_else(|_| Value::String(fval.clone()))
                }
            }
            Some(Val::Bsval(bsval)) => Value::String(bsval.bsval.clone()),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_text() {
        assert_eq!(Value::Null.as_text(), None);
        assert_eq!(Value::Integer(5).as_text().as_deref(), Some("5"));
        assert_eq!(Value::from("secret").as_text().as_deref(), Some("secret"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }
}
