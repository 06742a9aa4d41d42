use super::Value;

/// Comparison applied by a [`Where`] predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    IsNull,
    IsNotNull,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    Between,
    Like,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::In => "IN",
            Operator::Between => "BETWEEN",
            Operator::Like => "LIKE",
        }
    }

    /// `IS NULL` and `IS NOT NULL` take no operand.
    pub fn is_unary(self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

/// How a predicate joins the predicates before it on the same node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

/// Right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Value(Value),
    List(Vec<Value>),
    Range(Value, Value),
}

/// One predicate on a column of the node it is added to.
///
/// The column is unqualified; the query builder qualifies it with the node's
/// alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub column: String,
    pub op: Operator,
    pub operand: Operand,
    pub combinator: Combinator,
}

impl Where {
    fn new(column: impl Into<String>, op: Operator, operand: Operand) -> Self {
        Self {
            column: column.into(),
            op,
            operand,
            combinator: Combinator::And,
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::new(column, Operator::IsNull, Operand::None)
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::new(column, Operator::IsNotNull, Operand::None)
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Eq, Operand::Value(value.into()))
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Lt, Operand::Value(value.into()))
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Gt, Operand::Value(value.into()))
    }

    pub fn le(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Le, Operand::Value(value.into()))
    }

    pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Ge, Operand::Value(value.into()))
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(
            column,
            Operator::Like,
            Operand::Value(Value::String(pattern.into())),
        )
    }

    pub fn in_list<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(column, Operator::In, Operand::List(values))
    }

    pub fn between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::new(
            column,
            Operator::Between,
            Operand::Range(low.into(), high.into()),
        )
    }

    /// Joins this predicate to the previous one on the node with `OR`
    /// instead of `AND`. Has no effect on the first predicate of a node.
    pub fn or(mut self) -> Self {
        self.combinator = Combinator::Or;
        self
    }

    pub fn is_or(&self) -> bool {
        self.combinator == Combinator::Or
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_operand_shape() {
        assert_eq!(Operand::None, Where::is_null("a").operand);
        assert_eq!(Operand::Value(Value::I64(1)), Where::eq("a", 1).operand);
        assert_eq!(
            Operand::List(vec![Value::I64(1), Value::I64(2)]),
            Where::in_list("a", [1, 2]).operand
        );
        assert_eq!(
            Operand::Range(Value::I64(1), Value::I64(5)),
            Where::between("a", 1, 5).operand
        );
    }

    #[test]
    fn or_flips_the_combinator() {
        assert!(!Where::eq("a", 1).is_or());
        assert!(Where::eq("a", 1).or().is_or());
    }
}
