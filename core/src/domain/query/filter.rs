use std::{cmp::Ordering, collections::BTreeMap, str::FromStr};

use serde_json::{Map, Value};

use crate::domain::document::entities::{
    Document, comparable, compare_values, value_at_path, values_equal,
};

/// Comparison operators accepted in bracket position (`cost[gte]=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterOperator {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    In,
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "eq" => Ok(FilterOperator::Eq),
            "in" => Ok(FilterOperator::In),
            _ => Err(()),
        }
    }
}

impl FilterOperator {
    /// Operator key of the document filter language.
    pub fn operator_key(&self) -> &'static str {
        match self {
            FilterOperator::Lt => "$lt",
            FilterOperator::Lte => "$lte",
            FilterOperator::Gt => "$gt",
            FilterOperator::Gte => "$gte",
            FilterOperator::Eq => "$eq",
            FilterOperator::In => "$in",
        }
    }

    pub fn is_upper_bound(&self) -> bool {
        matches!(self, FilterOperator::Lt | FilterOperator::Lte)
    }

    pub fn is_lower_bound(&self) -> bool {
        matches!(self, FilterOperator::Gt | FilterOperator::Gte)
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            FilterOperator::Lt => ordering == Ordering::Less,
            FilterOperator::Lte => ordering != Ordering::Greater,
            FilterOperator::Gt => ordering == Ordering::Greater,
            FilterOperator::Gte => ordering != Ordering::Less,
            FilterOperator::Eq => ordering == Ordering::Equal,
            FilterOperator::In => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldPredicate {
    Literal(Value),
    Operators(BTreeMap<FilterOperator, Value>),
}

impl FieldPredicate {
    pub fn operator(operator: FilterOperator, value: Value) -> Self {
        FieldPredicate::Operators(BTreeMap::from([(operator, value)]))
    }

    fn to_value(&self) -> Value {
        match self {
            FieldPredicate::Literal(value) => value.clone(),
            FieldPredicate::Operators(operators) => Value::Object(
                operators
                    .iter()
                    .map(|(op, value)| (op.operator_key().to_string(), value.clone()))
                    .collect(),
            ),
        }
    }

    fn matches(&self, actual: Option<&Value>) -> bool {
        match self {
            FieldPredicate::Literal(expected) => equals(actual, expected),
            FieldPredicate::Operators(operators) => {
                operators.iter().all(|(operator, expected)| match operator {
                    FilterOperator::Eq => equals(actual, expected),
                    FilterOperator::In => match expected {
                        Value::Array(options) => options.iter().any(|o| equals(actual, o)),
                        other => equals(actual, other),
                    },
                    range => candidates(actual).into_iter().any(|candidate| {
                        comparable(candidate, expected)
                            && range.accepts(compare_values(Some(candidate), Some(expected)))
                    }),
                })
            }
        }
    }
}

/// Array fields match when any element (or the array itself) matches.
fn candidates(actual: Option<&Value>) -> Vec<&Value> {
    match actual {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            let mut all: Vec<&Value> = items.iter().collect();
            if let Some(array) = actual {
                all.push(array);
            }
            all
        }
        Some(value) => vec![value],
    }
}

fn equals(actual: Option<&Value>, expected: &Value) -> bool {
    if expected.is_null() {
        return actual.is_none_or(Value::is_null);
    }
    candidates(actual)
        .into_iter()
        .any(|candidate| values_equal(candidate, expected))
}

/// Structured predicate over documents. Field conditions are AND-ed; when
/// `any_of` is non-empty at least one of its branches must also match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterExpression {
    conditions: BTreeMap<String, FieldPredicate>,
    any_of: Vec<FilterExpression>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_literal(mut self, path: impl Into<String>, value: Value) -> Self {
        self.constrain(path, FieldPredicate::Literal(value));
        self
    }

    pub fn with_operator(
        mut self,
        path: impl Into<String>,
        operator: FilterOperator,
        value: Value,
    ) -> Self {
        let path = path.into();
        match self.conditions.get_mut(&path) {
            Some(FieldPredicate::Operators(operators)) => {
                operators.insert(operator, value);
            }
            _ => {
                self.conditions
                    .insert(path, FieldPredicate::operator(operator, value));
            }
        }
        self
    }

    /// Replaces whatever condition the path had.
    pub fn constrain(&mut self, path: impl Into<String>, predicate: FieldPredicate) {
        self.conditions.insert(path.into(), predicate);
    }

    pub fn set_any_of(&mut self, branches: Vec<FilterExpression>) {
        self.any_of = branches;
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&String, &FieldPredicate)> {
        self.conditions.iter()
    }

    pub fn condition(&self, path: &str) -> Option<&FieldPredicate> {
        self.conditions.get(path)
    }

    pub fn any_of(&self) -> &[FilterExpression] {
        &self.any_of
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.any_of.is_empty()
    }

    /// Renders the expression in operator-prefixed document form, e.g.
    /// `{"cost": {"$gte": 100}}`.
    pub fn to_document(&self) -> Value {
        let mut document: Map<String, Value> = self
            .conditions
            .iter()
            .map(|(path, predicate)| (path.clone(), predicate.to_value()))
            .collect();

        if !self.any_of.is_empty() {
            document.insert(
                "$or".to_string(),
                Value::Array(self.any_of.iter().map(FilterExpression::to_document).collect()),
            );
        }

        Value::Object(document)
    }

    pub fn matches(&self, document: &Document) -> bool {
        let fields_match = self
            .conditions
            .iter()
            .all(|(path, predicate)| predicate.matches(value_at_path(document, path)));

        fields_match
            && (self.any_of.is_empty() || self.any_of.iter().any(|branch| branch.matches(document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::value_objects::json_object;
    use serde_json::json;

    fn course() -> Document {
        json_object(json!({
            "id": "c1",
            "title": "Rust",
            "cost": 120,
            "careers": ["web development", "devops"],
            "location": {"city": "Boston"}
        }))
        .unwrap()
    }

    #[test]
    fn test_to_document_uses_prefixed_operators() {
        let filter = FilterExpression::new()
            .with_operator("cost", FilterOperator::Gte, json!(100))
            .with_operator("cost", FilterOperator::Lt, json!(200))
            .with_literal("title", json!("Rust"));

        assert_eq!(
            filter.to_document(),
            json!({"cost": {"$gte": 100, "$lt": 200}, "title": "Rust"})
        );
    }

    #[test]
    fn test_matches_ranges_and_literals() {
        let document = course();
        assert!(
            FilterExpression::new()
                .with_operator("cost", FilterOperator::Gte, json!(100))
                .matches(&document)
        );
        assert!(
            !FilterExpression::new()
                .with_operator("cost", FilterOperator::Lt, json!(100))
                .matches(&document)
        );
        assert!(
            FilterExpression::new()
                .with_literal("location.city", json!("Boston"))
                .matches(&document)
        );
    }

    #[test]
    fn test_range_ignores_values_of_other_types() {
        let document = course();
        assert!(
            !FilterExpression::new()
                .with_operator("cost", FilterOperator::Gte, json!("100"))
                .matches(&document)
        );
    }

    #[test]
    fn test_literal_matches_array_element() {
        let document = course();
        assert!(
            FilterExpression::new()
                .with_literal("careers", json!("devops"))
                .matches(&document)
        );
        assert!(
            FilterExpression::new()
                .with_operator("careers", FilterOperator::In, json!(["design", "devops"]))
                .matches(&document)
        );
    }

    #[test]
    fn test_any_of_requires_one_branch() {
        let document = course();
        let mut filter = FilterExpression::new();
        filter.set_any_of(vec![
            FilterExpression::new().with_literal("id", json!("other")),
            FilterExpression::new().with_literal("id", json!("c1")),
        ]);
        assert!(filter.matches(&document));

        filter.set_any_of(vec![
            FilterExpression::new().with_literal("id", json!("other")),
        ]);
        assert!(!filter.matches(&document));
    }

    #[test]
    fn test_operator_tokens_parse() {
        assert_eq!("gte".parse::<FilterOperator>(), Ok(FilterOperator::Gte));
        assert_eq!("in".parse::<FilterOperator>(), Ok(FilterOperator::In));
        assert!("ne".parse::<FilterOperator>().is_err());
    }
}
