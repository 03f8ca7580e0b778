use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, format_timestamp},
    document::entities::compare_values,
    model::descriptors::{FieldKind, ModelDescriptor},
    query::{
        filter::{FieldPredicate, FilterExpression, FilterOperator},
        value_objects::RawQuery,
    },
};

/// A query-string key split into its field path and optional operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub path: String,
    pub operator: Option<FilterOperator>,
    /// Key ended in `[]`.
    pub multi: bool,
}

/// Parses `field`, `field[op]`, `field[op][]`, `field[]`, `a.b` and `a[b]`.
///
/// Only the last bracketed segment can be an operator, and only when it is
/// one of `lt`, `lte`, `gt`, `gte`, `eq`, `in`. Any other bracketed name
/// extends the field path.
pub fn parse_key(key: &str) -> Result<ParsedKey, CoreError> {
    let malformed = || CoreError::QueryTranslation(format!("malformed query key '{key}'"));

    let (head, mut rest) = match key.find('[') {
        Some(index) => (&key[..index], &key[index..]),
        None => (key, ""),
    };
    if head.is_empty() || head.contains(']') {
        return Err(malformed());
    }

    let mut segments: Vec<&str> = head.split('.').collect();
    let mut bracketed: Vec<&str> = Vec::new();
    let mut multi = false;

    while !rest.is_empty() {
        if multi {
            return Err(malformed());
        }
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let end = inner.find(']').ok_or_else(malformed)?;
        let name = &inner[..end];
        if name.contains('[') {
            return Err(malformed());
        }
        if name.is_empty() {
            multi = true;
        } else {
            bracketed.push(name);
        }
        rest = &inner[end + 1..];
    }

    let operator = match bracketed.last() {
        Some(last) => last.parse::<FilterOperator>().ok(),
        None => None,
    };
    if operator.is_some() {
        bracketed.pop();
    }
    segments.extend(bracketed);

    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(malformed());
    }

    Ok(ParsedKey {
        path: segments.join("."),
        operator,
        multi,
    })
}

#[derive(Debug, Default)]
struct FieldInputs {
    literals: Vec<String>,
    multi_literal: bool,
    operators: BTreeMap<FilterOperator, Vec<String>>,
}

/// Splits a raw value into its items. `[a,b]` is a list; `in` also splits
/// bare commas.
fn split_value(raw: &str, operator: Option<FilterOperator>) -> (Vec<String>, bool) {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return (items, true);
    }
    if operator == Some(FilterOperator::In) {
        let items = trimmed
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return (items, true);
    }
    (vec![raw.to_string()], false)
}

fn invalid_value(path: &str, raw: &str, expected: &str) -> CoreError {
    CoreError::InvalidQuery(format!(
        "invalid value '{raw}' for field '{path}': expected {expected}"
    ))
}

fn cast_number(path: &str, raw: &str) -> Result<Value, CoreError> {
    let raw = raw.trim();
    if let Ok(integer) = raw.parse::<i64>() {
        return Ok(Value::Number(integer.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| invalid_value(path, raw, "a number"))
}

fn cast_date(path: &str, raw: &str) -> Result<Value, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Value::String(format_timestamp(&date.with_timezone(&Utc))));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Value::String(format_timestamp(&naive.and_utc())))
        .ok_or_else(|| invalid_value(path, raw, "a date"))
}

/// Casts a raw query value according to the declared field kind. Unknown
/// fields keep the text.
pub fn cast_value(model: &ModelDescriptor, path: &str, raw: &str) -> Result<Value, CoreError> {
    match model.field_kind(path) {
        Some(FieldKind::Number | FieldKind::NumberList) => cast_number(path, raw),
        Some(FieldKind::Boolean) => match raw.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(invalid_value(path, other, "true or false")),
        },
        Some(FieldKind::Date) => cast_date(path, raw),
        Some(FieldKind::Id | FieldKind::Reference) => Uuid::parse_str(raw.trim())
            .map(|id| Value::String(id.to_string()))
            .map_err(|_| invalid_value(path, raw, "a UUID")),
        Some(FieldKind::Text | FieldKind::TextList | FieldKind::Object) | None => {
            Ok(Value::String(raw.to_string()))
        }
    }
}

fn cast_all(model: &ModelDescriptor, path: &str, raw: &[String]) -> Result<Vec<Value>, CoreError> {
    raw.iter().map(|item| cast_value(model, path, item)).collect()
}

fn collapse(operator: FilterOperator, mut values: Vec<Value>) -> Option<Value> {
    values.sort_by(|a, b| compare_values(Some(a), Some(b)));
    if operator.is_upper_bound() {
        values.pop()
    } else {
        values.into_iter().next()
    }
}

fn build_predicate(
    model: &ModelDescriptor,
    path: &str,
    inputs: FieldInputs,
) -> Result<Option<FieldPredicate>, CoreError> {
    if !inputs.literals.is_empty() && !inputs.operators.is_empty() {
        return Err(CoreError::QueryTranslation(format!(
            "field '{path}' mixes a plain value with comparison operators"
        )));
    }

    if !inputs.literals.is_empty() {
        let mut values = cast_all(model, path, &inputs.literals)?;
        if values.len() == 1 && !inputs.multi_literal {
            return Ok(values.pop().map(FieldPredicate::Literal));
        }
        return Ok(Some(FieldPredicate::operator(
            FilterOperator::In,
            Value::Array(values),
        )));
    }

    let has_in = inputs.operators.contains_key(&FilterOperator::In);
    let mut operators = BTreeMap::new();
    for (operator, raw) in inputs.operators {
        let mut values = cast_all(model, path, &raw)?;
        match operator {
            FilterOperator::In => {
                operators.insert(FilterOperator::In, Value::Array(values));
            }
            FilterOperator::Eq if values.len() > 1 => {
                if has_in {
                    return Err(CoreError::QueryTranslation(format!(
                        "field '{path}' has conflicting set operators"
                    )));
                }
                operators.insert(FilterOperator::In, Value::Array(values));
            }
            FilterOperator::Eq => {
                if let Some(value) = values.pop() {
                    operators.insert(FilterOperator::Eq, value);
                }
            }
            range => {
                if let Some(bound) = collapse(range, values) {
                    operators.insert(range, bound);
                }
            }
        }
    }

    if operators.is_empty() {
        return Ok(None);
    }
    Ok(Some(FieldPredicate::Operators(operators)))
}

/// Translates request query pairs into a filter expression, ignoring the
/// `reserved` directive keys.
pub fn translate_filter(
    model: &ModelDescriptor,
    query: &RawQuery,
    reserved: &[&str],
) -> Result<FilterExpression, CoreError> {
    let mut fields: BTreeMap<String, FieldInputs> = BTreeMap::new();

    for (key, raw) in query {
        if reserved.contains(&key.as_str()) {
            continue;
        }
        let parsed = parse_key(key)?;
        let (items, listed) = split_value(raw, parsed.operator);
        let inputs = fields.entry(parsed.path).or_default();

        match parsed.operator {
            Some(operator) => inputs.operators.entry(operator).or_default().extend(items),
            None => {
                inputs.multi_literal |= listed || parsed.multi || !inputs.literals.is_empty();
                inputs.literals.extend(items);
            }
        }
    }

    let mut filter = FilterExpression::new();
    for (path, inputs) in fields {
        if let Some(predicate) = build_predicate(model, &path, inputs)? {
            filter.constrain(path, predicate);
        }
    }
    Ok(filter)
}
