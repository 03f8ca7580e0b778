use sea_orm::{DatabaseBackend, Statement, Value as SqlValue};
use serde_json::Value;

use crate::domain::{
    document::value_objects::{FindQuery, SortDirection, SortSpec, Window},
    query::filter::{FieldPredicate, FilterExpression, FilterOperator},
};

/// Renders filter expressions as parameterized SQL over the `documents`
/// table. Every user-supplied token is bound, never inlined.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    values: Vec<SqlValue>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, value: impl Into<SqlValue>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    fn bind_json(&mut self, value: &Value) -> String {
        format!("{}::jsonb", self.bind(value.clone()))
    }

    fn path(&mut self, path: &str) -> String {
        let segments: Vec<String> = path
            .split('.')
            .map(|segment| format!("{}::text", self.bind(segment.to_string())))
            .collect();
        format!("jsonb_extract_path(body, {})", segments.join(", "))
    }

    fn equality(field: &str, value: &str) -> String {
        format!("({field} = {value} OR {field} @> jsonb_build_array({value}))")
    }

    fn comparison(field: &str, operator: FilterOperator, value: &str) -> String {
        let symbol = match operator {
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Eq | FilterOperator::In => "=",
        };
        format!(
            "((jsonb_typeof({field}) = jsonb_typeof({value}) AND {field} {symbol} {value}) \
             OR EXISTS (SELECT 1 FROM jsonb_array_elements(CASE WHEN jsonb_typeof({field}) = 'array' \
             THEN {field} ELSE '[]'::jsonb END) AS element(value) \
             WHERE jsonb_typeof(element.value) = jsonb_typeof({value}) AND element.value {symbol} {value}))"
        )
    }

    fn predicate(&mut self, path: &str, predicate: &FieldPredicate) -> String {
        let field = self.path(path);
        match predicate {
            FieldPredicate::Literal(Value::Null) => {
                format!("({field} IS NULL OR {field} = 'null'::jsonb)")
            }
            FieldPredicate::Literal(value) => {
                let value = self.bind_json(value);
                Self::equality(&field, &value)
            }
            FieldPredicate::Operators(operators) => {
                let clauses: Vec<String> = operators
                    .iter()
                    .map(|(operator, value)| match (operator, value) {
                        (FilterOperator::In, Value::Array(_)) => {
                            let options = self.bind_json(value);
                            format!(
                                "EXISTS (SELECT 1 FROM jsonb_array_elements({options}) AS candidate(value) \
                                 WHERE {field} = candidate.value OR {field} @> jsonb_build_array(candidate.value))"
                            )
                        }
                        (FilterOperator::Eq | FilterOperator::In, value) => {
                            let value = self.bind_json(value);
                            Self::equality(&field, &value)
                        }
                        (range, value) => {
                            let value = self.bind_json(value);
                            Self::comparison(&field, *range, &value)
                        }
                    })
                    .collect();
                format!("({})", clauses.join(" AND "))
            }
        }
    }

    /// `WHERE` body for the expression; `TRUE` when empty.
    pub fn filter(&mut self, filter: &FilterExpression) -> String {
        let mut clauses: Vec<String> = filter
            .conditions()
            .map(|(path, predicate)| self.predicate(path, predicate))
            .collect();

        if !filter.any_of().is_empty() {
            let branches: Vec<String> = filter
                .any_of()
                .iter()
                .map(|branch| format!("({})", self.filter(branch)))
                .collect();
            clauses.push(format!("({})", branches.join(" OR ")));
        }

        if clauses.is_empty() {
            "TRUE".to_string()
        } else {
            clauses.join(" AND ")
        }
    }

    fn order_by(&mut self, sort: &[SortSpec]) -> String {
        let mut keys: Vec<String> = sort
            .iter()
            .map(|spec| {
                let field = self.path(&spec.field);
                match spec.direction {
                    SortDirection::Asc => format!("{field} ASC NULLS FIRST"),
                    SortDirection::Desc => format!("{field} DESC NULLS LAST"),
                }
            })
            .collect();
        keys.push("id ASC".to_string());
        keys.join(", ")
    }

    fn window(&mut self, window: Option<Window>) -> String {
        match window {
            Some(window) => {
                let offset = self.bind(i64::try_from(window.skip).unwrap_or(i64::MAX));
                let limit = self.bind(i64::try_from(window.limit).unwrap_or(i64::MAX));
                format!(" OFFSET {offset} LIMIT {limit}")
            }
            None => String::new(),
        }
    }

    fn finish(self, sql: String) -> Statement {
        Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, self.values)
    }
}

pub fn select_statement(collection: &str, query: &FindQuery) -> Statement {
    let mut builder = SqlBuilder::new();
    let collection = builder.bind(collection.to_string());
    let filter = builder.filter(&query.filter);
    let order_by = builder.order_by(&query.sort);
    let window = builder.window(query.window);

    let sql = format!(
        "SELECT body FROM documents WHERE collection = {collection} AND ({filter}) ORDER BY {order_by}{window}"
    );
    builder.finish(sql)
}

pub fn count_statement(collection: &str, filter: &FilterExpression) -> Statement {
    let mut builder = SqlBuilder::new();
    let collection = builder.bind(collection.to_string());
    let filter = builder.filter(filter);

    let sql = format!(
        "SELECT COUNT(*)::bigint AS count FROM documents WHERE collection = {collection} AND ({filter})"
    );
    builder.finish(sql)
}
