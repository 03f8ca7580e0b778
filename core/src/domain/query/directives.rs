use crate::domain::{
    common::{QueryConfig, entities::app_errors::CoreError},
    document::value_objects::{Projection, SortSpec, Window},
    model::descriptors::ModelDescriptor,
    query::value_objects::RawQuery,
};

pub const SELECT: &str = "select";
pub const SORT: &str = "sort";
pub const PAGE: &str = "page";
pub const LIMIT: &str = "limit";
pub const PERCENTS: &str = "percents";

const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Which keys of a request are directives rather than filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveSet {
    Standard,
    Review,
}

impl DirectiveSet {
    pub fn reserved_keys(&self) -> &'static [&'static str] {
        match self {
            DirectiveSet::Standard => &[SELECT, SORT, PAGE, LIMIT],
            DirectiveSet::Review => &[SELECT, SORT, PAGE, LIMIT, PERCENTS],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based.
    pub number: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn skip(&self) -> Result<u64, CoreError> {
        (self.number - 1)
            .checked_mul(self.limit)
            .ok_or_else(|| CoreError::InvalidQuery(format!("page {} is out of range", self.number)))
    }

    pub fn window(&self) -> Result<Window, CoreError> {
        Ok(Window {
            skip: self.skip()?,
            limit: self.limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryDirectives {
    pub projection: Option<Projection>,
    pub sort: Vec<SortSpec>,
    pub page: PageRequest,
    pub percents: bool,
}

fn last_value<'a>(query: &'a RawQuery, key: &str) -> Option<&'a str> {
    query
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|part| !part.is_empty())
}

fn parse_projection(raw: Option<&str>) -> Result<Option<Projection>, CoreError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let fields: Vec<&str> = split_list(raw).collect();
    if fields.is_empty() {
        return Ok(None);
    }

    let excluded = fields.iter().filter(|f| f.starts_with('-')).count();
    if excluded == fields.len() {
        Ok(Some(Projection::Exclude(
            fields
                .iter()
                .map(|f| f.trim_start_matches('-').to_string())
                .collect(),
        )))
    } else if excluded == 0 {
        Ok(Some(Projection::include(fields)))
    } else {
        Err(CoreError::InvalidQuery(
            "select cannot mix included and excluded fields".to_string(),
        ))
    }
}

/// Parses "field1,-field2" into sort keys, rejecting fields the model does
/// not declare.
fn parse_sort(model: &ModelDescriptor, raw: Option<&str>) -> Result<Vec<SortSpec>, CoreError> {
    let mut sort = Vec::new();
    for part in raw.map(split_list).into_iter().flatten() {
        let spec = match part.strip_prefix('-') {
            Some(field) => SortSpec::desc(field),
            None => SortSpec::asc(part),
        };
        if !model.has_field(&spec.field) {
            return Err(CoreError::InvalidQuery(format!(
                "cannot sort {} by unknown field '{}'",
                model.name, spec.field
            )));
        }
        sort.push(spec);
    }

    if sort.is_empty() {
        sort.push(SortSpec::desc(DEFAULT_SORT_FIELD));
    }
    Ok(sort)
}

fn parse_positive(key: &str, raw: Option<&str>, default: u64) -> Result<u64, CoreError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| {
                CoreError::InvalidQuery(format!("{key} must be a positive integer, got '{raw}'"))
            }),
    }
}

pub fn parse_flag(key: &str, raw: Option<&str>) -> Result<bool, CoreError> {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "false" | "0" | "no" | "off") => Ok(false),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some(other) => Err(CoreError::InvalidQuery(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

impl QueryDirectives {
    pub fn parse(
        model: &ModelDescriptor,
        query: &RawQuery,
        set: DirectiveSet,
        config: &QueryConfig,
    ) -> Result<Self, CoreError> {
        let number = parse_positive(PAGE, last_value(query, PAGE), 1)?;
        let default_limit = config.default_limit.max(1);
        let limit = parse_positive(LIMIT, last_value(query, LIMIT), default_limit)?
            .min(config.max_limit.max(1));

        let percents = match set {
            DirectiveSet::Review => parse_flag(PERCENTS, last_value(query, PERCENTS))?,
            DirectiveSet::Standard => false,
        };

        let page = PageRequest { number, limit };
        page.skip()?;

        Ok(Self {
            projection: parse_projection(last_value(query, SELECT))?,
            sort: parse_sort(model, last_value(query, SORT))?,
            page,
            percents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::descriptors::{COURSE, REVIEW};

    fn query(pairs: &[(&str, &str)]) -> RawQuery {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse(pairs: &[(&str, &str)]) -> Result<QueryDirectives, CoreError> {
        QueryDirectives::parse(
            &COURSE,
            &query(pairs),
            DirectiveSet::Standard,
            &QueryConfig::default(),
        )
    }

    #[test]
    fn test_defaults() {
        let directives = parse(&[]).unwrap();
        assert_eq!(directives.page, PageRequest { number: 1, limit: 5 });
        assert_eq!(directives.sort, vec![SortSpec::desc("createdAt")]);
        assert_eq!(directives.projection, None);
        assert!(!directives.percents);
    }

    #[test]
    fn test_select_and_sort() {
        let directives = parse(&[("select", "title,cost"), ("sort", "-cost,title")]).unwrap();
        assert_eq!(
            directives.projection,
            Some(Projection::include(["title", "cost"]))
        );
        assert_eq!(
            directives.sort,
            vec![SortSpec::desc("cost"), SortSpec::asc("title")]
        );

        let excluded = parse(&[("select", "-description,-video")]).unwrap();
        assert_eq!(
            excluded.projection,
            Some(Projection::Exclude(vec![
                "description".to_string(),
                "video".to_string()
            ]))
        );
    }

    #[test]
    fn test_mixed_select_is_rejected() {
        assert!(matches!(
            parse(&[("select", "title,-cost")]),
            Err(CoreError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        assert!(matches!(
            parse(&[("sort", "-price")]),
            Err(CoreError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_page_and_limit_must_be_positive() {
        for (key, value) in [("page", "0"), ("page", "-1"), ("page", "two"), ("limit", "0")] {
            assert!(
                matches!(parse(&[(key, value)]), Err(CoreError::InvalidQuery(_))),
                "{key}={value}"
            );
        }
    }

    #[test]
    fn test_limit_is_clamped_and_skip_computed() {
        let directives = parse(&[("page", "3"), ("limit", "1000")]).unwrap();
        assert_eq!(directives.page.limit, 100);
        assert_eq!(directives.page.skip().unwrap(), 200);
    }

    #[test]
    fn test_zero_default_limit_falls_back_to_one() {
        let config = QueryConfig {
            default_limit: 0,
            max_limit: 100,
        };
        let directives =
            QueryDirectives::parse(&COURSE, &query(&[]), DirectiveSet::Standard, &config)
                .unwrap();
        assert_eq!(directives.page, PageRequest { number: 1, limit: 1 });
        assert_eq!(directives.page.skip().unwrap(), 0);
    }

    #[test]
    fn test_huge_page_overflows_to_invalid_query() {
        assert!(matches!(
            parse(&[("page", &u64::MAX.to_string()), ("limit", "10")]),
            Err(CoreError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_percents_only_in_review_set() {
        let review = QueryDirectives::parse(
            &REVIEW,
            &query(&[("percents", "yes")]),
            DirectiveSet::Review,
            &QueryConfig::default(),
        )
        .unwrap();
        assert!(review.percents);

        assert!(matches!(
            QueryDirectives::parse(
                &REVIEW,
                &query(&[("percents", "maybe")]),
                DirectiveSet::Review,
                &QueryConfig::default(),
            ),
            Err(CoreError::InvalidQuery(_))
        ));

        assert!(!parse(&[("percents", "true")]).unwrap().percents);
        assert!(!DirectiveSet::Standard.reserved_keys().contains(&PERCENTS));
    }
}
