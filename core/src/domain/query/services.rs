use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    document::{
        Document, DocumentRepository,
        entities::{ID_FIELD, document_id, set_at_path, value_at_path},
        value_objects::{FindQuery, Projection, SortSpec},
    },
    model::descriptors::{COURSE, ModelDescriptor, ModelType, Population, REVIEW},
    query::{
        aggregation::RatingDistribution,
        directives::{DirectiveSet, QueryDirectives},
        envelope::ResponseEnvelope,
        filter::{FieldPredicate, FilterExpression, FilterOperator},
        pagination::PaginationDescriptor,
        ports::ResultsService,
        translator::translate_filter,
        value_objects::{AdvancedResultsInput, GetDocumentInput, ReviewResultsInput},
    },
};

const CATEGORY_FIELD: &str = "category";
const RATING_FIELD: &str = "rating";

fn selection(select: &[&str]) -> Option<Projection> {
    (!select.is_empty()).then(|| Projection::include(select.iter().copied()))
}

fn id_values<'a>(ids: impl IntoIterator<Item = &'a str>) -> Value {
    let unique: BTreeSet<&str> = ids.into_iter().collect();
    Value::Array(
        unique
            .into_iter()
            .map(|id| Value::String(id.to_string()))
            .collect(),
    )
}

impl<D> Service<D>
where
    D: DocumentRepository,
{
    /// Ids of bootcamps offering at least one course in `category`.
    async fn bootcamps_in_category(&self, category: &str) -> Result<Value, CoreError> {
        let filter = FilterExpression::new()
            .with_literal(CATEGORY_FIELD, Value::String(category.to_string()));
        let courses = self
            .document_repository
            .find(
                COURSE.collection,
                FindQuery::new(filter).with_projection(Some(Projection::include(["bootcamp"]))),
            )
            .await?;

        Ok(id_values(
            courses
                .iter()
                .filter_map(|course| course.get("bootcamp").and_then(Value::as_str)),
        ))
    }

    async fn populate(
        &self,
        mut documents: Vec<Document>,
        populate: &[Population],
    ) -> Result<Vec<Document>, CoreError> {
        for population in populate {
            match *population {
                Population::Reference { path, model, select } => {
                    let ids = id_values(
                        documents
                            .iter()
                            .filter_map(|document| value_at_path(document, path))
                            .filter_map(Value::as_str),
                    );
                    if ids.as_array().is_none_or(Vec::is_empty) {
                        continue;
                    }

                    let filter =
                        FilterExpression::new().with_operator(ID_FIELD, FilterOperator::In, ids);
                    let related: HashMap<String, Document> = self
                        .document_repository
                        .find(
                            model.collection,
                            FindQuery::new(filter).with_projection(selection(select)),
                        )
                        .await?
                        .into_iter()
                        .filter_map(|related| {
                            let id = document_id(&related)?.to_string();
                            Some((id, related))
                        })
                        .collect();

                    for document in &mut documents {
                        let Some(id) = value_at_path(document, path)
                            .and_then(Value::as_str)
                            .map(str::to_string)
                        else {
                            continue;
                        };
                        let expanded = related
                            .get(&id)
                            .cloned()
                            .map(Value::Object)
                            .unwrap_or(Value::Null);
                        set_at_path(document, path, expanded);
                    }
                }
                Population::Virtual {
                    path,
                    model,
                    foreign_field,
                    select,
                } => {
                    let ids = id_values(documents.iter().filter_map(document_id));
                    let mut projection = selection(select);
                    if let Some(projection) = projection.as_mut() {
                        projection.ensure(foreign_field);
                    }

                    let filter = FilterExpression::new().with_operator(
                        foreign_field,
                        FilterOperator::In,
                        ids,
                    );
                    let mut query = FindQuery::new(filter).with_projection(projection);
                    query.sort = vec![SortSpec::asc("createdAt")];

                    let mut grouped: HashMap<String, Vec<Value>> = HashMap::new();
                    for related in self.document_repository.find(model.collection, query).await? {
                        if let Some(owner) = value_at_path(&related, foreign_field)
                            .and_then(Value::as_str)
                            .map(str::to_string)
                        {
                            grouped.entry(owner).or_default().push(Value::Object(related));
                        }
                    }

                    for document in &mut documents {
                        let children = document_id(document)
                            .and_then(|id| grouped.remove(id))
                            .unwrap_or_default();
                        set_at_path(document, path, Value::Array(children));
                    }
                }
            }
        }

        Ok(documents)
    }

    /// Count plus one window over the same filter, then population and
    /// pagination.
    async fn collect_results(
        &self,
        model: &ModelDescriptor,
        filter: FilterExpression,
        directives: &QueryDirectives,
        populate: &[Population],
    ) -> Result<ResponseEnvelope, CoreError> {
        let query = FindQuery {
            filter,
            sort: directives.sort.clone(),
            window: Some(directives.page.window()?),
            projection: directives.projection.clone(),
        };

        let slice = self
            .document_repository
            .find_page(model.collection, query)
            .await?;
        let pagination = PaginationDescriptor::compute(directives.page, slice.total);
        let data = self.populate(slice.documents, populate).await?;

        debug!(
            total = slice.total,
            returned = data.len(),
            page = directives.page.number,
            "collected {} results",
            model.name
        );

        Ok(ResponseEnvelope::new(slice.total, pagination, data))
    }
}

impl<D> ResultsService for Service<D>
where
    D: DocumentRepository,
{
    #[instrument(skip(self, input), fields(model = input.model.name))]
    async fn advanced_results(
        &self,
        input: AdvancedResultsInput,
    ) -> Result<ResponseEnvelope, CoreError> {
        let set = DirectiveSet::Standard;
        let directives =
            QueryDirectives::parse(input.model, &input.query, set, &self.query_config)?;
        let mut filter = translate_filter(input.model, &input.query, set.reserved_keys())?;

        if let Some(category) = &input.category {
            match input.model_type {
                Some(ModelType::Bootcamp) => {
                    let ids = self.bootcamps_in_category(category).await?;
                    filter.constrain(ID_FIELD, FieldPredicate::operator(FilterOperator::In, ids));
                }
                Some(ModelType::Course) => filter.constrain(
                    CATEGORY_FIELD,
                    FieldPredicate::operator(FilterOperator::Eq, Value::String(category.clone())),
                ),
                None => {
                    return Err(CoreError::QueryTranslation(
                        "a category lookup needs a model type".to_string(),
                    ));
                }
            }
        }

        if let Some(parent) = &input.parent {
            filter.constrain(
                parent.field,
                FieldPredicate::Literal(Value::String(parent.id.to_string())),
            );
        }

        self.collect_results(input.model, filter, &directives, &input.populate)
            .await
    }

    #[instrument(skip(self, input), fields(target = ?input.target))]
    async fn advanced_review_results(
        &self,
        input: ReviewResultsInput,
    ) -> Result<ResponseEnvelope, CoreError> {
        let target = input.target.ok_or(CoreError::MissingReviewTarget)?;

        let set = DirectiveSet::Review;
        let directives = QueryDirectives::parse(&REVIEW, &input.query, set, &self.query_config)?;
        let mut filter = translate_filter(&REVIEW, &input.query, set.reserved_keys())?;

        let target_id = Value::String(target.id().to_string());
        filter.set_any_of(vec![
            FilterExpression::new().with_literal("bootcamp", target_id.clone()),
            FilterExpression::new().with_literal("course", target_id),
        ]);

        let percents = if directives.percents {
            let ratings = self
                .document_repository
                .find(
                    REVIEW.collection,
                    FindQuery::new(filter.clone())
                        .with_projection(Some(Projection::include([RATING_FIELD]))),
                )
                .await?;

            Some(RatingDistribution::from_ratings(ratings.iter().map(
                |review| {
                    review
                        .get(RATING_FIELD)
                        .and_then(Value::as_f64)
                        .unwrap_or(f64::NAN)
                },
            )))
        } else {
            None
        };

        let envelope = self
            .collect_results(&REVIEW, filter, &directives, &input.populate)
            .await?;
        Ok(envelope.with_percents(percents))
    }

    #[instrument(skip(self, input), fields(model = input.model.name, id = %input.id))]
    async fn get_document(&self, input: GetDocumentInput) -> Result<Document, CoreError> {
        let document = self
            .document_repository
            .get_by_id(input.model.collection, input.id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.populate(vec![document], &input.populate)
            .await?
            .pop()
            .ok_or(CoreError::NotFound)
    }
}
