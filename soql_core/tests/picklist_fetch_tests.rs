//! Tests for resolving picklist fetches through an async source

use std::collections::HashMap;

use soql_core::{
    DataType, FetchError, FieldDescriptor, FieldMetadata, FilterRows, Operator, PicklistOption,
    PicklistSource, ResolutionOutcome,
};

struct StaticSource {
    values: HashMap<String, Vec<PicklistOption>>,
}

impl StaticSource {
    fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(
            "Opportunity.StageName".to_string(),
            vec![
                PicklistOption::new("Prospecting", "Prospecting"),
                PicklistOption::new("Closed Won", "Closed Won"),
            ],
        );
        Self { values }
    }
}

impl PicklistSource for StaticSource {
    async fn picklist_values(
        &self,
        object_type: &str,
        field: &str,
    ) -> Result<Vec<PicklistOption>, FetchError> {
        let key = format!("{}.{}", object_type, field);
        self.values
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::new(format!("no picklist for {}", key)))
    }
}

fn metadata() -> FieldMetadata {
    FieldMetadata::new(
        "Opportunity",
        vec![
            FieldDescriptor::new("Stage", "StageName", DataType::Picklist),
            FieldDescriptor::new("Type", "Type", DataType::Picklist),
            FieldDescriptor::new("Amount", "Amount", DataType::Currency),
        ],
    )
}

#[tokio::test]
async fn test_fetch_enables_value_input() {
    let source = StaticSource::new();
    let mut rows = FilterRows::new();
    let request = rows
        .on_field_change(0, "StageName", &metadata())
        .unwrap()
        .expect("picklist rows request values");
    assert!(rows.get(0).unwrap().value_disabled());

    let resolution = request.resolve(&source).await;
    assert_eq!(rows.apply_picklist(resolution), ResolutionOutcome::Applied);

    let row = rows.get(0).unwrap();
    assert!(!row.value_disabled());
    assert_eq!(row.options().len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_reported() {
    let source = StaticSource::new();
    let mut rows = FilterRows::new();
    let request = rows.on_field_change(0, "Type", &metadata()).unwrap().unwrap();

    let outcome = rows.apply_picklist(request.resolve(&source).await);

    assert!(matches!(outcome, ResolutionOutcome::Failed(_)));
    assert!(rows.get(0).unwrap().value_disabled());
}

#[tokio::test]
async fn test_late_completion_does_not_touch_new_field() {
    let source = StaticSource::new();
    let mut rows = FilterRows::new();
    let request = rows.on_field_change(0, "StageName", &metadata()).unwrap().unwrap();

    // The user switches the row before the fetch resolves
    rows.on_field_change(0, "Amount", &metadata()).unwrap();
    rows.set_operator(0, Operator::GreaterThan).unwrap();

    let outcome = rows.apply_picklist(request.resolve(&source).await);

    assert_eq!(outcome, ResolutionOutcome::Stale);
    let row = rows.get(0).unwrap();
    assert_eq!(row.data_type(), Some(DataType::Currency));
    assert!(row.options().is_empty());
}

#[tokio::test]
async fn test_concurrent_fetches_land_on_their_rows() {
    let source = std::sync::Arc::new(StaticSource::new());
    let mut rows = FilterRows::new();
    rows.add_row();
    let first = rows.on_field_change(0, "StageName", &metadata()).unwrap().unwrap();
    let second = rows.on_field_change(1, "StageName", &metadata()).unwrap().unwrap();

    let handles: Vec<_> = [second, first]
        .into_iter()
        .map(|request| {
            let source = source.clone();
            tokio::spawn(async move { request.resolve(source.as_ref()).await })
        })
        .collect();

    for handle in handles {
        let resolution = handle.await.unwrap();
        assert_eq!(rows.apply_picklist(resolution), ResolutionOutcome::Applied);
    }

    assert!(rows.iter().all(|row| !row.value_disabled()));
}
