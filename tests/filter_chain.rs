use tabular_lens::processing::{evaluate, sanitize, FilterCondition, FilterOperator, FilterSet};
use tabular_lens::types::{DataSet, DataType, Field, Schema, Value};
use tabular_lens::{ErrorOrigin, FilterError};

fn ages_dataset() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("age", DataType::Int64),
        Field::new("fruit", DataType::Utf8),
    ]);
    let rows = [(3, "Apple"), (8, "apple"), (12, "Banana"), (20, "Cherry")]
        .into_iter()
        .map(|(age, fruit)| vec![Value::Int64(age), Value::Utf8(fruit.to_string())])
        .collect();
    DataSet::new(schema, rows)
}

fn cond(column: &str, operator: FilterOperator, raw: &str) -> FilterCondition {
    FilterCondition::new(column, operator, raw)
}

#[test]
fn filtering_never_adds_rows_or_changes_columns() {
    let ds = ages_dataset();
    let sets = [
        FilterSet::new(),
        FilterSet::from_conditions([cond("age", FilterOperator::GreaterThan, "5")]),
        FilterSet::from_conditions([cond("fruit", FilterOperator::Contains, "an")]),
        FilterSet::from_conditions([
            cond("fruit", FilterOperator::Equals, "Cherry"),
            cond("age", FilterOperator::LessThan, "100"),
        ]),
    ];
    for filters in &sets {
        let out = evaluate(&ds, filters).unwrap();
        assert!(out.row_count() <= ds.row_count());
        assert_eq!(out.schema, ds.schema);
    }
}

#[test]
fn surviving_rows_keep_their_order() {
    let ds = ages_dataset();
    let out = evaluate(
        &ds,
        &FilterSet::from_conditions([cond("age", FilterOperator::GreaterThan, "5")]),
    )
    .unwrap();
    assert_eq!(out.rows, ds.rows[1..].to_vec());
}

#[test]
fn contains_matches_regardless_of_case() {
    let ds = ages_dataset();
    let out = evaluate(
        &ds,
        &FilterSet::from_conditions([cond("fruit", FilterOperator::Contains, "APP")]),
    )
    .unwrap();
    let fruits: Vec<String> = out.rows.iter().map(|r| r[1].to_string()).collect();
    assert_eq!(fruits, vec!["Apple", "apple"]);
}

#[test]
fn greater_than_with_text_value_raises_conversion_error() {
    let ds = ages_dataset();
    let err = evaluate(
        &ds,
        &FilterSet::from_conditions([cond("age", FilterOperator::GreaterThan, "abc")]),
    )
    .unwrap_err();
    match err {
        FilterError::ValueConversion { column, raw, origin, .. } => {
            assert_eq!(column, "age");
            assert_eq!(raw, "abc");
            assert_eq!(
                origin,
                ErrorOrigin::Condition {
                    index: 0,
                    operator: FilterOperator::GreaterThan
                }
            );
        }
        other => panic!("expected ValueConversion, got {other:?}"),
    }
}

#[test]
fn conditions_on_different_columns_narrow_in_sequence() {
    let ds = ages_dataset();
    let filters = FilterSet::from_conditions([
        cond("age", FilterOperator::GreaterThan, "10"),
        cond("fruit", FilterOperator::Contains, "apple"),
    ]);
    assert!(evaluate(&ds, &filters).unwrap().rows.is_empty());
}

#[test]
fn sequential_bounds_on_one_column_collapse_to_the_last() {
    let ds = ages_dataset();
    let mut filters = FilterSet::new();
    filters.insert(cond("age", FilterOperator::GreaterThan, "10"));
    filters.insert(cond("age", FilterOperator::LessThan, "5"));

    // Only `age < 5` is left in the set.
    assert_eq!(filters.len(), 1);
    let out = evaluate(&ds, &filters).unwrap();
    assert_eq!(out.rows, vec![ds.rows[0].clone()]);
}

#[test]
fn applying_both_bounds_in_turn_leaves_nothing() {
    let ds = ages_dataset();
    let first = evaluate(
        &ds,
        &FilterSet::from_conditions([cond("age", FilterOperator::GreaterThan, "10")]),
    )
    .unwrap();
    let second = evaluate(
        &first,
        &FilterSet::from_conditions([cond("age", FilterOperator::LessThan, "5")]),
    )
    .unwrap();
    assert!(second.rows.is_empty());
}

#[test]
fn failing_condition_aborts_without_partial_result() {
    let ds = ages_dataset();
    let filters = FilterSet::from_conditions([
        cond("age", FilterOperator::GreaterThan, "10"),
        cond("fruit", FilterOperator::LessThan, "3"),
    ]);
    let err = evaluate(&ds, &filters).unwrap_err();
    assert_eq!(
        err.origin(),
        ErrorOrigin::Condition {
            index: 1,
            operator: FilterOperator::LessThan
        }
    );
    assert_eq!(ds.row_count(), 4);
}

#[test]
fn sanitizer_examples() {
    assert_eq!(
        sanitize(&[-5.0, 0.0, 2.0, f64::NAN, f64::INFINITY]),
        vec![0.2, 0.2, 2.0]
    );
    assert_eq!(sanitize(&[f64::NAN, f64::NEG_INFINITY]), vec![1.0]);
    let floored = sanitize(&[-1.0, -2.0, 0.0]);
    assert_eq!(floored.len(), 3);
    assert!(floored.iter().all(|v| (v - 1e-11).abs() < 1e-20));
}
