use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tabular_lens::processing::{evaluate, sanitize, FilterCondition, FilterOperator, FilterSet};
use tabular_lens::types::{DataSet, DataType, Field, Schema, Value};

fn synthetic_dataset(rows: usize) -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("label", DataType::Utf8),
        Field::new("value", DataType::Float64),
    ]);
    let rows = (0..rows)
        .map(|i| {
            vec![
                Value::Int64(i as i64),
                Value::Utf8(format!("item-{}", i % 97)),
                Value::Float64((i % 1000) as f64 - 100.0),
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

fn bench_evaluate(c: &mut Criterion) {
    let ds = synthetic_dataset(100_000);
    let filters = FilterSet::from_conditions([
        FilterCondition::new("label", FilterOperator::Contains, "ITEM-1"),
        FilterCondition::new("value", FilterOperator::GreaterThan, "0"),
        FilterCondition::new("id", FilterOperator::LessThan, "90000"),
    ]);

    c.bench_function("evaluate_three_conditions_100k", |b| {
        b.iter(|| evaluate(black_box(&ds), black_box(&filters)).unwrap())
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let series: Vec<f64> = (0..100_000)
        .map(|i| match i % 50 {
            0 => f64::NAN,
            1 => f64::INFINITY,
            n => n as f64 - 10.0,
        })
        .collect();

    c.bench_function("sanitize_100k", |b| b.iter(|| sanitize(black_box(&series))));
}

criterion_group!(benches, bench_evaluate, bench_sanitize);
criterion_main!(benches);
