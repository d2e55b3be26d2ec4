use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonschema::Draft;
use serde_json::{json, Value};

fn book_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "isbn": { "type": "string" },
            "amazon_url": { "type": "string", "format": "uri" },
            "author": { "type": "string" },
            "language": { "type": "string" },
            "pages": { "type": "integer" },
            "publisher": { "type": "string" },
            "title": { "type": "string" },
            "year": { "type": "integer" }
        },
        "required": [
            "isbn",
            "amazon_url",
            "author",
            "language",
            "pages",
            "publisher",
            "title",
            "year"
        ]
    })
}

fn sample_payload() -> Value {
    json!({
        "isbn": "0691161518",
        "amazon_url": "http://a.co/eobPtX2",
        "author": "Matthew Lane",
        "language": "english",
        "pages": 264,
        "publisher": "Princeton University Press",
        "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
        "year": 2017
    })
}

fn benchmark_schema_compile(c: &mut Criterion) {
    let schema = book_schema();

    c.bench_function("compile_book_schema", |b| {
        b.iter(|| {
            jsonschema::options()
                .with_draft(Draft::Draft7)
                .should_validate_formats(true)
                .build(black_box(&schema))
                .unwrap()
        })
    });
}

fn benchmark_validate_valid_payload(c: &mut Criterion) {
    let schema = book_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(true)
        .build(&schema)
        .unwrap();
    let payload = sample_payload();

    c.bench_function("validate_valid_payload", |b| {
        b.iter(|| validator.is_valid(black_box(&payload)))
    });
}

fn benchmark_collect_violations(c: &mut Criterion) {
    let schema = book_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(true)
        .build(&schema)
        .unwrap();

    let mut payload = sample_payload();
    payload["amazon_url"] = json!("some string");
    payload["year"] = json!("2020");
    payload.as_object_mut().unwrap().remove("publisher");

    c.bench_function("collect_violations", |b| {
        b.iter(|| {
            let messages: Vec<String> = validator
                .iter_errors(black_box(&payload))
                .map(|e| e.to_string())
                .collect();
            messages
        })
    });
}

criterion_group!(
    benches,
    benchmark_schema_compile,
    benchmark_validate_valid_payload,
    benchmark_collect_violations
);
criterion_main!(benches);
