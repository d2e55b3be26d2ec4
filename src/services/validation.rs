use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, ValidationError};
use serde_json::{json, Value};

// Schema field declaration order; violation messages are reported in this order.
const FIELDS: [&str; 8] = [
    "isbn",
    "amazon_url",
    "author",
    "language",
    "pages",
    "publisher",
    "title",
    "year",
];

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

fn violated_field(err: &ValidationError) -> Option<String> {
    let path = err.instance_path.to_string();
    if let Some(rest) = path.strip_prefix('/') {
        if !rest.is_empty() {
            let field = rest.split('/').next().unwrap_or(rest);
            return Some(field.to_string());
        }
    }
    if let ValidationErrorKind::Required { property } = &err.kind {
        return property.as_str().map(str::to_string);
    }
    None
}

fn field_rank(err: &ValidationError) -> usize {
    violated_field(err)
        .and_then(|field| FIELDS.iter().position(|known| *known == field))
        .unwrap_or(FIELDS.len())
}

fn render_violation(err: &ValidationError) -> String {
    let path = err.instance_path.to_string();
    match path.strip_prefix('/') {
        Some(field) if !field.is_empty() => format!("{}: {}", field, err),
        _ => err.to_string(),
    }
}

pub fn validate_book(payload: &Value) -> Result<(), Vec<String>> {
    let schema = book_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(true)
        .build(&schema)
        .expect("book schema is valid");

    let mut violations: Vec<(usize, String)> = validator
        .iter_errors(payload)
        .map(|err| (field_rank(&err), render_violation(&err)))
        .collect();

    if violations.is_empty() {
        return Ok(());
    }

    violations.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Err(violations.into_iter().map(|(_, msg)| msg).collect())
}
