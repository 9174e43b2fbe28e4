//! Format Transformer — pure conversions over an already-parsed record set.
//!
//! Re-renders a generated JSON array as CSV or SQL inserts without another
//! model call. Headers come from the first record only; later records are
//! rendered against that fixed header list by per-record lookup (missing key
//! becomes an empty cell / NULL), never by recomputing headers.

use serde_json::Value;

/// Table name used when the caller does not supply one.
pub const DEFAULT_TABLE: &str = "mock_data";

/// Render records as CSV. Empty input yields the empty string.
pub fn to_csv(records: &[Value]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let headers: Vec<&str> = records[0]
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut lines = vec![headers.join(",")];
    for record in records {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                record
                    .as_object()
                    .and_then(|o| o.get(*h))
                    .map(csv_value)
                    .unwrap_or_default()
            })
            .collect();
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

/// Render records as `INSERT INTO <table> (...) VALUES (...);` statements.
/// Empty input yields the empty string.
pub fn to_sql(records: &[Value], table_name: &str) -> String {
    if records.is_empty() {
        return String::new();
    }

    let columns: Vec<&str> = records[0]
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let table = sanitize_table_name(table_name);

    let statements: Vec<String> = records
        .iter()
        .map(|record| {
            let values: Vec<String> = columns
                .iter()
                .map(|c| {
                    record
                        .as_object()
                        .and_then(|o| o.get(*c))
                        .map(sql_value)
                        .unwrap_or_else(|| "NULL".to_string())
                })
                .collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({});",
                table,
                columns.join(", "),
                values.join(", ")
            )
        })
        .collect();

    statements.join("\n")
}

/// Pretty-print a record array for the JSON view.
pub fn to_json_pretty(records: &[Value]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_default()
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_table_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        // serde_json cannot represent non-finite numbers; NaN/Infinity become
        // null upstream and land in the Null arm.
        Value::Number(n) => n.to_string(),
        // Nested values keep their raw JSON text, matching the original
        // renderer, which never CSV-quoted them.
        Value::Object(_) | Value::Array(_) => value.to_string(),
        Value::String(s) => {
            let escaped = s.replace('"', "\"\"");
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                format!("\"{}\"", escaped)
            } else {
                escaped
            }
        }
    }
}

fn sql_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(_) | Value::Array(_) => {
            format!("'{}'", value.to_string().replace('\'', "''"))
        }
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_basic() {
        let rows = vec![json!({"id": 1, "name": "Alice Johnson", "email": "alice@example.com"})];
        assert_eq!(to_csv(&rows), "id,name,email\n1,Alice Johnson,alice@example.com");
    }

    #[test]
    fn test_csv_quotes_and_escapes() {
        let rows = vec![json!({"note": "He said \"hi\", ok"})];
        assert_eq!(to_csv(&rows), "note\n\"He said \"\"hi\"\", ok\"");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_csv(&[]), "");
        assert_eq!(to_sql(&[], "users"), "");
    }

    #[test]
    fn test_csv_fixed_header_policy() {
        let rows = vec![
            json!({"id": 1, "name": "Alice"}),
            json!({"id": 2, "extra": "ignored"}),
        ];
        // Second record rendered against the first record's headers only
        assert_eq!(to_csv(&rows), "id,name\n1,Alice\n2,");
    }

    #[test]
    fn test_csv_value_kinds() {
        let rows = vec![json!({
            "active": true,
            "deleted": false,
            "score": 4.5,
            "missing": null,
            "tags": ["a", "b"],
            "meta": {"k": "v"}
        })];
        assert_eq!(
            to_csv(&rows),
            "active,deleted,score,missing,tags,meta\ntrue,false,4.5,,[\"a\",\"b\"],{\"k\":\"v\"}"
        );
    }

    #[test]
    fn test_csv_multiline_string_is_quoted() {
        let rows = vec![json!({"bio": "line one\nline two"})];
        assert_eq!(to_csv(&rows), "bio\n\"line one\nline two\"");
    }

    #[test]
    fn test_sql_basic() {
        let rows = vec![json!({"id": 1, "name": "O'Brien"})];
        assert_eq!(
            to_sql(&rows, "users"),
            "INSERT INTO users (id, name) VALUES (1, 'O''Brien');"
        );
    }

    #[test]
    fn test_sql_value_kinds() {
        let rows = vec![json!({
            "id": 7,
            "active": true,
            "archived": false,
            "note": null,
            "tags": ["x'y"]
        })];
        assert_eq!(
            to_sql(&rows, "items"),
            "INSERT INTO items (id, active, archived, note, tags) VALUES (7, TRUE, FALSE, NULL, '[\"x''y\"]');"
        );
    }

    #[test]
    fn test_sql_missing_key_is_null() {
        let rows = vec![json!({"id": 1, "name": "Alice"}), json!({"id": 2})];
        assert_eq!(
            to_sql(&rows, "users"),
            "INSERT INTO users (id, name) VALUES (1, 'Alice');\nINSERT INTO users (id, name) VALUES (2, NULL);"
        );
    }

    #[test]
    fn test_sql_table_name_sanitized() {
        let rows = vec![json!({"id": 1})];
        assert_eq!(
            to_sql(&rows, "user data!"),
            "INSERT INTO user_data_ (id) VALUES (1);"
        );
        assert_eq!(sanitize_table_name("drop table;--"), "drop_table___");
    }

    #[test]
    fn test_csv_round_trip_preserves_header_order() {
        let text = r#"[{"zeta":1,"alpha":2,"mid":3},{"alpha":5,"zeta":4,"mid":6}]"#;
        let rows: Vec<serde_json::Value> = serde_json::from_str(text).unwrap();
        let csv = to_csv(&rows);
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "zeta,alpha,mid");
    }

    #[test]
    fn test_json_pretty() {
        let rows = vec![json!({"id": 1})];
        let pretty = to_json_pretty(&rows);
        assert!(pretty.starts_with("[\n"));
        assert!(pretty.contains("\"id\": 1"));
    }
}
