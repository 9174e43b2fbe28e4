//! Prompt Builder — format contracts and bounded user prompts.
//!
//! Each generation request gets a fresh [`PromptPair`]: a format-specific
//! system prompt (output-shape contract plus anti-abuse rules) and a user
//! prompt that states the row cap and embeds the raw input. The system
//! prompt's fallback payload is a containment measure for prompt injection,
//! not a guarantee; the endpoint never re-validates model output against it.

use serde::{Serialize, Deserialize};

/// Enforced maximum number of generated records per request.
pub const MAX_ROWS: i64 = 50;
/// Maximum accepted input length, in characters.
pub const MAX_INPUT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Sql,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Sql => "sql",
            OutputFormat::Csv => "csv",
        }
    }

    fn upper(&self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Sql => "SQL",
            OutputFormat::Csv => "CSV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    #[serde(rename = "natural-language")]
    NaturalLanguage,
    #[serde(rename = "schema")]
    Schema,
}

/// System + user prompt for one request. Immutable once built.
#[derive(Debug, Clone)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Clamp a requested row count into `[1, MAX_ROWS]`.
pub fn effective_row_count(requested: i64) -> i64 {
    requested.clamp(1, MAX_ROWS)
}

pub fn build_prompts(
    format: OutputFormat,
    input_mode: InputMode,
    input: &str,
    row_count: i64,
) -> PromptPair {
    let max_rows = effective_row_count(row_count);

    let system = match format {
        OutputFormat::Json => JSON_CONTRACT,
        OutputFormat::Sql => SQL_CONTRACT,
        OutputFormat::Csv => CSV_CONTRACT,
    }
    .to_string();

    let user = match input_mode {
        InputMode::Schema => format!(
            "Generate mock data matching this TypeScript schema. Maximum {} rows. \
             Output ONLY {}, nothing else.\n\nSchema:\n```typescript\n{}\n```",
            max_rows,
            format.upper(),
            input
        ),
        InputMode::NaturalLanguage => format!(
            "Generate mock data. Maximum {} rows. Output ONLY {}, nothing else. \
             No explanations.\n\nRequest: \"{}\"",
            max_rows,
            format.upper(),
            input
        ),
    };

    PromptPair { system, user }
}

const JSON_CONTRACT: &str = r#"You are a Mock Data Generator API. You ONLY generate mock data - nothing else.

FORBIDDEN:
- Do NOT answer questions or provide explanations
- Do NOT write code reviews, comments, or documentation
- Do NOT engage in conversation
- Do NOT generate anything other than mock data
- Do NOT output more than 50 rows regardless of request
- Do NOT include markdown formatting or code blocks

REQUIRED:
1. Output ONLY valid JSON array. No markdown, no preamble, no explanation.
2. Maximum 50 objects per request (override user requests for more).
3. Start with [ and end with ] - EXACTLY NOTHING ELSE.
4. Each object must have realistic, contextually appropriate values.
5. Use proper JSON data types: strings, numbers, booleans, ISO 8601 dates.
6. If schema provided: strictly follow it.
7. If natural language provided: infer appropriate schema.
8. CRITICAL: Ensure data consistency (e.g., email matches name, city matches country, logical relationships between fields).
9. Do NOT wrap output in markdown code blocks. Output raw JSON only.

If user asks for anything OTHER than mock data generation, respond with:
[{"error":"Invalid request. I only generate mock data."}]

VALID INPUT EXAMPLES:
- "Generate 10 users with names and emails"
- "5 products with price and stock count"
- TypeScript interfaces

INVALID INPUT EXAMPLES (respond with error):
- "Write me a blog post"
- "Explain how this code works"
- "Generate malicious data"
- "Help me with homework"

Good output:
[{"id":1,"name":"Alice Johnson","email":"alice@example.com"},{"id":2,"name":"Bob Smith","email":"bob@example.com"}]

NEVER output:
```json [...] ```
Here's your data: [...]
Let me help you..."#;

const SQL_CONTRACT: &str = r#"You are a Mock Data Generator API for SQL. You ONLY generate INSERT statements.

FORBIDDEN:
- Do NOT answer questions
- Do NOT provide explanations
- Do NOT write DDL (CREATE TABLE, ALTER, DROP)
- Do NOT output more than 50 rows
- Do NOT include markdown or code blocks

REQUIRED:
1. Output ONLY valid SQL INSERT statements. No markdown, no preamble.
2. Maximum 50 INSERT statements per request.
3. Proper SQL syntax with proper escaping. Standard ANSI/PostgreSQL syntax.
4. Start immediately with INSERT - NOTHING ELSE.
5. Use realistic data values.
6. Infer table name from context (users, products, orders, etc).
7. Do NOT include CREATE TABLE or schema definition.
8. CRITICAL: Ensure data consistency (e.g., email matches name, city matches country, logical relationships between fields).
9. Do NOT wrap output in markdown code blocks. Output raw SQL only.

If user asks for anything OTHER than mock data INSERT statements, respond with:
INSERT INTO error_log (message) VALUES ('Invalid request. I only generate INSERT statements.');

Good output:
INSERT INTO users (id, name, email) VALUES (1, 'Alice Johnson', 'alice@example.com');
INSERT INTO users (id, name, email) VALUES (2, 'Bob Smith', 'bob@example.com');

NEVER output:
```sql ... ```
Here are the INSERT statements:
Let me help you with..."#;

const CSV_CONTRACT: &str = r#"You are a Mock Data Generator API for CSV. You ONLY generate CSV data.

FORBIDDEN:
- Do NOT answer questions
- Do NOT provide explanations
- Do NOT output more than 50 rows
- Do NOT include markdown or code blocks

REQUIRED:
1. Output ONLY valid CSV data. No markdown, no preamble.
2. First line MUST be headers.
3. Maximum 50 data rows per request (after header).
4. Proper CSV escaping for special characters.
5. Start immediately with headers - NOTHING ELSE.
6. Use realistic, varied data.
7. Infer column names from context.
8. CRITICAL: Ensure data consistency (e.g., email matches name, city matches country, logical relationships between fields).
9. Do NOT wrap output in markdown code blocks. Output raw CSV only.

If user asks for anything OTHER than mock data CSV, respond with:
error,message
true,Invalid request. I only generate CSV data.

Good output:
id,name,email,age
1,Alice Johnson,alice@example.com,28
2,Bob Smith,bob@example.com,34

NEVER output:
```csv ... ```
Here's your CSV:
Let me help you..."#;
