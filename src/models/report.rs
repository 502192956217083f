use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column names plus rows, as produced by reports and the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ConsoleRequest {
    pub sql: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsoleOutcome {
    Rows(TabularResult),
    Affected { rows_affected: u64 },
}
