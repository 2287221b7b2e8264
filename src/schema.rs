//! Warehouse schema loading and prompt rendering.
//!
//! A warehouse schema is a JSON document describing one data warehouse: its
//! database name, tables, typed and documented columns, and the relationships
//! (foreign keys) that joins may use. Schemas are never inferred; the file is
//! the single source of truth the model is allowed to rely on.
//!
//! # Schema File Format
//!
//! ```json
//! {
//!   "database": "sales_dw",
//!   "tables": {
//!     "orders": {
//!       "columns": {
//!         "order_id": { "type": "INT", "description": "unique order id" },
//!         "customer_id": { "type": "INT", "description": "ordering customer" }
//!       },
//!       "relationships": [
//!         "orders.customer_id -> customers.customer_id"
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use sql_query_generator::schema::Warehouse;
//!
//! let json = r#"{
//!     "database": "sales_dw",
//!     "tables": {
//!         "orders": {
//!             "columns": {
//!                 "order_id": { "type": "INT", "description": "unique order id" }
//!             }
//!         }
//!     }
//! }"#;
//!
//! let warehouse = Warehouse::from_json(json, "sales_dw.json").unwrap();
//! assert_eq!(warehouse.database, "sales_dw");
//!
//! let prompt = warehouse.to_prompt();
//! assert!(prompt.contains("Table: orders"));
//! ```

use std::fs;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{AppResult, file_read_error, schema_parse_error};

/// One data warehouse described by a schema file.
///
/// Tables and columns are stored in `IndexMap`s so the prompt preserves the
/// order the schema author wrote them in.
#[derive(Debug, Clone, Deserialize)]
pub struct Warehouse {
    /// Database name; the value `target_source` must refer to
    pub database: String,
    /// Map of table name to table definition
    #[serde(default)]
    pub tables:   IndexMap<String, TableDef>
}

/// Table definition inside a warehouse schema.
#[derive(Debug, Clone, Deserialize)]
pub struct TableDef {
    /// Map of column name to column definition
    #[serde(default)]
    pub columns:       IndexMap<String, ColumnDef>,
    /// Documented join relationships, e.g. `"orders.customer_id -> customers.customer_id"`
    #[serde(default)]
    pub relationships: Vec<String>
}

/// Column definition with type and free-text description.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    /// SQL data type (e.g. "INT", "VARCHAR(255)")
    #[serde(rename = "type")]
    pub data_type:   String,
    /// Human-readable column description shown to the model
    #[serde(default)]
    pub description: String
}

impl Warehouse {
    /// Load a warehouse schema from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid schema JSON
    pub fn load(path: &str) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| file_read_error(path, e))?;
        Self::from_json(&content, path)
    }

    /// Parse a warehouse schema from a JSON string
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not match the schema shape
    pub fn from_json(json: &str, path: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| schema_parse_error(path, e.to_string()))
    }

    /// Render the schema block sent to the LLM
    pub fn to_prompt(&self) -> String {
        let mut text = format!("Database: {}\n\n", self.database);
        for (table_name, table) in &self.tables {
            text.push_str(&format!("Table: {}\nColumns:\n", table_name));
            for (col_name, col) in &table.columns {
                text.push_str(&format!(
                    "  - {}: {} - {}\n",
                    col_name, col.data_type, col.description
                ));
            }
            if !table.relationships.is_empty() {
                text.push_str("Relationships:\n");
                for rel in &table.relationships {
                    text.push_str(&format!("  - {}\n", rel));
                }
            }
            text.push('\n');
        }
        text
    }
}
