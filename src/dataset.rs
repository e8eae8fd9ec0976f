//! Record sets and per-warehouse datasets
//!
//! A `RecordSet` is the normalized result of one query. A
//! `WarehouseDataset` is the in-order concatenation of every non-empty
//! record set fetched for one warehouse.

use crate::types::{
    JsonObject, JsonValue, WarehouseCode, DATA_SOURCE_COLUMN, LOAD_TIMESTAMP_COLUMN,
    WAREHOUSE_CODE_COLUMN,
};
use chrono::{DateTime, SecondsFormat, Utc};

/// Rows returned by one query, tagged with provenance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    rows: Vec<JsonObject>,
}

impl RecordSet {
    /// An empty record set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tag decoded rows with provenance columns
    ///
    /// Upstream columns with the same names as the provenance columns are
    /// overwritten.
    pub fn with_provenance(
        rows: Vec<JsonObject>,
        source: &str,
        warehouse: &WarehouseCode,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        let timestamp = loaded_at.to_rfc3339_opts(SecondsFormat::Micros, true);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.insert(
                    LOAD_TIMESTAMP_COLUMN.to_string(),
                    JsonValue::String(timestamp.clone()),
                );
                row.insert(
                    DATA_SOURCE_COLUMN.to_string(),
                    JsonValue::String(source.to_string()),
                );
                row.insert(
                    WAREHOUSE_CODE_COLUMN.to_string(),
                    JsonValue::String(warehouse.to_string()),
                );
                row
            })
            .collect();
        Self { rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows
    pub fn rows(&self) -> &[JsonObject] {
        &self.rows
    }

    /// Take the rows
    pub fn into_rows(self) -> Vec<JsonObject> {
        self.rows
    }
}

/// All rows fetched for one warehouse, in encounter order
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseDataset {
    warehouse: WarehouseCode,
    rows: Vec<JsonObject>,
}

impl WarehouseDataset {
    /// An empty dataset for a warehouse
    pub fn new(warehouse: WarehouseCode) -> Self {
        Self {
            warehouse,
            rows: Vec::new(),
        }
    }

    /// Append a record set's rows after the existing ones
    pub fn append(&mut self, set: RecordSet) {
        self.rows.extend(set.into_rows());
    }

    /// Warehouse the rows belong to
    pub fn warehouse(&self) -> &WarehouseCode {
        &self.warehouse
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were collected
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows
    pub fn rows(&self) -> &[JsonObject] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn row(value: serde_json::Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_provenance_columns() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let set = RecordSet::with_provenance(
            vec![row(json!({"id": 1}))],
            "small_sales",
            &WarehouseCode::new("1145"),
            at,
        );

        let r = &set.rows()[0];
        assert_eq!(r["id"], 1);
        assert_eq!(r[LOAD_TIMESTAMP_COLUMN], "2026-03-01T12:00:00.000000Z");
        assert_eq!(r[DATA_SOURCE_COLUMN], "small_sales");
        assert_eq!(r[WAREHOUSE_CODE_COLUMN], "1145");
    }

    #[test]
    fn test_append_keeps_order() {
        let wh = WarehouseCode::new("1");
        let at = Utc::now();
        let mut dataset = WarehouseDataset::new(wh.clone());

        dataset.append(RecordSet::with_provenance(
            vec![row(json!({"n": 1})), row(json!({"n": 2}))],
            "a",
            &wh,
            at,
        ));
        dataset.append(RecordSet::empty());
        dataset.append(RecordSet::with_provenance(vec![row(json!({"n": 3}))], "b", &wh, at));

        let ns: Vec<i64> = dataset.rows().iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);
        assert_eq!(dataset.len(), 3);
    }
}
