//! Arrow schema inference and JSON to Arrow conversion
//!
//! Provides utilities for inferring Arrow schemas from flattened rows
//! and converting them to Arrow RecordBatches.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, ListArray, NullArray, StringArray,
    StructArray,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use std::sync::Arc;

/// Infer an Arrow schema from a set of rows
///
/// Columns appear in first-encounter order. Every column is nullable, and
/// a column that only ever held nulls is typed `Utf8`.
pub fn infer_schema(records: &[JsonObject]) -> Schema {
    let mut order: Vec<(String, DataType)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        for (key, value) in record {
            let inferred = infer_type(value);
            match index.get(key) {
                Some(&i) => order[i].1 = merge_types(&order[i].1, &inferred),
                None => {
                    index.insert(key.clone(), order.len());
                    order.push((key.clone(), inferred));
                }
            }
        }
    }

    let fields: Vec<Field> = order
        .into_iter()
        .map(|(name, dtype)| Field::new(name, settle_nulls(dtype), true))
        .collect();

    Schema::new(fields)
}

/// Convert rows to an Arrow RecordBatch
///
/// Uses the provided schema or infers one from the data.
pub fn json_to_arrow(records: &[JsonObject], schema: Option<&Schema>) -> Result<RecordBatch> {
    let schema = match schema {
        Some(s) => s.clone(),
        None => infer_schema(records),
    };

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(schema)));
    }

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let values: Vec<Option<&JsonValue>> =
            records.iter().map(|record| record.get(field.name())).collect();
        columns.push(build_array(&values, field.data_type())?);
    }

    RecordBatch::try_new(Arc::new(schema), columns).map_err(|e| Error::Output {
        message: format!("Failed to create RecordBatch: {e}"),
    })
}

/// Infer Arrow DataType from a JSON value
fn infer_type(value: &JsonValue) -> DataType {
    match value {
        JsonValue::Null => DataType::Null,
        JsonValue::Bool(_) => DataType::Boolean,
        JsonValue::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        JsonValue::String(_) => DataType::Utf8,
        JsonValue::Array(arr) => {
            let element_type = arr
                .iter()
                .map(infer_type)
                .reduce(|a, b| merge_types(&a, &b))
                .unwrap_or(DataType::Null);
            DataType::List(Arc::new(Field::new("item", element_type, true)))
        }
        JsonValue::Object(obj) if obj.is_empty() => DataType::Utf8,
        JsonValue::Object(obj) => {
            let fields: Vec<Field> = obj
                .iter()
                .map(|(k, v)| Field::new(k, infer_type(v), true))
                .collect();
            DataType::Struct(Fields::from(fields))
        }
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),

        // Null can merge with anything
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),

        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        (DataType::List(a), DataType::List(b)) => DataType::List(Arc::new(Field::new(
            "item",
            merge_types(a.data_type(), b.data_type()),
            true,
        ))),

        // Anything else becomes its JSON text
        _ => DataType::Utf8,
    }
}

/// Replace `Null` types, which carry no information, with nullable `Utf8`
fn settle_nulls(data_type: DataType) -> DataType {
    match data_type {
        DataType::Null => DataType::Utf8,
        DataType::List(item) => DataType::List(Arc::new(Field::new(
            "item",
            settle_nulls(item.data_type().clone()),
            true,
        ))),
        DataType::Struct(fields) => DataType::Struct(
            fields
                .iter()
                .map(|f| Field::new(f.name(), settle_nulls(f.data_type().clone()), true))
                .collect::<Vec<_>>()
                .into(),
        ),
        other => other,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&JsonValue>], data_type: &DataType) -> Result<ArrayRef> {
    match data_type {
        DataType::Null => Ok(Arc::new(NullArray::new(values.len()))),

        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(JsonValue::as_bool)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(JsonValue::as_i64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(JsonValue::as_f64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::List(field) => build_list_array(values, field),

        DataType::Struct(fields) => build_struct_array(values, fields),

        // Utf8 and any other type: strings verbatim, other values as JSON text
        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| match v {
                    None | Some(JsonValue::Null) => None,
                    Some(JsonValue::String(s)) => Some(s.clone()),
                    Some(other) => Some(other.to_string()),
                })
                .collect();
            Ok(Arc::new(arr))
        }
    }
}

/// Build a list array from JSON arrays
fn build_list_array(values: &[Option<&JsonValue>], field: &Arc<Field>) -> Result<ArrayRef> {
    let mut all_items: Vec<Option<&JsonValue>> = Vec::new();
    let mut offsets: Vec<i32> = vec![0];
    let mut validity: Vec<bool> = Vec::with_capacity(values.len());

    for value in values {
        if let Some(JsonValue::Array(arr)) = value {
            all_items.extend(arr.iter().map(Some));
            validity.push(true);
        } else {
            validity.push(false);
        }
        let offset = i32::try_from(all_items.len()).map_err(|_| Error::Output {
            message: "Array too large for i32 offset".to_string(),
        })?;
        offsets.push(offset);
    }

    let items_array = build_array(&all_items, field.data_type())?;
    let offset_buffer = OffsetBuffer::new(offsets.into());

    let list_array = ListArray::try_new(
        Arc::clone(field),
        offset_buffer,
        items_array,
        Some(validity.into()),
    )?;
    Ok(Arc::new(list_array))
}

/// Build a struct array from JSON objects
fn build_struct_array(values: &[Option<&JsonValue>], fields: &Fields) -> Result<ArrayRef> {
    let mut child_arrays: Vec<ArrayRef> = Vec::with_capacity(fields.len());

    for field in fields {
        let child_values: Vec<Option<&JsonValue>> = values
            .iter()
            .map(|v| match v {
                Some(JsonValue::Object(obj)) => obj.get(field.name()),
                _ => None,
            })
            .collect();
        child_arrays.push(build_array(&child_values, field.data_type())?);
    }

    let validity: Vec<bool> = values
        .iter()
        .map(|v| matches!(v, Some(JsonValue::Object(_))))
        .collect();

    let struct_array = StructArray::try_new(fields.clone(), child_arrays, Some(validity.into()))?;
    Ok(Arc::new(struct_array))
}

/// Convert an Arrow RecordBatch back to JSON rows
///
/// Used to read persisted files back; handles the types `json_to_arrow`
/// produces.
pub fn arrow_to_json(batch: &RecordBatch) -> Result<Vec<JsonObject>> {
    let schema = batch.schema();
    let mut records = Vec::with_capacity(batch.num_rows());

    for row in 0..batch.num_rows() {
        let mut record = JsonObject::new();
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let value = array_value_to_json(batch.column(col_idx).as_ref(), row)?;
            record.insert(field.name().clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}

fn downcast<'a, T: 'static>(array: &'a dyn Array, name: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::output(format!("Failed to downcast to {name}")))
}

/// Convert a single array element to JSON
fn array_value_to_json(array: &dyn Array, row: usize) -> Result<JsonValue> {
    if array.is_null(row) {
        return Ok(JsonValue::Null);
    }

    match array.data_type() {
        DataType::Null => Ok(JsonValue::Null),

        DataType::Boolean => Ok(JsonValue::Bool(
            downcast::<BooleanArray>(array, "BooleanArray")?.value(row),
        )),

        DataType::Int64 => Ok(JsonValue::Number(
            downcast::<Int64Array>(array, "Int64Array")?.value(row).into(),
        )),

        DataType::Float64 => {
            let val = downcast::<Float64Array>(array, "Float64Array")?.value(row);
            Ok(serde_json::Number::from_f64(val).map_or(JsonValue::Null, JsonValue::Number))
        }

        DataType::Utf8 => Ok(JsonValue::String(
            downcast::<StringArray>(array, "StringArray")?
                .value(row)
                .to_string(),
        )),

        DataType::List(_) => {
            let values = downcast::<ListArray>(array, "ListArray")?.value(row);
            let items = (0..values.len())
                .map(|i| array_value_to_json(values.as_ref(), i))
                .collect::<Result<Vec<_>>>()?;
            Ok(JsonValue::Array(items))
        }

        DataType::Struct(_) => {
            let arr = downcast::<StructArray>(array, "StructArray")?;
            let mut obj = JsonObject::new();
            for (i, field) in arr.fields().iter().enumerate() {
                obj.insert(
                    field.name().clone(),
                    array_value_to_json(arr.column(i).as_ref(), row)?,
                );
            }
            Ok(JsonValue::Object(obj))
        }

        other => Err(Error::output(format!("Unsupported column type {other}"))),
    }
}
