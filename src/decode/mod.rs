//! Response decoder module
//!
//! Turns a response body into flat rows.
//!
//! # Overview
//!
//! The upstream API answers with a JSON array of transaction objects.
//! Each object is flattened so nested fields become dotted columns
//! (`{"item": {"sku": "A"}}` becomes `item.sku`). A body that is not an
//! array of objects is rejected as a whole.

mod normalize;

pub use normalize::{decode_records, flatten_record, NESTED_SEPARATOR};
