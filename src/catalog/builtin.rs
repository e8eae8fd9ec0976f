//! Built-in movement-type catalog
//!
//! Nine segments of the transaction taxonomy: three quantity bands of sales,
//! a catch-all for every movement type without a dedicated segment, loose
//! transfers, three quantity bands of consumption returns, and receipts.
//! The segments are meant to be disjoint; nothing here enforces it.

use super::types::QueryDefinition;

/// Movement prefix of sales
pub const SALES_PREFIX: &str = "313";

/// Movement prefix of transfers
pub const TRANSFER_PREFIX: &str = "311";

/// Movement prefix of consumption (negative quantities are returns)
pub const CONSUMPTION_PREFIX: &str = "261";

/// Movement prefixes of receipts
pub const RECEIPT_PREFIXES: [&str; 2] = ["102", "702"];

/// Prefixes fetched by a dedicated segment
pub const DEDICATED_PREFIXES: [&str; 5] = ["313", "311", "261", "102", "702"];

/// Prefixes excluded from `other_movements`, in predicate order
pub const OTHER_MOVEMENTS_EXCLUDED: [&str; 14] = [
    "313", "311", "261", "344", "327", "349", "325", "702", "322", "102", "309", "350", "343",
    "321",
];

const BUILTIN: [(&str, u32, &str); 9] = [
    (
        "small_sales",
        30_000,
        "ctxn_movement_type ilike '313%' and (ctxn_primary_qty > 0) and (ctxn_primary_qty <= 3)",
    ),
    (
        "medium_sales",
        30_000,
        "ctxn_movement_type ilike '313%' and (ctxn_primary_qty > 3) and (ctxn_primary_qty <= 50)",
    ),
    (
        "large_sales",
        30_000,
        "ctxn_movement_type ilike '313%' and (ctxn_primary_qty > 50)",
    ),
    (
        "other_movements",
        20_000,
        "(ctxn_movement_type not ilike '313%') and (ctxn_movement_type not ilike '311%') \
         and (ctxn_movement_type not ilike '261%') and (ctxn_movement_type not ilike '344%') \
         and (ctxn_movement_type not ilike '327%') and (ctxn_movement_type not ilike '349%') \
         and (ctxn_movement_type not ilike '325%') and (ctxn_movement_type not ilike '702%') \
         and (ctxn_movement_type not ilike '322%') and (ctxn_movement_type not ilike '102%') \
         and (ctxn_movement_type not ilike '309%') and (ctxn_movement_type not ilike '350%') \
         and (ctxn_movement_type not ilike '343%') and (ctxn_movement_type not ilike '321%')",
    ),
    (
        "transfers_loose",
        30_000,
        "(ctxn_movement_type ilike '311%') and (ctxn_primary_qty > 0) \
         and (ctxn_handling_unit not ilike 'PLT%')",
    ),
    (
        "small_returns",
        30_000,
        "(ctxn_movement_type ilike '261%') and (ctxn_primary_qty < 0) and (ctxn_primary_qty >= -3)",
    ),
    (
        "medium_returns",
        30_000,
        "(ctxn_movement_type ilike '261%') and (ctxn_primary_qty < -3) and (ctxn_primary_qty >= -50)",
    ),
    (
        "large_returns",
        30_000,
        "(ctxn_movement_type ilike '261%') and (ctxn_primary_qty < -50)",
    ),
    (
        "receipts",
        5_000,
        "(ctxn_movement_type ilike '102%' or ctxn_movement_type ilike '702%')",
    ),
];

/// The built-in definitions in fetch order
pub fn builtin_definitions() -> Vec<QueryDefinition> {
    BUILTIN
        .iter()
        .map(|(name, cap, predicate)| QueryDefinition::new(*name, *cap, *predicate))
        .collect()
}
