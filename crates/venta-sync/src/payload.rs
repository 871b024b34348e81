//! # Wire Payloads
//!
//! JSON types exchanged with the backend sales endpoint.
//!
//! The create-sale body carries no client-side idempotency key; the backend
//! accepts exactly `{date, total, payment_method, notes, items}`.

use serde::{Deserialize, Serialize};

use venta_core::{PaymentMethod, Sale, SaleItem};

// =============================================================================
// Outbound
// =============================================================================

/// One line of the create-sale request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemPayload {
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// The create-sale request body (`POST {base_url}/sales`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePayload {
    /// Local commit timestamp, RFC 3339.
    pub date: String,

    /// Sale total as recorded locally.
    pub total: f64,

    /// Tender, serialized as its snake_case name.
    pub payment_method: PaymentMethod,

    /// Free-text notes.
    pub notes: String,

    /// Line items in recorded order.
    pub items: Vec<SaleItemPayload>,
}

impl SalePayload {
    /// Builds the request body from a stored sale and its items.
    pub fn from_sale(sale: &Sale, items: &[SaleItem]) -> Self {
        SalePayload {
            date: sale.date.to_rfc3339(),
            total: sale.total,
            payment_method: sale.payment_method,
            notes: sale.notes.clone(),
            items: items
                .iter()
                .map(|item| SaleItemPayload {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Inbound
// =============================================================================

/// The sale the backend created, as far as the sync engine cares: its id.
/// Unknown response fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSale {
    pub id: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use venta_core::SyncStatus;

    fn sample_sale() -> (Sale, Vec<SaleItem>) {
        let sale = Sale {
            id: 3,
            server_id: None,
            date: Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap(),
            total: 35.0,
            payment_method: PaymentMethod::Cash,
            notes: "cliente frecuente".to_string(),
            sync_status: SyncStatus::Pending,
        };
        let items = vec![
            SaleItem {
                id: 10,
                sale_id: 3,
                product_id: 1,
                product_name: "A".to_string(),
                quantity: 2,
                price: 10.0,
            },
            SaleItem {
                id: 11,
                sale_id: 3,
                product_id: 2,
                product_name: "B".to_string(),
                quantity: 1,
                price: 15.0,
            },
        ];
        (sale, items)
    }

    #[test]
    fn test_payload_field_names_match_api() {
        let (sale, items) = sample_sale();
        let payload = SalePayload::from_sale(&sale, &items);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["date"], "2026-03-14T15:09:26+00:00");
        assert_eq!(json["total"], 35.0);
        assert_eq!(json["payment_method"], "cash");
        assert_eq!(json["notes"], "cliente frecuente");
        assert_eq!(json["items"][0]["product_id"], 1);
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["price"], 10.0);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);

        // Local row ids and product name snapshots stay local.
        assert!(json["items"][0].get("product_name").is_none());
        assert!(json.get("sync_status").is_none());
    }

    #[test]
    fn test_remote_sale_ignores_extra_fields() {
        let remote: RemoteSale = serde_json::from_str(
            r#"{"id": 42, "user_id": 1, "total": 35.0, "sync_status": 0}"#,
        )
        .unwrap();
        assert_eq!(remote.id, 42);
    }
}
