use serde::{Deserialize, Serialize};

pub const PAYMENT_TYPE_QRIS: &str = "qris";

// `transaction_id` is accepted and ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentBillRequest {
    pub cart_total_price: String,
    pub transaction_id: String,
    pub product_name: String,
}

// Midtrans Core API charge payload

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeRequest {
    pub payment_type: String,
    pub transaction_details: TransactionDetails,
    pub customer_details: CustomerDetails,
    pub item_details: Vec<ItemDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDetails {
    pub id: String,
    pub price: i64,
    pub quantity: i32,
    pub name: String,
}

impl ChargeRequest {
    pub fn qris(order_id: &str, gross_amount: i64, first_name: &str, item_name: &str) -> Self {
        Self {
            payment_type: PAYMENT_TYPE_QRIS.to_string(),
            transaction_details: TransactionDetails {
                order_id: order_id.to_string(),
                gross_amount,
            },
            customer_details: CustomerDetails {
                first_name: first_name.to_string(),
            },
            item_details: vec![ItemDetails {
                id: order_id.to_string(),
                price: gross_amount,
                quantity: 1,
                name: item_name.to_string(),
            }],
        }
    }
}
