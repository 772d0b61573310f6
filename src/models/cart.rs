use serde::{Deserialize, Serialize};

use super::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cart {
    pub cart_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_price: i32,
    pub cart_total_price: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCart {
    pub user_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_price: i32,
    pub cart_total_price: i32,
}

impl NewCart {
    pub fn snapshot(user_id: i32, product: &Product) -> Self {
        Self {
            user_id,
            product_id: product.product_id,
            product_name: product.product_name.clone(),
            product_price: product.product_price,
            cart_total_price: product.product_price,
        }
    }

    pub fn with_id(self, cart_id: i32) -> Cart {
        Cart {
            cart_id,
            user_id: self.user_id,
            product_id: self.product_id,
            product_name: self.product_name,
            product_price: self.product_price,
            cart_total_price: self.cart_total_price,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddToCartRequest {
    pub product_id: i32,
}
