pub mod midtrans_service;

pub use midtrans_service::{MidtransClient, PaymentGateway};
