mod cart;
mod payment;
mod product;
mod user;

pub use cart::*;
pub use payment::*;
pub use product::*;
pub use user::*;
