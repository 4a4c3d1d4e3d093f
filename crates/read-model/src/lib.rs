pub mod repositories;
pub mod view;

pub use repositories::{Bill, BillItem, InvoiceRepository, PostgresInvoiceRepository, ShopProfile};
pub use view::InvoiceView;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadModelError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
