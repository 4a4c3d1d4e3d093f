pub mod invoice_repository;

pub use invoice_repository::{
    Bill, BillItem, InvoiceRepository, PostgresInvoiceRepository, ShopProfile,
};
