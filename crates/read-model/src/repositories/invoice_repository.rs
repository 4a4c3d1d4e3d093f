use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::ReadModelError;

/// The stored order/invoice record. Most columns are nullable; the view
/// assembly step owns the fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bill {
    pub id: String,
    pub user_id: String,
    pub bill_number: Option<String>,
    pub bill_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub subtotal: Option<f64>,
    pub total_amount: f64,
    pub discount: Option<f64>,
    pub gst_amount: Option<f64>,
    pub gst_percent: Option<f64>,
    pub amount_paid: Option<f64>,
    pub amount_remaining: Option<f64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_status: Option<String>,
    pub invoice_type: Option<String>,
}

/// Seller-facing business details for the Bill's owning user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShopProfile {
    pub user_id: String,
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub shop_phone: Option<String>,
    pub shop_gst_number: Option<String>,
}

/// One purchased line item belonging to a Bill
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BillItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Repository for the three reads behind the order view
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Fetch the bill matching an order identifier
    async fn find_bill(&self, bill_id: &str) -> Result<Option<Bill>, ReadModelError>;

    /// Fetch the shop profile for a bill's owning user, if one exists
    async fn find_shop_profile(&self, user_id: &str)
        -> Result<Option<ShopProfile>, ReadModelError>;

    /// Fetch all line items belonging to a bill
    async fn list_bill_items(&self, bill_id: &str) -> Result<Vec<BillItem>, ReadModelError>;
}

/// PostgreSQL implementation of InvoiceRepository
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn find_bill(&self, bill_id: &str) -> Result<Option<Bill>, ReadModelError> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT
                id, user_id, bill_number, bill_date, created_at,
                subtotal, total_amount, discount, gst_amount, gst_percent,
                amount_paid, amount_remaining, customer_name, customer_phone,
                payment_status, invoice_type
            FROM bills
            WHERE id = $1
            "#,
        )
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    async fn find_shop_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<ShopProfile>, ReadModelError> {
        let profile = sqlx::query_as::<_, ShopProfile>(
            r#"
            SELECT
                user_id, shop_name, shop_address, shop_phone, shop_gst_number
            FROM shop_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn list_bill_items(&self, bill_id: &str) -> Result<Vec<BillItem>, ReadModelError> {
        // No ORDER BY: line items render in store order
        let items = sqlx::query_as::<_, BillItem>(
            r#"
            SELECT
                name, quantity, unit_price, total_price
            FROM bill_items
            WHERE bill_id = $1
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
