use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use read_model::{Bill, BillItem, InvoiceRepository, ReadModelError, ShopProfile};

use crate::state::AppState;

/// In-memory repository for handler and router tests
pub struct StubRepository {
    pub bill: Option<Bill>,
    pub profile: Option<ShopProfile>,
    pub items: Vec<BillItem>,
    pub fail_bill: bool,
    pub fail_profile: bool,
    pub fail_items: bool,
}

impl StubRepository {
    pub fn empty() -> Self {
        Self {
            bill: None,
            profile: None,
            items: Vec::new(),
            fail_bill: false,
            fail_profile: false,
            fail_items: false,
        }
    }

    pub fn with_bill(bill: Bill) -> Self {
        Self {
            bill: Some(bill),
            ..Self::empty()
        }
    }

    pub fn into_state(self) -> AppState {
        AppState {
            repository: Arc::new(self),
        }
    }
}

#[async_trait]
impl InvoiceRepository for StubRepository {
    async fn find_bill(&self, bill_id: &str) -> Result<Option<Bill>, ReadModelError> {
        if self.fail_bill {
            return Err(ReadModelError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(self.bill.clone().filter(|bill| bill.id == bill_id))
    }

    async fn find_shop_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<ShopProfile>, ReadModelError> {
        if self.fail_profile {
            return Err(ReadModelError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(self
            .profile
            .clone()
            .filter(|profile| profile.user_id == user_id))
    }

    async fn list_bill_items(&self, _bill_id: &str) -> Result<Vec<BillItem>, ReadModelError> {
        if self.fail_items {
            return Err(ReadModelError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(self.items.clone())
    }
}

/// A bill with only the required columns set
pub fn sample_bill(id: &str) -> Bill {
    Bill {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        bill_number: None,
        bill_date: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        subtotal: None,
        total_amount: 500.0,
        discount: None,
        gst_amount: None,
        gst_percent: None,
        amount_paid: None,
        amount_remaining: None,
        customer_name: None,
        customer_phone: None,
        payment_status: None,
        invoice_type: None,
    }
}
