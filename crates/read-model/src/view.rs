use serde::{Deserialize, Serialize};

use crate::repositories::{Bill, BillItem, ShopProfile};

/// Placeholder shown when the seller has not filled in a shop profile
pub const PLACEHOLDER_SHOP_NAME: &str = "Shop / Business Details";

/// Customer name used when the bill does not record one
pub const PLACEHOLDER_CUSTOMER_NAME: &str = "Walk-in customer";

const DEFAULT_PAYMENT_STATUS: &str = "draft";
const DEFAULT_INVOICE_TYPE: &str = "order_summary";

/// The denormalized document rendered by the invoice page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceView {
    pub shop: ShopSection,
    pub order: OrderSection,
    pub customer: CustomerSection,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSection {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub gst: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSection {
    pub id: String,
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub subtotal: f64,
    pub discount: f64,
    pub gst_amount: f64,
    pub gst_percent: f64,
    pub total: f64,
    pub paid: f64,
    pub balance: f64,
    pub payment_status: String,
    pub invoice_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSection {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub qty: f64,
    pub rate: f64,
    pub amount: f64,
}

impl From<BillItem> for LineItem {
    fn from(item: BillItem) -> Self {
        Self {
            name: item.name,
            qty: item.quantity,
            rate: item.unit_price,
            amount: item.total_price,
        }
    }
}

impl InvoiceView {
    /// Assemble the view document from the fetched rows.
    ///
    /// Total over every valid bill: each output field has a defined value
    /// even when all optional source columns are NULL. A NULL column is
    /// absent; text columns also count as absent when empty. Numeric zero
    /// is a real value and never triggers a fallback.
    pub fn assemble(
        order_ref: &str,
        bill: Bill,
        profile: Option<ShopProfile>,
        items: Vec<BillItem>,
    ) -> Self {
        let shop = match profile {
            Some(profile) => ShopSection {
                name: non_empty(profile.shop_name)
                    .unwrap_or_else(|| PLACEHOLDER_SHOP_NAME.to_string()),
                address: profile.shop_address.unwrap_or_default(),
                phone: profile.shop_phone.unwrap_or_default(),
                gst: profile.shop_gst_number.unwrap_or_default(),
            },
            None => ShopSection {
                name: PLACEHOLDER_SHOP_NAME.to_string(),
                address: String::new(),
                phone: String::new(),
                gst: String::new(),
            },
        };

        let order = OrderSection {
            id: non_empty(bill.bill_number).unwrap_or_else(|| short_ref(order_ref)),
            date_iso: bill.bill_date.unwrap_or(bill.created_at).to_rfc3339(),
            subtotal: bill.subtotal.unwrap_or(bill.total_amount),
            discount: bill.discount.unwrap_or(0.0),
            gst_amount: bill.gst_amount.unwrap_or(0.0),
            gst_percent: bill.gst_percent.unwrap_or(0.0),
            total: bill.total_amount,
            paid: bill.amount_paid.unwrap_or(0.0),
            balance: bill.amount_remaining.unwrap_or(bill.total_amount),
            payment_status: non_empty(bill.payment_status)
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            invoice_type: non_empty(bill.invoice_type)
                .unwrap_or_else(|| DEFAULT_INVOICE_TYPE.to_string()),
        };

        let customer = CustomerSection {
            name: non_empty(bill.customer_name)
                .unwrap_or_else(|| PLACEHOLDER_CUSTOMER_NAME.to_string()),
            phone: bill.customer_phone.unwrap_or_default(),
        };

        Self {
            shop,
            order,
            customer,
            items: items.into_iter().map(LineItem::from).collect(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Fallback display id: the first 8 characters of the order identifier,
/// upper-cased
fn short_ref(order_ref: &str) -> String {
    order_ref.chars().take(8).collect::<String>().to_uppercase()
}
