use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::CoreResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Upi,
    Card,
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Wallet => "Wallets",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Upi
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    RequiresPaymentMethod,
    Processing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String, // gateway reference
    pub booking_id: Uuid,
    pub amount: u64,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a charge with the provider
    async fn create_intent(
        &self,
        booking_id: Uuid,
        amount: u64,
        method: PaymentMethod,
    ) -> CoreResult<PaymentIntent>;

    /// Run the charge and report the final status
    async fn process_payment(&self, intent: &PaymentIntent) -> CoreResult<PaymentStatus>;
}
