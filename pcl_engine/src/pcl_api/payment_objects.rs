use pcl_common::Paise;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db_types::{AmountBreakdown, CapturedPayment, FailedPayment, ProcessedRefund};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// A request to open a checkout order with the payment gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    /// Amount in paise
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub receipt: Option<String>,
    pub description: Option<String>,
    pub customer: Option<CustomerDetails>,
    pub notes: Option<Value>,
    pub match_id: Option<i64>,
    pub club_id: Option<i64>,
    pub breakdown: Option<AmountBreakdown>,
}

impl NewOrderRequest {
    /// Amount, currency and receipt are mandatory. A zero amount counts as missing.
    pub fn is_complete(&self) -> bool {
        self.amount.is_some_and(|a| a > 0) &&
            self.currency.as_deref().is_some_and(|s| !s.trim().is_empty()) &&
            self.receipt.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// The notes sent to the gateway: the description and customer details, overridden by any caller-supplied notes.
    pub fn gateway_notes(&self) -> Value {
        let mut notes = Map::new();
        let customer = self.customer.clone().unwrap_or_default();
        let fields = [
            ("description", self.description.clone()),
            ("customer_name", customer.name),
            ("customer_email", customer.email),
            ("customer_contact", customer.contact),
        ];
        for (key, value) in fields {
            if let Some(v) = value {
                notes.insert(key.to_string(), Value::String(v));
            }
        }
        if let Some(Value::Object(extra)) = &self.notes {
            notes.extend(extra.clone());
        }
        Value::Object(notes)
    }
}

/// A payment gateway webhook, reduced to the events the league acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    PaymentCaptured(CapturedPayment),
    PaymentFailed(FailedPayment),
    RefundProcessed(ProcessedRefund),
    /// Any other event, or a known event with a malformed payload. Only logged.
    Unhandled(String),
}

fn str_field(entity: &Value, key: &str) -> Option<String> {
    entity.get(key).and_then(Value::as_str).map(String::from)
}

impl WebhookEvent {
    pub fn from_payload(payload: &Value) -> Self {
        let event = payload.get("event").and_then(Value::as_str).unwrap_or_default().to_string();
        let entity = |kind: &str| payload.pointer(&format!("/payload/{kind}/entity"));
        let parsed = match event.as_str() {
            "payment.captured" => entity("payment").and_then(|e| {
                Some(WebhookEvent::PaymentCaptured(CapturedPayment {
                    razorpay_order_id: str_field(e, "order_id")?,
                    razorpay_payment_id: str_field(e, "id")?,
                    amount: Paise::from(e.get("amount").and_then(Value::as_i64).unwrap_or_default()),
                    method: str_field(e, "method"),
                    webhook_data: e.clone(),
                }))
            }),
            "payment.failed" => entity("payment").and_then(|e| {
                Some(WebhookEvent::PaymentFailed(FailedPayment {
                    razorpay_order_id: str_field(e, "order_id")?,
                    razorpay_payment_id: str_field(e, "id"),
                    error_code: str_field(e, "error_code"),
                    error_description: str_field(e, "error_description"),
                    webhook_data: e.clone(),
                }))
            }),
            "refund.processed" => entity("refund").and_then(|e| {
                Some(WebhookEvent::RefundProcessed(ProcessedRefund {
                    razorpay_refund_id: str_field(e, "id")?,
                    razorpay_payment_id: str_field(e, "payment_id")?,
                    amount: Paise::from(e.get("amount").and_then(Value::as_i64)?),
                    webhook_data: e.clone(),
                }))
            }),
            _ => None,
        };
        parsed.unwrap_or(WebhookEvent::Unhandled(event))
    }

    pub fn name(&self) -> &str {
        match self {
            WebhookEvent::PaymentCaptured(_) => "payment.captured",
            WebhookEvent::PaymentFailed(_) => "payment.failed",
            WebhookEvent::RefundProcessed(_) => "refund.processed",
            WebhookEvent::Unhandled(name) => name.as_str(),
        }
    }
}
