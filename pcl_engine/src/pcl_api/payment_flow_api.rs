use std::fmt::Debug;

use log::*;
use pcl_common::Paise;

use crate::{
    db_types::{NewPayment, Payment, PayoutSummary, UserId},
    events::{EventProducers, PaymentCapturedEvent},
    pcl_api::payment_objects::{NewOrderRequest, WebhookEvent},
    traits::{GatewayOrder, GatewayOrderRequest, PaymentGatewayDatabase, PaymentGatewayError, PaymentProvider},
};

/// `PaymentFlowApi` handles the life of a match payment: opening a checkout order with the payment gateway, and
/// applying the gateway's webhooks as the payment is captured, fails or is refunded.
pub struct PaymentFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for PaymentFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B> PaymentFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> PaymentFlowApi<B>
where B: PaymentGatewayDatabase
{
    /// Creates a checkout order with the payment gateway.
    ///
    /// When the order is for a match, a `pending` payment is recorded against the gateway order id so that the
    /// `payment.captured` webhook can find it later. Recording is idempotent on the order id.
    pub async fn create_order(
        &self,
        provider: &impl PaymentProvider,
        request: NewOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        if !request.is_complete() {
            return Err(PaymentGatewayError::ValidationError(
                "Missing required fields: amount, currency, receipt".into(),
            ));
        }
        let notes = request.gateway_notes();
        let order_request = GatewayOrderRequest {
            amount: request.amount.unwrap_or_default(),
            currency: request.currency.clone().unwrap_or_default(),
            receipt: request.receipt.clone().unwrap_or_default(),
            notes: notes.clone(),
        };
        let order = provider.create_order(order_request).await.map_err(|e| {
            warn!("💸️ Could not create gateway order for receipt {:?}. {e}", request.receipt);
            PaymentGatewayError::ProviderError(e.to_string())
        })?;
        info!("💸️ Gateway order {} created for {}", order.id, Paise::from(order.amount));
        if let Some(match_id) = request.match_id {
            let payment = NewPayment {
                razorpay_order_id: order.id.clone(),
                match_id: Some(match_id),
                club_id: request.club_id,
                amount: Paise::from(order.amount),
                currency: order.currency.clone(),
                breakdown: request.breakdown.unwrap_or_default(),
                notes: Some(notes),
            };
            let payment = self.db.insert_pending_payment(payment).await?;
            debug!("💸️ Pending payment #{} recorded for match #{match_id}", payment.id);
        }
        Ok(order)
    }

    /// Applies a verified payment gateway webhook.
    ///
    /// Events that refer to payments the league does not know about are logged and ignored, since the gateway also
    /// delivers events for orders created outside this server.
    pub async fn process_webhook(&self, event: WebhookEvent) -> Result<(), PaymentGatewayError> {
        match event {
            WebhookEvent::PaymentCaptured(capture) => {
                let order_id = capture.razorpay_order_id.clone();
                match self.db.process_captured_payment(capture).await? {
                    Some(result) if result.redelivered => {
                        debug!("💸️ Payment for order {order_id} was already captured");
                    },
                    Some(result) => {
                        info!(
                            "💸️ Payment for order {order_id} captured. {} bookings confirmed.",
                            result.bookings.len()
                        );
                        self.producers.publish_notifications(&result.notifications).await;
                        let event = PaymentCapturedEvent::new(result.payment, result.bookings);
                        self.producers.publish_payment_captured(event).await;
                    },
                    None => warn!("💸️ Captured payment for unknown order {order_id}. Ignoring it."),
                }
            },
            WebhookEvent::PaymentFailed(failure) => {
                let order_id = failure.razorpay_order_id.clone();
                match self.db.process_failed_payment(failure).await? {
                    Some(p) => info!("💸️ Payment #{} for order {order_id} failed", p.id),
                    None => warn!("💸️ No pending payment for failed order {order_id}. Ignoring it."),
                }
            },
            WebhookEvent::RefundProcessed(refund) => {
                let payment_id = refund.razorpay_payment_id.clone();
                match self.db.process_refund(refund).await? {
                    Some(p) => info!("💸️ Refund applied to payment #{}. Total refunded: {}", p.id, p.refunded_amount),
                    None => warn!("💸️ Refund for unknown payment {payment_id}. Ignoring it."),
                }
            },
            WebhookEvent::Unhandled(name) => info!("💸️ Unhandled webhook event: {name}"),
        }
        Ok(())
    }

    /// Looks a payment up by its gateway payment id, falling back to the gateway order id.
    pub async fn payment_status(&self, id: &str) -> Result<Option<Payment>, PaymentGatewayError> {
        match self.db.fetch_payment_by_payment_id(id).await? {
            Some(payment) => Ok(Some(payment)),
            None => self.db.fetch_payment_by_order_id(id).await,
        }
    }

    pub async fn pending_payouts(&self, user_id: &UserId) -> Result<Vec<PayoutSummary>, PaymentGatewayError> {
        self.db.fetch_payout_summaries(user_id).await
    }
}
