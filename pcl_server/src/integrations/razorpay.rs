use std::sync::Arc;

use log::*;
use pcl_engine::traits::{GatewayOrder, GatewayOrderRequest, IntegrationError, PaymentProvider};
use reqwest::Client;

use crate::{
    config::RazorpayConfig,
    integrations::{not_configured, send_json},
};

pub const RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

#[derive(Clone)]
pub struct RazorpayClient {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        Self { config, client: Arc::new(Client::new()) }
    }

    fn is_configured(&self) -> bool {
        !self.config.key_id.is_empty() && self.config.key_secret.is_set()
    }
}

impl PaymentProvider for RazorpayClient {
    async fn create_order(&self, order: GatewayOrderRequest) -> Result<GatewayOrder, IntegrationError> {
        if !self.is_configured() {
            return Err(not_configured("Razorpay credentials are not set"));
        }
        trace!("💸️ Creating Razorpay order for receipt {}", order.receipt);
        let req = self
            .client
            .post(format!("{RAZORPAY_API_URL}/orders"))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.reveal()))
            .json(&order);
        let order = send_json::<GatewayOrder>(req).await?;
        debug!("💸️ Razorpay order {} created with status {}", order.id, order.status);
        Ok(order)
    }
}
