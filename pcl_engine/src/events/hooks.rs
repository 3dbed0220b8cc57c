use std::{future::Future, pin::Pin, sync::Arc};

use log::trace;

use crate::{
    db_types::Notification,
    events::{EventHandler, EventProducer, Handler, NotificationCreatedEvent, PaymentCapturedEvent},
};

pub type EventFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

#[derive(Default, Clone)]
pub struct EventProducers {
    pub notification_producer: Vec<EventProducer<NotificationCreatedEvent>>,
    pub payment_captured_producer: Vec<EventProducer<PaymentCapturedEvent>>,
}

impl EventProducers {
    /// Publishes a [`NotificationCreatedEvent`] for each notification to every subscriber.
    pub async fn publish_notifications(&self, notifications: &[Notification]) {
        for notification in notifications {
            for producer in &self.notification_producer {
                trace!("📬️ Publishing notification #{}", notification.id);
                producer.publish_event(NotificationCreatedEvent::new(notification.clone())).await;
            }
        }
    }

    pub async fn publish_payment_captured(&self, event: PaymentCapturedEvent) {
        for producer in &self.payment_captured_producer {
            producer.publish_event(event.clone()).await;
        }
    }
}

pub struct EventHandlers {
    pub on_notification_created: Option<EventHandler<NotificationCreatedEvent>>,
    pub on_payment_captured: Option<EventHandler<PaymentCapturedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_notification_created = hooks.on_notification_created.map(|f| EventHandler::new(buffer_size, f));
        let on_payment_captured = hooks.on_payment_captured.map(|f| EventHandler::new(buffer_size, f));
        Self { on_notification_created, on_payment_captured }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_notification_created {
            result.notification_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_payment_captured {
            result.payment_captured_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_notification_created {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_payment_captured {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_notification_created: Option<Handler<NotificationCreatedEvent>>,
    pub on_payment_captured: Option<Handler<PaymentCapturedEvent>>,
}

impl EventHooks {
    pub fn on_notification_created<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(NotificationCreatedEvent) -> EventFuture) + Send + Sync + 'static {
        self.on_notification_created = Some(Arc::new(f));
        self
    }

    pub fn on_payment_captured<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(PaymentCapturedEvent) -> EventFuture) + Send + Sync + 'static {
        self.on_payment_captured = Some(Arc::new(f));
        self
    }
}
