//! # Event Bus
//!
//! Fan-out of model and view events to subscribers, so observers of the
//! dashboard never hold references into its state.

use super::model_events::ModelEvent;
use super::view_events::ViewEvent;

/// Type alias for model event handlers to reduce complexity
pub type ModelEventHandler = Box<dyn Fn(&ModelEvent) + Send + Sync>;

/// Type alias for view event handlers to reduce complexity
pub type ViewEventHandler = Box<dyn Fn(&ViewEvent) + Send + Sync>;

pub trait EventBus: Send + Sync {
    fn publish_model_event(&mut self, event: ModelEvent);

    fn publish_view_event(&mut self, event: ViewEvent);

    fn subscribe_to_model_events(&mut self, handler: ModelEventHandler);

    fn subscribe_to_view_events(&mut self, handler: ViewEventHandler);
}

/// Synchronous in-memory bus. Handlers run in subscription order.
#[derive(Default)]
pub struct SimpleEventBus {
    model_handlers: Vec<ModelEventHandler>,
    view_handlers: Vec<ViewEventHandler>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventBus for SimpleEventBus {
    fn publish_model_event(&mut self, event: ModelEvent) {
        for handler in &self.model_handlers {
            handler(&event);
        }
    }

    fn publish_view_event(&mut self, event: ViewEvent) {
        for handler in &self.view_handlers {
            handler(&event);
        }
    }

    fn subscribe_to_model_events(&mut self, handler: ModelEventHandler) {
        self.model_handlers.push(handler);
    }

    fn subscribe_to_view_events(&mut self, handler: ViewEventHandler) {
        self.view_handlers.push(handler);
    }
}
