//! # Events Module
//!
//! Model events describe what changed in the dashboard; view events tell
//! the renderer what to redraw. Both travel over an [`EventBus`].

pub mod event_bus;
pub mod model_events;
pub mod types;
pub mod view_events;

pub use event_bus::{EventBus, ModelEventHandler, SimpleEventBus, ViewEventHandler};
pub use model_events::ModelEvent;
pub use types::{FetchReason, Section};
pub use view_events::{sections_to_redraw, ViewEvent};
