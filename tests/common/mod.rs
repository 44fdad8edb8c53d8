//! Shared helpers for the integration tests

#![allow(dead_code)]

use recordboard::events::{EventBus, ModelEvent, SimpleEventBus};
use recordboard::services::InMemoryRecordService;
use recordboard::{DashboardViewModel, Record};
use std::sync::{Arc, Mutex};

pub const RESOURCE_KIND: &str = "ambulance";

/// Model events captured from a view model's event bus
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<ModelEvent>>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<ModelEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&ModelEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

/// A view model over `service` with a page size of 10 and a recording event bus
pub fn dashboard(
    service: &InMemoryRecordService,
) -> (DashboardViewModel<InMemoryRecordService>, EventLog) {
    let mut vm = DashboardViewModel::new(service.clone(), 10, RESOURCE_KIND).unwrap();
    let log = EventLog::default();
    let sink = log.events.clone();

    let mut bus = SimpleEventBus::new();
    bus.subscribe_to_model_events(Box::new(move |event| {
        sink.lock().unwrap().push(event.clone());
    }));
    vm.set_event_bus(Box::new(bus));
    (vm, log)
}

/// A view model that has finished its initial load
pub async fn mounted_dashboard(
    service: &InMemoryRecordService,
) -> (DashboardViewModel<InMemoryRecordService>, EventLog) {
    let (mut vm, log) = dashboard(service);
    vm.mount();
    vm.run_until_idle().await;
    (vm, log)
}

pub fn displayed_ids(vm: &DashboardViewModel<InMemoryRecordService>) -> Vec<u64> {
    vm.sync_state()
        .page()
        .map(|page| page.items.iter().map(|r: &Record| r.id).collect())
        .unwrap_or_default()
}
