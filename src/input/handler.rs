use crate::{
    core::{
        bounds::Bounds,
        geo::{LatLng, Point},
    },
    input::events::{InputEvent, MapEvent},
    ui::controls::{ZoomAction, ZoomControls},
};
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// State change requested by an input event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    /// Overwrite center and zoom after a gesture
    SetView { center: LatLng, zoom: f64 },
    /// Show the tooltip for a hub at a client-space pointer position
    Hover { hub_id: String, client: Point },
    ClearHover,
    /// New container client rectangle
    SetContainer(Bounds),
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Event management system for the map
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: FxHashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Dispatches queued events to their listeners and returns them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

/// Turns input events into map actions and carries the map's listeners
pub struct InputHandler {
    pub enabled: bool,
    event_manager: EventManager,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            event_manager: EventManager::new(),
        }
    }

    /// Maps one input event to the actions it requests. Clicks are only
    /// meaningful over the zoom buttons.
    pub fn handle_event(&self, event: InputEvent, controls: Option<&ZoomControls>) -> Vec<Action> {
        if !self.enabled {
            return vec![];
        }

        let action = match event {
            InputEvent::PointerEnter { hub_id, client } => Some(Action::Hover { hub_id, client }),
            InputEvent::PointerLeave => Some(Action::ClearHover),
            InputEvent::Click { position } => controls
                .and_then(|controls| controls.hit_test(&position))
                .map(|zoom| match zoom {
                    ZoomAction::In => Action::ZoomIn,
                    ZoomAction::Out => Action::ZoomOut,
                }),
            InputEvent::ZoomIn => Some(Action::ZoomIn),
            InputEvent::ZoomOut => Some(Action::ZoomOut),
            InputEvent::MoveEnd { center, zoom } => Some(Action::SetView { center, zoom }),
            InputEvent::Resize { container } => Some(Action::SetContainer(container)),
        };

        action.into_iter().collect()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn emit_event(&mut self, event: MapEvent) {
        self.event_manager.emit(event);
    }

    /// Process all queued events and return them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    pub fn pending_events(&self) -> usize {
        self.event_manager.pending_events()
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
