//! The network map facade.
//!
//! [`NetworkMap`] is the single owner of the map's state: the hub table,
//! the memoized network, the viewport, the hover target and the geography
//! state. It is mutated only through its methods (directly or via
//! [`InputEvent`]s) and produces a [`Scene`] per frame.

use crate::{
    core::{
        bounds::Bounds,
        config::NetworkMapConfig,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    data::{
        geography::{Geography, GeographyState},
        loader::GeographyLoader,
    },
    input::{Action, EventHandled, InputEvent, InputHandler, MapEvent},
    network::{
        graph::{Connection, NetworkCache},
        hub::HubTable,
    },
    rendering::{
        projection::Projection,
        scene::{RenderPass, Scene},
        svg::SvgRenderer,
    },
    ui::{HoverState, HoverTarget, ZoomControls},
    Result,
};
use std::sync::Arc;

#[cfg(feature = "tokio-runtime")]
use crate::data::loader::GeographySource;

pub struct NetworkMap {
    hubs: HubTable,
    config: NetworkMapConfig,
    viewport: Viewport,
    hover: HoverState,
    /// Client rectangle of the map container; hover needs it
    container: Option<Bounds>,
    geography: GeographyState,
    loader: Option<GeographyLoader>,
    network: NetworkCache,
    projection: Box<dyn Projection>,
    input_handler: InputHandler,
}

impl NetworkMap {
    /// Assembles a map from validated parts; see [`NetworkMapBuilder`](crate::NetworkMapBuilder)
    pub(crate) fn from_parts(
        hubs: HubTable,
        config: NetworkMapConfig,
        viewport: Viewport,
        projection: Box<dyn Projection>,
        container: Option<Bounds>,
    ) -> Self {
        log::debug!(
            "Network map with {} hubs, threshold {} km, {} projection",
            hubs.len(),
            config.network.threshold_km,
            projection.name()
        );

        Self {
            hubs,
            config,
            viewport,
            hover: HoverState::new(),
            container,
            geography: GeographyState::Loading,
            loader: None,
            network: NetworkCache::new(),
            projection,
            input_handler: InputHandler::new(),
        }
    }

    pub fn hubs(&self) -> &HubTable {
        &self.hubs
    }

    pub fn config(&self) -> &NetworkMapConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn hover_target(&self) -> Option<&HoverTarget> {
        self.hover.target()
    }

    pub fn geography_state(&self) -> &GeographyState {
        &self.geography
    }

    pub fn container(&self) -> Option<&Bounds> {
        self.container.as_ref()
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    pub fn threshold_km(&self) -> f64 {
        self.config.network.threshold_km
    }

    /// The connections for the current hub table and threshold, built on
    /// first use and reused until the threshold changes
    pub fn connections(&mut self) -> Arc<[Connection]> {
        self.network
            .get_or_build(&self.hubs, self.config.network.threshold_km)
    }

    pub fn set_threshold(&mut self, threshold_km: f64) {
        self.config.network.threshold_km = threshold_km;
    }

    /// How many times the network has been built
    pub fn network_builds(&self) -> usize {
        self.network.builds()
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        self.view_changed(changed);
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        self.view_changed(changed);
        changed
    }

    /// Commits the end of a pan/zoom gesture
    pub fn set_viewport(&mut self, center: LatLng, zoom: f64) -> bool {
        let changed = self.viewport.set_viewport(center, zoom);
        self.view_changed(changed);
        changed
    }

    fn view_changed(&mut self, changed: bool) {
        if changed {
            log::trace!(
                "View changed: center {:?}, zoom {}",
                self.viewport.center,
                self.viewport.zoom
            );
            self.input_handler.emit_event(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
    }

    pub fn set_container(&mut self, container: Option<Bounds>) {
        self.container = container;
    }

    /// Hovers the hub with `hub_id` at a client-space pointer position.
    /// An unknown id clears the tooltip.
    pub fn hover(&mut self, hub_id: &str, client: Point) -> bool {
        let hub = self.hubs.get(hub_id);
        if hub.is_none() {
            log::warn!("Hover on unknown hub '{}'", hub_id);
        }
        let changed = self.hover.update(hub, Some(client), self.container.as_ref());
        self.hover_changed(changed);
        changed
    }

    pub fn clear_hover(&mut self) -> bool {
        let changed = self.hover.clear();
        self.hover_changed(changed);
        changed
    }

    fn hover_changed(&mut self, changed: bool) {
        if changed {
            let hub_id = self.hover.target().map(|target| target.hub.id.clone());
            self.input_handler.emit_event(MapEvent::HoverChanged { hub_id });
        }
    }

    fn controls(&self) -> Option<ZoomControls> {
        let render = &self.config.render;
        render.show_controls.then(|| ZoomControls::layout(render.width))
    }

    /// Applies one input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventHandled {
        let controls = self.controls();
        let actions = self.input_handler.handle_event(event, controls.as_ref());
        if actions.is_empty() {
            return EventHandled::NotHandled;
        }

        for action in actions {
            self.execute_action(action);
        }
        EventHandled::Handled
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::ZoomIn => {
                self.zoom_in();
            }
            Action::ZoomOut => {
                self.zoom_out();
            }
            Action::SetView { center, zoom } => {
                self.set_viewport(center, zoom);
            }
            Action::Hover { hub_id, client } => {
                self.hover(&hub_id, client);
            }
            Action::ClearHover => {
                self.clear_hover();
            }
            Action::SetContainer(container) => {
                self.set_container(Some(container));
            }
        }
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.input_handler.on(event_type, callback);
    }

    /// Dispatches pending map events to listeners and returns them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.input_handler.process_events()
    }

    /// Starts fetching geography on the current tokio runtime
    #[cfg(feature = "tokio-runtime")]
    pub fn load_geography(&mut self, source: Arc<dyn GeographySource>) {
        log::info!("Loading geography from {}", source.describe());
        self.attach_loader(GeographyLoader::spawn(source));
    }

    /// Waits on an externally driven load
    pub fn attach_loader(&mut self, loader: GeographyLoader) {
        self.geography = GeographyState::Loading;
        self.loader = Some(loader);
    }

    pub fn set_geography(&mut self, geography: Geography) {
        self.loader = None;
        self.input_handler.emit_event(MapEvent::GeographyLoaded {
            countries: geography.len(),
        });
        self.geography = GeographyState::Ready(Arc::new(geography));
    }

    /// Absorbs a finished load, if any. Returns whether the state changed.
    pub fn poll_geography(&mut self) -> bool {
        let Some(result) = self.loader.as_mut().and_then(GeographyLoader::try_take) else {
            return false;
        };
        self.loader = None;

        match result {
            Ok(geography) => self.set_geography(geography),
            Err(e) => {
                log::error!("Geography unavailable, keeping placeholder: {}", e);
                let reason = e.to_string();
                self.input_handler.emit_event(MapEvent::GeographyFailed {
                    reason: reason.clone(),
                });
                self.geography = GeographyState::Failed(reason);
            }
        }
        true
    }

    /// Composes the current frame
    pub fn scene(&mut self) -> Scene {
        let connections = self.connections();
        RenderPass {
            viewport: &self.viewport,
            geography: &self.geography,
            connections: &connections,
            hubs: &self.hubs,
            hover: self.hover.target(),
            projection: self.projection.as_ref(),
            config: &self.config.render,
        }
        .compose()
    }

    pub fn render_svg(&mut self, renderer: &SvgRenderer) -> Result<String> {
        let scene = self.scene();
        renderer.render(&scene)
    }
}
