use crate::{
    core::{bounds::Bounds, geo::Point},
    network::hub::Hub,
};

/// The hovered hub and where the pointer was, in container-local pixels
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    pub hub: Hub,
    pub position: Point,
}

impl HoverTarget {
    /// Places a hover target from a pointer position in client (page)
    /// coordinates and the container's client rectangle.
    pub fn locate(hub: &Hub, client: Point, container: &Bounds) -> Self {
        Self {
            hub: hub.clone(),
            position: client.subtract(&container.min),
        }
    }

    /// Tooltip anchor: the pointer position shifted by `offset`
    pub fn anchor(&self, offset: Point) -> Point {
        self.position.add(&offset)
    }
}

/// Transient hover state of the map; never persisted
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    target: Option<HoverTarget>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the hover target. This is the only way the target
    /// changes: any missing piece (hub, pointer, container) clears it.
    ///
    /// Returns whether the hovered hub changed.
    pub fn update(
        &mut self,
        hub: Option<&Hub>,
        client: Option<Point>,
        container: Option<&Bounds>,
    ) -> bool {
        let previous = self.target.as_ref().map(|target| target.hub.id.clone());

        self.target = match (hub, client, container) {
            (Some(hub), Some(client), Some(container)) => {
                Some(HoverTarget::locate(hub, client, container))
            }
            _ => None,
        };

        previous.as_deref() != self.target.as_ref().map(|target| target.hub.id.as_str())
    }

    pub fn clear(&mut self) -> bool {
        self.update(None, None, None)
    }

    pub fn target(&self) -> Option<&HoverTarget> {
        self.target.as_ref()
    }
}
