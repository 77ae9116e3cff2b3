use std::collections::BTreeMap;

use roller_common::EntityId;

use crate::physics::RayHit;

/// Something that wants to know when a tap ray hits it.
///
/// Delivery is fire-and-forget: there is no reply and no retry.
pub trait Touchable {
    fn on_touched(&mut self, hit: &RayHit);
}

impl<F: FnMut(&RayHit)> Touchable for F {
    fn on_touched(&mut self, hit: &RayHit) {
        self(hit)
    }
}

/// Registry of bodies that opted into tap notifications.
#[derive(Default)]
pub struct TouchTargets {
    targets: BTreeMap<EntityId, Box<dyn Touchable>>,
}

impl TouchTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `entity`, replacing any previous one.
    pub fn register(&mut self, entity: EntityId, handler: impl Touchable + 'static) {
        self.targets.insert(entity, Box::new(handler));
    }

    pub fn unregister(&mut self, entity: EntityId) -> bool {
        self.targets.remove(&entity).is_some()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.targets.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Deliver a touch to the hit entity. Returns false when nothing is
    /// registered for it.
    pub fn dispatch(&mut self, hit: &RayHit) -> bool {
        match self.targets.get_mut(&hit.entity) {
            Some(handler) => {
                handler.on_touched(hit);
                true
            }
            None => {
                tracing::debug!(entity = %hit.entity.short(), "touched entity has no handler");
                false
            }
        }
    }
}

impl std::fmt::Debug for TouchTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchTargets")
            .field("targets", &self.targets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::cell::Cell;
    use std::rc::Rc;

    fn hit(entity: EntityId) -> RayHit {
        RayHit {
            entity,
            point: Vec3::ZERO,
            distance: 1.0,
        }
    }

    #[test]
    fn dispatch_reaches_registered_handler() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let id = EntityId::new();
        let mut targets = TouchTargets::new();
        targets.register(id, move |_: &RayHit| seen.set(seen.get() + 1));
        assert!(targets.dispatch(&hit(id)));
        assert!(targets.dispatch(&hit(id)));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn missing_handler_is_a_no_op() {
        let mut targets = TouchTargets::new();
        assert!(!targets.dispatch(&hit(EntityId::new())));
    }

    #[test]
    fn unregister_stops_delivery() {
        let id = EntityId::new();
        let mut targets = TouchTargets::new();
        targets.register(id, |_: &RayHit| {});
        assert!(targets.contains(id));
        assert!(targets.unregister(id));
        assert!(!targets.dispatch(&hit(id)));
        assert!(targets.is_empty());
    }
}
