use glam::Vec2;
use roller_common::{LaneDirection, ScreenMetrics};
use roller_input::{Action, InputFrame, PinchDetector, TouchPhase};
use roller_kernel::{Camera, Physics, TouchTargets};

use crate::config::GameConfig;
use crate::player::PlayerState;

/// Per-frame tap, swipe and pinch handling for the player.
#[derive(Debug, Clone)]
pub struct GestureHandler {
    pub tap_enabled: bool,
    pub swipe_enabled: bool,
    pub pinch_enabled: bool,
    pub swipe_move: f32,
    pub pinch_speed: f32,
    pub screen: ScreenMetrics,
}

impl GestureHandler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tap_enabled: config.input.tap,
            swipe_enabled: config.input.swipe,
            pinch_enabled: config.input.pinch,
            swipe_move: config.player.swipe_move,
            pinch_speed: config.player.pinch_speed,
            screen: config.screen,
        }
    }

    /// Recognize and apply this frame's gestures. Returns the recognized
    /// actions in the order they were handled.
    pub fn update(
        &mut self,
        frame: &InputFrame,
        dt: f32,
        player: &mut PlayerState,
        physics: &mut dyn Physics,
        camera: &Camera,
        targets: &mut TouchTargets,
    ) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.tap_enabled {
            for point in tap_points(frame) {
                self.tap(point, physics, camera, targets);
                actions.push(Action::Tap(point));
            }
        }

        if self.swipe_enabled {
            if let Some(dir) = player.swipe.observe(&frame.touches, &self.screen) {
                self.change_lane(dir, player, physics);
                actions.push(Action::Swipe(dir));
            }
        }

        if self.pinch_enabled {
            if let Some(change) = PinchDetector::distance_change(&frame.touches) {
                self.pinch(change, dt, player, physics);
                actions.push(Action::Pinch(change));
            }
        }

        actions
    }

    /// Cast a ray through `point` and notify whatever it hits. Returns true
    /// when a registered handler received the touch.
    pub fn tap(
        &self,
        point: Vec2,
        physics: &dyn Physics,
        camera: &Camera,
        targets: &mut TouchTargets,
    ) -> bool {
        let ray = camera.screen_point_to_ray(point, &self.screen);
        match physics.raycast(&ray, camera.far) {
            Some(hit) => {
                tracing::debug!(entity = %hit.entity.short(), distance = hit.distance, "tap hit");
                targets.dispatch(&hit)
            }
            None => false,
        }
    }

    /// Snap the player one lane sideways unless something is in the way.
    /// Returns true when the player moved.
    pub fn change_lane(
        &self,
        dir: LaneDirection,
        player: &PlayerState,
        physics: &mut dyn Physics,
    ) -> bool {
        if let Some(hit) = physics.sweep(player.body, dir.unit(), self.swipe_move) {
            tracing::debug!(?dir, entity = %hit.entity.short(), "lane change blocked");
            return false;
        }
        match physics.translate(player.body, dir.unit() * self.swipe_move) {
            Ok(()) => {
                tracing::debug!(?dir, "lane change");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not move player");
                false
            }
        }
    }

    /// Scale the player by a pinch distance change over `dt` seconds.
    /// Returns the clamped scale now in effect.
    pub fn pinch(
        &self,
        distance_change: f32,
        dt: f32,
        player: &mut PlayerState,
        physics: &mut dyn Physics,
    ) -> f32 {
        let scale = player.apply_pinch(distance_change * self.pinch_speed * dt);
        if let Err(e) = physics.set_scale(player.body, scale) {
            tracing::warn!(error = %e, "could not scale player");
        }
        scale
    }
}

/// Screen points that went down this frame: new touches, then the pointer.
fn tap_points(frame: &InputFrame) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = frame
        .touches
        .iter()
        .filter(|t| t.phase == TouchPhase::Began)
        .map(|t| t.position)
        .collect();
    if frame.pointer_pressed {
        if let Some(p) = frame.pointer {
            points.push(p);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use roller_common::Transform;
    use roller_input::{HorizontalSource, Touch};
    use roller_kernel::{Body, Collider, RayHit, RigidBody, World};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Rig {
        world: World,
        player: PlayerState,
        handler: GestureHandler,
        camera: Camera,
        targets: TouchTargets,
    }

    impl Rig {
        fn new() -> Self {
            let config = GameConfig::default();
            let mut world = World::new();
            let body = world.spawn(Body::new(
                Transform::default(),
                RigidBody::default(),
                Collider::Sphere { radius: 0.5 },
            ));
            Self {
                world,
                player: PlayerState::new(body, &config.player, HorizontalSource::Axis),
                handler: GestureHandler::new(&config),
                camera: Camera::default(),
                targets: TouchTargets::new(),
            }
        }

        fn frame(&mut self, frame: InputFrame) -> Vec<Action> {
            self.handler.update(
                &frame,
                1.0 / 60.0,
                &mut self.player,
                &mut self.world,
                &self.camera,
                &mut self.targets,
            )
        }

        fn swipe(&mut self, dx: f32) -> Vec<Action> {
            let start = Vec2::new(540.0, 400.0);
            self.frame(InputFrame::with_touches(vec![Touch::began(0, start)]));
            self.frame(InputFrame::with_touches(vec![Touch::ended(
                0,
                start + Vec2::new(dx, 0.0),
            )]))
        }

        fn position(&self) -> Vec3 {
            self.world.get(self.player.body).unwrap().transform.position
        }
    }

    #[test]
    fn short_swipe_does_not_move() {
        let mut rig = Rig::new();
        let actions = rig.swipe(50.0);
        assert!(!actions.iter().any(|a| matches!(a, Action::Swipe(_))));
        assert_eq!(rig.position(), Vec3::ZERO);
    }

    #[test]
    fn clear_swipe_moves_exactly_one_lane() {
        let mut rig = Rig::new();
        let actions = rig.swipe(100.0);
        assert!(actions.contains(&Action::Swipe(LaneDirection::Right)));
        assert_eq!(rig.position(), Vec3::new(2.0, 0.0, 0.0));

        rig.swipe(-100.0);
        rig.swipe(-100.0);
        assert_eq!(rig.position(), Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn obstructed_swipe_does_not_move() {
        let mut rig = Rig::new();
        rig.world
            .spawn_obstacle(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(0.5));
        let actions = rig.swipe(100.0);
        assert!(actions.contains(&Action::Swipe(LaneDirection::Right)));
        assert_eq!(rig.position(), Vec3::ZERO);
        rig.swipe(-100.0);
        assert_eq!(rig.position(), Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn swipe_records_touch_start() {
        let mut rig = Rig::new();
        rig.swipe(10.0);
        assert_eq!(rig.player.last_touch_start(), Some(Vec2::new(540.0, 400.0)));
    }

    #[test]
    fn tap_notifies_hit_target() {
        let mut rig = Rig::new();
        let touched = Rc::new(Cell::new(0));
        let seen = Rc::clone(&touched);
        rig.targets
            .register(rig.player.body, move |_: &RayHit| seen.set(seen.get() + 1));
        let center = rig.handler.screen.center();
        let actions = rig.frame(InputFrame {
            pointer: Some(center),
            pointer_pressed: true,
            ..InputFrame::default()
        });
        assert_eq!(actions, vec![Action::Tap(center)]);
        assert_eq!(touched.get(), 1);
    }

    #[test]
    fn tap_on_nothing_is_silent() {
        let mut rig = Rig::new();
        let corner = Vec2::new(0.0, rig.handler.screen.height);
        assert!(!rig.handler.tap(corner, &rig.world, &rig.camera, &mut rig.targets));
    }

    #[test]
    fn tap_on_target_without_handler_is_silent() {
        let mut rig = Rig::new();
        let center = rig.handler.screen.center();
        assert!(!rig.handler.tap(center, &rig.world, &rig.camera, &mut rig.targets));
    }

    #[test]
    fn pinch_spread_grows_and_clamps() {
        let mut rig = Rig::new();
        let spread = vec![
            Touch::moved(0, Vec2::new(300.0, 500.0), Vec2::new(-60.0, 0.0)),
            Touch::moved(1, Vec2::new(700.0, 500.0), Vec2::new(60.0, 0.0)),
        ];
        let actions = rig.frame(InputFrame::with_touches(spread.clone()));
        assert!(matches!(actions.as_slice(), [Action::Pinch(c)] if *c > 0.0));
        assert!(rig.player.scale() > 1.0);
        for _ in 0..1000 {
            rig.frame(InputFrame::with_touches(spread.clone()));
        }
        assert_eq!(rig.player.scale(), 2.0);
        let body = rig.world.get(rig.player.body).unwrap();
        assert_eq!(body.transform.scale, Vec3::splat(2.0));
    }

    #[test]
    fn pinch_together_shrinks_to_minimum() {
        let mut rig = Rig::new();
        let squeeze = vec![
            Touch::moved(0, Vec2::new(500.0, 500.0), Vec2::new(60.0, 0.0)),
            Touch::moved(1, Vec2::new(580.0, 500.0), Vec2::new(-60.0, 0.0)),
        ];
        for _ in 0..1000 {
            rig.frame(InputFrame::with_touches(squeeze.clone()));
        }
        assert_eq!(rig.player.scale(), 0.5);
    }

    #[test]
    fn disabled_gestures_are_ignored() {
        let mut rig = Rig::new();
        rig.handler.swipe_enabled = false;
        rig.handler.tap_enabled = false;
        let actions = rig.swipe(300.0);
        assert!(actions.is_empty());
        assert_eq!(rig.position(), Vec3::ZERO);
    }
}
