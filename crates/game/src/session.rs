use glam::Vec3;
use roller_common::{EntityId, Transform};
use roller_input::{Action, HorizontalSource, InputFrame, InputSampler};
use roller_kernel::{Body, Camera, Collider, KernelError, Physics, RigidBody, TouchTargets, World};
use roller_persist::SettingsStore;

use crate::config::{ConfigError, GameConfig};
use crate::gesture::GestureHandler;
use crate::menu::{MenuCommand, MenuState, SceneLoader, SceneRequest};
use crate::movement::MovementController;
use crate::player::PlayerState;
use crate::score::{ScoreDisplay, ScoreKeeper};
use crate::timestep::FixedTimestep;

/// What happened during one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub actions: Vec<Action>,
    pub fixed_steps: u32,
    pub paused: bool,
}

/// One level being played.
///
/// Owns every piece of mutable game state, including the pause flag. The host
/// calls [`GameSession::frame`] once per rendered frame; fixed steps are run
/// from inside it.
pub struct GameSession<P: Physics = World> {
    config: GameConfig,
    physics: P,
    camera: Camera,
    player: PlayerState,
    spawn: Transform,
    input: Box<dyn InputSampler>,
    targets: TouchTargets,
    movement: MovementController,
    gestures: GestureHandler,
    score: ScoreKeeper,
    menu: MenuState,
    scene_loader: Option<Box<dyn SceneLoader>>,
    timestep: FixedTimestep,
    frames: u64,
    fixed_steps: u64,
}

impl GameSession<World> {
    /// Session on the reference physics world with a freshly spawned ball.
    pub fn with_world(
        config: GameConfig,
        input: Box<dyn InputSampler>,
        store: Box<dyn SettingsStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = World::with_drag(config.linear_drag);
        let body = world.spawn(Body::new(
            Transform::default(),
            RigidBody {
                mass: config.player.mass,
                is_kinematic: false,
            },
            Collider::Sphere {
                radius: config.player.radius,
            },
        ));
        Self::new(config, world, body, input, store)
    }
}

impl<P: Physics> GameSession<P> {
    /// Start a level around an existing player body.
    pub fn new(
        config: GameConfig,
        mut physics: P,
        player_body: EntityId,
        input: Box<dyn InputSampler>,
        store: Box<dyn SettingsStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let spawn = physics.transform(player_body).unwrap_or_else(|| {
            tracing::warn!(entity = %player_body.short(), "player body missing at level start");
            Transform::default()
        });
        let mut player = PlayerState::new(player_body, &config.player, config.input.source);
        warn_on_err(physics.set_scale(player_body, player.scale()), "scale player");

        let mut camera = Camera::default();
        camera.follow(spawn.position);

        let mut score = ScoreKeeper::new(store);
        score.reset(&mut player);

        tracing::info!(
            source = %config.input.source,
            high_score = score.high_score(),
            "level started"
        );

        Ok(Self {
            movement: MovementController::new(&config.player),
            gestures: GestureHandler::new(&config),
            timestep: FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame),
            config,
            physics,
            camera,
            player,
            spawn,
            input,
            targets: TouchTargets::new(),
            score,
            menu: MenuState::Playing,
            scene_loader: None,
            frames: 0,
            fixed_steps: 0,
        })
    }

    /// Run one rendered frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        self.frames += 1;
        let input = self.input.sample();
        let mut actions = Vec::new();

        if input.cancel_pressed {
            self.toggle_pause();
            actions.push(Action::TogglePause);
        }

        let steps = if self.is_paused() {
            self.timestep.reset();
            0
        } else {
            actions.extend(self.gestures.update(
                &input,
                dt,
                &mut self.player,
                &mut self.physics,
                &self.camera,
                &mut self.targets,
            ));
            self.timestep.advance(dt)
        };

        let mut ran = 0;
        for _ in 0..steps {
            if self.fixed_step(&input) {
                ran += 1;
            }
        }

        if let Some(t) = self.physics.transform(self.player.body) {
            self.camera.follow(t.position);
        }

        FrameReport {
            actions,
            fixed_steps: ran,
            paused: self.is_paused(),
        }
    }

    /// One fixed simulation step: steering force, physics, score.
    /// Returns false and changes nothing while paused.
    pub fn fixed_step(&mut self, frame: &InputFrame) -> bool {
        let _span = tracing::info_span!("fixed_step", step = self.fixed_steps).entered();
        if self.is_paused() {
            return false;
        }
        let dt = self.timestep.dt();
        self.movement.fixed_step(
            &self.player,
            frame,
            &self.config.screen,
            &mut self.physics,
            false,
        );
        self.physics.step(dt);
        self.score.accumulate(&mut self.player, dt);
        self.fixed_steps += 1;
        true
    }

    pub fn apply(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::Pause => self.set_paused(true),
            MenuCommand::Resume => self.set_paused(false),
            MenuCommand::TogglePause => self.toggle_pause(),
            MenuCommand::Restart => {
                self.restart();
                self.request_scene(SceneRequest::Level);
            }
            MenuCommand::MainMenu => {
                self.set_paused(false);
                self.request_scene(SceneRequest::MainMenu);
            }
            MenuCommand::ResetHighScore => self.score.reset_high_score(self.player.score()),
        }
    }

    /// Put the player back at the spawn point with a fresh state.
    /// The high score is kept.
    pub fn restart(&mut self) {
        let body = self.player.body;
        self.player = PlayerState::new(body, &self.config.player, self.player.mode);
        warn_on_err(self.physics.halt(body), "stop player");
        warn_on_err(
            self.physics.set_position(body, self.spawn.position),
            "move player to spawn",
        );
        warn_on_err(self.physics.set_scale(body, self.player.scale()), "scale player");
        self.score.reset(&mut self.player);
        self.menu = MenuState::Playing;
        self.timestep.reset();
        self.camera.follow(self.spawn.position);
        tracing::info!("level restarted");
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.is_paused());
    }

    pub fn set_paused(&mut self, paused: bool) {
        let next = if paused {
            MenuState::Paused
        } else {
            MenuState::Playing
        };
        if next != self.menu {
            self.menu = next;
            tracing::info!(paused, "pause toggled");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.menu.is_paused()
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    /// Switch the steering source while playing.
    pub fn set_source(&mut self, source: HorizontalSource) {
        tracing::info!(%source, "steering source changed");
        self.player.mode = source;
    }

    pub fn set_score_display(&mut self, display: impl ScoreDisplay + 'static) {
        self.score.set_display(display);
    }

    pub fn set_scene_loader(&mut self, loader: impl SceneLoader + 'static) {
        self.scene_loader = Some(Box::new(loader));
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn targets_mut(&mut self) -> &mut TouchTargets {
        &mut self.targets
    }

    pub fn score(&self) -> f32 {
        self.player.score()
    }

    pub fn high_score(&self) -> i64 {
        self.score.high_score()
    }

    pub fn player_position(&self) -> Vec3 {
        self.physics
            .transform(self.player.body)
            .map_or(self.spawn.position, |t| t.position)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            fixed_steps: self.fixed_steps,
            paused: self.is_paused(),
            score: self.score(),
            high_score: self.high_score(),
            position: self.player_position(),
            scale: self.player.scale(),
            source: self.player.mode,
        }
    }

    fn request_scene(&mut self, scene: SceneRequest) {
        match self.scene_loader.as_mut() {
            Some(loader) => {
                tracing::info!(scene = scene.name(), "scene load requested");
                loader.load(scene);
            }
            None => tracing::warn!(scene = scene.name(), "no scene loader, request ignored"),
        }
    }
}

fn warn_on_err(result: Result<(), KernelError>, what: &str) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "could not {what}");
    }
}

/// Snapshot of a session for logs and the CLI.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: u64,
    pub fixed_steps: u64,
    pub paused: bool,
    pub score: f32,
    pub high_score: i64,
    pub position: Vec3,
    pub scale: f32,
    pub source: HorizontalSource,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: frames={} steps={} score={:.2} best={} pos=({:.2}, {:.2}, {:.2}) scale={:.2} source={} paused={}",
            self.frames,
            self.fixed_steps,
            self.score,
            self.high_score,
            self.position.x,
            self.position.y,
            self.position.z,
            self.scale,
            self.source,
            self.paused
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::SharedScoreText;
    use glam::Vec2;
    use roller_input::{ScriptedInput, Touch};
    use roller_persist::{FileSettings, MemorySettings};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 0.02;

    fn session(frames: Vec<InputFrame>) -> GameSession {
        GameSession::with_world(
            GameConfig::default(),
            Box::new(ScriptedInput::new(frames)),
            Box::new(MemorySettings::new()),
        )
        .unwrap()
    }

    fn swipe_frames(dx: f32) -> Vec<InputFrame> {
        let start = Vec2::new(540.0, 300.0);
        vec![
            InputFrame::with_touches(vec![Touch::began(0, start)]),
            InputFrame::with_touches(vec![Touch::ended(0, start + Vec2::new(dx, 0.0))]),
        ]
    }

    #[test]
    fn score_is_sum_of_fixed_steps() {
        let mut s = session(vec![]);
        let mut last = 0.0;
        for _ in 0..50 {
            let report = s.frame(DT);
            assert_eq!(report.fixed_steps, 1);
            assert!(s.score() >= last);
            last = s.score();
        }
        assert!((s.score() - 50.0 * DT).abs() < 1e-4);
        assert_eq!(s.summary().fixed_steps, 50);
    }

    #[test]
    fn ball_rolls_forward_on_its_own() {
        let mut s = session(vec![]);
        for _ in 0..10 {
            s.frame(DT);
        }
        let pos = s.player_position();
        assert!(pos.z > 0.0);
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn pause_halts_score_and_motion() {
        let mut frames = vec![InputFrame::idle(); 5];
        frames.push(InputFrame::cancel());
        frames.extend(vec![InputFrame::with_axis(1.0); 10]);
        frames.push(InputFrame::cancel());
        let mut s = session(frames);

        for _ in 0..5 {
            s.frame(DT);
        }
        let report = s.frame(DT);
        assert!(report.paused);
        assert_eq!(report.actions, vec![Action::TogglePause]);
        let score = s.score();
        let pos = s.player_position();

        for _ in 0..10 {
            let r = s.frame(DT);
            assert_eq!(r.fixed_steps, 0);
        }
        assert_eq!(s.score(), score);
        assert_eq!(s.player_position(), pos);

        let report = s.frame(DT);
        assert!(!report.paused);
        assert_eq!(report.fixed_steps, 1);
        assert!(s.score() > score);
        assert!(s.player_position().z > pos.z);
    }

    #[test]
    fn fixed_step_is_gated_by_pause() {
        let mut s = session(vec![]);
        s.apply(MenuCommand::Pause);
        assert!(!s.fixed_step(&InputFrame::with_axis(1.0)));
        assert_eq!(s.score(), 0.0);
        s.apply(MenuCommand::Resume);
        assert!(s.fixed_step(&InputFrame::with_axis(1.0)));
        assert!(s.player_position().x > 0.0);
    }

    #[test]
    fn swipe_changes_lane() {
        let mut s = session(swipe_frames(100.0));
        s.frame(DT);
        let report = s.frame(DT);
        assert!(
            report
                .actions
                .contains(&Action::Swipe(roller_common::LaneDirection::Right))
        );
        assert_eq!(s.player_position().x, 2.0);
    }

    #[test]
    fn swipe_while_paused_is_ignored() {
        let mut frames = vec![InputFrame::cancel()];
        frames.extend(swipe_frames(200.0));
        let mut s = session(frames);
        for _ in 0..3 {
            s.frame(DT);
        }
        assert_eq!(s.player_position().x, 0.0);
    }

    #[test]
    fn runtime_source_switch() {
        let tilt = InputFrame {
            acceleration: Vec3::new(-0.5, 0.0, 0.0),
            axis_horizontal: 1.0,
            ..InputFrame::default()
        };
        let mut s = session(vec![tilt; 5]);
        s.set_source(HorizontalSource::Accelerometer);
        for _ in 0..5 {
            s.frame(DT);
        }
        assert!(s.player_position().x < 0.0);
        assert_eq!(s.summary().source, HorizontalSource::Accelerometer);
    }

    #[test]
    fn restart_resets_level_but_keeps_high_score() {
        let mut s = session(vec![InputFrame::with_axis(1.0); 100]);
        for _ in 0..110 {
            s.frame(DT);
        }
        let best = s.high_score();
        assert_eq!(best, 2);
        s.apply(MenuCommand::Pause);
        s.apply(MenuCommand::Restart);
        assert!(!s.is_paused());
        assert_eq!(s.score(), 0.0);
        assert_eq!(s.player_position(), Vec3::ZERO);
        assert_eq!(s.high_score(), best);
        s.frame(DT);
        let body = s.physics().get(s.player().body).unwrap();
        assert!(body.velocity.z > 0.0 && body.velocity.z < 1.0);
    }

    #[test]
    fn menu_requests_scenes() {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&requests);
        let mut s = session(vec![]);
        s.set_scene_loader(move |scene: SceneRequest| log.borrow_mut().push(scene));
        s.apply(MenuCommand::Pause);
        s.apply(MenuCommand::MainMenu);
        assert!(!s.is_paused());
        s.apply(MenuCommand::Restart);
        assert_eq!(
            *requests.borrow(),
            vec![SceneRequest::MainMenu, SceneRequest::Level]
        );
    }

    #[test]
    fn missing_scene_loader_is_harmless() {
        let mut s = session(vec![]);
        s.apply(MenuCommand::MainMenu);
        s.apply(MenuCommand::Restart);
        assert_eq!(s.menu_state(), MenuState::Playing);
    }

    #[test]
    fn reset_high_score_command() {
        let mut s = session(vec![]);
        let text = SharedScoreText::new();
        s.set_score_display(text.clone());
        for _ in 0..110 {
            s.frame(DT);
        }
        assert_eq!(s.high_score(), 2);
        s.apply(MenuCommand::ResetHighScore);
        assert_eq!(s.high_score(), 0);
        assert_eq!(text.text(), "Score: 2  Best: 0");
    }

    #[test]
    fn high_score_persists_across_sessions() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut s = GameSession::with_world(
                GameConfig::default(),
                Box::new(ScriptedInput::default()),
                Box::new(FileSettings::open_in(tmp.path()).unwrap()),
            )
            .unwrap();
            for _ in 0..160 {
                s.frame(DT);
            }
            assert_eq!(s.high_score(), 3);
        }
        let s = GameSession::with_world(
            GameConfig::default(),
            Box::new(ScriptedInput::default()),
            Box::new(FileSettings::open_in(tmp.path()).unwrap()),
        )
        .unwrap();
        assert_eq!(s.high_score(), 3);
        assert_eq!(s.score(), 0.0);
    }

    #[test]
    fn identical_input_gives_identical_runs() {
        let script: Vec<InputFrame> = (0..60)
            .map(|i| InputFrame::with_axis(((i as f32) * 0.3).sin()))
            .collect();
        let mut a = session(script.clone());
        let mut b = session(script);
        for _ in 0..60 {
            a.frame(DT);
            b.frame(DT);
        }
        assert_eq!(a.player_position(), b.player_position());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.fixed_dt = -1.0;
        let result = GameSession::with_world(
            config,
            Box::new(ScriptedInput::default()),
            Box::new(MemorySettings::new()),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn summary_displays_state() {
        let mut s = session(vec![]);
        s.frame(DT);
        let text = s.summary().to_string();
        assert!(text.contains("steps=1"));
        assert!(text.contains("source=axis"));
    }
}
