//! The VR player character.
//!
//! Owns its pose, tracked devices, smooth movement, teleport sequence and
//! comfort vignette by value. Everything it needs from the outside world is
//! handed in through a [`FrameContext`] each call.

use cgmath::{Vector3, vec3};
use engine::{locomotion_log, profile, time::Time, timer::TimerQueue};

use crate::{
    comfort::{ComfortVignette, update_vignette},
    config::{AimSource, LocomotionConfig},
    input::{ActionPhase, BoundInput, InputBindings, LocomotionAction},
    movement::CharacterMovement,
    navigation::NavigableSurface,
    physics::CollisionGateway,
    pose::CharacterPose,
    recenter::recenter,
    screen::{ScreenFader, ScreenProjector},
    teleport::{
        TeleportCandidate, TeleportFadeState, TeleportOutcome, TeleportSystem, TeleportTask,
        TeleportVisualStyle, TeleportVisuals, compute_teleport_candidate,
    },
    tracking::{DevicePose, TrackingFrame},
};

/// Services the character reads and writes during one call.
pub struct FrameContext<'a> {
    pub collision: &'a dyn CollisionGateway,
    pub navigation: &'a dyn NavigableSurface,
    /// Absent when there is no local viewport to project into
    pub screen: Option<&'a dyn ScreenProjector>,
    pub fader: &'a mut dyn ScreenFader,
    /// Timers owned by this character's teleport sequence
    pub timers: &'a mut TimerQueue<TeleportTask>,
}

/// Hooks a game loop calls on a spawned pawn.
pub trait Lifecycle {
    fn on_start(&mut self, ctx: &mut FrameContext);
    fn on_tick(&mut self, time: &Time, ctx: &mut FrameContext);
    fn on_bind_inputs(&mut self, bindings: &mut InputBindings);
}

pub struct VrCharacter {
    config: LocomotionConfig,
    body: CharacterPose,
    /// Tracking origin, relative to the body
    vr_root: Vector3<f32>,
    tracking: TrackingFrame,
    movement: CharacterMovement,
    teleport: TeleportSystem,
    candidate: TeleportCandidate,
    visuals: TeleportVisuals,
    vignette: ComfortVignette,
    last_outcome: Option<TeleportOutcome>,
}

impl VrCharacter {
    /// Spawn standing on `floor_point`, with the tracking origin at floor level.
    pub fn new(config: LocomotionConfig, floor_point: Vector3<f32>) -> Self {
        let half_height = config.capsule_half_height;
        VrCharacter {
            body: CharacterPose::standing_on(floor_point, half_height),
            vr_root: vec3(0.0, -half_height, 0.0),
            tracking: TrackingFrame::default(),
            movement: CharacterMovement::new(config.movement.clone()),
            teleport: TeleportSystem::new(&config.teleport),
            candidate: TeleportCandidate::default(),
            visuals: TeleportVisuals::new(TeleportVisualStyle::default()),
            vignette: ComfortVignette::default(),
            last_outcome: None,
            config,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn body(&self) -> &CharacterPose {
        &self.body
    }

    pub fn vr_root(&self) -> Vector3<f32> {
        self.vr_root
    }

    pub fn candidate(&self) -> &TeleportCandidate {
        &self.candidate
    }

    pub fn visuals(&self) -> &TeleportVisuals {
        &self.visuals
    }

    pub fn vignette(&self) -> &ComfortVignette {
        &self.vignette
    }

    pub fn fade_state(&self) -> TeleportFadeState {
        self.teleport.state()
    }

    pub fn last_outcome(&self) -> Option<TeleportOutcome> {
        self.last_outcome
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.movement.velocity()
    }

    /// Latest poses from the tracking runtime, in tracking space.
    pub fn set_tracking(&mut self, frame: TrackingFrame) {
        self.tracking = frame;
    }

    pub fn camera(&self) -> DevicePose {
        self.body.tracked_to_world(self.vr_root, &self.tracking.head)
    }

    pub fn right_hand(&self) -> Option<DevicePose> {
        self.tracking
            .right_hand
            .map(|hand| self.body.tracked_to_world(self.vr_root, &hand))
    }

    fn aim_pose(&self) -> Option<DevicePose> {
        match self.config.teleport.aim_source {
            AimSource::Hand => self.right_hand(),
            AimSource::Camera => Some(self.camera()),
        }
    }

    pub fn handle_input(&mut self, input: BoundInput, ctx: &mut FrameContext) {
        match input {
            BoundInput::Axis(LocomotionAction::MoveForward, throttle) => {
                let camera = self.camera();
                self.movement.move_forward(throttle, &camera);
            }
            BoundInput::Axis(LocomotionAction::MoveRight, throttle) => {
                let camera = self.camera();
                self.movement.move_right(throttle, &camera);
            }
            BoundInput::Action(LocomotionAction::Teleport) => {
                if self.config.teleport.enabled {
                    self.teleport.begin_teleport(ctx.fader, ctx.timers);
                }
            }
            other => {
                locomotion_log!(DEBUG, "ignoring mismatched input {:?}", other);
            }
        }
    }

    /// Dispatch a task that fired on this character's timer queue.
    pub fn on_timer(&mut self, task: TeleportTask, ctx: &mut FrameContext) {
        let outcome = self.teleport.handle_task(
            task,
            &self.candidate,
            &mut self.body,
            ctx.fader,
            ctx.timers,
        );

        if let Some(outcome) = outcome {
            if matches!(outcome, TeleportOutcome::Moved { .. }) {
                self.movement.stop();
            }
            self.last_outcome = Some(outcome);
        }
    }

    /// One frame, in order: inputs, due timers, then the tick.
    pub fn run_frame(&mut self, time: &Time, inputs: &[BoundInput], ctx: &mut FrameContext) {
        for input in inputs {
            self.handle_input(*input, ctx);
        }

        for task in ctx.timers.advance(time.delta_seconds()) {
            self.on_timer(task, ctx);
        }

        self.on_tick(time, ctx);
    }

    /// Stop anything in flight before the character goes away.
    pub fn tear_down(&mut self) {
        self.teleport.cancel();
        self.visuals.hide();
        self.movement.stop();
    }

    fn update_destination_marker(&mut self, ctx: &FrameContext) {
        self.candidate = match (self.config.teleport.enabled, self.aim_pose()) {
            (true, Some(aim)) => profile!(
                "teleport targeting",
                compute_teleport_candidate(
                    &aim,
                    &self.config.teleport,
                    ctx.collision,
                    ctx.navigation,
                )
            ),
            _ => TeleportCandidate::default(),
        };
        self.visuals.apply(&self.candidate);
    }
}

impl Lifecycle for VrCharacter {
    fn on_start(&mut self, _ctx: &mut FrameContext) {
        self.candidate = TeleportCandidate::default();
        self.visuals.hide();
        self.vignette = ComfortVignette::default();
        locomotion_log!(INFO, "character spawned at {:?}", self.body.position);
    }

    fn on_tick(&mut self, time: &Time, ctx: &mut FrameContext) {
        self.movement.integrate(time.delta_seconds(), &mut self.body);

        let head = self.camera().position;
        recenter(head, &mut self.body, &mut self.vr_root);

        self.update_destination_marker(ctx);

        let camera = self.camera();
        self.vignette = update_vignette(
            self.movement.velocity(),
            &camera,
            &self.config.comfort,
            ctx.screen,
        );
    }

    fn on_bind_inputs(&mut self, bindings: &mut InputBindings) {
        bindings.bind_axis("Forward", LocomotionAction::MoveForward);
        bindings.bind_axis("Right", LocomotionAction::MoveRight);
        bindings.bind_action("Teleport", ActionPhase::Released, LocomotionAction::Teleport);
    }
}
