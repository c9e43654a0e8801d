// Teleport Sim - headless driver for the VR locomotion character
//
// Loads a scene of static boxes and a nav mesh, spawns a character, aims its
// right hand with a fixed pitch and yaw, squeezes and releases the teleport
// trigger at a chosen tick, and reports what the character did each frame.

mod projector;
mod scene;

use std::path::PathBuf;

use cgmath::{Deg, Quaternion, Rotation3, Vector2, Vector3};
use clap::Parser;
use engine::{logging::init_logging, time::Time, timer::TimerQueue};
use serde::Serialize;
use tracing::info;
use vrdemo::{
    FrameContext, Lifecycle, LocomotionConfig, VrCharacter,
    input::{InputBindings, InputEvent, TriggerEdge},
    screen::RecordingFader,
    teleport::{TeleportOutcome, TeleportTask},
    tracking::{DevicePose, TrackingFrame},
};

use crate::{projector::PerspectiveProjector, scene::SceneFile};

const CAPSULE_RADIUS: f32 = 34.0;
const VIEWPORT_WIDTH: u32 = 1832;
const VIEWPORT_HEIGHT: u32 = 1920;
const FIELD_OF_VIEW: f32 = 100.0;
/// Ticks the trigger is held before the release
const TRIGGER_HOLD_TICKS: usize = 5;

#[derive(Parser)]
#[command(name = "teleport_sim")]
#[command(about = "Run the VR locomotion character against a scene without a headset")]
struct Args {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Locomotion config (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value = "400")]
    ticks: usize,

    /// Tick rate in Hz
    #[arg(long, default_value = "90")]
    rate: f32,

    /// Tick on which the teleport trigger is released
    #[arg(long)]
    teleport_at: Option<usize>,

    /// Hand pitch in degrees, negative aims down
    #[arg(long, default_value = "-30", allow_hyphen_values = true)]
    pitch: f32,

    /// Hand yaw in degrees, positive turns left
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    yaw: f32,

    /// Forward thumbstick throttle held for the whole run
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    walk: f32,

    /// Print a report line every N ticks
    #[arg(long, default_value = "30")]
    every: usize,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TickReport {
    tick: usize,
    seconds: f32,
    valid: bool,
    destination: Option<Vector3<f32>>,
    body: Vector3<f32>,
    /// Where the capsule's base touches the floor
    feet: Vector3<f32>,
    fade_state: String,
    vignette_radius: Option<f32>,
    vignette_center: Vector2<f32>,
    arc_length: f32,
}

#[derive(Serialize)]
struct SimReport {
    final_tick: TickReport,
    fade_requests: usize,
    outcome: Option<String>,
}

fn report(character: &VrCharacter, tick: usize, time: &Time) -> TickReport {
    let vignette = character.vignette();
    TickReport {
        tick,
        seconds: time.total.as_secs_f32(),
        valid: character.candidate().is_valid,
        destination: character.candidate().valid_destination(),
        body: character.body().position,
        feet: character.body().feet(),
        fade_state: format!("{:?}", character.fade_state()),
        vignette_radius: vignette.radius,
        vignette_center: vignette.center,
        arc_length: character.visuals().path_curve.arc_length(),
    }
}

fn print_tick(report: &TickReport) {
    let destination = match report.destination {
        Some(d) => format!("({:.1}, {:.1}, {:.1})", d.x, d.y, d.z),
        None => "none".to_owned(),
    };
    println!(
        "[{:>4} {:>6.2}s] valid={:<5} dest={} feet=({:.1}, {:.1}, {:.1}) fade={} vignette={:?}@({:.2}, {:.2}) arc={:.1}",
        report.tick,
        report.seconds,
        report.valid,
        destination,
        report.feet.x,
        report.feet.y,
        report.feet.z,
        report.fade_state,
        report.vignette_radius,
        report.vignette_center.x,
        report.vignette_center.y,
        report.arc_length,
    );
}

fn trigger_value(tick: usize, teleport_at: Option<usize>) -> f32 {
    match teleport_at {
        Some(release) if tick + TRIGGER_HOLD_TICKS >= release && tick < release => 1.0,
        _ => 0.0,
    }
}

fn main() -> anyhow::Result<()> {
    init_logging("VRDEMO_LOG");
    let args = Args::parse();

    if !args.rate.is_finite() || args.rate <= 0.0 {
        anyhow::bail!("tick rate must be positive, got {}", args.rate);
    }

    let scene = SceneFile::load(&args.scene)?;
    let config = match &args.config {
        Some(path) => LocomotionConfig::load(path)?,
        None => LocomotionConfig::default(),
    };
    info!(
        "Loaded scene {} with {} boxes and {} nav cells",
        args.scene.display(),
        scene.boxes.len(),
        scene.nav_mesh.cells.len()
    );

    let mut world = scene.build_world();
    let mut fader = RecordingFader::default();
    let mut timers: TimerQueue<TeleportTask> = TimerQueue::new();
    let mut trigger = TriggerEdge::new(config.teleport.trigger_threshold);

    let mut character = VrCharacter::new(config, scene.start);
    let half_height = character.config().capsule_half_height;
    world.set_self_capsule(character.body().position, half_height, CAPSULE_RADIUS);

    let mut bindings = InputBindings::new();
    character.on_bind_inputs(&mut bindings);

    let aim = Quaternion::from_angle_y(Deg(args.yaw)) * Quaternion::from_angle_x(Deg(args.pitch));
    character.set_tracking(TrackingFrame {
        head: DevicePose::at(scene.head),
        right_hand: Some(DevicePose::new(scene.hand, aim)),
    });

    let dt = 1.0 / args.rate;
    let mut time = Time::default();
    let mut last_report = report(&character, 0, &time);
    let mut outcome = None;

    {
        let projector = PerspectiveProjector::new(
            &character.camera(),
            VIEWPORT_WIDTH,
            VIEWPORT_HEIGHT,
            FIELD_OF_VIEW,
        );
        let mut ctx = FrameContext {
            collision: &world,
            navigation: &scene.nav_mesh,
            screen: Some(&projector),
            fader: &mut fader,
            timers: &mut timers,
        };
        character.on_start(&mut ctx);
    }

    for tick in 1..=args.ticks {
        time = time.step(dt);

        let mut events = Vec::new();
        if args.walk != 0.0 {
            events.push(InputEvent::axis("Forward", args.walk));
        }
        if let Some(phase) = trigger.update(trigger_value(tick, args.teleport_at)) {
            events.push(InputEvent::action("Teleport", phase));
        }
        let inputs: Vec<_> = events.iter().filter_map(|e| bindings.resolve(e)).collect();

        // Projected from last frame's camera; the headset would do the same
        let projector = PerspectiveProjector::new(
            &character.camera(),
            VIEWPORT_WIDTH,
            VIEWPORT_HEIGHT,
            FIELD_OF_VIEW,
        );
        let mut ctx = FrameContext {
            collision: &world,
            navigation: &scene.nav_mesh,
            screen: Some(&projector),
            fader: &mut fader,
            timers: &mut timers,
        };
        character.run_frame(&time, &inputs, &mut ctx);

        world.move_self(character.body().position);

        if let Some(latest) = character.last_outcome() {
            if outcome != Some(latest) {
                match latest {
                    TeleportOutcome::Moved { to } => info!("Teleported to {:?} at tick {}", to, tick),
                    TeleportOutcome::SkippedInvalidDestination => {
                        info!("Teleport skipped at tick {}: no valid destination", tick)
                    }
                }
                outcome = Some(latest);
            }
        }

        last_report = report(&character, tick, &time);
        if !args.json && (tick % args.every.max(1) == 0 || tick == args.ticks) {
            print_tick(&last_report);
        }
    }

    character.tear_down();

    let summary = SimReport {
        final_tick: last_report,
        fade_requests: fader.requests.len(),
        outcome: outcome.map(|o| format!("{:?}", o)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} fade request(s), outcome: {}",
            summary.fade_requests,
            summary.outcome.as_deref().unwrap_or("none")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_held_before_release() {
        assert_eq!(trigger_value(4, Some(10)), 0.0);
        assert_eq!(trigger_value(5, Some(10)), 1.0);
        assert_eq!(trigger_value(9, Some(10)), 1.0);
        assert_eq!(trigger_value(10, Some(10)), 0.0);
        assert_eq!(trigger_value(9, None), 0.0);
    }
}
