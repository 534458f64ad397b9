use anyhow::{bail, Result};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::notify::{NotificationSink, TerminalSink, Toast};
use crate::platform::{CameraAccess, LoggingSpeech, SimulatedCamera, SpeechOutput};
use crate::session::{format_elapsed, EffectChannel, EffectEvent, SessionFlow};

pub async fn list_exercises(category: Option<String>, difficulty: Option<String>) -> Result<()> {
    let catalog = Catalog::demo();

    let category = category.as_deref().map(str::parse).transpose()?;
    let difficulty = difficulty.as_deref().map(str::parse).transpose()?;

    let exercises = catalog.filter_exercises(category, difficulty);

    println!("Exercise Program");
    println!();

    if exercises.is_empty() {
        println!("No exercises match those filters.");
        return Ok(());
    }

    for exercise in exercises {
        println!(
            "{}  {} · {} · {} min · {} pts",
            exercise.id.bold(),
            exercise.name.cyan(),
            exercise.difficulty,
            exercise.duration_minutes(),
            exercise.points
        );
        println!("    {}", exercise.description.dimmed());
    }

    println!();
    println!("Run one with: rehabconnect exercises start <id>");

    Ok(())
}

pub async fn show_exercise(id: &str, json: bool) -> Result<()> {
    let catalog = Catalog::demo();

    let Some(exercise) = catalog.exercise(id) else {
        bail!("Exercise {} not found", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(exercise)?);
        return Ok(());
    }

    println!("{}", exercise.name.bold());
    println!(
        "{} · {} · {} pts",
        exercise.category, exercise.difficulty, exercise.points
    );
    println!();
    println!("{}", exercise.description);
    println!();

    println!("Instructions:");
    for (i, step) in exercise.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if !exercise.target_muscles.is_empty() {
        println!();
        println!("Target muscles: {}", exercise.target_muscles.join(", "));
    }

    if !exercise.required_equipment.is_empty() {
        println!("Equipment: {}", exercise.required_equipment.join(", "));
    }

    if !exercise.precautions.is_empty() {
        println!();
        for precaution in &exercise.precautions {
            println!("{}", format!("! {}", precaution).yellow());
        }
    }

    Ok(())
}

/// Run a full guided session in the terminal: camera request, rep ticks
/// with synthetic feedback, completion and achievement announcements.
pub async fn start_exercise(id: &str, no_camera: bool) -> Result<()> {
    let config = Config::load()?;
    let mut sink = TerminalSink;
    let speech = LoggingSpeech;

    let mut flow = SessionFlow::new();
    flow.demo_login();

    let Some(exercise) = flow.catalog.exercise(id).cloned() else {
        bail!("Exercise {} not found", id);
    };

    if config.session.request_camera && !no_camera {
        sink.notify(Toast::info("Requesting camera access..."));
        let camera = SimulatedCamera::new();
        let granted = camera.request_access().await == CameraAccess::Granted;
        flow.set_camera_granted(granted);
        sink.notify(Toast::success("Camera access granted!"));
    }

    flow.start_exercise(id)?;

    let mut channel = EffectChannel::new();
    flow.attach_effects(channel.spawn_effects());

    let target = exercise.target();

    println!();
    println!("{}", exercise.name.bold());
    println!("Target: {}", target);
    println!();

    let bar = ProgressBar::new(target as u64);
    if let Ok(style) = ProgressStyle::with_template("[{bar:30}] {pos}/{len} reps · {msg}") {
        bar.set_style(style);
    }
    bar.set_message("00:00");

    // Apply effect events until the rep effect reaches the target
    while let Some(event) = channel.next().await {
        match event {
            EffectEvent::Tick => {
                if let Some(elapsed) = flow.on_tick() {
                    bar.set_message(format_elapsed(elapsed));
                }
            }
            EffectEvent::Rep => {
                if let Some(update) = flow.on_rep() {
                    bar.set_position(update.completed_reps as u64);
                    bar.println(format!(
                        "  {}  form {}% · ROM {}°",
                        update.encouragement.green(),
                        update.form_score,
                        update.range_of_motion
                    ));
                    if config.voice.enabled {
                        speech.say(update.encouragement);
                    }
                    if update.target_reached {
                        break;
                    }
                }
            }
        }
    }

    bar.finish_and_clear();

    let summary = flow.complete_exercise()?;
    channel.drain();

    static TROPHY: Emoji<'static, 'static> = Emoji("🏆", "*");

    println!();
    sink.notify(Toast::success(format!(
        "Exercise completed! +{} points earned! {}",
        summary.points_awarded, TROPHY
    )));
    for badge in &summary.new_badges {
        sink.notify(Toast::success(format!(
            "Achievement Unlocked: {}! {}",
            badge, TROPHY
        )));
    }

    println!();
    println!(
        "Total points: {} · Sessions completed: {}",
        summary.total_points, summary.completed_sessions
    );

    Ok(())
}
