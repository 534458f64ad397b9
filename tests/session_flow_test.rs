// End-to-end session flow scenarios driven by the real timer effects,
// using tokio's paused clock so they run instantly and deterministically.

use rehabconnect::session::{EffectChannel, EffectEvent, Role, SessionFlow, SessionStatus};

fn signed_in_flow(seed: u64) -> SessionFlow {
    let mut flow = SessionFlow::seeded(seed);
    flow.sign_in(Role::Patient, "Test Patient", "test@example.com");
    flow
}

/// Apply events until the rep effect reaches the session target
async fn run_to_target(flow: &mut SessionFlow, channel: &mut EffectChannel) {
    while let Some(event) = channel.next().await {
        match event {
            EffectEvent::Tick => {
                flow.on_tick();
            }
            EffectEvent::Rep => {
                if let Some(update) = flow.on_rep() {
                    if update.target_reached {
                        return;
                    }
                }
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_timed_session_completes_and_awards_points() {
    let mut flow = signed_in_flow(42);
    flow.start_exercise("exercise_001").unwrap();

    let mut channel = EffectChannel::new();
    flow.attach_effects(channel.spawn_effects());

    run_to_target(&mut flow, &mut channel).await;

    let session = flow.active_session().unwrap();
    assert_eq!(session.completed_reps, 10);
    assert!(session.completion_unlocked());
    // Ten reps at one per three seconds: the 1-second tick effect has
    // fired alongside the whole way
    assert!(session.elapsed_seconds >= 29);

    let summary = flow.complete_exercise().unwrap();
    assert_eq!(summary.points_awarded, 15);
    assert_eq!(summary.total_points, 15);
    assert_eq!(summary.completed_sessions, 1);
    assert_eq!(summary.new_badges, vec!["First Steps".to_string()]);
    assert!(flow.active_session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_pause_stops_the_clock() {
    let mut flow = signed_in_flow(7);
    flow.start_exercise("exercise_002").unwrap();

    let mut channel = EffectChannel::new();
    flow.attach_effects(channel.spawn_effects());

    // Let a few events through
    for _ in 0..4 {
        match channel.next().await.unwrap() {
            EffectEvent::Tick => {
                flow.on_tick();
            }
            EffectEvent::Rep => {
                flow.on_rep();
            }
        }
    }

    flow.pause_exercise().unwrap();
    channel.drain();

    let (elapsed, reps) = {
        let session = flow.active_session().unwrap();
        (session.elapsed_seconds, session.completed_reps)
    };

    // Nothing moves while paused, however long we wait
    tokio::time::advance(std::time::Duration::from_secs(30)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    while let Some(event) = channel.try_next() {
        match event {
            EffectEvent::Tick => {
                flow.on_tick();
            }
            EffectEvent::Rep => {
                flow.on_rep();
            }
        }
    }

    let session = flow.active_session().unwrap();
    assert_eq!(session.status(), SessionStatus::Paused);
    assert_eq!(session.elapsed_seconds, elapsed);
    assert_eq!(session.completed_reps, reps);

    // Resume continues from the same counters
    flow.resume_exercise().unwrap();
    flow.attach_effects(channel.spawn_effects());
    run_to_target(&mut flow, &mut channel).await;

    let session = flow.active_session().unwrap();
    assert_eq!(session.completed_reps, session.target);
}

#[tokio::test(start_paused = true)]
async fn test_stop_discards_without_award() {
    let mut flow = signed_in_flow(3);
    flow.start_exercise("exercise_003").unwrap();

    let mut channel = EffectChannel::new();
    flow.attach_effects(channel.spawn_effects());

    // A couple of reps happen, then the user bails out
    for _ in 0..6 {
        match channel.next().await.unwrap() {
            EffectEvent::Tick => {
                flow.on_tick();
            }
            EffectEvent::Rep => {
                flow.on_rep();
            }
        }
    }

    flow.stop_exercise().unwrap();
    channel.drain();

    assert!(flow.active_session().is_none());
    assert_eq!(flow.progress.total_points, 0);
    assert_eq!(flow.progress.completed_sessions, 0);

    // A fresh session starts cleanly afterwards
    flow.start_exercise("exercise_001").unwrap();
    let session = flow.active_session().unwrap();
    assert_eq!(session.elapsed_seconds, 0);
    assert_eq!(session.completed_reps, 0);
}

#[tokio::test(start_paused = true)]
async fn test_time_based_exercise_uses_seconds_target() {
    let mut flow = signed_in_flow(9);
    // Single Leg Balance prescribes 30 seconds, not reps
    flow.start_exercise("exercise_003").unwrap();

    let mut channel = EffectChannel::new();
    flow.attach_effects(channel.spawn_effects());

    run_to_target(&mut flow, &mut channel).await;

    let session = flow.active_session().unwrap();
    assert_eq!(session.target, 30);
    assert_eq!(session.completed_reps, 30);

    let summary = flow.complete_exercise().unwrap();
    assert_eq!(summary.points_awarded, 25);
}
