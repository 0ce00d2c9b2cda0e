//! End-to-end controller scenarios against a fake media element.

use anyhow::Result;
use playhead::{MediaEvent, PlaybackController, PlayerOptions, QualityTrack, TimeRange};
use playhead_integration_tests::FakeMediaHandle;

#[test]
fn test_full_playback_lifecycle() -> Result<()> {
    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());

    // Attach applies the configured initial volume to the element
    assert_eq!(media.media().volume, 0.5);
    assert!(!controller.state().is_loaded);

    media.finish_loading(&sink, 300.0);
    controller.process_events();
    assert!(controller.state().is_loaded);
    assert_eq!(controller.state().duration, 300.0);

    // Play is fire-and-forget until the element confirms
    controller.play();
    assert!(!controller.state().is_playing);
    media.confirm_play(&sink);
    controller.process_events();
    assert!(controller.state().is_playing);

    media.tick(&sink, 1.0);
    media.tick(&sink, 2.5);
    controller.process_events();
    assert_eq!(controller.state().progress, 2.5);

    controller.pause();
    media.confirm_pause(&sink);
    controller.process_events();
    assert!(!controller.state().is_playing);

    Ok(())
}

#[test]
fn test_reaching_the_end_and_restarting() -> Result<()> {
    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());

    media.finish_loading(&sink, 60.0);
    media.confirm_play(&sink);
    controller.process_events();

    media.run_to_end(&sink);
    controller.process_events();
    assert!(controller.state().is_ended);
    assert!(!controller.state().is_playing);
    assert_eq!(controller.state().progress, 60.0);

    // A surface click after the end restarts from zero
    controller.handle_surface_click();
    assert_eq!(controller.state().progress, 0.0);
    assert!(!controller.state().is_ended);
    assert!(!media.media().paused);

    media.confirm_play(&sink);
    controller.process_events();
    assert!(controller.state().is_playing);

    Ok(())
}

#[test]
fn test_ended_inferred_from_position_alone() -> Result<()> {
    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());

    media.finish_loading(&sink, 60.0);
    controller.process_events();

    // The element only reports the final position, never an ended event
    media.tick(&sink, 60.0);
    controller.process_events();
    assert!(controller.state().is_ended);

    Ok(())
}

#[test]
fn test_volume_and_mute_round_trip() -> Result<()> {
    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    controller.process_events();

    controller.change_volume(0.8);
    media.announce_volume(&sink);
    controller.process_events();
    assert_eq!(controller.state().volume, 0.8);

    controller.mute();
    media.announce_volume(&sink);
    controller.process_events();
    assert!(controller.state().is_muted);
    assert_eq!(controller.state().volume, 0.0);

    // Bumping while muted adjusts the restore target without unmuting
    controller.bump_volume(0.1);
    assert!(controller.state().is_muted);
    assert_eq!(media.media().volume, 0.0);

    controller.unmute();
    media.announce_volume(&sink);
    controller.process_events();
    assert!(!controller.state().is_muted);
    assert!((controller.state().volume - 0.9).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_quality_swap_end_to_end() -> Result<()> {
    let options = PlayerOptions {
        qualities: vec![
            QualityTrack {
                id: 1,
                label: "1080p".into(),
                src: "video-1080.mp4".into(),
            },
            QualityTrack {
                id: 2,
                label: "480p".into(),
                src: "video-480.mp4".into(),
            },
        ],
        ..Default::default()
    };
    let mut controller = PlaybackController::new(options)?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());

    media.finish_loading(&sink, 600.0);
    media.confirm_play(&sink);
    media.tick(&sink, 123.0);
    controller.process_events();
    assert_eq!(controller.state().active_quality, Some(1));

    let swap_sink = controller
        .change_quality(2)
        .expect("swap to a known id returns the rewired sink");
    assert_eq!(media.media().loaded_src.as_deref(), Some("video-480.mp4"));
    assert_eq!(media.media().load_count, 1);
    assert!(!controller.state().is_playing);
    assert!(!controller.state().is_loaded);

    // A straggler from the outgoing source arrives through the old sink
    // after the swap began; it must not move the snapshot
    media.tick(&sink, 599.0);
    controller.process_events();
    assert_ne!(controller.state().progress, 599.0);

    // The fresh source loads and the position comes back
    media.finish_loading(&swap_sink, 600.0);
    controller.process_events();
    assert_eq!(controller.state().progress, 123.0);
    assert_eq!(media.media().current_time, 123.0);
    assert_eq!(controller.state().active_quality, Some(2));

    // Playback stays paused until explicitly resumed
    assert!(!controller.state().is_playing);
    controller.play();
    media.confirm_play(&swap_sink);
    controller.process_events();
    assert!(controller.state().is_playing);

    // Re-selecting the active quality does not reload
    assert!(controller.change_quality(2).is_none());
    assert_eq!(media.media().load_count, 1);

    Ok(())
}

#[test]
fn test_detach_neutralizes_stale_sink() -> Result<()> {
    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    controller.process_events();

    controller.detach();
    assert!(!controller.is_attached());
    assert!(!controller.state().is_loaded);

    // The old element keeps firing; nothing applies
    media.tick(&sink, 30.0);
    sink.send(MediaEvent::Play);
    controller.process_events();
    assert_eq!(controller.state().progress, 0.0);
    assert!(!controller.state().is_playing);

    // A new attachment starts a clean lifecycle
    let replacement = FakeMediaHandle::new();
    let new_sink = controller.attach(replacement.adapter());
    replacement.finish_loading(&new_sink, 90.0);
    controller.process_events();
    assert_eq!(controller.state().duration, 90.0);

    Ok(())
}

#[test]
fn test_buffered_ranges_polling() -> Result<()> {
    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());
    media.finish_loading(&sink, 600.0);
    controller.process_events();

    media.media().buffered = vec![
        TimeRange::new(120.0, 180.0),
        TimeRange::new(0.0, 45.0),
        TimeRange::new(30.0, 90.0),
    ];
    controller.poll_buffered();

    assert_eq!(
        controller.state().buffer_ranges,
        vec![TimeRange::new(0.0, 90.0), TimeRange::new(120.0, 180.0)]
    );

    Ok(())
}

#[test]
fn test_listeners_observe_the_lifecycle() -> Result<()> {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let mut controller = PlaybackController::new(PlayerOptions::default())?;
    let publications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&publications);
    let guard = controller.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let media = FakeMediaHandle::new();
    let sink = controller.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    controller.process_events();
    let seen = publications.load(Ordering::SeqCst);
    assert!(seen >= 2); // attach + loaded

    drop(guard);
    media.tick(&sink, 5.0);
    controller.process_events();
    assert_eq!(publications.load(Ordering::SeqCst), seen);

    Ok(())
}
