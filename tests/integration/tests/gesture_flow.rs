//! Pointer and keyboard scenarios driven through the player facade.

use anyhow::Result;
use playhead::{
    CaptionTrack, Key, PlayerOptions, PointerButton, ScrubState, TimelineGeometry,
    VideoPlayerBuilder,
};
use playhead_integration_tests::FakeMediaHandle;

#[test]
fn test_scrub_drag_maps_track_position_to_progress() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 40.0);
    player.process_events();

    let geometry = TimelineGeometry::new(0.0, 200.0);

    // Press at a quarter of the track seeks immediately
    player.timeline_pointer_down(50.0, PointerButton::Primary, geometry);
    assert!(matches!(player.scrub_state(), ScrubState::Scrubbing { .. }));
    assert_eq!(player.snapshot().progress, 10.0);
    assert_eq!(media.media().current_time, 10.0);

    // Element time updates are suppressed for the duration of the drag
    media.tick(&sink, 12.0);
    player.process_events();
    assert_eq!(player.snapshot().progress, 10.0);

    // Dragging to three quarters follows the pointer
    player.pointer_move(150.0);
    assert_eq!(player.snapshot().progress, 30.0);

    // Moves past the track edge clamp to the media bounds
    player.pointer_move(1000.0);
    assert_eq!(player.snapshot().progress, 40.0);
    player.pointer_move(-50.0);
    assert_eq!(player.snapshot().progress, 0.0);

    player.pointer_move(150.0);
    player.pointer_up();
    assert_eq!(player.scrub_state(), ScrubState::Idle);
    assert_eq!(player.snapshot().progress, 30.0);

    // Updates apply again once the drag has ended
    media.tick(&sink, 31.0);
    player.process_events();
    assert_eq!(player.snapshot().progress, 31.0);

    Ok(())
}

#[test]
fn test_scrub_requires_primary_button() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 40.0);
    player.process_events();

    let geometry = TimelineGeometry::new(0.0, 200.0);
    player.timeline_pointer_down(100.0, PointerButton::Secondary, geometry);
    assert_eq!(player.scrub_state(), ScrubState::Idle);
    assert_eq!(player.snapshot().progress, 0.0);

    Ok(())
}

#[test]
fn test_scrub_cancel_keeps_last_position() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 100.0);
    player.process_events();

    player.timeline_pointer_down(50.0, PointerButton::Primary, TimelineGeometry::new(0.0, 100.0));
    assert_eq!(player.snapshot().progress, 50.0);

    player.cancel_scrub();
    assert_eq!(player.scrub_state(), ScrubState::Idle);
    assert_eq!(player.snapshot().progress, 50.0);

    media.tick(&sink, 51.0);
    player.process_events();
    assert_eq!(player.snapshot().progress, 51.0);

    Ok(())
}

#[test]
fn test_scrub_without_known_duration_does_not_seek() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let _sink = player.attach(media.adapter());

    player.timeline_pointer_down(50.0, PointerButton::Primary, TimelineGeometry::new(0.0, 100.0));
    assert!(matches!(player.scrub_state(), ScrubState::Scrubbing { .. }));
    assert_eq!(player.snapshot().progress, 0.0);
    assert_eq!(media.media().current_time, 0.0);

    player.pointer_up();
    Ok(())
}

#[test]
fn test_seek_keys_use_configured_step() -> Result<()> {
    let options = PlayerOptions {
        seek_step: 10.0,
        ..Default::default()
    };
    let mut player = VideoPlayerBuilder::new().with_options(options).build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    player.process_events();

    assert!(player.handle_key(Key::ArrowRight));
    assert_eq!(player.snapshot().progress, 10.0);

    assert!(player.handle_key(Key::ArrowLeft));
    assert!(player.handle_key(Key::ArrowLeft));
    assert_eq!(player.snapshot().progress, 0.0); // clamped at the start

    assert!(player.handle_key(Key::End));
    assert_eq!(player.snapshot().progress, 60.0);

    assert!(player.handle_key(Key::Home));
    assert_eq!(player.snapshot().progress, 0.0);

    Ok(())
}

#[test]
fn test_space_toggles_playback() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    player.process_events();

    assert!(player.handle_key(Key::Space));
    assert!(!media.media().paused);
    media.confirm_play(&sink);
    player.process_events();
    assert!(player.snapshot().is_playing);

    assert!(player.handle_key(Key::Space));
    assert!(media.media().paused);

    Ok(())
}

#[test]
fn test_volume_keys_and_mute_key() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    player.process_events();

    assert!(player.handle_key(Key::ArrowUp));
    assert!((media.media().volume - 0.55).abs() < 1e-9);

    assert!(player.handle_key(Key::ArrowDown));
    assert!((media.media().volume - 0.5).abs() < 1e-9);

    assert!(player.handle_key(Key::M));
    media.announce_volume(&sink);
    player.process_events();
    assert!(player.snapshot().is_muted);
    assert_eq!(player.snapshot().volume, 0.0);

    assert!(player.handle_key(Key::M));
    media.announce_volume(&sink);
    player.process_events();
    assert!(!player.snapshot().is_muted);
    assert!((player.snapshot().volume - 0.5).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_caption_key_toggles_with_memory() -> Result<()> {
    let options = PlayerOptions {
        captions: vec![
            CaptionTrack {
                label: "English".into(),
                language: "en".into(),
                src: "en.vtt".into(),
            },
            CaptionTrack {
                label: "Deutsch".into(),
                language: "de".into(),
                src: "de.vtt".into(),
            },
        ],
        ..Default::default()
    };
    let mut player = VideoPlayerBuilder::new().with_options(options).build()?;

    player.select_captions(Some(1));
    assert_eq!(player.snapshot().active_captions, Some(1));

    assert!(player.handle_key(Key::C));
    assert_eq!(player.snapshot().active_captions, None);

    assert!(player.handle_key(Key::C));
    assert_eq!(player.snapshot().active_captions, Some(1));

    Ok(())
}

#[test]
fn test_volume_slider_input_unmutes() -> Result<()> {
    let mut player = VideoPlayerBuilder::new().build()?;
    let media = FakeMediaHandle::new();
    let sink = player.attach(media.adapter());
    media.finish_loading(&sink, 60.0);
    player.process_events();

    player.toggle_mute();
    media.announce_volume(&sink);
    player.process_events();
    assert!(player.snapshot().is_muted);

    player.volume_input(0.7);
    media.announce_volume(&sink);
    player.process_events();
    assert!(!player.snapshot().is_muted);
    assert!((player.snapshot().volume - 0.7).abs() < 1e-9);

    Ok(())
}
