//! Integration tests for PipelineController
//!
//! These tests drive the full pipeline against the mock platform:
//! - init / destroy lifecycle and idempotence
//! - tier selection and degradation
//! - frame loop timing and parallax
//! - resize and pointer handling

use wavefield::{
    Capability, Color, ConfigOverrides, InitOptions, InteractionEvent, PipelineController, Preset,
    Size, TierError, TierKind, TierState, Viewport, MAX_POINTS,
};
use wavefield_platform_mock::MockPlatform;

fn start(platform: MockPlatform, options: InitOptions) -> PipelineController<MockPlatform> {
    let mut pipeline = PipelineController::new(platform);
    pollster::block_on(pipeline.init(&options));
    pipeline
}

/// Fire the pending frame at `now_ms`, as the host's animation callback would
fn pump(pipeline: &mut PipelineController<MockPlatform>, now_ms: f64) -> bool {
    pipeline.platform_mut().set_time(now_ms);
    if pipeline.platform_mut().fire_frame() {
        pipeline.frame(now_ms);
        true
    } else {
        false
    }
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_init_activates_gpu_tier() {
    let pipeline = start(MockPlatform::new(), InitOptions::default());

    assert_eq!(pipeline.state(), TierState::GpuActive);
    assert_eq!(pipeline.tier(), Some(TierKind::Gpu));

    let platform = pipeline.platform();
    let renderers = platform.renderers();
    assert_eq!(renderers.len(), 1);
    assert_eq!(renderers[0].kind, TierKind::Gpu);
    assert_eq!(renderers[0].built_points, 2500);
    assert!(!platform.fallback_visible());
    assert_eq!(platform.pending_frames(), 1);
}

#[test]
fn test_init_prepares_default_anchors() {
    let pipeline = start(MockPlatform::new(), InitOptions::default());
    let anchors = pipeline.platform().anchors().unwrap();
    assert_eq!(anchors.surface, "wave-field-surface");
    assert_eq!(anchors.fallback, "wave-field-fallback");
}

#[test]
fn test_init_uses_custom_anchors() {
    let options = InitOptions {
        surface_id: Some("hero-bg".to_string()),
        fallback_id: Some("hero-fallback".to_string()),
        ..Default::default()
    };
    let pipeline = start(MockPlatform::new(), options);
    let anchors = pipeline.platform().anchors().unwrap();
    assert_eq!(anchors.surface, "hero-bg");
    assert_eq!(anchors.fallback, "hero-fallback");
}

#[test]
fn test_double_init_keeps_one_renderer() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    pollster::block_on(pipeline.init(&InitOptions::with_preset("waves")));

    let platform = pipeline.platform();
    assert_eq!(platform.renderers().len(), 1);
    assert_eq!(platform.live_renderers(), 1);
    assert_eq!(platform.frame_requests(), 1);
    // The second call changed nothing
    assert_eq!(pipeline.config(), Some(&Preset::Baseline.config()));
}

#[test]
fn test_destroy_stops_frame_callbacks() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    assert!(pump(&mut pipeline, 16.0));
    let requests = pipeline.platform().frame_requests();

    pipeline.destroy();

    assert_eq!(pipeline.state(), TierState::Destroyed);
    assert_eq!(pipeline.platform().pending_frames(), 0);
    assert_eq!(pipeline.platform().cancelled_frames(), 1);
    assert!(!pipeline.has_pending_frame());

    // Nothing left to fire, and a stray callback does not reschedule
    assert!(!pump(&mut pipeline, 32.0));
    pipeline.frame(48.0);
    assert_eq!(pipeline.platform().frame_requests(), requests);

    let record = pipeline.platform().last_renderer().unwrap();
    assert!(record.disposed);
    assert!(!record.used_after_dispose);
    assert_eq!(record.paints, 1);
}

#[test]
fn test_destroy_drops_scene_state() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    pipeline.destroy();
    assert!(pipeline.geometry().is_none());
    assert!(pipeline.camera().is_none());
    assert!(pipeline.tracker().is_none());
    assert_eq!(pipeline.tier(), None);
}

#[test]
fn test_destroy_before_init_and_twice() {
    let mut pipeline = PipelineController::new(MockPlatform::new());
    pipeline.destroy();
    pipeline.destroy();
    assert_eq!(pipeline.state(), TierState::Destroyed);

    // A destroyed pipeline does not come back
    pollster::block_on(pipeline.init(&InitOptions::default()));
    assert_eq!(pipeline.state(), TierState::Destroyed);
    assert!(pipeline.platform().renderers().is_empty());
}

// =============================================================================
// Tier Selection Tests
// =============================================================================

#[test]
fn test_no_gpu_ends_in_dom_with_fallback_hidden() {
    let pipeline = start(
        MockPlatform::with_capability(Capability::Dom3D),
        InitOptions::default(),
    );

    assert_eq!(pipeline.state(), TierState::DomActive);
    let platform = pipeline.platform();
    assert!(!platform.fallback_visible());
    let record = platform.last_renderer().unwrap();
    assert_eq!(record.kind, TierKind::Dom);
    assert_eq!(record.built_points, 20 * 15);
}

#[test]
fn test_gpu_failure_downgrades_to_dom() {
    let pipeline = start(MockPlatform::new().fail_gpu(), InitOptions::default());
    assert_eq!(pipeline.state(), TierState::DomActive);
    assert_eq!(pipeline.platform().renderers().len(), 1);
    assert_eq!(pipeline.platform().pending_frames(), 1);
}

#[test]
fn test_gpu_and_dom_failure_ends_in_static() {
    let pipeline = start(
        MockPlatform::new().fail_gpu().fail_dom(),
        InitOptions::default(),
    );

    assert_eq!(pipeline.state(), TierState::StaticFallback);
    let platform = pipeline.platform();
    assert!(platform.fallback_visible());
    assert!((platform.fallback_opacity() - 1.0).abs() < 0.001);
    assert_eq!(platform.last_renderer().unwrap().kind, TierKind::Static);
    assert!(pipeline.geometry().is_none());
}

#[test]
fn test_static_tier_schedules_no_frames() {
    let mut pipeline = start(
        MockPlatform::with_capability(Capability::StaticOnly),
        InitOptions::default(),
    );

    assert_eq!(pipeline.state(), TierState::StaticFallback);
    assert_eq!(pipeline.platform().frame_requests(), 0);
    assert!(!pump(&mut pipeline, 16.0));
    pipeline.frame(32.0);
    assert_eq!(pipeline.platform().last_renderer().unwrap().paints, 0);
}

#[test]
fn test_device_loss_downgrades_and_never_returns_to_gpu() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    assert!(pump(&mut pipeline, 16.0));

    pipeline
        .platform()
        .fail_next_paint(TierError::DeviceLost("context lost".to_string()));
    assert!(pump(&mut pipeline, 32.0));
    assert_eq!(pipeline.state(), TierState::DomActive);

    for i in 3..20 {
        pump(&mut pipeline, i as f64 * 16.0);
        assert_ne!(pipeline.state(), TierState::GpuActive);
    }

    let renderers = pipeline.platform().renderers();
    assert_eq!(renderers.len(), 2);
    assert!(renderers[0].disposed);
    assert!(!renderers[0].used_after_dispose);
    assert_eq!(renderers[1].kind, TierKind::Dom);
    assert!(renderers[1].paints > 0);
    assert_eq!(pipeline.platform().live_renderers(), 1);
}

#[test]
fn test_device_loss_without_dom_lands_on_static() {
    let mut pipeline = start(MockPlatform::new().fail_dom(), InitOptions::default());
    assert!(pump(&mut pipeline, 16.0));

    pipeline
        .platform()
        .fail_next_paint(TierError::DeviceLost("context lost".to_string()));
    pump(&mut pipeline, 32.0);

    assert_eq!(pipeline.state(), TierState::StaticFallback);
    assert!(pipeline.platform().fallback_visible());
    assert_eq!(pipeline.platform().pending_frames(), 0);
}

#[test]
fn test_skipped_frame_keeps_tier() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    pipeline
        .platform()
        .fail_next_paint(TierError::FrameSkipped("surface outdated".to_string()));

    assert!(pump(&mut pipeline, 16.0));
    assert_eq!(pipeline.state(), TierState::GpuActive);
    assert_eq!(pipeline.platform().pending_frames(), 1);
    assert!(pump(&mut pipeline, 32.0));
    assert_eq!(pipeline.platform().last_renderer().unwrap().paints, 2);
}

// =============================================================================
// Frame Loop Tests
// =============================================================================

#[test]
fn test_geometry_at_rest_before_first_frame() {
    let options = InitOptions {
        overrides: ConfigOverrides {
            count_x: Some(2),
            count_y: Some(2),
            separation: Some(10.0),
            ..Default::default()
        },
        ..Default::default()
    };
    let pipeline = start(MockPlatform::new(), options);

    let geometry = pipeline.geometry().unwrap();
    assert_eq!(geometry.positions().len(), 12);
    assert!(geometry.positions().chunks(3).all(|p| p[1] == 0.0));
    assert!((pipeline.time_cursor() - 0.0).abs() < 0.001);
}

#[test]
fn test_time_cursor_is_elapsed_seconds_times_speed() {
    let mut platform = MockPlatform::new();
    platform.set_time(1000.0);
    let mut pipeline = start(platform, InitOptions::default());

    assert!(pump(&mut pipeline, 3000.0));
    // 2 s at baseline speed 6
    assert!((pipeline.time_cursor() - 12.0).abs() < 0.001);
    let record = pipeline.platform().last_renderer().unwrap();
    assert!((record.last_time.unwrap() - 12.0).abs() < 0.001);
}

#[test]
fn test_frame_paints_advanced_geometry() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    assert!(pump(&mut pipeline, 500.0));

    let record = pipeline.platform().last_renderer().unwrap();
    assert_eq!(record.last_scales.len(), 2500);
    assert_eq!(record.last_scales, pipeline.geometry().unwrap().scales());
    assert!(record.last_scales.iter().any(|s| (s - 1.0).abs() > 0.01));
}

#[test]
fn test_each_frame_schedules_exactly_one_more() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    for i in 1..=10 {
        assert!(pump(&mut pipeline, i as f64 * 16.0));
        assert_eq!(pipeline.platform().pending_frames(), 1);
    }
    assert_eq!(pipeline.platform().frame_requests(), 11);
}

// =============================================================================
// Interaction Tests
// =============================================================================

#[test]
fn test_pointer_moves_camera_on_next_frame_only() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());

    // Viewport 1280x720: (1280, 360) is 640px right of center
    pipeline.handle(InteractionEvent::PointerMoved { x: 1280.0, y: 360.0 });
    pipeline.handle(InteractionEvent::PointerMoved { x: 1280.0, y: 360.0 });
    assert_eq!(pipeline.platform().last_renderer().unwrap().paints, 0);
    assert!(pipeline.camera().unwrap().position.x.abs() < 0.001);

    assert!(pump(&mut pipeline, 16.0));
    // (640 * 0.5 - 0) * 0.05
    let camera = pipeline.platform().last_renderer().unwrap().last_camera.unwrap();
    assert!((camera[0] - 16.0).abs() < 0.001);
    assert!((camera[1] - 200.0).abs() < 0.001);
}

#[test]
fn test_touch_moves_like_pointer() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    pipeline.handle(InteractionEvent::TouchMoved { x: 640.0, y: 0.0 });
    assert!(pump(&mut pipeline, 16.0));

    let camera = pipeline.camera().unwrap();
    assert!(camera.position.x.abs() < 0.001);
    // Touch above center raises the eye
    assert!(camera.position.y > 200.0);
}

#[test]
fn test_resize_updates_aspect_and_renderer_in_same_call() {
    let mut pipeline = start(MockPlatform::new(), InitOptions::default());
    let viewport = Viewport::new(Size::new(1000.0, 500.0), 2.0);

    pipeline.handle(InteractionEvent::Resized(viewport));

    assert!((pipeline.camera().unwrap().aspect - 2.0).abs() < 0.001);
    let record = pipeline.platform().last_renderer().unwrap();
    assert_eq!(record.resizes, vec![viewport]);
    assert_eq!(record.paints, 0);
    let half = pipeline.tracker().unwrap().state().half_viewport;
    assert!((half.x - 500.0).abs() < 0.001);
    assert!((half.y - 250.0).abs() < 0.001);
}

#[test]
fn test_resize_reaches_static_tier() {
    let mut pipeline = start(
        MockPlatform::with_capability(Capability::StaticOnly),
        InitOptions::default(),
    );
    let viewport = Viewport::new(Size::new(640.0, 480.0), 1.0);
    pipeline.handle(InteractionEvent::Resized(viewport));
    assert_eq!(pipeline.platform().last_renderer().unwrap().resizes, vec![viewport]);
}

#[test]
fn test_events_before_init_are_harmless() {
    let mut pipeline = PipelineController::new(MockPlatform::new());
    pipeline.handle(InteractionEvent::PointerMoved { x: 10.0, y: 10.0 });
    pipeline.handle(InteractionEvent::Resized(Viewport::new(Size::new(10.0, 10.0), 1.0)));
    pipeline.frame(16.0);
    assert_eq!(pipeline.state(), TierState::Uninitialized);
    assert!(pipeline.platform().renderers().is_empty());
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_unknown_preset_resolves_to_baseline() {
    let pipeline = start(MockPlatform::new(), InitOptions::with_preset("bogus"));
    assert_eq!(pipeline.config(), Some(&Preset::Baseline.config()));
}

#[test]
fn test_color_override_on_waves() {
    let options = InitOptions {
        color: Some(Color::new(0xff0000)),
        ..InitOptions::with_preset("waves")
    };
    let pipeline = start(MockPlatform::new(), options);

    let expected = wavefield::RenderConfig {
        color: Color::new(0xff0000),
        ..Preset::Waves.config()
    };
    assert_eq!(pipeline.config(), Some(&expected));
}

#[test]
fn test_page_path_selects_preset() {
    let pipeline = start(
        MockPlatform::new().with_path("/research/neural/lab"),
        InitOptions::default(),
    );
    assert_eq!(pipeline.config(), Some(&Preset::Neural.config()));
}

#[test]
fn test_explicit_preset_beats_page_path() {
    let pipeline = start(
        MockPlatform::new().with_path("/waves"),
        InitOptions::with_preset("whitepaper"),
    );
    assert_eq!(pipeline.config(), Some(&Preset::Whitepaper.config()));
}

#[test]
fn test_camera_aspect_from_initial_viewport() {
    let platform = MockPlatform::new().with_viewport(Viewport::new(Size::new(800.0, 400.0), 1.0));
    let pipeline = start(platform, InitOptions::default());
    assert!((pipeline.camera().unwrap().aspect - 2.0).abs() < 0.001);
}

#[test]
fn test_huge_grid_override_is_capped_not_fatal() {
    let options = InitOptions {
        overrides: ConfigOverrides {
            count_x: Some(u32::MAX),
            count_y: Some(u32::MAX),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pipeline = start(MockPlatform::new(), options);

    assert_eq!(pipeline.state(), TierState::GpuActive);
    let config = *pipeline.config().unwrap();
    assert!(config.point_count() <= MAX_POINTS);
    let record = pipeline.platform().last_renderer().unwrap();
    assert_eq!(record.built_points, config.point_count());

    assert!(pump(&mut pipeline, 16.0));
    assert_eq!(pipeline.platform().last_renderer().unwrap().paints, 1);
}
