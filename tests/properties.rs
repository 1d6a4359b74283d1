//! Whole-frame and per-step properties of the tracer

use glam::Vec3A;
use seethrough::{Camera, Compositor, SceneConfig, Step};

/// Demo scene at a small resolution so a full frame stays quick.
fn small_demo(width: u32, height: u32) -> SceneConfig {
    let mut config = SceneConfig::default();
    config.render.width = width;
    config.render.height = height;
    config
}

#[test]
fn rendering_is_bit_identical_across_runs() {
    let config = small_demo(48, 36);
    let first = config.build().unwrap().render();
    let second = config.build().unwrap().render();

    assert_eq!(first.dimensions(), (48, 36));
    let first_bits: Vec<u32> = first.as_raw().iter().map(|v| v.to_bits()).collect();
    let second_bits: Vec<u32> = second.as_raw().iter().map(|v| v.to_bits()).collect();
    assert_eq!(first_bits, second_bits);
}

#[test]
fn parallel_frame_matches_per_pixel_evaluation() {
    let frame = small_demo(32, 24).build().unwrap();
    let image = frame.render();

    for (i, j, pixel) in image.enumerate_pixels() {
        let color = frame.pixel(i, j);
        assert_eq!(pixel.0, [color.x, color.y, color.z], "pixel ({i}, {j})");
    }
}

#[test]
fn demo_frame_stays_in_unit_range() {
    let image = small_demo(40, 30).build().unwrap().render();
    for pixel in image.pixels() {
        for channel in pixel.0 {
            assert!((0.0..=1.0).contains(&channel), "channel {channel} out of range");
        }
    }
}

#[test]
fn demo_wall_fills_the_view() {
    // The checkered wall is behind everything, so no pixel shows the background
    let frame = small_demo(40, 30).build().unwrap();
    let background = frame.settings.background;
    let image = frame.render();

    for pixel in image.pixels() {
        assert_ne!(Vec3A::from_array(pixel.0), background);
    }
}

#[test]
fn compositing_is_monotonic_along_every_ray() {
    let mut config = small_demo(24, 18);
    config.render.max_bounces = 8;
    let frame = config.build().unwrap();

    for j in 0..frame.height {
        for i in 0..frame.width {
            let r = frame.camera.get_ray(i, j, frame.width, frame.height);
            let mut compositor = Compositor::new(r, &frame.scene, &frame.settings);
            let mut transmittance = compositor.transmittance();
            let mut color = compositor.color();
            assert_eq!(transmittance, 1.0);
            assert_eq!(color, Vec3A::ZERO);

            while let Some(step) = compositor.step() {
                assert!(compositor.transmittance() <= transmittance, "{step:?}");
                assert!(compositor.color().cmpge(color).all(), "{step:?}");
                assert!(compositor.color().cmpge(Vec3A::ZERO).all());
                transmittance = compositor.transmittance();
                color = compositor.color();
            }
            assert!(compositor.is_finished());
            assert!(compositor.bounces() <= frame.settings.max_bounces);
        }
    }
}

#[test]
fn every_ray_terminates_with_a_terminal_step() {
    let frame = small_demo(16, 12).build().unwrap();

    for j in 0..frame.height {
        for i in 0..frame.width {
            let r = frame.camera.get_ray(i, j, frame.width, frame.height);
            let mut compositor = Compositor::new(r, &frame.scene, &frame.settings);
            let mut last = None;
            while let Some(step) = compositor.step() {
                last = Some(step);
            }
            let last = last.expect("at least one step");
            assert!(last.is_terminal());
            assert_ne!(last, Step::Background);
        }
    }
}

#[test]
fn camera_rays_are_unit_length() {
    let camera = Camera::new(Vec3A::new(3.0, 2.0, 1.0), Vec3A::new(-1.0, 0.0, 0.5), Vec3A::Y, 75.0).unwrap();
    for (i, j) in [(0, 0), (639, 0), (0, 479), (639, 479), (320, 240)] {
        let r = camera.get_ray(i, j, 640, 480);
        assert!((r.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(r.origin, camera.lookfrom());
    }
}

#[test]
fn scene_file_round_trip_renders_the_same_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.toml");
    let config = small_demo(20, 15);
    std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

    let loaded = SceneConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.build().unwrap().render(), config.build().unwrap().render());
}

#[test]
fn bundled_scene_files_load() {
    let demo = SceneConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/demo.toml")).unwrap();
    assert_eq!(demo, SceneConfig::default());

    let stack = SceneConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/glass_stack.toml")).unwrap();
    let frame = stack.build().unwrap();
    assert_eq!(frame.scene.len(), 6);
    assert_eq!((frame.width, frame.height), (640, 480));
}
