// tests/pipeline_tests.rs
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use wayscan::caption::{CaptionConfig, CaptionService, NOT_CONFIGURED};
use wayscan::upload::UploadPolicy;
use wayscan_core::{DirectionLabel, EdgeProfile};
use wayscan_cv::{NavigatorConfig, ObstacleNavigator, RenderVariant};

fn navigator(output_dir: &Path, variant: RenderVariant) -> ObstacleNavigator {
    let mut config = NavigatorConfig::default();
    config.output.directory = output_dir.to_path_buf();
    config.render.variant = variant;
    ObstacleNavigator::new(config).unwrap()
}

fn save_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

/// Bright frame with a mid-gray floor starting at `floor_row(x)` in each column
fn floor_scene(width: u32, height: u32, floor_row: impl Fn(u32) -> u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if y >= floor_row(x) { Rgb([120, 120, 120]) } else { Rgb([240, 240, 240]) }
    })
}

#[test]
fn test_profile_length_follows_width() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);

    for width in [3u32, 5, 17, 64, 101] {
        let scene = nav.analyze(&RgbImage::from_pixel(width, 30, Rgb([200, 200, 200]))).unwrap();
        assert_eq!(scene.profile.len(), EdgeProfile::expected_len(width, 5));
    }
}

#[test]
fn test_flat_frame_has_no_obstacles_and_no_direction() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);
    let input = save_png(tmp.path(), "flat.png", &RgbImage::from_pixel(320, 240, Rgb([210, 210, 210])));

    let outcome = nav.process_path(&input).unwrap();

    assert!(outcome.obstacles.is_empty());
    assert_eq!(outcome.direction, DirectionLabel::Unknown);
}

#[test]
fn test_single_rectangle_is_one_obstacle() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);

    let image = RgbImage::from_fn(320, 240, |x, y| {
        if (100..220).contains(&x) && (80..170).contains(&y) { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
    });
    let scene = nav.analyze(&image).unwrap();

    assert_eq!(scene.obstacles.len(), 1);
    let obstacle = &scene.obstacles[0];
    assert!(obstacle.area > 500.0);
    assert!((obstacle.x - 100).abs() <= 2, "x = {}", obstacle.x);
    assert!((obstacle.y - 80).abs() <= 2, "y = {}", obstacle.y);
    assert!((obstacle.width - 120).abs() <= 3, "width = {}", obstacle.width);
    assert!((obstacle.height - 90).abs() <= 3, "height = {}", obstacle.height);
}

#[test]
fn test_obstacle_ids_survive_filtering() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);

    // One speck well under the area cutoff and two large blocks
    let image = RgbImage::from_fn(300, 200, |x, y| {
        let speck = (20..26).contains(&x) && (20..26).contains(&y);
        let left = (40..120).contains(&x) && (60..160).contains(&y);
        let right = (180..280).contains(&x) && (60..160).contains(&y);
        if speck || left || right { Rgb([10, 10, 10]) } else { Rgb([250, 250, 250]) }
    });
    let scene = nav.analyze(&image).unwrap();

    assert_eq!(scene.contours.len(), 3);
    assert_eq!(scene.obstacles.len(), 2);
    for record in &scene.obstacles {
        assert!(record.area > 500.0);
        assert!(record.id < scene.contours.len());
    }
    let ids: Vec<usize> = scene.obstacles.iter().map(|r| r.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_boundary_dropping_on_the_left_steers_left() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);

    let image = floor_scene(640, 480, |x| if x < 213 { 80 } else { 400 });
    let scene = nav.analyze(&image).unwrap();

    let forward = scene.decision.forward_edge.unwrap();
    let farthest = scene.decision.farthest_point.unwrap();
    assert!(forward.avg_y > 250.0);
    assert!(farthest.avg_x < 310.0);
    assert_eq!(scene.decision.label, DirectionLabel::Left);
    assert!(scene.obstacles.is_empty());
}

#[test]
fn test_distant_boundary_goes_forward() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);

    let scene = nav.analyze(&floor_scene(640, 480, |_| 150)).unwrap();
    assert_eq!(scene.decision.label, DirectionLabel::Forward);
}

#[test]
fn test_one_pixel_wide_frame() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);
    let input = save_png(tmp.path(), "sliver.png", &floor_scene(1, 60, |_| 30));

    let scene = nav.analyze(&image::open(&input).unwrap().to_rgb8()).unwrap();
    assert_eq!(scene.profile.len(), 1);
    assert_eq!(scene.decision.label, DirectionLabel::Unknown);

    let outcome = nav.process_path(&input).unwrap();
    assert_eq!(outcome.direction, DirectionLabel::Unknown);
}

#[test]
fn test_repeated_runs_only_differ_in_file_name() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);
    let image = floor_scene(320, 240, |x| 60 + x / 4);

    assert_eq!(nav.analyze(&image).unwrap(), nav.analyze(&image).unwrap());

    let first = nav.process_image(&image).unwrap();
    let second = nav.process_image(&image).unwrap();
    assert_eq!(first.direction, second.direction);
    assert_eq!(first.obstacles, second.obstacles);
    assert_ne!(first.output_path, second.output_path);
}

#[test]
fn test_output_matches_input_dimensions_for_both_renderers() {
    let tmp = tempfile::tempdir().unwrap();
    let image = RgbImage::from_fn(173, 91, |x, y| {
        if (30..90).contains(&x) && (20..70).contains(&y) { Rgb([20, 20, 20]) } else { Rgb([230, 230, 230]) }
    });

    for variant in [RenderVariant::Trace, RenderVariant::Highlight] {
        let outcome = navigator(tmp.path(), variant).process_image(&image).unwrap();

        assert!(outcome.output_path.starts_with(tmp.path()));
        assert_eq!(image::image_dimensions(&outcome.output_path).unwrap(), (173, 91));
    }
}

#[test]
fn test_undecodable_inputs_are_decode_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(tmp.path(), RenderVariant::Trace);

    assert!(nav.process_path(tmp.path().join("missing.png")).unwrap_err().is_decode());

    let junk = tmp.path().join("junk.png");
    std::fs::write(&junk, b"not a png").unwrap();
    assert!(nav.process_path(&junk).unwrap_err().is_decode());
}

#[test]
fn test_analyze_upload_report() {
    let tmp = tempfile::tempdir().unwrap();
    let nav = navigator(&tmp.path().join("out"), RenderVariant::Trace);
    let captions = CaptionService::new(CaptionConfig::new(None));
    let policy = UploadPolicy::default();

    let input = save_png(tmp.path(), "scene.png", &floor_scene(640, 480, |_| 150));
    let report = wayscan::analyze_upload(&nav, &captions, &policy, &input, None).unwrap();

    assert!(report.success);
    assert_eq!(report.direction, "Move forward");
    assert_eq!(report.description, NOT_CONFIGURED);
    assert!(Path::new(&report.processed_image).exists());

    let gif = tmp.path().join("scene.gif");
    std::fs::write(&gif, b"GIF89a").unwrap();
    assert!(wayscan::analyze_upload(&nav, &captions, &policy, &gif, None).is_err());
}
