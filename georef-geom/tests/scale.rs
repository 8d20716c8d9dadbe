use approx::assert_relative_eq;
use georef_core::{GeoPoint, GroundControlPoint, PixelPoint};
use georef_geom::{geodesy::great_circle_distance, scale::mean_meters_per_pixel};
use itertools::Itertools;

/// A 100 pixel square depicting a 0.001 degree square at the equator,
/// where degrees of latitude and longitude have the same length.
fn equator_scene() -> [GroundControlPoint; 4] {
    [
        GroundControlPoint::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)),
        GroundControlPoint::new(PixelPoint::new(100.0, 0.0), GeoPoint::new(0.0, 0.001)),
        GroundControlPoint::new(PixelPoint::new(100.0, 100.0), GeoPoint::new(-0.001, 0.001)),
        GroundControlPoint::new(PixelPoint::new(0.0, 100.0), GeoPoint::new(-0.001, 0.0)),
    ]
}

fn irregular_scene() -> [GroundControlPoint; 4] {
    [
        GroundControlPoint::new(PixelPoint::new(12.0, 31.0), GeoPoint::new(47.3769, 8.5417)),
        GroundControlPoint::new(PixelPoint::new(903.0, 77.0), GeoPoint::new(47.3801, 8.5532)),
        GroundControlPoint::new(PixelPoint::new(860.0, 655.0), GeoPoint::new(47.3702, 8.5556)),
        GroundControlPoint::new(PixelPoint::new(41.0, 700.0), GeoPoint::new(47.3694, 8.5401)),
    ]
}

#[test]
fn matches_side_ratio_for_a_square_scene() {
    let scene = equator_scene();
    let side = great_circle_distance(scene[0].geo, scene[1].geo);
    assert_relative_eq!(
        mean_meters_per_pixel(&scene),
        side / 100.0,
        max_relative = 1e-6
    );
}

#[test]
fn invariant_under_control_point_order() {
    let scene = irregular_scene();
    let reference = mean_meters_per_pixel(&scene);
    assert!(reference > 0.0);
    for permutation in scene.iter().copied().permutations(4) {
        let permuted: [GroundControlPoint; 4] = permutation.try_into().unwrap();
        assert_relative_eq!(
            mean_meters_per_pixel(&permuted),
            reference,
            max_relative = 1e-12
        );
    }
}

#[test]
fn coincident_pixels_are_left_out() {
    let mut scene = irregular_scene();
    scene[1].pixel = scene[0].pixel;
    // The degenerate pair drops out and the mean runs over the five
    // remaining pairs.
    let mut sum = 0.0;
    for (i, j) in [(0usize, 2usize), (0, 3), (1, 2), (1, 3), (2, 3)] {
        let pixel_distance = (scene[i].pixel.0 - scene[j].pixel.0).norm();
        sum += great_circle_distance(scene[i].geo, scene[j].geo) / pixel_distance;
    }
    assert_relative_eq!(
        mean_meters_per_pixel(&scene),
        sum / 5.0,
        max_relative = 1e-12
    );
}

#[test]
fn all_coincident_pixels_yield_zero() {
    let pixel = PixelPoint::new(10.0, 10.0);
    let scene = [
        GroundControlPoint::new(pixel, GeoPoint::new(0.0, 0.0)),
        GroundControlPoint::new(pixel, GeoPoint::new(0.1, 0.0)),
        GroundControlPoint::new(pixel, GeoPoint::new(0.0, 0.1)),
        GroundControlPoint::new(pixel, GeoPoint::new(0.1, 0.1)),
    ];
    assert_eq!(mean_meters_per_pixel(&scene), 0.0);
}
