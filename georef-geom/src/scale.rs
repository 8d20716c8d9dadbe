use crate::geodesy::great_circle_distance;
use georef_core::GroundControlPoint;

/// Estimates the ground resolution of a raster in meters per pixel.
///
/// Each unordered pair of control points yields one ratio of ground
/// distance to pixel distance; the estimate is the mean over the six
/// pairs. Pairs whose pixels coincide have no defined ratio and are
/// left out. Returns `0.0` when every pair is left out, which callers
/// must treat as "resolution unknown".
///
/// The estimate is isotropic. A transform with strong perspective or
/// anisotropic stretch has no single resolution, and this mean is then
/// only a representative figure for sizing things drawn on the raster.
pub fn mean_meters_per_pixel(points: &[GroundControlPoint; 4]) -> f64 {
    let mut sum = 0.0;
    let mut pairs = 0u32;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let pixel_distance = (points[i].pixel.0 - points[j].pixel.0).norm();
            if pixel_distance > 0.0 {
                sum += great_circle_distance(points[i].geo, points[j].geo) / pixel_distance;
                pairs += 1;
            }
        }
    }
    if pairs == 0 {
        0.0
    } else {
        sum / pairs as f64
    }
}
