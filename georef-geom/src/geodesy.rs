use georef_core::GeoPoint;

/// Mean Earth radius in meters of the spherical model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Computes the great circle distance between two positions in meters
/// with the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula)
/// on a sphere of radius [`EARTH_RADIUS_M`].
///
/// The atan2 form is used rather than the asin form because it stays
/// well conditioned for nearly antipodal points.
///
/// ```
/// use georef_core::GeoPoint;
/// use georef_geom::geodesy::great_circle_distance;
/// // One degree of latitude is about 111.19 km everywhere.
/// let d = great_circle_distance(GeoPoint::new(47.0, 8.0), GeoPoint::new(48.0, 8.0));
/// assert!((d - 111_195.0).abs() < 10.0);
/// ```
#[inline(always)]
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_a = a.lat.to_radians();
    let phi_b = b.lat.to_radians();
    let half_dphi = (b.lat - a.lat).to_radians() / 2.0;
    let half_dlambda = (b.lon - a.lon).to_radians() / 2.0;
    // h = sin^2(dphi/2) + cos(phi_a) * cos(phi_b) * sin^2(dlambda/2)
    let h = half_dphi.sin().powi(2) + phi_a.cos() * phi_b.cos() * half_dlambda.sin().powi(2);
    // Central angle c = 2 * atan2(sqrt(h), sqrt(1 - h)).
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * central_angle
}
