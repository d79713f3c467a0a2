use crate::coord::{Coordinate, Coordinates};
use crate::geodesy::bearing::initial_bearing;
use crate::geodesy::constants::EARTH_RADIUS_KM;
use crate::geodesy::distance::central_angle;
use std::f64::consts::PI;

// Below this central angle two points are treated as coincident
const COINCIDENT_RADIANS: f64 = 1e-12;
// Within this of PI the great circle through both points is not unique
const ANTIPODAL_RADIANS: f64 = 1e-9;

/// Wraps a longitude into `[-180, 180)`.
fn wrap_longitude(lon: f64) -> f64 {
    (lon + 540.0).rem_euclid(360.0) - 180.0
}

/// The point reached after travelling `distance_km` from `from` at an initial
/// bearing of `bearing_degrees`.
///
/// The resulting longitude is wrapped into `[-180, 180)`. NaN inputs give NaN output.
///
/// # Example
/// ```
/// use qth_locator::destination_point;
///
/// let p = destination_point(&(0.0, 0.0), 111.195, 0.0);
/// assert!((p.latitude - 1.0).abs() < 1e-3);
/// assert!(p.longitude.abs() < 1e-9);
/// ```
pub fn destination_point(
    from: &impl Coordinate,
    distance_km: f64,
    bearing_degrees: f64,
) -> Coordinates {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing_degrees.to_radians();
    let phi1 = from.lat().to_radians();
    let lambda1 = from.lon().to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    Coordinates::new_unchecked(phi2.to_degrees(), wrap_longitude(lambda2.to_degrees()))
}

/// Midpoint of the great-circle arc between two points.
pub fn midpoint(from: &impl Coordinate, to: &impl Coordinate) -> Coordinates {
    let phi1 = from.lat().to_radians();
    let phi2 = to.lat().to_radians();
    let lambda1 = from.lon().to_radians();
    let d_lambda = (to.lon() - from.lon()).to_radians();

    let bx = phi2.cos() * d_lambda.cos();
    let by = phi2.cos() * d_lambda.sin();
    let phi_m = (phi1.sin() + phi2.sin()).atan2(((phi1.cos() + bx).powi(2) + by * by).sqrt());
    let lambda_m = lambda1 + by.atan2(phi1.cos() + bx);

    Coordinates::new_unchecked(phi_m.to_degrees(), wrap_longitude(lambda_m.to_degrees()))
}

/// Samples `steps` points along the great circle from `from` to `to`, endpoints included.
///
/// The sequence is one continuous list even when the arc crosses the antimeridian;
/// longitudes then jump between +180 and -180. Coincident endpoints give `steps`
/// copies of `from`. For antipodal endpoints the arc leaves along the initial bearing
/// `from` reports toward `to`.
///
/// # Example
/// ```
/// use qth_locator::great_circle_path;
///
/// let path = great_circle_path(&(16.3738, 48.2082), &(-74.0060, 40.7128), 100);
/// assert_eq!(path.len(), 100);
/// // The northern route to New York passes well above both endpoints
/// assert!(path.iter().any(|p| p.latitude > 51.0));
/// ```
pub fn great_circle_path(
    from: &impl Coordinate,
    to: &impl Coordinate,
    steps: usize,
) -> Vec<Coordinates> {
    let start = Coordinates::from_coord(from);
    let end = Coordinates::from_coord(to);

    match steps {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let delta = central_angle(from, to);
    if delta < COINCIDENT_RADIANS {
        return vec![start; steps];
    }

    let last = (steps - 1) as f64;
    let mut points = Vec::with_capacity(steps);
    points.push(start);

    if PI - delta < ANTIPODAL_RADIANS {
        let bearing = initial_bearing(from, to);
        for i in 1..steps - 1 {
            let fraction = i as f64 / last;
            points.push(destination_point(from, fraction * delta * EARTH_RADIUS_KM, bearing));
        }
    } else {
        let (phi1, lambda1) = (start.latitude.to_radians(), start.longitude.to_radians());
        let (phi2, lambda2) = (end.latitude.to_radians(), end.longitude.to_radians());
        let sin_delta = delta.sin();

        for i in 1..steps - 1 {
            let fraction = i as f64 / last;
            let a = ((1.0 - fraction) * delta).sin() / sin_delta;
            let b = (fraction * delta).sin() / sin_delta;

            let x = a * phi1.cos() * lambda1.cos() + b * phi2.cos() * lambda2.cos();
            let y = a * phi1.cos() * lambda1.sin() + b * phi2.cos() * lambda2.sin();
            let z = a * phi1.sin() + b * phi2.sin();

            let phi = z.atan2((x * x + y * y).sqrt());
            let lambda = y.atan2(x);
            points.push(Coordinates::new_unchecked(phi.to_degrees(), lambda.to_degrees()));
        }
    }

    points.push(end);
    points
}
