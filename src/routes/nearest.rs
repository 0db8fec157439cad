use super::{Error, Stop};
use crate::shared::geo::{Coordinate, Distance};

/// Finds the stop closest to `rider` by planar distance over the raw
/// (lat, lon) degrees.
/// On an exact tie the stop that comes first in `stops` wins.
/// A rider location with a NaN or infinite part has no nearest stop.
pub fn find_nearest<'a>(rider: &Coordinate, stops: &'a [Stop]) -> Result<&'a Stop, Error> {
    if !rider.is_finite() {
        return Err(Error::InvalidLocation(*rider));
    }
    let mut nearest: Option<&Stop> = None;
    let mut nearest_distance = Distance::from_degrees(f64::INFINITY);
    for stop in stops {
        let distance = stop.coordinate.planar_distance(rider);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(stop);
        }
    }
    nearest.ok_or(Error::NoStopsAvailable)
}
