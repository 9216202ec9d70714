//! GPS coordinate extraction from EXIF DMS rationals.

use exif::{Exif, In, Rational, Tag, Value};

/// Read the GPS position as signed decimal degrees.
///
/// Emitted only when both latitude and longitude fully resolve; a partial
/// position is treated as no position.
pub(crate) fn coordinates(exif: &Exif) -> Option<(f64, f64)> {
    let latitude = component(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'N', b'S')?;
    let longitude = component(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'E', b'W')?;
    Some((latitude, longitude))
}

fn component(exif: &Exif, position: Tag, reference: Tag, positive: u8, negative: u8) -> Option<f64> {
    let position = exif.get_field(position, In::PRIMARY)?;
    let reference = exif.get_field(reference, In::PRIMARY)?;

    match (&position.value, &reference.value) {
        (Value::Rational(dms), Value::Ascii(refs)) => {
            let sign = hemisphere_sign(refs, positive, negative)?;
            decimal_degrees(dms, sign)
        }
        _ => None,
    }
}

fn hemisphere_sign(refs: &[Vec<u8>], positive: u8, negative: u8) -> Option<f64> {
    let hemisphere = refs.first().and_then(|r| r.first())?;
    match hemisphere.to_ascii_uppercase() {
        h if h == positive => Some(1.0),
        h if h == negative => Some(-1.0),
        _ => None,
    }
}

/// Degrees-minutes-seconds to decimal degrees. Minutes and seconds are
/// optional in the wild; missing components count as zero.
fn decimal_degrees(dms: &[Rational], sign: f64) -> Option<f64> {
    let degrees = dms.first()?.to_f64();
    let minutes = dms.get(1).map(Rational::to_f64).unwrap_or(0.0);
    let seconds = dms.get(2).map(Rational::to_f64).unwrap_or(0.0);
    Some(sign * (degrees + minutes / 60.0 + seconds / 3600.0))
}
