// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Inverse of the ETRS89-extended LAEA Europe projection (EPSG:3035).
//!
//! The catalogue stores sub-region centroids in the pan-European equal-area
//! grid; PVGIS wants geodetic WGS84/ETRS89 coordinates. This is the
//! ellipsoidal inverse Lambert Azimuthal Equal Area mapping from EPSG
//! Guidance Note 7-2, on GRS80 with the EPSG:3035 datum parameters.

/// GRS80 semi-major axis (m)
const A: f64 = 6_378_137.0;
/// GRS80 flattening
const F: f64 = 1.0 / 298.257_222_101;
/// Latitude of projection origin (deg)
const LAT_0: f64 = 52.0;
/// Longitude of projection origin (deg)
const LON_0: f64 = 10.0;
/// False easting (m)
const FALSE_EASTING: f64 = 4_321_000.0;
/// False northing (m)
const FALSE_NORTHING: f64 = 3_210_000.0;

/// q(phi) from the authalic-latitude construction.
fn authalic_q(e: f64, sin_phi: f64) -> f64 {
    let e_sin = e * sin_phi;
    (1.0 - e * e)
        * (sin_phi / (1.0 - e_sin * e_sin) - (1.0 / (2.0 * e)) * ((1.0 - e_sin) / (1.0 + e_sin)).ln())
}

/// Convert an EPSG:3035 easting/northing pair to geodetic (longitude,
/// latitude) in degrees.
pub fn laea_to_wgs84(easting: f64, northing: f64) -> (f64, f64) {
    let e2 = F * (2.0 - F);
    let e = e2.sqrt();
    let phi0 = LAT_0.to_radians();
    let lam0 = LON_0.to_radians();

    let qp = authalic_q(e, 1.0);
    let q0 = authalic_q(e, phi0.sin());
    let beta0 = (q0 / qp).asin();
    let rq = A * (qp / 2.0).sqrt();
    // D is dimensionless: a*m0 / (Rq*cos(beta0))
    let d = A * phi0.cos() / ((1.0 - e2 * phi0.sin().powi(2)).sqrt() * rq * beta0.cos());

    let x = easting - FALSE_EASTING;
    let y = northing - FALSE_NORTHING;

    let rho = ((x / d).powi(2) + (d * y).powi(2)).sqrt();
    if rho == 0.0 {
        return (LON_0, LAT_0);
    }
    let c = 2.0 * (rho / (2.0 * rq)).asin();

    let beta = (c.cos() * beta0.sin() + d * y * c.sin() * beta0.cos() / rho).asin();
    let lam = lam0
        + (x * c.sin()).atan2(d * rho * beta0.cos() * c.cos() - d * d * y * beta0.sin() * c.sin());

    // Authalic -> geodetic latitude series expansion
    let phi = beta
        + (e2 / 3.0 + 31.0 * e2.powi(2) / 180.0 + 517.0 * e2.powi(3) / 5040.0) * (2.0 * beta).sin()
        + (23.0 * e2.powi(2) / 360.0 + 251.0 * e2.powi(3) / 3780.0) * (4.0 * beta).sin()
        + (761.0 * e2.powi(3) / 45360.0) * (6.0 * beta).sin();

    (lam.to_degrees(), phi.to_degrees())
}
