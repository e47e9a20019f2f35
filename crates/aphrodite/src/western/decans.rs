//! Western astrology decans calculations.
//!
//! Each sign is divided into 3 decans (10 degrees each), with decan rulers
//! taken from the signs of the same element in zodiac order.

use crate::ephemeris::Planet;
use crate::western::rulers::get_sign_ruler;
use crate::western::types::{Element, ZodiacSign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecanInfo {
    pub sign: ZodiacSign,
    pub element: Element,
    pub sign_ruler: Planet,
    pub decan_index: u8, // 1, 2, or 3
    pub degree_in_sign: f64, // 0 <= x < 30
    pub decan_ruler: Planet,
}

/// Given degree in sign, returns decan index 1, 2, or 3. Out of range
/// values are clamped into the sign.
pub fn get_decan_index(degree_in_sign: f64) -> u8 {
    if degree_in_sign < 10.0 {
        1
    } else if degree_in_sign < 20.0 {
        2
    } else {
        3
    }
}

/// Compute decan info given a sign and degree in that sign.
pub fn get_decan_info_for_sign_and_degree(sign: ZodiacSign, degree_in_sign: f64) -> DecanInfo {
    let decan_index = get_decan_index(degree_in_sign);
    // Signs of one element sit four places apart: the decans rotate through them.
    let ruling_sign = ZodiacSign::from_index(sign.index() + 4 * (decan_index as usize - 1));

    DecanInfo {
        sign,
        element: sign.element(),
        sign_ruler: get_sign_ruler(sign, false),
        decan_index,
        degree_in_sign,
        decan_ruler: get_sign_ruler(ruling_sign, false),
    }
}

/// From absolute longitude 0–360.
pub fn get_decan_info_from_longitude(longitude: f64) -> DecanInfo {
    let sign = ZodiacSign::from_longitude(longitude);
    let degree_in_sign = longitude.rem_euclid(360.0) - sign.start_longitude();
    get_decan_info_for_sign_and_degree(sign, degree_in_sign.clamp(0.0, 29.999_999))
}
