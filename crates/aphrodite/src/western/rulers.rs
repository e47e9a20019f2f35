//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers (traditional and modern).

use crate::ephemeris::Planet;
use crate::western::types::ZodiacSign;

const TRADITIONAL_RULERS: [Planet; 12] = [
    Planet::Mars,    // Aries
    Planet::Venus,   // Taurus
    Planet::Mercury, // Gemini
    Planet::Moon,    // Cancer
    Planet::Sun,     // Leo
    Planet::Mercury, // Virgo
    Planet::Venus,   // Libra
    Planet::Mars,    // Scorpio
    Planet::Jupiter, // Sagittarius
    Planet::Saturn,  // Capricorn
    Planet::Saturn,  // Aquarius
    Planet::Jupiter, // Pisces
];

const MODERN_RULERS: [Planet; 12] = [
    Planet::Mars,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
    Planet::Sun,
    Planet::Mercury,
    Planet::Venus,
    Planet::Pluto,   // Scorpio (modern)
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,  // Aquarius (modern)
    Planet::Neptune, // Pisces (modern)
];

/// Get sign ruler
pub fn get_sign_ruler(sign: ZodiacSign, modern: bool) -> Planet {
    if modern {
        MODERN_RULERS[sign.index()]
    } else {
        TRADITIONAL_RULERS[sign.index()]
    }
}
