pub mod decans;
pub mod dignities;
pub mod rulers;
pub mod types;

pub use decans::{get_decan_index, get_decan_info_for_sign_and_degree, get_decan_info_from_longitude, DecanInfo};
pub use dignities::{DignitiesService, DignityResult, DignityType, ExactExaltation};
pub use rulers::get_sign_ruler;
pub use types::{Element, Modality, ZodiacSign};
