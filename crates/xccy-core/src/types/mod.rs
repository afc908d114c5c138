//! Domain value types.

mod date;
mod frequency;
mod tenor;

pub use date::Date;
pub use frequency::Frequency;
pub use tenor::{Tenor, TenorUnit};
