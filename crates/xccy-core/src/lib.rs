//! # xccy Core
//!
//! Dates, tenors, day counts, business day calendars and schedule generation
//! for the xccy curve library.
//!
//! Everything here is explicit about the valuation context: there is no
//! process-wide evaluation date, and every calendar, day count and schedule
//! operation takes its dates as arguments.
//!
//! ## Example
//!
//! ```rust
//! use xccy_core::prelude::*;
//!
//! let valuation = Date::from_ymd(2024, 12, 11).unwrap();
//! let cal = WeekendCalendar;
//!
//! let spot = cal.add_business_days(valuation, 2);
//! let maturity = cal
//!     .advance(spot, "1Y".parse::<Tenor>().unwrap(), BusinessDayConvention::Following)
//!     .unwrap();
//!
//! let schedule = Schedule::generate(
//!     spot,
//!     maturity,
//!     Frequency::Quarterly,
//!     &cal,
//!     BusinessDayConvention::ModifiedFollowing,
//! )
//! .unwrap();
//! assert_eq!(schedule.periods().count(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::Schedule;
    pub use crate::types::{Date, Frequency, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Frequency, Tenor, TenorUnit};
