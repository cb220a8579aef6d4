mod combination;
mod qualified_name;
mod range;

pub use combination::{Assignment, Combination, format_value, round_to_cents};
pub use qualified_name::QualifiedName;
pub use range::{MAX_BOUND, MIN_BOUND, MIN_STEP, RangeValues, SweepRange};
