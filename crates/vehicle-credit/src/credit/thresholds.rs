use std::ops::RangeInclusive;

pub const HATCH_INCOME_MIN: f64 = 5000.0;
pub const HATCH_INCOME_MAX: f64 = 15000.0;

/// SUV bounds are exclusive: income and age must be strictly above them.
pub const SUV_INCOME_FLOOR: f64 = 8000.0;
pub const SUV_AGE_FLOOR: u32 = 20;

pub const FIXED_INTEREST_AGES: RangeInclusive<u32> = 18..=25;
pub const VARIABLE_INTEREST_AGES: RangeInclusive<u32> = 21..=65;
pub const VARIABLE_INTEREST_INCOME: RangeInclusive<f64> = 5000.0..=15000.0;
pub const PAYROLL_AGE_FLOOR: u32 = 65;
