//! US EPA breakpoint tables.
//!
//! PM tables are in µg/m³, gas tables in ppm. O3 uses the 8-hour table,
//! CO the 8-hour table, NO2 and SO2 the 1-hour tables.

use super::pollutant::Pollutant;

/// One segment of a piecewise-linear concentration → index mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: u16,
    pub i_high: u16,
}

const fn bp(c_low: f64, c_high: f64, i_low: u16, i_high: u16) -> Breakpoint {
    Breakpoint { c_low, c_high, i_low, i_high }
}

impl Breakpoint {
    pub fn contains(&self, c: f64) -> bool {
        c >= self.c_low && c <= self.c_high
    }

    /// Linear interpolation within the segment, rounded half away from zero.
    pub fn interpolate(&self, c: f64) -> u16 {
        let (i_low, i_high) = (self.i_low as f64, self.i_high as f64);
        let index = (i_high - i_low) / (self.c_high - self.c_low) * (c - self.c_low) + i_low;
        index.round() as u16
    }
}

/// A complete set of per-pollutant tables.
#[derive(Debug)]
pub struct BreakpointSet {
    pub pm2_5: &'static [Breakpoint],
    pub pm10: &'static [Breakpoint],
    pub co: &'static [Breakpoint],
    pub o3: &'static [Breakpoint],
    pub no2: &'static [Breakpoint],
    pub so2: &'static [Breakpoint],
}

impl BreakpointSet {
    pub fn table(&self, pollutant: Pollutant) -> &'static [Breakpoint] {
        match pollutant {
            Pollutant::Pm25 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
        }
    }
}

/// Number of decimals the EPA tables are written in, per pollutant.
pub fn table_precision(pollutant: Pollutant) -> i32 {
    match pollutant {
        Pollutant::Pm25 => 1,
        Pollutant::Pm10 => 0,
        Pollutant::Co => 1,
        Pollutant::O3 | Pollutant::No2 | Pollutant::So2 => 3,
    }
}

pub static US_EPA: BreakpointSet = BreakpointSet {
    pm2_5: &[
        bp(0.0, 12.0, 0, 50),
        bp(12.1, 35.4, 51, 100),
        bp(35.5, 55.4, 101, 150),
        bp(55.5, 150.4, 151, 200),
        bp(150.5, 250.4, 201, 300),
        bp(250.5, 500.4, 301, 500),
    ],
    pm10: &[
        bp(0.0, 54.0, 0, 50),
        bp(55.0, 154.0, 51, 100),
        bp(155.0, 254.0, 101, 150),
        bp(255.0, 354.0, 151, 200),
        bp(355.0, 424.0, 201, 300),
        bp(425.0, 604.0, 301, 500),
    ],
    co: &[
        bp(0.0, 4.4, 0, 50),
        bp(4.5, 9.4, 51, 100),
        bp(9.5, 12.4, 101, 150),
        bp(12.5, 15.4, 151, 200),
        bp(15.5, 30.4, 201, 300),
        bp(30.5, 50.4, 301, 500),
    ],
    o3: &[
        bp(0.0, 0.054, 0, 50),
        bp(0.055, 0.07, 51, 100),
        bp(0.071, 0.085, 101, 150),
        bp(0.086, 0.105, 151, 200),
        bp(0.106, 0.2, 201, 300),
    ],
    no2: &[
        bp(0.0, 0.053, 0, 50),
        bp(0.054, 0.1, 51, 100),
        bp(0.101, 0.36, 101, 150),
        bp(0.361, 0.649, 151, 200),
        bp(0.65, 1.249, 201, 300),
        bp(1.25, 2.049, 301, 500),
    ],
    so2: &[
        bp(0.0, 0.035, 0, 50),
        bp(0.036, 0.075, 51, 100),
        bp(0.076, 0.185, 101, 150),
        bp(0.186, 0.304, 151, 200),
        bp(0.305, 0.604, 201, 300),
        bp(0.605, 1.004, 301, 500),
    ],
};
