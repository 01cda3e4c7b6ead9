//! Internal unit system.
//!
//! Lengths are stored in millimetres, times in nanoseconds, energies in MeV,
//! masses in grams and angles in radians. A quantity is expressed in the
//! internal system by multiplying with its unit (`3.2 * MM`), and converted
//! back for output by dividing by the unit (`energy / KEV`).

pub const MM: f64 = 1.0;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;

pub const NS: f64 = 1.0;
pub const S: f64 = 1.0e9 * NS;

pub const MEV: f64 = 1.0;
pub const KEV: f64 = 1.0e-3 * MEV;

pub const RAD: f64 = 1.0;
pub const DEG: f64 = std::f64::consts::PI / 180.0 * RAD;

pub const CM3: f64 = CM * CM * CM;

pub const G: f64 = 1.0;
pub const G_PER_CM3: f64 = G / CM3;

pub const YEAR: f64 = 3.154e7 * S;
