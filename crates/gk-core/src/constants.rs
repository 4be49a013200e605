//! Physical constants (SI).

/// Universal gas constant [J/(mol·K)] (CODATA 2018, exact).
pub const R_UNIVERSAL: f64 = 8.314_462_618_153_24;

/// Standard-state reference pressure [Pa] (1 bar).
pub const P_REF: f64 = 1.0e5;

/// Standard-state reference temperature [K].
pub const T_REF: f64 = 298.15;

/// Micropoise to Pa·s.
pub const MICROPOISE: f64 = 1.0e-7;

/// µW/(cm·K) to W/(m·K).
pub const MICROWATT_PER_CM_K: f64 = 1.0e-4;
