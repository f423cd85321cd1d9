//! Base Excess Estimate
//!
//! Siggaard-Andersen approximation:
//! BE = 0.93 × (HCO3 − 24.4) + 14.83 × (pH − 7.4)

pub const BE_HCO3_COEFFICIENT: f64 = 0.93;
pub const BE_HCO3_REFERENCE: f64 = 24.4;
pub const BE_PH_COEFFICIENT: f64 = 14.83;
pub const BE_PH_REFERENCE: f64 = 7.4;

/// Estimated base excess (mEq/L)
pub fn estimate_base_excess(ph: f64, hco3: f64) -> f64 {
    BE_HCO3_COEFFICIENT * (hco3 - BE_HCO3_REFERENCE) + BE_PH_COEFFICIENT * (ph - BE_PH_REFERENCE)
}
