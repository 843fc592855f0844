//! Orthogonal wavelet filter banks.
//!
//! Only the decomposition low-pass taps are stored. The high-pass and
//! reconstruction filters are derived as its quadrature mirror.

use pricewave_core::{Error, Result};

const HAAR: [f64; 2] = [0.7071067811865476, 0.7071067811865476];

const DB2: [f64; 4] = [
    -0.12940952255092145,
    0.22414386804185735,
    0.836516303737469,
    0.48296291314469025,
];

const DB3: [f64; 6] = [
    0.035226291882100656,
    -0.08544127388224149,
    -0.13501102001039084,
    0.4598775021193313,
    0.8068915093133388,
    0.3326705529509569,
];

const DB4: [f64; 8] = [
    -0.010597401784997278,
    0.032883011666982945,
    0.030841381835986965,
    -0.18703481171888114,
    -0.02798376941698385,
    0.6308807679295904,
    0.7148465705525415,
    0.23037781330885523,
];

const DB5: [f64; 10] = [
    0.003335725285001549,
    -0.012580751999015526,
    -0.006241490213011705,
    0.07757149384006515,
    -0.03224486958502952,
    -0.24229488706619015,
    0.13842814590110342,
    0.7243085284385744,
    0.6038292697974729,
    0.160102397974125,
];

const DB6: [f64; 12] = [
    -0.00107730108499558,
    0.004777257511010651,
    0.0005538422009938016,
    -0.031582039318031156,
    0.02752286553001629,
    0.09750160558707936,
    -0.12976686756709563,
    -0.22626469396516913,
    0.3152503517092432,
    0.7511339080215775,
    0.4946238903983854,
    0.11154074335008017,
];

const SYM4: [f64; 8] = [
    -0.07576571478927333,
    -0.02963552764599851,
    0.49761866763201545,
    0.8037387518059161,
    0.29785779560527736,
    -0.09921954357684722,
    -0.012603967262037833,
    0.0322231006040427,
];

/// Names accepted by [`Wavelet::from_name`].
pub const SUPPORTED: [&str; 10] = [
    "haar", "db1", "db2", "db3", "db4", "db5", "db6", "sym2", "sym3", "sym4",
];

/// A discrete orthogonal wavelet.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavelet {
    name: String,
    dec_lo: Vec<f64>,
    dec_hi: Vec<f64>,
    rec_lo: Vec<f64>,
    rec_hi: Vec<f64>,
}

impl Wavelet {
    /// Look up a wavelet by its short name (e.g., "db4").
    pub fn from_name(name: &str) -> Result<Self> {
        let dec_lo: &[f64] = match name.trim().to_ascii_lowercase().as_str() {
            "haar" | "db1" => &HAAR,
            "db2" | "sym2" => &DB2,
            "db3" | "sym3" => &DB3,
            "db4" => &DB4,
            "db5" => &DB5,
            "db6" => &DB6,
            "sym4" => &SYM4,
            _ => return Err(Error::UnknownWavelet(name.to_string())),
        };
        Ok(Self::from_dec_lo(name.trim(), dec_lo))
    }

    fn from_dec_lo(name: &str, dec_lo: &[f64]) -> Self {
        let len = dec_lo.len();
        let dec_hi: Vec<f64> = (0..len)
            .map(|k| {
                let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
                sign * dec_lo[len - 1 - k]
            })
            .collect();
        let rec_lo = dec_lo.iter().rev().copied().collect();
        let rec_hi = dec_hi.iter().rev().copied().collect();

        Self {
            name: name.to_string(),
            dec_lo: dec_lo.to_vec(),
            dec_hi,
            rec_lo,
            rec_hi,
        }
    }

    /// Short name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filter length.
    #[inline]
    pub fn filter_len(&self) -> usize {
        self.dec_lo.len()
    }

    /// Decomposition low-pass filter.
    pub fn dec_lo(&self) -> &[f64] {
        &self.dec_lo
    }

    /// Decomposition high-pass filter.
    pub fn dec_hi(&self) -> &[f64] {
        &self.dec_hi
    }

    /// Reconstruction low-pass filter.
    pub fn rec_lo(&self) -> &[f64] {
        &self.rec_lo
    }

    /// Reconstruction high-pass filter.
    pub fn rec_hi(&self) -> &[f64] {
        &self.rec_hi
    }
}
