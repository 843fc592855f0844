//! Single and multilevel discrete wavelet transforms.
//!
//! Signals are extended symmetrically at both ends (`x[-1] = x[0]`,
//! `x[n] = x[n-1]`), so a level-1 decomposition of `n` samples with a
//! filter of length `f` yields `floor((n + f - 1) / 2)` coefficients per
//! band. Reconstruction of odd-length signals produces one extra sample;
//! callers truncate.

use crate::filters::Wavelet;
use pricewave_core::{Error, Result};
use tracing::trace;

/// Number of coefficients per band for a level-1 decomposition.
#[inline]
pub fn dwt_coeff_len(signal_len: usize, filter_len: usize) -> usize {
    (signal_len + filter_len - 1) / 2
}

/// Deepest decomposition level a signal of `signal_len` samples supports.
///
/// Each level halves the signal, so level `L` needs at least `2^L` samples.
pub fn max_level(signal_len: usize) -> u32 {
    if signal_len < 2 {
        0
    } else {
        signal_len.ilog2()
    }
}

/// Map an index of the extended signal back into `[0, len)`.
#[inline]
fn symmetric_index(i: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let m = i.rem_euclid(period);
    if m < len {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Single-level decomposition into `(approximation, detail)` bands.
pub fn dwt(signal: &[f64], wavelet: &Wavelet) -> (Vec<f64>, Vec<f64>) {
    let n = signal.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    let lo = wavelet.dec_lo();
    let hi = wavelet.dec_hi();
    let f = wavelet.filter_len();
    let out_len = dwt_coeff_len(n, f);

    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);
    for o in 0..out_len {
        let i = (2 * o + 1) as isize;
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..f {
            let x = signal[symmetric_index(i - j as isize, n)];
            a += lo[j] * x;
            d += hi[j] * x;
        }
        approx.push(a);
        detail.push(d);
    }
    (approx, detail)
}

/// Single-level reconstruction from equal-length bands.
pub fn idwt(approx: &[f64], detail: &[f64], wavelet: &Wavelet) -> Result<Vec<f64>> {
    if approx.len() != detail.len() {
        return Err(Error::data(format!(
            "coefficient length mismatch: approximation {}, detail {}",
            approx.len(),
            detail.len()
        )));
    }
    let n = approx.len();
    let f = wavelet.filter_len();
    let lo = wavelet.rec_lo();
    let hi = wavelet.rec_hi();

    // Full convolution of the upsampled bands, then keep the valid part.
    let mut full = vec![0.0; 2 * n + f - 1];
    for o in 0..n {
        for j in 0..f {
            full[2 * o + j] += approx[o] * lo[j] + detail[o] * hi[j];
        }
    }

    let start = f - 2;
    let out_len = (2 * n + 2).saturating_sub(f);
    Ok(full[start..start + out_len].to_vec())
}

/// Multilevel decomposition.
///
/// Returns `[cA_level, cD_level, ..., cD_1]`: the coarsest approximation
/// first and the finest detail band last.
pub fn wavedec(signal: &[f64], wavelet: &Wavelet, level: u32) -> Result<Vec<Vec<f64>>> {
    if signal.is_empty() {
        return Err(Error::data("cannot decompose an empty signal"));
    }
    let max = max_level(signal.len());
    if level > max {
        return Err(Error::WaveletLevel {
            column: None,
            level,
            max_level: max,
            len: signal.len(),
        });
    }

    let mut approx = signal.to_vec();
    let mut details = Vec::with_capacity(level as usize);
    for _ in 0..level {
        let (a, d) = dwt(&approx, wavelet);
        approx = a;
        details.push(d);
    }

    let mut coeffs = Vec::with_capacity(details.len() + 1);
    coeffs.push(approx);
    coeffs.extend(details.into_iter().rev());
    trace!(
        wavelet = wavelet.name(),
        level,
        bands = ?coeffs.iter().map(Vec::len).collect::<Vec<_>>(),
        "signal decomposed"
    );
    Ok(coeffs)
}

/// Multilevel reconstruction from `[cA_n, cD_n, ..., cD_1]`.
pub fn waverec(coeffs: &[Vec<f64>], wavelet: &Wavelet) -> Result<Vec<f64>> {
    let (first, details) = coeffs
        .split_first()
        .ok_or_else(|| Error::data("no coefficients to reconstruct"))?;

    let mut approx = first.clone();
    for detail in details {
        if approx.len() == detail.len() + 1 {
            approx.truncate(detail.len());
        }
        approx = idwt(&approx, detail, wavelet)?;
    }
    Ok(approx)
}
