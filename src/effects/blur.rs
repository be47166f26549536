use crate::foundation::core::Size;
use crate::foundation::error::{BoothError, BoothResult};

const ONE_Q16: i64 = 1 << 16;

/// Normalized Gaussian taps in Q16 fixed point, spanning three sigmas either side of the
/// center. The taps always sum to exactly `1 << 16`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GaussianKernel {
    taps: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel for standard deviation `sigma`, or `None` when the blur would be a no-op.
    pub(crate) fn from_sigma(sigma: f32) -> Option<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return None;
        }
        let radius = ((sigma * 3.0).ceil() as i32).max(1);
        let two_var = 2.0 * f64::from(sigma).powi(2);
        let weights: Vec<f64> = (-radius..=radius)
            .map(|i| (-f64::from(i * i) / two_var).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut taps: Vec<u32> = weights
            .iter()
            .map(|w| ((w / total) * ONE_Q16 as f64).round() as u32)
            .collect();
        // Center tap absorbs the rounding drift.
        let drift = ONE_Q16 - taps.iter().map(|&t| i64::from(t)).sum::<i64>();
        let mid = radius as usize;
        taps[mid] = (i64::from(taps[mid]) + drift).clamp(0, ONE_Q16) as u32;
        Some(Self { taps })
    }

    pub(crate) fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    /// Blur a premultiplied RGBA8 buffer, rows first and then columns. Edges clamp.
    pub(crate) fn apply(&self, src: &[u8], size: Size) -> BoothResult<Vec<u8>> {
        check_len(src, size)?;
        let (w, h) = (size.width as usize, size.height as usize);

        let mut rows = vec![0u8; src.len()];
        for y in 0..h {
            self.convolve_line(src, &mut rows, w, |x| (y * w + x) * 4);
        }
        let mut out = vec![0u8; src.len()];
        for x in 0..w {
            self.convolve_line(&rows, &mut out, h, |y| (y * w + x) * 4);
        }
        Ok(out)
    }

    /// Convolve one line of `len` pixels; `offset(i)` is the byte offset of pixel `i`.
    fn convolve_line(&self, src: &[u8], dst: &mut [u8], len: usize, offset: impl Fn(usize) -> usize) {
        let r = self.radius() as isize;
        let last = len as isize - 1;
        for i in 0..len {
            let mut acc = [0u64; 4];
            for (k, &weight) in self.taps.iter().enumerate() {
                let j = (i as isize + k as isize - r).clamp(0, last) as usize;
                let at = offset(j);
                for (sum, &channel) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *sum += u64::from(weight) * u64::from(channel);
                }
            }
            let at = offset(i);
            for (out, sum) in dst[at..at + 4].iter_mut().zip(acc) {
                *out = ((sum + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

fn check_len(src: &[u8], size: Size) -> BoothResult<()> {
    if src.len() != size.rgba_len() {
        return Err(BoothError::decode(format!(
            "blur expects {} bytes for {}x{}, got {}",
            size.rgba_len(),
            size.width,
            size.height,
            src.len()
        )));
    }
    Ok(())
}

/// Gaussian blur of standard deviation `sigma` over premultiplied RGBA8. A sigma that is not
/// finite and positive returns the pixels unchanged.
pub(crate) fn blur_rgba8_premul(src: &[u8], size: Size, sigma: f32) -> BoothResult<Vec<u8>> {
    match GaussianKernel::from_sigma(sigma) {
        Some(kernel) => kernel.apply(src, size),
        None => {
            check_len(src, size)?;
            Ok(src.to_vec())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
