//! Forward transform of the real-valued capture.
//!
//! The FFT itself is `rustfft`'s; this module only stages the capture as
//! complex input with a zero imaginary part. Working buffers are owned by the
//! call and reserved fallibly, so an allocation failure surfaces as
//! [`AdcError::TransformAllocation`] instead of aborting the process.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::composite::CompositeWaveform;
use crate::error::{AdcError, AdcResult};

/// Reserves an empty buffer with room for exactly `len` coefficients.
fn reserve_buffer(len: usize) -> AdcResult<Vec<Complex<f64>>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| AdcError::TransformAllocation { size: len })?;
    Ok(buffer)
}

/// Computes the forward DFT of `waveform`.
///
/// Returns one coefficient per sample. Bin 0 is DC; bins above
/// `len / 2` mirror the lower half.
pub fn transform(waveform: &CompositeWaveform) -> AdcResult<Vec<Complex<f64>>> {
    let size = waveform.len();

    let mut buffer = reserve_buffer(size)?;
    buffer.extend(waveform.samples().iter().map(|&s| Complex::new(s, 0.0)));
    if size == 0 {
        return Ok(buffer);
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(size);

    let scratch_len = fft.get_inplace_scratch_len();
    let mut scratch = reserve_buffer(scratch_len)?;
    scratch.resize(scratch_len, Complex::new(0.0, 0.0));

    fft.process_with_scratch(&mut buffer, &mut scratch);

    tracing::debug!(size, scratch_len, "forward transform complete");
    Ok(buffer)
}
