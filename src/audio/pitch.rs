/// Resampling-based pitch shifter.
///
/// Each output sample is a linear interpolation of the source at the
/// fractional index `i / pitch_factor`, with lookups clamped to the buffer.
/// Output length always equals input length, so raising the pitch also
/// compresses time within the buffer, and no fractional phase is carried
/// across buffer boundaries. Audible artifacts at high ratios are a known
/// limitation of this approach, traded for running well inside the
/// callback's deadline.
pub struct PitchShifter;

impl PitchShifter {
    pub fn new() -> Self {
        Self
    }

    /// Resample `source` into `destination` at the given pitch ratio.
    ///
    /// A factor of 1.0 is an exact copy. Factors that are zero, negative,
    /// or non-finite are treated as 1.0.
    pub fn shift(&self, source: &[f32], destination: &mut [f32], pitch_factor: f32) {
        let len = source.len().min(destination.len());
        if len == 0 {
            return;
        }

        let factor = if pitch_factor.is_finite() && pitch_factor > 0.0 {
            pitch_factor as f64
        } else {
            1.0
        };

        for i in 0..len {
            let src_index = i as f64 / factor;
            let index_a = (src_index.floor() as usize).min(len - 1);
            let index_b = (index_a + 1).min(len - 1);
            let frac = src_index - src_index.floor();

            let sample_a = source[index_a] as f64;
            let sample_b = source[index_b] as f64;
            destination[i] = ((1.0 - frac) * sample_a + frac * sample_b) as f32;
        }
    }
}

impl Default for PitchShifter {
    fn default() -> Self {
        Self::new()
    }
}
