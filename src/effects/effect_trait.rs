/// Audio effect processor trait
///
/// All effects must be Send to be usable in the audio thread.
/// Effects must be real-time safe: no blocking operations, no allocations
/// other than grow-only delay-line resizes.
pub trait Effect: Send {
    /// Process one channel's samples in place.
    ///
    /// A disabled effect leaves the buffer untouched. Invalid internal
    /// conditions (zero sample rate, empty buffer) are a no-op, never an
    /// error.
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32);

    /// Clear continuous state (filter integrators, delay lines, envelopes)
    fn reset(&mut self);

    /// Get the effect name
    fn name(&self) -> &str;
}
