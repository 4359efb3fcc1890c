//! Block summing and gain for the voice pool.

/*
Summing Voices
==============

Every active voice renders its own block, and the pool ADDS them together.
There is no crossfade or per-voice weighting: triggered sounds are
independent events and each one should be heard at its own level.


Clipping Risk
-------------

Summing is unbounded. Three voices peaking at 1.0 together reach 3.0:

    Voice A:  [ 1.0,  0.5, -0.5]
    Voice B:  [ 1.0,  0.8,  0.2]
    Voice C:  [ 0.9,  0.1, -0.9]
    Sum:      [ 2.9,  1.4, -1.2]  ← exceeds ±1.0!

The pool multiplies the finished mix by a fixed global attenuation
(`ATTENUATION` = 0.3), which keeps a handful of overlapping voices inside
[-1.0, +1.0]. Dense overlaps can still clip; the device clamps.


Phase Relationships
-------------------

Two tone voices at the same frequency that were triggered a whole number of
periods apart add constructively (up to 2×). Triggered half a period apart
they cancel. Noise voices are uncorrelated and add in power, not amplitude,
so N noise voices are only about √N times louder than one.
*/

/// Add `b` into `a` sample by sample.
///
/// ⚠️ WARNING: Can exceed [-1.0, +1.0] range!
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Multiply every sample of `buffer` by `gain`.
#[inline]
pub fn apply_gain(buffer: &mut [f32], gain: f32) {
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}
