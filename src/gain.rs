//! Decibel and linear-ratio gain conversion.
//!
//! Both directions share a *floor* value: the decibel level below which a
//! signal is treated as silence. The floor doubles as a sentinel, so the
//! comparison against it is exact. Callers must pass the identical floor
//! constant on both sides of a conversion; a recomputed approximation will
//! miss the silence branch.

/// Converts a gain in decibels to a linear amplitude ratio.
///
/// A `db` exactly equal to `floor` means silence and maps to `0.0`.
///
/// # Examples
///
/// ```
/// use chime::db_to_ratio;
///
/// assert_eq!(db_to_ratio(0.0, -120.0), 1.0);
/// assert_eq!(db_to_ratio(-120.0, -120.0), 0.0);
/// ```
pub fn db_to_ratio(db: f32, floor: f32) -> f32 {
    if db == floor {
        return 0.0;
    }

    10.0_f32.powf(db / 20.0)
}

/// Converts a linear amplitude ratio to decibels, clamped to `floor`.
///
/// A ratio of exactly `0.0` returns `floor`; no other ratio can produce a
/// value below it.
pub fn ratio_to_db(ratio: f32, floor: f32) -> f32 {
    if ratio == 0.0 {
        return floor;
    }

    let db = 20.0 * ratio.log10();
    db.max(floor)
}
