//! Injected randomness for the generation routines.
//!
//! Every routine in this crate that draws random numbers takes a
//! `&mut impl Rng` argument instead of reaching for a process-wide source, so
//! callers can seed a generator once and replay an entire simulation.

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use uuid::Uuid;

/// Build the crate's generator from an optional seed.
///
/// `Some(seed)` gives a fully reproducible stream; `None` seeds from OS
/// entropy.
pub fn rng_from_seed(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}

/// Uniform integer draw over `min..=max`, both ends inclusive.
///
/// An inverted pair is tolerated: the draw covers the normalized range. Plan
/// ramp-down thresholds cross over in later weeks, and callers sampling from
/// such a pair still expect a value between the two.
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Integer draw over `min..=max` skewed toward the low end.
///
/// The unit sample is squared, making small values more likely.
pub fn rand_between_skewed<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let unit = rng.gen::<f64>();
    let unit = unit * unit;
    let value = lo + (unit * ((hi - lo + 1) as f64)).floor() as i64;
    value.min(hi)
}

/// Bounded normal draw over `[min, max]` via Box-Muller, with a power-law
/// skew applied to the unit sample (`skew == 1.0` leaves the bell centered).
///
/// Samples falling outside the unit interval are redrawn.
pub fn normal_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, skew: f64) -> f64 {
    loop {
        let mut u = 0.0f64;
        while u == 0.0 {
            u = rng.gen::<f64>();
        }
        let mut v = 0.0f64;
        while v == 0.0 {
            v = rng.gen::<f64>();
        }

        let num = (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos();
        let num = num / 10.0 + 0.5;
        if (0.0..=1.0).contains(&num) {
            return num.powf(skew) * (max - min) + min;
        }
    }
}

/// Random v4 UUID drawn from the injected generator rather than OS entropy,
/// so identifiers are reproducible under a fixed seed.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes[..]);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}
