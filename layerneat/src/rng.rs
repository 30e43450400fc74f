use rand::Rng;

/// Bernoulli trials over `f32` probabilities.
///
/// Unlike [`Rng::gen_bool`], out-of-range probabilities
/// saturate instead of panicking: anything `<= 0.0` never
/// fires and anything `>= 1.0` always fires.
pub trait Chance: Rng {
    /// Returns `true` with the given probability.
    ///
    /// # Examples
    /// ```
    /// use layerneat::Chance;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// assert!(rng.chance(1.0));
    /// assert!(!rng.chance(0.0));
    /// ```
    fn chance(&mut self, probability: f32) -> bool {
        self.gen::<f32>() < probability
    }
}

impl<R: Rng + ?Sized> Chance for R {}
