use crate::components::BodyHandle;
use bevy::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

#[derive(Resource, Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// Body the camera follows, if any
#[derive(Resource, Deref, DerefMut, Copy, Clone, Default, PartialEq, Debug)]
pub struct CameraLock(pub Option<BodyHandle>);

impl CameraLock {
    /// Advances the lock to the next body, wrapping back to no lock after the
    /// last one.
    pub fn cycle(&mut self, body_count: usize) {
        self.0 = match self.0 {
            None if body_count > 0 => Some(BodyHandle(0)),
            Some(BodyHandle(index)) if index + 1 < body_count => Some(BodyHandle(index + 1)),
            _ => None,
        };
    }
}

/// Where the running configuration was loaded from, for reloads
#[derive(Resource, Clone, Default, PartialEq, Debug)]
pub struct ConfigSource(pub Option<String>);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_shared_rng_deterministic_with_seed() {
        let seed = 12345u64;
        let mut rng1 = SharedRng::from_seed(seed);
        let mut rng2 = SharedRng::from_seed(seed);

        let values1: Vec<f64> = (0..10).map(|_| rng1.random_range(0.0..1.0)).collect();
        let values2: Vec<f64> = (0..10).map(|_| rng2.random_range(0.0..1.0)).collect();

        assert_eq!(values1, values2);
    }

    #[test]
    fn test_shared_rng_from_optional_seed() {
        let seed = 54321u64;
        let mut rng_with_seed = SharedRng::from_optional_seed(Some(seed));
        let mut rng_with_same_seed = SharedRng::from_seed(seed);

        let value1: f64 = rng_with_seed.random_range(0.0..1.0);
        let value2: f64 = rng_with_same_seed.random_range(0.0..1.0);

        assert_eq!(value1, value2);
    }

    #[test]
    fn test_camera_lock_cycles_through_bodies_then_off() {
        let mut lock = CameraLock::default();

        lock.cycle(2);
        assert_eq!(*lock, Some(BodyHandle(0)));
        lock.cycle(2);
        assert_eq!(*lock, Some(BodyHandle(1)));
        lock.cycle(2);
        assert_eq!(*lock, None);
    }

    #[test]
    fn test_camera_lock_without_bodies_stays_off() {
        let mut lock = CameraLock::default();
        lock.cycle(0);
        assert_eq!(*lock, None);
    }
}
