//! Pairwise gravitational force law
//!
//! The law used here is not Newtonian inverse-square gravity. For each axis the
//! force is `G * m1 * m2 / (r / delta) * FORCE_SCALE`, where `r` is the full
//! separation and `delta` is that axis's signed separation. The result is the
//! direction from source to target scaled by `G * m1 * m2 * FORCE_SCALE`,
//! independent of distance. An axis whose cubed separation is exactly zero
//! contributes no force.

use crate::components::Body;
use crate::physics::math::{Scalar, Vector, staged_length};

/// Gravitational constant used by the force law
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.67e-11;

/// Multiplier applied to every force component
pub const FORCE_SCALE: Scalar = 4.0;

/// Tunable parameters of the force law
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParameters {
    pub gravitational_constant: Scalar,
    pub force_scale: Scalar,
}

impl Default for ForceParameters {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            force_scale: FORCE_SCALE,
        }
    }
}

/// Force exerted on `source` by `target`.
///
/// `source` and `target` must be distinct bodies. NaN masses or positions
/// propagate into the result.
pub fn compute_pairwise_force(source: &Body, target: &Body, params: &ForceParameters) -> Vector {
    let delta = target.location() - source.location();
    let distance = staged_length(delta);
    let numerator = params.gravitational_constant * source.mass * target.mass;

    let axis_force = |d: Scalar| {
        if d * d * d == 0.0 {
            0.0
        } else {
            (numerator / (distance / d)) * params.force_scale
        }
    };

    Vector::new(axis_force(delta.x), axis_force(delta.y), axis_force(delta.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::MeshHandle;

    fn body_at(mass: Scalar, position: Vector) -> Body {
        Body::new(mass, MeshHandle::default(), Vector::ONE)
            .unwrap()
            .with_position(position)
    }

    #[test]
    fn test_force_points_from_source_to_target() {
        let source = body_at(1e7, Vector::ZERO);
        let target = body_at(1e5, Vector::new(100.0, 0.0, 0.0));
        let params = ForceParameters::default();

        let force = compute_pairwise_force(&source, &target, &params);
        let expected = GRAVITATIONAL_CONSTANT * 1e7 * 1e5 * FORCE_SCALE;

        assert!((force.x - expected).abs() < expected * 1e-12);
        assert_eq!(force.y, 0.0);
        assert_eq!(force.z, 0.0);

        let reverse = compute_pairwise_force(&target, &source, &params);
        assert!((reverse.x + expected).abs() < expected * 1e-12);
    }

    #[test]
    fn test_coincident_axes_produce_exact_zero() {
        let source = body_at(2.0, Vector::new(5.0, 7.0, -3.0));
        let target = body_at(3.0, Vector::new(5.0, 9.0, -3.0));

        let force = compute_pairwise_force(&source, &target, &ForceParameters::default());

        assert_eq!(force.x, 0.0);
        assert_eq!(force.z, 0.0);
        assert!(force.y > 0.0);
        assert!(force.is_finite());
    }

    #[test]
    fn test_coincident_bodies_produce_zero_force() {
        let source = body_at(2.0, Vector::new(1.0, 1.0, 1.0));
        let target = body_at(3.0, Vector::new(1.0, 1.0, 1.0));

        let force = compute_pairwise_force(&source, &target, &ForceParameters::default());
        assert_eq!(force, Vector::ZERO);
    }

    #[test]
    fn test_underflowing_cube_counts_as_coincident() {
        // 1e-110 cubed underflows to zero even though the separation does not
        let source = body_at(1.0, Vector::ZERO);
        let target = body_at(1.0, Vector::new(1.0, 1e-110, 0.0));

        let force = compute_pairwise_force(&source, &target, &ForceParameters::default());
        assert_eq!(force.y, 0.0);
        assert!(force.x > 0.0);
    }

    #[test]
    fn test_force_scales_linearly_with_mass_product() {
        let params = ForceParameters::default();
        let position = Vector::new(3.0, -4.0, 12.0);

        let base = compute_pairwise_force(
            &body_at(2.0, Vector::ZERO),
            &body_at(5.0, position),
            &params,
        );
        let scaled = compute_pairwise_force(
            &body_at(4.0, Vector::ZERO),
            &body_at(15.0, position),
            &params,
        );

        let ratio = scaled / base;
        for component in ratio.to_array() {
            assert!((component - 6.0).abs() < 1e-12, "ratio was {component}");
        }
    }

    #[test]
    fn test_doubling_force_scale_doubles_every_component() {
        let source = body_at(1e6, Vector::new(-2.0, 1.0, 0.5));
        let target = body_at(3e6, Vector::new(8.0, -4.0, 3.0));

        let params = ForceParameters::default();
        let doubled = ForceParameters {
            force_scale: params.force_scale * 2.0,
            ..params
        };

        let base = compute_pairwise_force(&source, &target, &params);
        let twice = compute_pairwise_force(&source, &target, &doubled);

        assert_eq!(twice, base * 2.0);
    }

    #[test]
    fn test_nan_position_propagates() {
        let source = body_at(1.0, Vector::ZERO);
        let target = body_at(1.0, Vector::new(f64::NAN, 1.0, 1.0));

        let force = compute_pairwise_force(&source, &target, &ForceParameters::default());
        assert!(force.x.is_nan());
    }
}
