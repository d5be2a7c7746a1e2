use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions and forces
pub type Vector = bevy::math::DVec3;

/// Homogeneous 4-component vector used for body positions and accumulated forces.
///
/// The fourth component is carried for interop with translation transforms and is
/// never read by the force law.
pub type Homogeneous = bevy::math::DVec4;

/// Euclidean length of `delta`, computed in two stages: first the xy-plane
/// distance, then the full 3D distance from it.
///
/// This is not a shortcut for `delta.length()`; the staged form rounds
/// differently and the force law depends on reproducing it exactly.
pub fn staged_length(delta: Vector) -> Scalar {
    let distance_xy = libm::sqrt(delta.x * delta.x + delta.y * delta.y);
    libm::sqrt(distance_xy * distance_xy + delta.z * delta.z)
}

/// Lifts a 3D force into homogeneous form with a zero fourth component.
pub fn to_homogeneous_direction(v: Vector) -> Homogeneous {
    v.extend(0.0)
}

/// Divides the spatial components of `force` by `mass` and the homogeneous
/// component by 1.0.
pub fn normalize_by_mass(force: Homogeneous, mass: Scalar) -> Homogeneous {
    force / Homogeneous::new(mass, mass, mass, 1.0)
}

/// Unit vector pointing to the right of `front` with respect to `up`.
///
/// Returns zero when `front` and `up` are parallel.
pub fn strafe_direction(front: Vector, up: Vector) -> Vector {
    front.cross(up).normalize_or_zero()
}

/// Draws a value in the open interval (-1, 1): a magnitude uniform in [0, 1)
/// with a uniformly random sign.
pub fn random_signed_unit<R: Rng + ?Sized>(rng: &mut R) -> Scalar {
    let magnitude: Scalar = rng.random_range(0.0..1.0);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}
