use tracing::trace;

pub const COULOMB_CONSTANT: f64 = 332.0636; // In kcal·Å/(mol·e²)

/// Coulomb energy of two point charges in a uniform dielectric.
///
/// Coincident atoms (zero distance) contribute nothing.
#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64, dielectric: f64) -> f64 {
    if dist <= 0.0 {
        trace!("Zero interatomic distance in Coulomb term; contributing 0.");
        return 0.0;
    }
    COULOMB_CONSTANT * (q1 * q2) / (dielectric * dist)
}

/// 12-6 Lennard-Jones energy written in terms of the collision diameter σ.
///
/// Coincident atoms (zero distance) contribute nothing.
#[inline]
pub fn lennard_jones_12_6(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    if dist <= 0.0 {
        trace!("Zero interatomic distance in Lennard-Jones term; contributing 0.");
        return 0.0;
    }
    let rho6 = (sigma / dist).powi(6);
    let rho12 = rho6 * rho6;
    4.0 * epsilon * (rho12 - rho6)
}

/// Lorentz-Berthelot mixing: geometric mean of ε, arithmetic mean of σ.
#[inline]
pub fn combine_lorentz_berthelot(eps1: f64, sigma1: f64, eps2: f64, sigma2: f64) -> (f64, f64) {
    ((eps1 * eps2).sqrt(), (sigma1 + sigma2) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn coulomb_opposite_unit_charges_at_five_angstrom() {
        let energy = coulomb(5.0, 1.0, -1.0, 80.0);
        assert!((energy - (-0.830159)).abs() < 1e-5);
    }

    #[test]
    fn coulomb_is_repulsive_for_like_charges() {
        assert!(coulomb(3.0, 0.5, 0.5, 80.0) > 0.0);
    }

    #[test]
    fn coulomb_at_zero_distance_is_zero() {
        assert_eq!(coulomb(0.0, 1.0, 1.0, 80.0), 0.0);
    }

    #[test]
    fn lennard_jones_at_sigma_is_zero() {
        assert!(f64_approx_equal(lennard_jones_12_6(3.5, 3.5, 0.2), 0.0));
    }

    #[test]
    fn lennard_jones_minimum_is_negative_epsilon() {
        let r_min = 2f64.powf(1.0 / 6.0) * 3.5;
        assert!(f64_approx_equal(lennard_jones_12_6(r_min, 3.5, 0.2), -0.2));
    }

    #[test]
    fn lennard_jones_is_repulsive_inside_sigma() {
        assert!(lennard_jones_12_6(2.0, 3.5, 0.2) > 0.0);
    }

    #[test]
    fn lennard_jones_at_zero_distance_is_zero() {
        assert_eq!(lennard_jones_12_6(0.0, 3.5, 0.2), 0.0);
    }

    #[test]
    fn mixing_rules_use_geometric_and_arithmetic_means() {
        let (eps, sigma) = combine_lorentz_berthelot(0.1, 3.0, 0.4, 4.0);
        assert!(f64_approx_equal(eps, 0.2));
        assert!(f64_approx_equal(sigma, 3.5));
    }
}
