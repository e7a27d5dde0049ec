use approx::assert_relative_eq;

use nbsim::simulation::forces::accumulate_net_forces;
use nbsim::simulation::integrator::{euler_step, ForceBuffers};
use nbsim::simulation::params::G;
use nbsim::simulation::states::{Body, Universe};
use nbsim::configuration::planets::parse_planets;

const PLANETS: &str = "
5
2.50e+11
 1.4960e+11  0.0000e+00  0.0000e+00  2.9800e+04  5.9740e+24    earth.gif
 2.2790e+11  0.0000e+00  0.0000e+00  2.4100e+04  6.4190e+23     mars.gif
 5.7900e+10  0.0000e+00  0.0000e+00  4.7900e+04  3.3020e+23  mercury.gif
 0.0000e+00  0.0000e+00  0.0000e+00  0.0000e+00  1.9890e+30      sun.gif
 1.0820e+11  0.0000e+00  0.0000e+00  3.5000e+04  4.8690e+24    venus.gif
";

/// Build a simple 2-body universe separated along the x-axis
pub fn two_body_universe(dist: f64, m1: f64, m2: f64) -> Universe {
    let b1 = Body::from_components(-dist / 2.0, 0.0, 0.0, 0.0, m1, "a");
    let b2 = Body::from_components(dist / 2.0, 0.0, 0.0, 0.0, m2, "b");
    Universe::new(dist, vec![b1, b2])
}

/// Bodies scattered off-axis so that both force components are non-zero
pub fn scattered() -> Vec<Body> {
    vec![
        Body::from_components(1.0e9, -2.0e9, 10.0, 0.0, 4.0e24, "a"),
        Body::from_components(-3.5e9, 7.0e8, 0.0, -5.0, 9.0e23, "b"),
        Body::from_components(2.2e9, 4.1e9, 1.0, 1.0, 6.0e25, "c"),
        Body::from_components(-1.1e9, -6.3e9, 0.0, 0.0, 2.0e26, "d"),
    ]
}

// ==================================================================================
// Distance and pairwise force tests
// ==================================================================================

#[test]
fn distance_is_symmetric() {
    let mut bodies = parse_planets(PLANETS).unwrap().bodies;
    bodies.extend(scattered());

    for a in &bodies {
        for b in &bodies {
            assert_eq!(a.distance_to(b), b.distance_to(a));
        }
    }
}

#[test]
fn distance_is_euclidean() {
    let a = Body::from_components(1.0, 2.0, 0.0, 0.0, 1.0, "a");
    let b = Body::from_components(4.0, 6.0, 0.0, 0.0, 1.0, "b");
    assert_eq!(a.distance_to(&b), 5.0);
}

#[test]
fn force_matches_newton() {
    let a = Body::from_components(1.0e12, 2.0e11, 0.0, 0.0, 2.0e30, "a");
    let b = Body::from_components(2.3e12, 9.5e11, 0.0, 0.0, 6.0e26, "b");
    let r = a.distance_to(&b);

    assert_relative_eq!(a.force_from(&b), G * 2.0e30 * 6.0e26 / (r * r), max_relative = 1e-15);
    assert_relative_eq!(a.force_from(&b), b.force_from(&a), max_relative = 1e-15);
}

#[test]
fn components_recompose_to_magnitude() {
    let bodies = scattered();
    for a in &bodies {
        for b in &bodies {
            if std::ptr::eq(a, b) {
                continue;
            }
            let fx = a.force_from_x(b);
            let fy = a.force_from_y(b);
            let f = a.force_from(b);
            assert_relative_eq!(fx * fx + fy * fy, f * f, max_relative = 1e-12);
        }
    }
}

#[test]
fn force_points_toward_other_body() {
    let u = two_body_universe(2.0, 1.0, 1.0);
    let (a, b) = (&u.bodies[0], &u.bodies[1]);

    // b sits at larger x, so a is pulled along +x and b along -x
    assert!(a.force_from_x(b) > 0.0, "force on a is not toward b");
    assert!(b.force_from_x(a) < 0.0, "force on b is not toward a");
    assert_eq!(a.force_from_y(b), 0.0);
}

#[test]
fn gravity_inverse_square_law() {
    let u_r = two_body_universe(1.0, 1.0, 1.0);
    let u_2r = two_body_universe(2.0, 1.0, 1.0);

    let f_r = u_r.bodies[0].force_from(&u_r.bodies[1]);
    let f_2r = u_2r.bodies[0].force_from(&u_2r.bodies[1]);

    assert_relative_eq!(f_r / f_2r, 4.0, max_relative = 1e-12);
}

#[test]
fn coincident_bodies_propagate_nan() {
    let a = Body::from_components(5.0, 5.0, 0.0, 0.0, 1.0e10, "a");
    let b = Body::from_components(5.0, 5.0, 0.0, 0.0, 2.0e10, "b");

    assert_eq!(a.distance_to(&b), 0.0);
    assert!(a.force_from(&b).is_infinite());
    assert!(a.force_from_x(&b).is_nan());
    assert!(a.force_from_y(&b).is_nan());

    let mut u = Universe::new(10.0, vec![a, b]);
    let mut forces = ForceBuffers::new(2);
    euler_step(&mut u, &mut forces, 1.0);
    assert!(u.bodies[0].x.x.is_nan());
    assert!(u.bodies[1].v.y.is_nan());
}

// ==================================================================================
// Net force tests
// ==================================================================================

#[test]
fn two_body_net_force_equals_pair_force() {
    let bodies = scattered()[..2].to_vec();
    let a = &bodies[0];

    let fx = a.net_force_x(0, &bodies);
    let fy = a.net_force_y(0, &bodies);

    assert_relative_eq!((fx * fx + fy * fy).sqrt(), a.force_from(&bodies[1]), max_relative = 1e-12);
}

#[test]
fn net_force_newton_third_law() {
    let u = two_body_universe(1.0e3, 2.0e10, 3.0e10);
    let b = &u.bodies;

    assert_relative_eq!(b[0].net_force_x(0, b), -b[1].net_force_x(1, b), max_relative = 1e-15);
    assert_eq!(b[0].net_force_y(0, b), 0.0);
}

#[test]
fn net_force_sums_in_collection_order() {
    let bodies = scattered();
    let a = &bodies[1];

    let mut expected_x = 0.0;
    let mut expected_y = 0.0;
    for j in [0, 2, 3] {
        expected_x += a.force_from_x(&bodies[j]);
        expected_y += a.force_from_y(&bodies[j]);
    }

    assert_eq!(a.net_force_x(1, &bodies).to_bits(), expected_x.to_bits());
    assert_eq!(a.net_force_y(1, &bodies).to_bits(), expected_y.to_bits());
}

#[test]
fn net_force_skips_by_index_not_value() {
    // bodies[2] is a field-for-field copy of bodies[0]; only index 0 is self
    let mut bodies = scattered()[..2].to_vec();
    bodies.push(bodies[0].clone());

    assert_eq!(bodies[0], bodies[2]);
    assert!(bodies[0].net_force_x(0, &bodies).is_nan());
    assert!(bodies[0].net_force_y(0, &bodies).is_nan());
}

#[test]
fn net_forces_are_bit_reproducible() {
    let universe = parse_planets(PLANETS).unwrap();
    let n = universe.len();

    let run = || {
        let mut fx = vec![0.0; n];
        let mut fy = vec![0.0; n];
        accumulate_net_forces(&universe.bodies, &mut fx, &mut fy);
        (fx, fy)
    };

    let (fx1, fy1) = run();
    let (fx2, fy2) = run();
    for i in 0..n {
        assert_eq!(fx1[i].to_bits(), fx2[i].to_bits());
        assert_eq!(fy1[i].to_bits(), fy2[i].to_bits());
    }
}

#[test]
fn accumulate_matches_per_body_sums() {
    let bodies = scattered();
    let n = bodies.len();
    let mut fx = vec![f64::NAN; n];
    let mut fy = vec![f64::NAN; n];

    accumulate_net_forces(&bodies, &mut fx, &mut fy);

    for (i, b) in bodies.iter().enumerate() {
        assert_eq!(fx[i].to_bits(), b.net_force_x(i, &bodies).to_bits());
        assert_eq!(fy[i].to_bits(), b.net_force_y(i, &bodies).to_bits());
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_accumulate_matches_serial_loop() {
    let mut bodies = parse_planets(PLANETS).unwrap().bodies;
    bodies.extend(scattered());
    let n = bodies.len();

    let mut fx = vec![0.0; n];
    let mut fy = vec![0.0; n];
    accumulate_net_forces(&bodies, &mut fx, &mut fy);

    let mut serial_x = Vec::with_capacity(n);
    let mut serial_y = Vec::with_capacity(n);
    for (i, b) in bodies.iter().enumerate() {
        serial_x.push(b.net_force_x(i, &bodies));
        serial_y.push(b.net_force_y(i, &bodies));
    }

    for i in 0..n {
        assert_eq!(fx[i].to_bits(), serial_x[i].to_bits(), "fx of body {i}");
        assert_eq!(fy[i].to_bits(), serial_y[i].to_bits(), "fy of body {i}");
    }
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn advance_uses_updated_velocity() {
    let mut b = Body::from_components(0.0, 0.0, 1.0, -1.0, 4.0, "a");

    // a = (2, 1); v = (1 + 0.5*2, -1 + 0.5*1) = (2, -0.5); x = 0.5 * v
    b.advance(0.5, 8.0, 4.0);

    assert_eq!(b.v.x, 2.0);
    assert_eq!(b.v.y, -0.5);
    assert_eq!(b.x.x, 1.0);
    assert_eq!(b.x.y, -0.25);
}

#[test]
fn advance_with_zero_mass_is_not_guarded() {
    let mut b = Body::from_components(0.0, 0.0, 0.0, 0.0, 0.0, "ghost");
    b.advance(1.0, 0.0, 1.0);

    assert!(b.v.x.is_nan());
    assert!(b.v.y.is_infinite());
    assert!(b.x.x.is_nan());
}

#[test]
fn euler_step_uses_start_of_step_snapshot() {
    let mut u = Universe::new(1.0e10, scattered());
    let before = u.bodies.clone();

    let mut forces = ForceBuffers::default();
    euler_step(&mut u, &mut forces, 100.0);
    assert_eq!(forces.len(), before.len());

    for (i, b) in before.iter().enumerate() {
        let mut expected = b.clone();
        expected.advance(100.0, b.net_force_x(i, &before), b.net_force_y(i, &before));
        assert_eq!(u.bodies[i], expected);
    }
}

#[test]
fn euler_step_on_empty_universe_is_a_no_op() {
    let mut u = Universe::new(1.0, Vec::new());
    let mut forces = ForceBuffers::default();
    euler_step(&mut u, &mut forces, 1.0);
    assert!(u.is_empty());
}

#[test]
fn light_companion_keeps_circular_orbit() {
    let m_sun = 1.989e30;
    let r = 1.496e11;
    let v = (G * m_sun / r).sqrt();

    let sun = Body::from_components(0.0, 0.0, 0.0, 0.0, m_sun, "sun.gif");
    let rock = Body::from_components(r, 0.0, 0.0, v, 1.0, "rock.gif");
    let mut u = Universe::new(2.0 * r, vec![sun, rock]);
    let mut forces = ForceBuffers::new(2);

    // one hour steps for a full year
    let dt = 3600.0;
    let mut worst: f64 = 0.0;
    for _ in 0..8766 {
        euler_step(&mut u, &mut forces, dt);
        let d = u.bodies[1].distance_to(&u.bodies[0]);
        worst = worst.max((d - r).abs() / r);
    }

    assert!(worst < 0.01, "orbit radius drifted by {:.4}%", worst * 100.0);
}
