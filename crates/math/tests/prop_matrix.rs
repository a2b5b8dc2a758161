use cubegrid_math::transform::{perspective, rotation_x, rotation_y, rotation_z, scaling, translation};
use cubegrid_math::{Matrix4, Vector3};
use glam::DMat4;
use proptest::prelude::*;

fn arb_matrix() -> impl Strategy<Value = Matrix4> {
    proptest::array::uniform16(-10.0f64..10.0).prop_map(Matrix4::new)
}

/// Rigid placement plus a non-degenerate scale: always invertible.
fn arb_transform() -> impl Strategy<Value = Matrix4> {
    (
        (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0),
        (-3.2f64..3.2, -3.2f64..3.2, -3.2f64..3.2),
        (0.25f64..4.0, 0.25f64..4.0, 0.25f64..4.0),
    )
        .prop_map(|(t, r, s)| {
            translation(Vector3::new(t.0, t.1, t.2))
                .multiply(&rotation_x(r.0))
                .multiply(&rotation_y(r.1))
                .multiply(&rotation_z(r.2))
                .multiply(&scaling(Vector3::new(s.0, s.1, s.2)))
        })
}

/// Our row-major array read as glam's column-major layout is the transpose,
/// so glam's `a * b` on transposes lines up with `a.multiply(b)`.
fn to_glam(m: &Matrix4) -> DMat4 {
    DMat4::from_cols_array(&m.to_array())
}

proptest! {
    #[test]
    fn multiply_is_associative(a in arb_matrix(), b in arb_matrix(), c in arb_matrix()) {
        let left = a.multiply(&b).multiply(&c);
        let right = a.multiply(&b.multiply(&c));
        prop_assert!(left.approx_eq(&right, 1e-6), "{left}\n{right}");
    }

    #[test]
    fn multiply_matches_glam(a in arb_matrix(), b in arb_matrix()) {
        let ours = a.multiply(&b).to_array();
        let theirs = (to_glam(&a) * to_glam(&b)).to_cols_array();
        for (x, y) in ours.iter().zip(theirs.iter()) {
            prop_assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn inverse_round_trips_to_identity(m in arb_transform()) {
        prop_assert!(m.multiply(&m.inverse()).approx_eq(&Matrix4::IDENTITY, 1e-9));
    }

    #[test]
    fn inverse_methods_agree(m in arb_transform()) {
        prop_assert!(m.inverse().approx_eq(&m.inverse_gauss_jordan(), 1e-9));
    }

    #[test]
    fn inverse_matches_glam(m in arb_transform()) {
        let ours = m.inverse().to_array();
        let theirs = to_glam(&m).inverse().to_cols_array();
        for (x, y) in ours.iter().zip(theirs.iter()) {
            prop_assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn determinant_matches_glam(m in arb_matrix()) {
        let ours = m.determinant();
        let theirs = to_glam(&m).determinant();
        prop_assert!((ours - theirs).abs() <= 1e-6 * theirs.abs().max(1.0));
    }
}

#[test]
fn perspective_matches_glam_rh() {
    let fov = 75f64.to_radians();
    let ours = perspective(fov, 16.0 / 9.0, 0.5, 500.0).to_array();
    let theirs = DMat4::perspective_rh(fov, 16.0 / 9.0, 0.5, 500.0).to_cols_array();
    for (x, y) in ours.iter().zip(theirs.iter()) {
        assert!((x - y).abs() < 1e-9, "{x} vs {y}");
    }
}
