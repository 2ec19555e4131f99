use crate::StrError;
use russell_lab::{mat_eigen_sym, Matrix, Vector};
use russell_tensor::Tensor2;

/// Computes the determinant of a 3×3 matrix
pub fn mat3_det(a: &Matrix) -> f64 {
    assert_eq!(a.dims(), (3, 3));
    a.get(0, 0) * (a.get(1, 1) * a.get(2, 2) - a.get(1, 2) * a.get(2, 1))
        - a.get(0, 1) * (a.get(1, 0) * a.get(2, 2) - a.get(1, 2) * a.get(2, 0))
        + a.get(0, 2) * (a.get(1, 0) * a.get(2, 1) - a.get(1, 1) * a.get(2, 0))
}

/// Computes the inverse of a 3×3 matrix and returns its determinant
///
/// The inverse is assembled from the cofactors; F is always 3×3 here, so no
/// general solver is needed.
pub fn mat3_inverse(ai: &mut Matrix, a: &Matrix) -> Result<f64, StrError> {
    assert_eq!(a.dims(), (3, 3));
    assert_eq!(ai.dims(), (3, 3));
    let det = mat3_det(a);
    if f64::abs(det) < f64::EPSILON {
        return Err("cannot invert 3x3 matrix because the determinant is zero");
    }
    ai.set(0, 0, (a.get(1, 1) * a.get(2, 2) - a.get(1, 2) * a.get(2, 1)) / det);
    ai.set(0, 1, (a.get(0, 2) * a.get(2, 1) - a.get(0, 1) * a.get(2, 2)) / det);
    ai.set(0, 2, (a.get(0, 1) * a.get(1, 2) - a.get(0, 2) * a.get(1, 1)) / det);
    ai.set(1, 0, (a.get(1, 2) * a.get(2, 0) - a.get(1, 0) * a.get(2, 2)) / det);
    ai.set(1, 1, (a.get(0, 0) * a.get(2, 2) - a.get(0, 2) * a.get(2, 0)) / det);
    ai.set(1, 2, (a.get(0, 2) * a.get(1, 0) - a.get(0, 0) * a.get(1, 2)) / det);
    ai.set(2, 0, (a.get(1, 0) * a.get(2, 1) - a.get(1, 1) * a.get(2, 0)) / det);
    ai.set(2, 1, (a.get(0, 1) * a.get(2, 0) - a.get(0, 0) * a.get(2, 1)) / det);
    ai.set(2, 2, (a.get(0, 0) * a.get(1, 1) - a.get(0, 1) * a.get(1, 0)) / det);
    Ok(det)
}

/// Computes the 3×3 matrix multiplication c = a · b
pub fn mat3_mul(c: &mut Matrix, a: &Matrix, b: &Matrix) {
    for i in 0..3 {
        for j in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += a.get(i, k) * b.get(k, j);
            }
            c.set(i, j, sum);
        }
    }
}

/// Computes c = a · b · aᵀ with 3×3 matrices
pub fn mat3_push(c: &mut Matrix, a: &Matrix, b: &Matrix) {
    for i in 0..3 {
        for j in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                for l in 0..3 {
                    sum += a.get(i, k) * b.get(k, l) * a.get(j, l);
                }
            }
            c.set(i, j, sum);
        }
    }
}

/// Copies a symmetric Tensor2 into a 3×3 matrix
pub(crate) fn tensor2_to_mat3(m: &mut Matrix, t: &Tensor2) {
    for i in 0..3 {
        for j in 0..3 {
            m.set(i, j, t.get(i, j));
        }
    }
}

/// Copies a symmetric 3×3 matrix into a (3D symmetric) Tensor2
pub(crate) fn mat3_to_tensor2_sym(t: &mut Tensor2, m: &Matrix) {
    t.clear();
    t.sym_set(0, 0, m.get(0, 0));
    t.sym_set(1, 1, m.get(1, 1));
    t.sym_set(2, 2, m.get(2, 2));
    t.sym_set(0, 1, 0.5 * (m.get(0, 1) + m.get(1, 0)));
    t.sym_set(1, 2, 0.5 * (m.get(1, 2) + m.get(2, 1)));
    t.sym_set(0, 2, 0.5 * (m.get(0, 2) + m.get(2, 0)));
}

/// Computes the Green-Lagrange strain E = (FᵀF - I)/2
pub fn green_lagrange_strain(ee: &mut Tensor2, ff: &Matrix) {
    ee.clear();
    for i in 0..3 {
        for j in i..3 {
            let mut cij = 0.0;
            for k in 0..3 {
                cij += ff.get(k, i) * ff.get(k, j);
            }
            let delta = if i == j { 1.0 } else { 0.0 };
            ee.sym_set(i, j, (cij - delta) / 2.0);
        }
    }
}

/// Computes the first Piola-Kirchhoff stress P = F · S given the second Piola-Kirchhoff stress
pub fn first_piola_from_pk2(pp: &mut Matrix, ff: &Matrix, ss: &Tensor2) {
    for i in 0..3 {
        for j in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += ff.get(i, k) * ss.get(k, j);
            }
            pp.set(i, j, sum);
        }
    }
}

/// Computes the Kirchhoff stress τ = F · S · Fᵀ given the second Piola-Kirchhoff stress
pub fn kirchhoff_from_pk2(tau: &mut Tensor2, ff: &Matrix, ss: &Tensor2) {
    tau.clear();
    for i in 0..3 {
        for j in i..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                for l in 0..3 {
                    sum += ff.get(i, k) * ss.get(k, l) * ff.get(j, l);
                }
            }
            tau.sym_set(i, j, sum);
        }
    }
}

/// Computes the Cauchy stress σ = τ / J given the second Piola-Kirchhoff stress
pub fn cauchy_from_pk2(sigma: &mut Tensor2, ff: &Matrix, ss: &Tensor2) -> Result<(), StrError> {
    let jj = mat3_det(ff);
    if jj <= 0.0 {
        return Err("deformation gradient determinant must be positive");
    }
    kirchhoff_from_pk2(sigma, ff, ss);
    let vec = sigma.vector_mut();
    for i in 0..vec.dim() {
        vec[i] /= jj;
    }
    Ok(())
}

/// Computes the eigenvalues and eigenvectors of a symmetric 3×3 matrix
///
/// The eigenvectors are stored in the columns of `q` (LAPACK-backed).
pub(crate) fn sym_mat3_eigen(l: &mut Vector, q: &mut Matrix, a: &Matrix) -> Result<(), StrError> {
    assert_eq!(a.dims(), (3, 3));
    for i in 0..3 {
        for j in 0..3 {
            q.set(i, j, a.get(i, j));
        }
    }
    mat_eigen_sym(l, q)?;
    Ok(())
}

/// Reconstructs a = Q · diag(l) · Qᵀ from an eigen-decomposition
pub(crate) fn sym_mat3_reconstruct(a: &mut Matrix, l: &[f64], q: &Matrix) {
    for i in 0..3 {
        for j in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += q.get(i, k) * l[k] * q.get(j, k);
            }
            a.set(i, j, sum);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use russell_lab::{approx_eq, mat_approx_eq, Matrix, Vector};
    use russell_tensor::{Mandel, Tensor2};

    #[test]
    fn det_and_inverse_work() {
        #[rustfmt::skip]
        let a = Matrix::from(&[
            [1.0, 2.0, 0.0],
            [0.0, 1.0, 3.0],
            [4.0, 0.0, 1.0],
        ]);
        let det = mat3_det(&a);
        approx_eq(det, 25.0, 1e-14);
        let mut ai = Matrix::new(3, 3);
        let det_again = mat3_inverse(&mut ai, &a).unwrap();
        assert_eq!(det, det_again);
        // a⁻¹ · a = I
        let mut ident = Matrix::new(3, 3);
        mat3_mul(&mut ident, &ai, &a);
        for i in 0..3 {
            for j in 0..3 {
                approx_eq(ident.get(i, j), if i == j { 1.0 } else { 0.0 }, 1e-14);
            }
        }
    }

    #[test]
    fn inverse_captures_singular_matrix() {
        let a = Matrix::new(3, 3);
        let mut ai = Matrix::new(3, 3);
        assert_eq!(
            mat3_inverse(&mut ai, &a).err(),
            Some("cannot invert 3x3 matrix because the determinant is zero")
        );
    }

    #[test]
    fn green_lagrange_strain_works() {
        // uniaxial stretch λ along x
        let stretch = 1.2;
        let mut ff = Matrix::new(3, 3);
        ff.set(0, 0, stretch);
        ff.set(1, 1, 1.0);
        ff.set(2, 2, 1.0);
        let mut ee = Tensor2::new(Mandel::Symmetric);
        green_lagrange_strain(&mut ee, &ff);
        approx_eq(ee.get(0, 0), (stretch * stretch - 1.0) / 2.0, 1e-15);
        assert_eq!(ee.get(1, 1), 0.0);
        assert_eq!(ee.get(0, 1), 0.0);
    }

    #[test]
    fn stress_conversions_work() {
        // with F = I all stress measures coincide
        let mut ff = Matrix::new(3, 3);
        for i in 0..3 {
            ff.set(i, i, 1.0);
        }
        let mut ss = Tensor2::new(Mandel::Symmetric);
        ss.sym_set(0, 0, 10.0);
        ss.sym_set(1, 1, -5.0);
        ss.sym_set(0, 1, 2.0);
        let mut pp = Matrix::new(3, 3);
        first_piola_from_pk2(&mut pp, &ff, &ss);
        let mut tau = Tensor2::new(Mandel::Symmetric);
        kirchhoff_from_pk2(&mut tau, &ff, &ss);
        let mut sigma = Tensor2::new(Mandel::Symmetric);
        cauchy_from_pk2(&mut sigma, &ff, &ss).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                approx_eq(pp.get(i, j), ss.get(i, j), 1e-15);
                approx_eq(tau.get(i, j), ss.get(i, j), 1e-15);
                approx_eq(sigma.get(i, j), ss.get(i, j), 1e-15);
            }
        }
        // negative volume change is an error
        ff.set(0, 0, -1.0);
        assert_eq!(
            cauchy_from_pk2(&mut sigma, &ff, &ss).err(),
            Some("deformation gradient determinant must be positive")
        );
    }

    #[test]
    fn eigen_and_reconstruct_work() {
        #[rustfmt::skip]
        let a = Matrix::from(&[
            [2.0, 1.0, 0.0],
            [1.0, 2.0, 0.0],
            [0.0, 0.0, 3.0],
        ]);
        let mut l = Vector::new(3);
        let mut q = Matrix::new(3, 3);
        sym_mat3_eigen(&mut l, &mut q, &a).unwrap();
        let mut sorted = vec![l[0], l[1], l[2]];
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        approx_eq(sorted[0], 1.0, 1e-13);
        approx_eq(sorted[1], 3.0, 1e-13);
        approx_eq(sorted[2], 3.0, 1e-13);
        let mut back = Matrix::new(3, 3);
        sym_mat3_reconstruct(&mut back, l.as_data(), &q);
        mat_approx_eq(&back, &a, 1e-13);
    }

    #[test]
    fn mat3_push_works() {
        #[rustfmt::skip]
        let a = Matrix::from(&[
            [1.0, 0.5, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        #[rustfmt::skip]
        let b = Matrix::from(&[
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 2.0],
        ]);
        let mut c = Matrix::new(3, 3);
        mat3_push(&mut c, &a, &b);
        // a · (2 I) · aᵀ = 2 a aᵀ
        approx_eq(c.get(0, 0), 2.0 * (1.0 + 0.25), 1e-15);
        approx_eq(c.get(0, 1), 2.0 * 0.5, 1e-15);
        approx_eq(c.get(1, 1), 2.0, 1e-15);
    }
}
