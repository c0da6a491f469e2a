#![allow(non_snake_case)]

use pdipm::{algebra::*, solver::*};

#[allow(clippy::type_complexity)]
fn basic_qp_data() -> (
    Matrix<f64>,
    Vec<f64>,
    Matrix<f64>,
    Vec<f64>,
    Matrix<f64>,
    Vec<f64>,
) {
    // P = [4. 1;1 2]
    let P = Matrix::from(&[[4., 1.], [1., 2.]]);
    let q = vec![1., 1.];

    // 0 ⪯ x ⪯ 0.7, i.e. G = [-I; I]
    let G = Matrix::from(&[[-1., 0.], [0., -1.], [1., 0.], [0., 1.]]);
    let h = vec![0., 0., 0.7, 0.7];

    // x₁ + x₂ = 1
    let A = Matrix::from(&[[1., 1.]]);
    let b = vec![1.];

    (P, q, G, h, A, b)
}

#[test]
fn test_qp_feasible() {
    let (P, q, G, h, A, b) = basic_qp_data();

    let mut x = [0., 0.];
    let mut solver = QPSolver::new(DefaultSettings::default());
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();

    assert_eq!(status, SolverStatus::Solved);
    assert!(solver.is_converged());

    let refsol = [0.3, 0.7];
    assert!(x.dist(&refsol) <= 1e-6);
    assert_eq!(solver.solution.x, x);
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refobj = 1.88;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-6);

    // feasibility of the returned point
    let mut Gx = vec![0.; 4];
    G.gemv(&x, &mut Gx, 1., 0.);
    assert!(Gx.iter().zip(&h).all(|(g, h)| *g <= h + 1e-7));
    assert!(f64::abs(x[0] + x[1] - 1.) <= 1e-7);

    assert!(solver.solution.r_prim <= 1e-8);
    assert!(solver.solution.r_dual <= 1e-8);
    assert!(solver.solution.gap <= 1e-8);
    assert!(solver.solution.iterations > 0);
}

#[test]
fn test_qp_univariate() {
    // min (x-2)²  s.t.  x ≤ 1
    let P = Matrix::from(&[[2.]]);
    let q = [-4.];
    let G = Matrix::from(&[[1.]]);
    let h = [1.];
    let A = Matrix::zeros((0, 1));

    let mut x = [0f64];
    let mut solver = QPSolver::new(DefaultSettings::default());
    let status = solver.solve(&mut x, &P, &q, 4., &G, &h, &A, &[]).unwrap();

    assert_eq!(status, SolverStatus::Solved);
    assert!(solver.is_converged());
    assert!(f64::abs(x[0] - 1.) <= 1e-6);
    assert!(f64::abs(solver.solution.obj_val - 1.) <= 1e-6);
}

#[test]
fn test_qp_inactive_constraints() {
    // the unconstrained minimizer (0.5, -1) lies strictly inside the box
    let P = Matrix::from(&[[2., 0.], [0., 2.]]);
    let q = [-1., 2.];
    let G = Matrix::from(&[[1., 0.], [0., 1.], [-1., 0.], [0., -1.]]);
    let h = [3., 3., 3., 3.];
    let A = Matrix::zeros((0, 2));

    let mut x = [0f64, 0.];
    let mut solver = QPSolver::new(DefaultSettings::default());
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &[]).unwrap();

    assert_eq!(status, SolverStatus::Solved);
    assert!(x.dist(&[0.5, -1.]) <= 1e-6);
}

#[test]
fn test_qp_max_iter() {
    let (P, q, G, h, A, b) = basic_qp_data();

    let settings = DefaultSettingsBuilder::default()
        .max_iter(2)
        .build()
        .unwrap();

    let mut x = [0., 0.];
    let mut solver = QPSolver::new(settings);
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();

    assert_eq!(status, SolverStatus::MaxIterations);
    assert!(!solver.is_converged());
    assert_eq!(solver.solution.iterations, 2);

    // the last iterate is still reported
    assert_ne!(x, [0., 0.]);
    assert!(x.is_finite());
}

#[test]
fn test_qp_time_limit() {
    let (P, q, G, h, A, b) = basic_qp_data();

    let settings = DefaultSettingsBuilder::default()
        .time_limit(0.)
        .build()
        .unwrap();

    let mut x = [0., 0.];
    let mut solver = QPSolver::new(settings);
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();

    assert_eq!(status, SolverStatus::MaxTime);
    assert!(!solver.is_converged());
}

#[test]
fn test_qp_deterministic() {
    let (P, q, G, h, A, b) = basic_qp_data();

    let mut solver = QPSolver::new(DefaultSettings::default());

    let mut x1 = [0.1, -0.4];
    let status1 = solver.solve(&mut x1, &P, &q, 0., &G, &h, &A, &b).unwrap();
    let conv1 = solver.is_converged();
    let iter1 = solver.solution.iterations;

    // same solver object, same inputs
    let mut x2 = [0.1, -0.4];
    let status2 = solver.solve(&mut x2, &P, &q, 0., &G, &h, &A, &b).unwrap();

    assert_eq!(status1, status2);
    assert_eq!(conv1, solver.is_converged());
    assert_eq!(iter1, solver.solution.iterations);
    assert_eq!(x1[0].to_bits(), x2[0].to_bits());
    assert_eq!(x1[1].to_bits(), x2[1].to_bits());

    // a fresh solver gives the same answer
    let mut x3 = [0.1, -0.4];
    let mut solver = QPSolver::new(DefaultSettings::default());
    solver.solve(&mut x3, &P, &q, 0., &G, &h, &A, &b).unwrap();
    assert_eq!(x1, x3);
}

#[test]
fn test_qp_solver_reuse_across_sizes() {
    let (P, q, G, h, A, b) = basic_qp_data();
    let mut solver = QPSolver::new(DefaultSettings::default());

    let mut x = [0., 0.];
    solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();
    assert!(solver.is_converged());

    // now a three variable problem with the same solver
    let P = Matrix::<f64>::identity(3);
    let q = [0., 0., 0.];
    let G = Matrix::from(&[[-1., 0., 0.]]);
    let h = [-2.];
    let A = Matrix::zeros((0, 3));

    let mut x = [0., 0., 0.];
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &[]).unwrap();
    assert_eq!(status, SolverStatus::Solved);
    assert!(x.dist(&[2., 0., 0.]) <= 1e-6);
    assert_eq!(solver.solution.x.len(), 3);
}

#[test]
fn test_qp_infeasible_start() {
    // (5,-3) violates every bound and the equality
    let (P, q, G, h, A, b) = basic_qp_data();

    let mut x = [5., -3.];
    let mut solver = QPSolver::new(DefaultSettings::default());
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();

    assert_eq!(status, SolverStatus::Solved);
    assert!(solver.is_converged());
    assert!(x.dist(&[0.3, 0.7]) <= 1e-6);
}

#[test]
fn test_qp_small_margin() {
    // a tiny margin is still enough to start strictly inside
    let (P, q, G, h, A, b) = basic_qp_data();

    let settings = DefaultSettingsBuilder::default()
        .slack_margin(1e-6)
        .build()
        .unwrap();

    let mut x = [2., 2.];
    let mut solver = QPSolver::new(settings);
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();

    assert_eq!(status, SolverStatus::Solved);
    assert!(x.dist(&[0.3, 0.7]) <= 1e-6);
}

#[test]
fn test_qp_univariate_data_scaling() {
    // min k(x-2)²  s.t.  x ≤ 1, for objective scales across six decades
    let settings = DefaultSettings::<f64>::default();
    let G = Matrix::from(&[[1.]]);
    let h = [1.];
    let A = Matrix::zeros((0, 1));

    for k in [1., 10., 1e2, 1e3, 1e4, 1e5, 1e6] {
        let P = Matrix::from(&[[2. * k]]);
        let q = [-4. * k];

        let mut x = [0f64];
        let mut solver = QPSolver::new(settings.clone());
        let status = solver.solve(&mut x, &P, &q, 4. * k, &G, &h, &A, &[]).unwrap();

        assert_eq!(status, SolverStatus::Solved, "k = {}", k);
        assert!(solver.is_converged());
        assert!(x[0] <= h[0] + 1e-8, "k = {}, x = {}", k, x[0]);
        assert!(f64::abs(x[0] - 1.) <= 1e-6, "k = {}, x = {}", k, x[0]);
        assert!(solver.solution.r_dual <= settings.tol_feas);
        assert!(solver.solution.r_prim <= settings.tol_feas);
    }
}

#[test]
fn test_qp_box_data_scaling() {
    let (P0, q0, G, h, A, b) = basic_qp_data();
    let settings = DefaultSettings::<f64>::default();

    for k in [1., 10., 1e2, 1e3, 1e4, 1e5, 1e6] {
        let mut P = P0.clone();
        P.scale(k);
        let mut q = q0.clone();
        q.scale(k);

        let mut x = [0f64, 0.];
        let mut solver = QPSolver::new(settings.clone());
        let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap();

        assert_eq!(status, SolverStatus::Solved, "k = {}", k);
        assert!(x.dist(&[0.3, 0.7]) <= 1e-6, "k = {}, x = {:?}", k, x);

        let mut Gx = vec![0.; 4];
        G.gemv(&x, &mut Gx, 1., 0.);
        assert!(Gx.iter().zip(&h).all(|(g, h)| *g <= h + 1e-8));
        assert!(solver.solution.r_dual <= settings.tol_feas);
        assert!(f64::abs(solver.solution.obj_val - 1.88 * k) <= 1e-6 * k);
    }
}
