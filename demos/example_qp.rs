#![allow(non_snake_case)]
use pdipm::algebra::*;
use pdipm::solver::*;

fn main() {
    // QP Example

    // let P = Matrix::identity(2);    // For P = I
    // let P = Matrix::zeros((2,2));   // For P = 0

    let P = Matrix::from(&[
        [6., 0.], //
        [0., 4.], //
    ]);

    let q = vec![-1., -4.];

    // x₁ - 2x₂ = 0
    let A = Matrix::from(&[[1., -2.]]);
    let b = vec![0.];

    // -1 ≤ x ≤ 1
    let G = Matrix::from(&[
        [1., 0.],  //
        [0., 1.],  //
        [-1., 0.], //
        [0., -1.], //
    ]);
    let h = vec![1., 1., 1., 1.];

    let settings = DefaultSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();

    let mut solver = QPSolver::new(settings);

    let mut x = vec![0., 0.];
    let status = solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b);

    match status {
        Ok(status) => println!("Status = {}, solution = {:?}", status, x),
        Err(e) => println!("Solver failed: {}", e),
    }
}
