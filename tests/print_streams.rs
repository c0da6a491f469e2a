#![allow(non_snake_case)]

use pdipm::{algebra::*, io::ConfigurablePrintTarget, solver::*};
use std::io::{Read, Seek, SeekFrom};
use std::sync::{Arc, Mutex};

#[allow(clippy::type_complexity)]
fn print_streams_data() -> (
    Matrix<f64>,
    Vec<f64>,
    Matrix<f64>,
    Vec<f64>,
    Matrix<f64>,
    Vec<f64>,
) {
    let P = Matrix::from(&[[4., 1.], [1., 2.]]);
    let q = vec![1., 1.];
    let G = Matrix::from(&[[-1., 0.], [0., -1.], [1., 0.], [0., 1.]]);
    let h = vec![0., 0., 0.7, 0.7];
    let A = Matrix::from(&[[1., 1.]]);
    let b = vec![1.];
    (P, q, G, h, A, b)
}

fn verbose_solver() -> QPSolver<f64> {
    let settings = DefaultSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();
    QPSolver::new(settings)
}

fn solve(solver: &mut QPSolver<f64>) -> SolverStatus {
    let (P, q, G, h, A, b) = print_streams_data();
    let mut x = [0., 0.];
    solver.solve(&mut x, &P, &q, 0., &G, &h, &A, &b).unwrap()
}

fn assert_full_log(out: &str) {
    assert!(out.contains("pdipm v"));
    assert!(out.contains("iter"));
    assert!(out.contains("Terminated with status = Solved"));
}

#[test]
fn test_print_to_buffer() {
    let mut solver = verbose_solver();
    solver.print_to_buffer();
    assert_eq!(solve(&mut solver), SolverStatus::Solved);

    let out = solver.get_print_buffer().unwrap();
    assert_full_log(&out);
}

#[test]
fn test_print_to_file() {
    let mut file = tempfile::tempfile().unwrap();

    let mut solver = verbose_solver();
    solver.print_to_file(file.try_clone().unwrap());
    solve(&mut solver);

    let mut out = String::new();
    file.seek(SeekFrom::Start(0)).unwrap();
    file.read_to_string(&mut out).unwrap();
    assert_full_log(&out);
}

// a cloneable in-memory writer for stream tests
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_print_to_stream() {
    let stream = SharedBuffer::default();

    let mut solver = verbose_solver();
    solver.print_to_stream(Box::new(stream.clone()));
    solve(&mut solver);

    let bytes = stream.0.lock().unwrap().clone();
    let out = String::from_utf8(bytes).unwrap();
    assert_full_log(&out);
}

#[test]
fn test_print_to_sink() {
    let mut solver = verbose_solver();
    solver.print_to_sink();
    assert_eq!(solve(&mut solver), SolverStatus::Solved);

    // only a buffer target can be read back
    assert!(solver.get_print_buffer().is_err());
}

#[test]
fn test_print_quiet() {
    let mut solver = QPSolver::new(DefaultSettings::default());
    solver.print_to_buffer();
    assert_eq!(solve(&mut solver), SolverStatus::Solved);
    assert!(solver.get_print_buffer().unwrap().is_empty());
}

#[test]
fn test_print_timers() {
    let mut solver = verbose_solver();
    solver.print_to_buffer();
    solve(&mut solver);

    // start from an empty buffer
    solver.print_to_buffer();
    solver.print_timers().unwrap();
    let out = solver.get_print_buffer().unwrap();
    assert!(out.contains("solve"));
    assert!(out.contains("kkt update"));
}
