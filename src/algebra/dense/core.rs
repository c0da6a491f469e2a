use crate::algebra::{Adjoint, FloatT, Matrix, MatrixShape, ShapedMatrix, VectorMath};
use std::ops::{Index, IndexMut};

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        mat.set_identity();
        mat
    }

    pub fn set_identity(&mut self) {
        assert!(self.m == self.n);
        self.data.set(T::zero());
        for i in 0..self.n {
            self[(i, i)] = T::one();
        }
    }

    /// Make a matrix from column major data
    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    pub fn copy_from(&mut self, src: &Matrix<T>) -> &mut Self {
        assert_eq!(self.size(), src.size());
        self.data.copy_from_slice(&src.data);
        self
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// Copy `src` into the block with top left corner at `(row, col)`
    pub fn set_block(&mut self, row: usize, col: usize, src: &Matrix<T>) {
        assert!(row + src.m <= self.m && col + src.n <= self.n);
        for j in 0..src.n {
            let m = self.m;
            let dst = &mut self.data[(col + j) * m + row..(col + j) * m + row + src.m];
            dst.copy_from(src.col_slice(j));
        }
    }

    /// Copy the transpose of `src` into the block with top left corner at `(row, col)`
    pub fn set_block_t(&mut self, row: usize, col: usize, src: &Matrix<T>) {
        assert!(row + src.n <= self.m && col + src.m <= self.n);
        for j in 0..src.n {
            for i in 0..src.m {
                self[(row + j, col + i)] = src[(i, j)];
            }
        }
    }

    /// `true` if the matrix is equal to its transpose within `tol`
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        for c in 0..self.n {
            for r in (c + 1)..self.m {
                if T::abs(self[(r, c)] - self[(c, r)]) > tol {
                    return false;
                }
            }
        }
        true
    }
}

// make a matrix from a row major array of arrays, i.e.
// written out the way it reads on the page
impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut mat = Matrix::zeros((R, C));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                mat[(i, j)] = v;
            }
        }
        mat
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        debug_assert!(idx.0 < self.m && idx.1 < self.n);
        &self.data[idx.0 + self.m * idx.1]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        debug_assert!(idx.0 < self.m && idx.1 < self.n);
        &mut self.data[idx.0 + self.m * idx.1]
    }
}

impl<T> Index<(usize, usize)> for Adjoint<'_, Matrix<T>> {
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        //reverse the indices
        &self.src[(idx.1, idx.0)]
    }
}

impl<T> ShapedMatrix for Matrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.m {
            write!(f, "[ ")?;
            for j in 0..self.n {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}
