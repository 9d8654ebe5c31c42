//! Dense row-major matrices over f64.
//!
//! All spatial quantities in the workspace are 2x1 column vectors; affine
//! transforms are 3x3 and act on homogeneous lifts.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use thiserror::Error;

use crate::constants::EPSILON;

/// Numeric failures raised by matrix operations.
#[derive(Debug, Error, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a vector with norm below {EPSILON:e}")]
    ZeroVector,
}

/// A dense rows-by-cols matrix of f64 values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// A rows-by-cols matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The n-by-n identity.
    pub fn eye(n: usize) -> Self {
        let mut out = Self::zeros(n, n);
        for i in 0..n {
            out[(i, i)] = 1.0;
        }
        out
    }

    /// Build from a row-major data slice. Panics if the length does not match.
    pub fn from_rows(rows: usize, cols: usize, data: &[f64]) -> Self {
        assert_eq!(data.len(), rows * cols, "data length must match dimensions");
        Self {
            rows,
            cols,
            data: data.to_vec(),
        }
    }

    /// A 2x1 column vector.
    pub fn vector2(x: f64, y: f64) -> Self {
        Self::from_rows(2, 1, &[x, y])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when this is a 2x1 column vector with finite entries.
    pub fn is_vector2(&self) -> bool {
        self.rows == 2 && self.cols == 1 && self.data.iter().all(|v| v.is_finite())
    }

    /// First component of a column vector.
    pub fn x(&self) -> f64 {
        assert_eq!(self.cols, 1, "x() expects a column vector");
        self[(0, 0)]
    }

    /// Second component of a column vector.
    pub fn y(&self) -> f64 {
        assert_eq!(self.cols, 1, "y() expects a column vector");
        self[(1, 0)]
    }

    /// Matrix transpose.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out[(c, r)] = self[(r, c)];
            }
        }
        out
    }

    /// Sum of the diagonal. Panics on non-square matrices.
    pub fn trace(&self) -> f64 {
        assert_eq!(self.rows, self.cols, "trace expects a square matrix");
        (0..self.rows).map(|i| self[(i, i)]).sum()
    }

    /// The canonical 2D rotation by `theta` radians, embedded as a 3x3 affine
    /// transform with no translation part.
    pub fn rotate2d(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::from_rows(3, 3, &[cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0])
    }

    /// A 3x3 affine translation by the 2x1 vector `offset`.
    pub fn translate2d(offset: &Matrix) -> Self {
        assert!(offset.rows == 2 && offset.cols == 1, "offset must be 2x1");
        Self::from_rows(
            3,
            3,
            &[1.0, 0.0, offset.x(), 0.0, 1.0, offset.y(), 0.0, 0.0, 1.0],
        )
    }

    /// Lift a 2x1 vector to homogeneous coordinates by appending a trailing 1.
    pub fn to_homogeneous(&self) -> Self {
        assert!(self.rows == 2 && self.cols == 1, "expects a 2x1 vector");
        Self::from_rows(3, 1, &[self.x(), self.y(), 1.0])
    }

    /// Drop the trailing homogeneous coordinate of a 3x1 vector.
    pub fn from_homogeneous(&self) -> Self {
        assert!(self.rows == 3 && self.cols == 1, "expects a 3x1 vector");
        Self::vector2(self[(0, 0)], self[(1, 0)])
    }

    /// The p-norm over all entries.
    pub fn norm_p(&self, p: f64) -> f64 {
        self.data
            .iter()
            .map(|v| v.abs().powf(p))
            .sum::<f64>()
            .powf(1.0 / p)
    }

    /// The Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Unit vector in the direction of `self`.
    pub fn normalized(&self) -> Result<Self, MathError> {
        let norm = self.norm();
        if norm < EPSILON {
            return Err(MathError::ZeroVector);
        }
        Ok(self * (1.0 / norm))
    }

    /// Entry-wise approximate equality under `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        assert_eq!((self.rows, self.cols), (rhs.rows, rhs.cols));
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Matrix) -> Matrix {
        &self + &rhs
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        assert_eq!((self.rows, self.cols), (rhs.rows, rhs.cols));
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Matrix) -> Matrix {
        &self - &rhs
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self * -1.0
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.cols, rhs.rows, "inner dimensions must agree");
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for r in 0..self.rows {
            for c in 0..rhs.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self[(r, k)] * rhs[(k, c)];
                }
                out[(r, c)] = acc;
            }
        }
        out
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * scalar).collect(),
        }
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        &self * scalar
    }
}

/// Rotate a 2x1 vector by `theta` radians, going through the homogeneous lift.
pub fn rotate2(vector: &Matrix, theta: f64) -> Matrix {
    (&Matrix::rotate2d(theta) * &vector.to_homogeneous()).from_homogeneous()
}
