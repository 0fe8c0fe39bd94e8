use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Utilities/Mathematical_Routines.html#Matrix4x4

/// A row-major 4x4 matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4 {
    /// Raw values in row-major order.
    pub m: [[f32; 4]; 4],
}

impl Matrix4x4 {
    /// Creates a new `Matrix4x4`.
    pub fn new(m: [[f32; 4]; 4]) -> Self {
        let ret = Self { m };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Creates a new identity `Matrix4x4`.
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a new `Matrix4x4` filled with zeros.
    pub fn zeros() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    /// Checks if this `Matrix4x4` contains NaNs.
    pub fn has_nans(&self) -> bool {
        // NaNs are the rare special case so no need to early out
        self.m
            .iter()
            .flat_map(|row| row.iter().map(|v| v.is_nan()))
            .any(|p| p)
    }

    /// Returns the transpose of this `Matrix4x4`.
    pub fn transposed(&self) -> Self {
        Self {
            m: [
                [self.m[0][0], self.m[1][0], self.m[2][0], self.m[3][0]],
                [self.m[0][1], self.m[1][1], self.m[2][1], self.m[3][1]],
                [self.m[0][2], self.m[1][2], self.m[2][2], self.m[3][2]],
                [self.m[0][3], self.m[1][3], self.m[2][3], self.m[3][3]],
            ],
        }
    }

    /// Returns the inverse of this `Matrix4x4`.
    ///
    /// Panics if the matrix is singular; an uninvertible placement is a
    /// precondition violation on the caller's side.
    pub fn inverted(&self) -> Self {
        // Gauss-Jordan elimination with full pivoting, done in place by
        // augmenting with the identity and tracking the row/column
        // permutations so the result can be unshuffled at the end

        let mut mi = self.m;
        // Helpers to keep track of the pivots we've done
        let mut indxc = [0; 4];
        let mut indxr = [0; 4];
        let mut ipiv = [0; 4];

        // Loop over columns, reducing each one in turn
        for col in 0..4 {
            let mut icol = 0;
            let mut irow = 0;
            let mut big = 0.0;

            // Search for a pivot, i.e.
            // the largest value in the matrix that is not already part of a pivot
            for row in 0..4 {
                if ipiv[row] != 1 {
                    for (rcol, &piv) in ipiv.iter().enumerate() {
                        if (piv == 0) && (mi[row][rcol].abs() > big) {
                            big = mi[row][rcol].abs();
                            irow = row;
                            icol = rcol;
                        }
                    }
                }
            }
            assert!(big != 0.0, "Can't invert, singular matrix");

            // Mark the pivot as used
            ipiv[icol] += 1;

            // Swap rows so that the pivot lands on the correct row
            if irow != icol {
                // This check is unfortunate but we need split_at_mut
                if irow > icol {
                    let (top, bottom) = mi.split_at_mut(irow);
                    std::mem::swap(&mut top[icol], &mut bottom[0]);
                } else {
                    let (top, bottom) = mi.split_at_mut(icol);
                    std::mem::swap(&mut top[irow], &mut bottom[0]);
                }
            }

            // The pivot still might not be on the diagonal, but we don't care yet
            // so we just take note of where it was
            indxr[col] = irow;
            indxc[col] = icol;

            assert!(mi[icol][icol] != 0.0, "Can't invert, singular matrix");

            // Make the diagonal a 1
            let pivinv = 1.0 / mi[icol][icol];
            mi[icol][icol] = 1.0;
            // And update the corresponding row accordingly
            for l in 0..4 {
                mi[icol][l] *= pivinv;
            }

            // Zero the column on other rows
            for row in 0..4 {
                if row != icol {
                    let factor = mi[row][icol];
                    mi[row][icol] = 0.0;
                    for rcol in 0..4 {
                        mi[row][rcol] -= factor * mi[icol][rcol];
                    }
                }
            }
        }

        // The inverse might still be jumbled since we didn't pivot columns in
        // memory so we'll finish the pivot here
        for col in (0..4).rev() {
            if indxr[col] != indxc[col] {
                let (a, b) = {
                    let a = indxr[col];
                    let b = indxc[col];
                    if a < b {
                        (a, b)
                    } else {
                        (b, a)
                    }
                };
                for row in &mut mi {
                    let (front, back) = row.split_at_mut(b);
                    std::mem::swap(&mut front[a], &mut back[0]);
                }
            }
        }
        Matrix4x4::new(mi)
    }
}

// By ref is about twice as fast as by value so let's just endure the syntax
impl<'a, 'b> Mul<&'b Matrix4x4> for &'a Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, other: &'b Matrix4x4) -> Matrix4x4 {
        let mut ret = Matrix4x4::zeros();
        for row in 0..4 {
            for col in 0..4 {
                ret.m[row][col] = self.m[row][0] * other.m[0][col]
                    + self.m[row][1] * other.m[1][col]
                    + self.m[row][2] * other.m[2][col]
                    + self.m[row][3] * other.m[3][col];
            }
        }
        debug_assert!(!ret.has_nans());
        ret
    }
}

impl AbsDiffEq for Matrix4x4 {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        for row in 0..4 {
            for col in 0..4 {
                if !self.m[row][col].abs_diff_eq(&other.m[row][col], epsilon) {
                    return false;
                }
            }
        }
        true
    }
}

impl RelativeEq for Matrix4x4 {
    fn default_max_relative() -> Self::Epsilon {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        for row in 0..4 {
            for col in 0..4 {
                if !self.m[row][col].relative_eq(&other.m[row][col], epsilon, max_relative) {
                    return false;
                }
            }
        }
        true
    }
}
