// src/combinatorics/lagrange.rs

use crate::combinatorics::table::CombinatoricsTable;
use crate::error::{MathError, MathResult};

impl CombinatoricsTable {
    /// Evaluates at `x` the unique polynomial of degree below `values.len()`
    /// that passes through `(i, values[i])` for `i = 0, 1, ...`, all modulo
    /// the table modulus.
    ///
    /// With consecutive sample points the Lagrange basis denominators are
    /// plain factorials, so one prefix/suffix product sweep over
    /// `(x - i)` gives an O(len) evaluation instead of the generic
    /// O(len^2). Since a polynomial with coefficients mod `m` satisfies
    /// `f(x) = f(x mod m)`, `x` is reduced first and answered by direct
    /// lookup whenever it lands on a sample point.
    ///
    /// # Returns
    /// The value mod the table modulus, or `MathError::InvalidArgument` for
    /// an empty sample slice.
    pub fn lagrange_interpolation(&mut self, values: &[u64], x: u64) -> MathResult<u64> {
        if values.is_empty() {
            return Err(MathError::InvalidArgument(
                "lagrange_interpolation needs at least one sample point".to_string(),
            ));
        }
        let m = self.modulus();
        let x = x % m;
        let len = values.len();
        if x < len as u64 {
            return Ok(values[x as usize] % m);
        }
        self.ensure(len - 1);
        // prefix[i] = prod_{j < i} (x - j), suffix[i] = prod_{j > i} (x - j)
        let mut prefix = vec![1u64; len + 1];
        for i in 0..len {
            prefix[i + 1] = self.mul(prefix[i], self.sub(x, i as u64 % m));
        }
        let mut suffix = vec![1u64; len + 1];
        for i in (0..len).rev() {
            suffix[i] = self.mul(suffix[i + 1], self.sub(x, i as u64 % m));
        }
        let mut result = 0u64;
        for i in 0..len {
            let basis = self.mul(prefix[i], suffix[i + 1]);
            let weights = self.mul(self.invfact[i], self.invfact[len - 1 - i]);
            let term = self.mul(values[i] % m, self.mul(basis, weights));
            result = if (len - 1 - i) % 2 == 0 {
                self.add(result, term)
            } else {
                self.sub(result, term)
            };
        }
        Ok(result)
    }
}
