//! Solver for systems of linear equations on the field with two elements.

use std::ops::BitXorAssign;

use crate::bit_vector::BitVector;

/// An equation on **F**₂, i.e., an XOR of variables equated to a constant.
///
/// The variable set is kept as one coefficient bit per variable. The constant
/// is a full 64-bit word whose bits are XORed through independently, so each
/// bit position behaves as a parallel equation over the same variables.
///
/// # Examples
///
/// ```
/// use zfast::Modulo2Equation;
///
/// let eq = Modulo2Equation::new(2, 3).add(2).add(0).add(1);
/// assert_eq!(eq.c(), 2);
/// assert_eq!(eq.variables(), vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Modulo2Equation {
    /// The coefficients, one bit per variable.
    bit_vector: BitVector,
    /// The constant term.
    c: u64,
    /// The smallest variable of the equation, or [`None`] if the equation has
    /// no variables. Kept current only while eliminating.
    first_var: Option<usize>,
}

impl Modulo2Equation {
    /// Creates an equation `0 = c` on `num_vars` variables.
    ///
    /// # Arguments
    ///
    ///  - `c`: Constant term.
    ///  - `num_vars`: Number of variables of the system the equation lives in.
    pub fn new(c: u64, num_vars: usize) -> Self {
        Self {
            bit_vector: BitVector::from_bit(false, num_vars),
            c,
            first_var: None,
        }
    }

    /// Adds a variable to the equation.
    ///
    /// # Arguments
    ///
    ///  - `variable`: Variable index, less than `num_vars`.
    ///
    /// # Panics
    ///
    /// It will panic if `variable` is out of range, and in debug builds if the
    /// variable is already present.
    #[must_use]
    pub fn add(mut self, variable: usize) -> Self {
        debug_assert!(
            self.bit_vector.get_bit(variable) != Some(true),
            "variable {variable} is already in the equation."
        );
        self.bit_vector.set_bit(variable, true).unwrap();
        self
    }

    /// Returns the variables of the equation in increasing order.
    pub fn variables(&self) -> Vec<usize> {
        self.bit_vector.unary_iter(0).collect()
    }

    /// Returns the constant term.
    pub const fn c(&self) -> u64 {
        self.c
    }

    /// XOR of the solution values of the variables of the equation.
    fn scalar_product(&self, solution: &[u64]) -> u64 {
        self.bit_vector
            .unary_iter(0)
            .fold(0, |acc, v| acc ^ solution[v])
    }

    fn update_first_var(&mut self) {
        self.first_var = self.bit_vector.unary_iter(0).next();
    }

    fn is_empty(&self) -> bool {
        self.bit_vector.words().iter().all(|&w| w == 0)
    }

    fn is_identity(&self) -> bool {
        self.c == 0 && self.is_empty()
    }

    fn is_unsolvable(&self) -> bool {
        self.c != 0 && self.is_empty()
    }
}

impl BitXorAssign<&Modulo2Equation> for Modulo2Equation {
    /// Adds `other` to `self`: the variable sets take their symmetric
    /// difference and the constants are XORed.
    ///
    /// # Examples
    ///
    /// ```
    /// use zfast::Modulo2Equation;
    ///
    /// let mut eq = Modulo2Equation::new(2, 11).add(1).add(4).add(9);
    /// eq ^= &Modulo2Equation::new(1, 11).add(1).add(4).add(10);
    /// assert_eq!(eq.variables(), vec![9, 10]);
    /// assert_eq!(eq.c(), 3);
    /// ```
    fn bitxor_assign(&mut self, other: &Modulo2Equation) {
        self.bit_vector ^= &other.bit_vector;
        self.c ^= other.c;
    }
}

/// A system of equations on **F**₂, solvable by full or lazy Gaussian
/// elimination.
///
/// # Examples
///
/// ```
/// use zfast::{Modulo2Equation, Modulo2System};
///
/// let mut system = Modulo2System::new(3);
/// system.add(Modulo2Equation::new(1, 3).add(0).add(1));
/// system.add(Modulo2Equation::new(0, 3).add(1).add(2));
///
/// let mut solution = vec![0; 3];
/// assert!(system.clone().lazy_gaussian_elimination(&mut solution));
/// assert!(system.check(&solution));
/// ```
#[derive(Clone, Debug)]
pub struct Modulo2System {
    num_vars: usize,
    equations: Vec<Modulo2Equation>,
}

impl Modulo2System {
    /// Creates an empty system on `num_vars` variables.
    ///
    /// # Arguments
    ///
    ///  - `num_vars`: Number of variables.
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            equations: vec![],
        }
    }

    /// Adds an equation to the system.
    ///
    /// # Arguments
    ///
    ///  - `equation`: Equation added, built on the same number of variables.
    ///
    /// # Panics
    ///
    /// It will panic if `equation` was built on a different number of
    /// variables.
    pub fn add(&mut self, equation: Modulo2Equation) {
        assert_eq!(
            equation.bit_vector.len(),
            self.num_vars,
            "the equation must be on {} variables.",
            self.num_vars
        );
        self.equations.push(equation);
    }

    /// Returns the number of variables.
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Checks if `solution` satisfies every equation of the system.
    ///
    /// # Arguments
    ///
    ///  - `solution`: Candidate solution, one value per variable.
    pub fn check(&self, solution: &[u64]) -> bool {
        assert_eq!(solution.len(), self.num_vars);
        self.equations
            .iter()
            .all(|eq| eq.scalar_product(solution) == eq.c)
    }

    /// Brings the system to echelon form, combining equations that share
    /// their smallest variable. Returns `false` if an equation `0 = c` with
    /// `c != 0` appears.
    fn echelon_form(&mut self) -> bool {
        let n = self.equations.len();
        for i in 0..n.saturating_sub(1) {
            for j in i + 1..n {
                if self.equations[i].first_var == self.equations[j].first_var {
                    let (head, tail) = self.equations.split_at_mut(j);
                    let eq_i = &mut head[i];
                    *eq_i ^= &tail[0];
                    if eq_i.is_unsolvable() {
                        return false;
                    }
                    if eq_i.is_identity() {
                        continue;
                    }
                    eq_i.update_first_var();
                }
                if pivot_rank(self.equations[i].first_var) > pivot_rank(self.equations[j].first_var)
                {
                    self.equations.swap(i, j);
                }
            }
        }
        true
    }

    /// Solves the system by Gaussian elimination, consuming it.
    ///
    /// Returns `true` and fills `solution` if the system is solvable; pivot
    /// variables are assigned by back-substitution and free variables are
    /// left at zero. Returns `false` if the system has no solution, in which
    /// case the content of `solution` is unspecified.
    ///
    /// # Arguments
    ///
    ///  - `solution`: Zero-filled slice with one value per variable.
    ///
    /// # Panics
    ///
    /// It will panic if `solution.len()` differs from the number of variables.
    pub fn gaussian_elimination(&mut self, solution: &mut [u64]) -> bool {
        assert_eq!(solution.len(), self.num_vars);
        for equation in &mut self.equations {
            equation.update_first_var();
        }
        if !self.echelon_form() {
            return false;
        }
        for equation in self.equations.iter().rev() {
            if equation.is_identity() {
                continue;
            }
            if equation.is_unsolvable() {
                return false;
            }
            let first = equation.first_var.unwrap();
            solution[first] = equation.c ^ equation.scalar_product(solution);
        }
        true
    }

    /// Solves the system like [`Self::gaussian_elimination`], but first peels
    /// off variables that appear in a single equation.
    ///
    /// Most equations of the expected workloads have three variables and most
    /// variables appear in few equations, so peeling leaves only a small
    /// dense residual for the full routine; the peeled equations are then
    /// satisfied by back-substitution in reverse peeling order.
    ///
    /// # Arguments
    ///
    ///  - `solution`: Zero-filled slice with one value per variable.
    ///
    /// # Panics
    ///
    /// It will panic if `solution.len()` differs from the number of variables.
    pub fn lazy_gaussian_elimination(&mut self, solution: &mut [u64]) -> bool {
        assert_eq!(solution.len(), self.num_vars);
        let num_equations = self.equations.len();

        // Presence counts and per-variable equation lists.
        let mut weight = vec![0usize; self.num_vars];
        let mut equations_of = vec![vec![]; self.num_vars];
        for (e, equation) in self.equations.iter().enumerate() {
            for v in equation.bit_vector.unary_iter(0) {
                weight[v] += 1;
                equations_of[v].push(e);
            }
        }

        let mut active = vec![true; num_equations];
        let mut queue = (0..self.num_vars)
            .filter(|&v| weight[v] == 1)
            .collect::<Vec<_>>();
        let mut peeled = vec![];

        while let Some(v) = queue.pop() {
            if weight[v] != 1 {
                continue; // stale entry
            }
            let e = equations_of[v]
                .iter()
                .copied()
                .find(|&e| active[e])
                .unwrap();
            active[e] = false;
            peeled.push((v, e));
            for u in self.equations[e].bit_vector.unary_iter(0) {
                weight[u] -= 1;
                if weight[u] == 1 {
                    queue.push(u);
                }
            }
        }

        // The dense residual goes through the full routine.
        let mut dense = Self {
            num_vars: self.num_vars,
            equations: (0..num_equations)
                .filter(|&e| active[e])
                .map(|e| self.equations[e].clone())
                .collect(),
        };
        if !dense.gaussian_elimination(solution) {
            return false;
        }

        // Each peeled equation is satisfied by its peeled variable, whose
        // value is still zero when we get to it.
        for &(v, e) in peeled.iter().rev() {
            let equation = &self.equations[e];
            solution[v] = equation.c ^ equation.scalar_product(solution);
        }
        true
    }
}

#[inline(always)]
fn pivot_rank(first_var: Option<usize>) -> usize {
    first_var.unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_builder() {
        let equation = Modulo2Equation::new(2, 3).add(2).add(0).add(1);
        assert_eq!(equation.c(), 2);
        assert_eq!(equation.variables(), vec![0, 1, 2]);
    }

    #[test]
    fn test_xor_assign() {
        let mut equation = Modulo2Equation::new(2, 11).add(1).add(4).add(9);
        equation ^= &Modulo2Equation::new(1, 11).add(1).add(4).add(10);
        assert_eq!(equation.variables(), vec![9, 10]);
    }

    fn solve_both_ways(system: &Modulo2System) -> Option<(Vec<u64>, Vec<u64>)> {
        let mut gaussian = vec![0; system.num_vars()];
        let mut lazy = vec![0; system.num_vars()];
        let solvable = system.clone().gaussian_elimination(&mut gaussian);
        assert_eq!(
            solvable,
            system.clone().lazy_gaussian_elimination(&mut lazy)
        );
        if !solvable {
            return None;
        }
        assert!(system.check(&gaussian));
        assert!(system.check(&lazy));
        Some((gaussian, lazy))
    }

    #[test]
    fn test_one() {
        let mut system = Modulo2System::new(2);
        system.add(Modulo2Equation::new(2, 2).add(0));
        assert!(solve_both_ways(&system).is_some());
    }

    #[test]
    fn test_impossible() {
        let mut system = Modulo2System::new(1);
        system.add(Modulo2Equation::new(2, 1).add(0));
        system.add(Modulo2Equation::new(1, 1).add(0));
        assert!(solve_both_ways(&system).is_none());
    }

    #[test]
    fn test_redundant() {
        let mut system = Modulo2System::new(1);
        system.add(Modulo2Equation::new(2, 1).add(0));
        system.add(Modulo2Equation::new(2, 1).add(0));
        assert!(solve_both_ways(&system).is_some());
    }

    #[test]
    fn test_small() {
        let mut system = Modulo2System::new(11);
        system.add(Modulo2Equation::new(0, 11).add(1).add(4).add(10));
        system.add(Modulo2Equation::new(2, 11).add(1).add(4).add(9));
        system.add(Modulo2Equation::new(0, 11).add(0).add(6).add(8));
        system.add(Modulo2Equation::new(1, 11).add(0).add(6).add(9));
        system.add(Modulo2Equation::new(2, 11).add(2).add(4).add(8));
        system.add(Modulo2Equation::new(0, 11).add(2).add(6).add(10));
        assert!(solve_both_ways(&system).is_some());
    }

    /// Builds a random system with three variables per equation whose
    /// constants are derived from a planted solution, so it is solvable by
    /// construction.
    fn gen_solvable_system(size: usize, seed: u64) -> Modulo2System {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let planted = (0..size).map(|_| rng.gen::<u64>()).collect::<Vec<_>>();
        let mut system = Modulo2System::new(size);
        for _ in 0..2 * size / 3 {
            let x = rng.gen_range(0..size / 3);
            let v = size / 3 + rng.gen_range(0..size / 3);
            let w = 2 * size / 3 + rng.gen_range(0..size / 3);
            let c = planted[x] ^ planted[v] ^ planted[w];
            system.add(Modulo2Equation::new(c, size).add(x).add(v).add(w));
        }
        system
    }

    #[test]
    fn test_random_solvable() {
        for (size, seed) in [(30, 1), (300, 2), (1000, 3)] {
            let system = gen_solvable_system(size, seed);
            assert!(solve_both_ways(&system).is_some());
        }
    }

    #[test]
    fn test_random_unsolvable() {
        // Repeating an equation with a flipped constant forces 0 = 1.
        let mut system = gen_solvable_system(300, 4);
        let mut conflicting = system.equations[0].clone();
        conflicting.c ^= 1;
        system.equations.push(conflicting);
        assert!(solve_both_ways(&system).is_none());
    }

    #[test]
    fn test_copy_independent() {
        let mut system = Modulo2System::new(2);
        system.add(Modulo2Equation::new(1, 2).add(0));
        let mut copy = system.clone();
        copy.add(Modulo2Equation::new(0, 2).add(0));
        assert_eq!(system.equations.len(), 1);
        assert_eq!(copy.equations.len(), 2);
        let mut solution = vec![0; 2];
        assert!(system.clone().gaussian_elimination(&mut solution));
        assert!(system.check(&solution));
    }
}
