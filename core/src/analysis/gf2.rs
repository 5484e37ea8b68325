use core::ops::{BitXor, BitXorAssign, Not};

const WORDS: usize = 4;

/// Affine form over GF(2) in up to 255 unknowns, bit 255 holds the constant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Affine([u64; WORDS]);

impl Affine {
    pub(crate) const MAX_VARS: usize = 255;
    const CONSTANT: usize = Self::MAX_VARS;

    pub(crate) fn var(index: usize) -> Self {
        debug_assert!(index < Self::MAX_VARS);
        let mut form = Self::default();
        form.toggle_bit(index);
        form
    }

    pub(crate) fn constant(value: bool) -> Self {
        let mut form = Self::default();
        if value {
            form.toggle_bit(Self::CONSTANT);
        }
        form
    }

    pub(crate) fn bit(&self, index: usize) -> bool {
        (self.0[index / 64] >> (index % 64)) & 1 == 1
    }

    pub(crate) fn constant_term(&self) -> bool {
        self.bit(Self::CONSTANT)
    }

    fn toggle_bit(&mut self, index: usize) {
        self.0[index / 64] ^= 1 << (index % 64);
    }

    /// Value of the form once each unknown `i` is replaced by `assignment.bit(i)`.
    pub(crate) fn eval(&self, assignment: &Self) -> bool {
        let parity = self
            .0
            .iter()
            .zip(assignment.0.iter())
            .map(|(form, values)| (form & values).count_ones())
            .sum::<u32>()
            & 1
            == 1;
        parity ^ self.constant_term()
    }
}

impl BitXorAssign for Affine {
    fn bitxor_assign(&mut self, rhs: Self) {
        for (word, other) in self.0.iter_mut().zip(rhs.0) {
            *word ^= other;
        }
    }
}

impl BitXor for Affine {
    type Output = Affine;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl Not for Affine {
    type Output = Affine;

    fn not(self) -> Self::Output {
        self ^ Self::constant(true)
    }
}

/// Result of reducing a square system of forms that must all evaluate to 0.
///
/// `assignment` satisfies every pivot row. It satisfies the whole system only
/// when `consistent` is set.
pub(crate) struct Reduced {
    pub assignment: Affine,
    pub rank: usize,
    pub consistent: bool,
}

/// Gauss-Jordan elimination over the first `vars` unknowns.
///
/// Free unknowns are fixed to 0 in the returned assignment.
pub(crate) fn reduce(mut equations: alloc::vec::Vec<Affine>, vars: usize) -> Reduced {
    let mut pivots = alloc::vec::Vec::with_capacity(vars);

    for var in 0..vars {
        let rank = pivots.len();
        let Some(found) = (rank..equations.len()).find(|&i| equations[i].bit(var)) else {
            continue;
        };
        equations.swap(rank, found);

        let pivot = equations[rank];
        for (i, equation) in equations.iter_mut().enumerate() {
            if i != rank && equation.bit(var) {
                *equation ^= pivot;
            }
        }
        pivots.push(var);
    }

    let rank = pivots.len();
    // rows past the rank have no unknowns left, a set constant reads 0 = 1
    let consistent = !equations[rank..].iter().any(Affine::constant_term);

    let mut assignment = Affine::default();
    for (equation, &var) in equations.iter().zip(&pivots) {
        if equation.constant_term() {
            assignment.toggle_bit(var);
        }
    }

    Reduced {
        assignment,
        rank,
        consistent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn eval_combines_unknowns_and_constant() {
        let form = Affine::var(0) ^ Affine::var(2) ^ Affine::constant(true);
        let mut assignment = Affine::var(0);

        assert!(!form.eval(&assignment));
        assignment ^= Affine::var(2);
        assert!(form.eval(&assignment));
        assert!(!(!form).eval(&assignment));
    }

    #[test]
    fn reduce_solves_independent_system() {
        // x0 + x1 = 1, x1 = 1
        let equations = vec![
            Affine::var(0) ^ Affine::var(1) ^ Affine::constant(true),
            Affine::var(1) ^ Affine::constant(true),
        ];

        let reduced = reduce(equations, 2);

        assert_eq!(reduced.rank, 2);
        assert!(reduced.consistent);
        assert!(!reduced.assignment.bit(0));
        assert!(reduced.assignment.bit(1));
    }

    #[test]
    fn reduce_detects_contradiction() {
        // x0 = 0, x0 = 1
        let equations = vec![Affine::var(0), Affine::var(0) ^ Affine::constant(true)];

        let reduced = reduce(equations, 1);

        assert_eq!(reduced.rank, 1);
        assert!(!reduced.consistent);
    }

    #[test]
    fn high_unknowns_use_upper_words() {
        let form = Affine::var(200) ^ Affine::var(63) ^ Affine::var(64);

        assert!(form.bit(200) && form.bit(63) && form.bit(64));
        assert!(!form.bit(65) && !form.constant_term());
    }
}
