use crate::error::SolveError;
use crate::kernel::{Kernel, LlpInstance};
use crate::state::StateVec;

/// Marker for an unmatched participant in the projected matching.
pub const UNMATCHED: i64 = -1;

/// A stable-matching input: `n` men and `n` women with full preference
/// lists, plus the inverse rankings both sides of the solver look up.
#[must_use]
#[derive(Debug, Clone)]
pub struct MatchingProblem {
    n: usize,
    /// `men_prefs[m][rank]` = woman id, most preferred first.
    men_prefs: Vec<Vec<usize>>,
    /// `men_ranking[m][w]` = rank of woman `w` in man `m`'s list.
    men_ranking: Vec<Vec<usize>>,
    /// `women_ranking[w][m]` = rank of man `m` in woman `w`'s list.
    women_ranking: Vec<Vec<usize>>,
}

impl MatchingProblem {
    /// Build a problem from both preference tables.
    ///
    /// # Panics
    /// If the tables are not `n` rows of `n` in-range entries each.
    pub fn new(men_prefs: Vec<Vec<usize>>, women_prefs: Vec<Vec<usize>>) -> Self {
        let n = men_prefs.len();
        assert_eq!(women_prefs.len(), n, "preference tables must have matching sizes");
        let men_ranking = invert(&men_prefs, n);
        let women_ranking = invert(&women_prefs, n);
        Self { n, men_prefs, men_ranking, women_ranking }
    }

    /// Number of participants per side.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the problem has no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

fn invert(prefs: &[Vec<usize>], n: usize) -> Vec<Vec<usize>> {
    prefs
        .iter()
        .enumerate()
        .map(|(row, choices)| {
            assert_eq!(choices.len(), n, "preference row {row} must have {n} entries");
            let mut ranking = vec![0usize; n];
            for (rank, &chosen) in choices.iter().enumerate() {
                assert!(chosen < n, "preference row {row} names out-of-range id {chosen}");
                ranking[chosen] = rank;
            }
            ranking
        })
        .collect()
}

/// Parallel Gale–Shapley stable matching.
///
/// The state is the proposal vector: `p[m]` is the rank of the woman man
/// `m` currently proposes to, from `0` (top choice) up to `n` (exhausted).
/// A man is forbidden while he forms a blocking pair with some woman he
/// prefers to his current partner; the advance moves him one rank down his
/// list. At the fixed point the projection of best proposers is the
/// men-optimal stable matching.
#[must_use]
pub struct GaleShapley<'p> {
    kernel: Kernel,
    problem: &'p MatchingProblem,
    p: StateVec<usize>,
}

impl<'p> GaleShapley<'p> {
    /// Build the instance with every man at his top choice.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    pub fn new(problem: &'p MatchingProblem) -> Result<Self, SolveError> {
        Ok(Self {
            kernel: Kernel::new(problem.len())?,
            problem,
            p: StateVec::filled(problem.len(), 0),
        })
    }

    /// Run to quiescence and project the matching: `result[m]` is the
    /// woman matched to man `m`, or [`UNMATCHED`].
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<Vec<i64>, SolveError> {
        self.kernel.solve(&self)?;
        let matching = (0..self.problem.n)
            .map(|man| {
                // SAFETY: the solve is quiescent; no workers are running.
                unsafe { self.partner_of(man) }.map_or(UNMATCHED, |woman| woman as i64)
            })
            .collect();
        Ok(matching)
    }

    /// The woman man `m` currently proposes to, unless exhausted.
    ///
    /// # Safety
    /// Callable only in phases with no writer of `p` in flight.
    unsafe fn woman_of(&self, man: usize) -> Option<usize> {
        // SAFETY: forwarded from the caller.
        let rank = unsafe { self.p.read(man) };
        (rank < self.problem.n).then(|| self.problem.men_prefs[man][rank])
    }

    /// The best-ranked man currently proposing to `woman`, if any.
    ///
    /// # Safety
    /// Callable only in phases with no writer of `p` in flight.
    unsafe fn best_proposer(&self, woman: usize) -> Option<usize> {
        let ranking = &self.problem.women_ranking[woman];
        let mut best: Option<usize> = None;
        for man in 0..self.problem.n {
            // SAFETY: forwarded from the caller.
            if unsafe { self.woman_of(man) } != Some(woman) {
                continue;
            }
            if best.is_none_or(|b| ranking[man] < ranking[b]) {
                best = Some(man);
            }
        }
        best
    }

    /// The woman matched to `man`: his proposal target, if she accepts him
    /// as her best proposer.
    ///
    /// # Safety
    /// Callable only in phases with no writer of `p` in flight.
    unsafe fn partner_of(&self, man: usize) -> Option<usize> {
        // SAFETY: forwarded from the caller.
        let woman = unsafe { self.woman_of(man) }?;
        // SAFETY: forwarded from the caller.
        (unsafe { self.best_proposer(woman) } == Some(man)).then_some(woman)
    }
}

impl LlpInstance for GaleShapley<'_> {
    fn len(&self) -> usize {
        self.problem.n
    }

    fn forbidden(&self, _forb_idx: usize, man: usize) -> bool {
        // SAFETY: collect phases read `p` only; nothing is staged.
        unsafe {
            if self.p.read(man) >= self.problem.n {
                return false;
            }
            let partner_rank = self
                .partner_of(man)
                .map_or(self.problem.n, |woman| self.problem.men_ranking[man][woman]);
            // A blocking pair with any woman he strictly prefers?
            for rank in 0..partner_rank {
                let woman = self.problem.men_prefs[man][rank];
                let ranking = &self.problem.women_ranking[woman];
                let accepts = match self.best_proposer(woman) {
                    None => true,
                    Some(current) => ranking[man] < ranking[current],
                };
                if accepts {
                    return true;
                }
            }
            false
        }
    }

    fn advance_step(&self, _step_idx: usize, man: usize) {
        // SAFETY: each wave task owns its own `p` slot; the collect that
        // built the wave is already joined.
        unsafe {
            let rank = self.p.read(man);
            if rank < self.problem.n {
                self.p.write(man, rank + 1);
            }
        }
    }
}
