use crate::algo::{BellmanFord, Boruvka, FastComp, GaleShapley, Johnson, PrefixSum, Reduce};
use crate::error::DispatchError;
use crate::load;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// The dispatchable algorithm instances, keyed by their canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Subtree-sum tree over an integer array.
    Reduce,
    /// Inclusive prefix sums over an integer array.
    PrefixSum,
    /// Single-source shortest paths (source 0 unless overridden).
    BellmanFord,
    /// Price function for reweighting.
    Johnson,
    /// Connected components by pointer jumping.
    FastComp,
    /// Stable matching, men-optimal.
    GaleShapley,
    /// Minimum spanning forest leaders.
    Boruvka,
}

impl FromStr for Algorithm {
    type Err = DispatchError;

    fn from_str(name: &str) -> Result<Self, DispatchError> {
        match name {
            "Reduce" => Ok(Self::Reduce),
            "PrefixSum" => Ok(Self::PrefixSum),
            "BellmanFord" => Ok(Self::BellmanFord),
            "Johnson" => Ok(Self::Johnson),
            "FastComp" => Ok(Self::FastComp),
            "GaleShapley" => Ok(Self::GaleShapley),
            "Boruvka" => Ok(Self::Boruvka),
            other => Err(DispatchError::UnknownAlgorithm(other.to_owned())),
        }
    }
}

/// Load `input` in the format `algorithm` expects, solve, and return the
/// 1-D integer result.
///
/// `Ok(None)` is the distinguished absent result: a negative cycle was
/// detected by a budgeted instance. It is not an error.
///
/// # Errors
/// [`DispatchError`] on load failures, an out-of-range source vertex, or a
/// failed solve.
pub fn run(
    algorithm: Algorithm,
    input: impl AsRef<Path>,
    source: usize,
) -> Result<Option<Vec<i64>>, DispatchError> {
    let input = input.as_ref();
    info!(?algorithm, input = %input.display(), "dispatching");
    match algorithm {
        Algorithm::Reduce => {
            let values = load::int_array(input)?;
            Ok(Some(Reduce::new(&values)?.solve()?))
        }
        Algorithm::PrefixSum => {
            let values = load::int_array(input)?;
            Ok(Some(PrefixSum::new(&values)?.solve()?))
        }
        Algorithm::BellmanFord => {
            let graph = load::directed_matrix(input)?;
            if source >= graph.len() {
                return Err(DispatchError::InvalidSource { requested: source, vertices: graph.len() });
            }
            let paths = BellmanFord::new(&graph, source)?.solve()?;
            Ok(paths.into_distances())
        }
        Algorithm::Johnson => {
            let graph = load::directed_matrix(input)?;
            Ok(Johnson::new(&graph)?.solve()?)
        }
        Algorithm::FastComp => {
            let graph = load::undirected_as_directed(input)?;
            let parents = FastComp::new(&graph)?.solve()?;
            Ok(Some(parents.into_iter().map(|p| p as i64).collect()))
        }
        Algorithm::GaleShapley => {
            let problem = load::matching_problem(input)?;
            Ok(Some(GaleShapley::new(&problem)?.solve()?))
        }
        Algorithm::Boruvka => {
            let graph = load::weighted_edge_list(input)?;
            let forest = Boruvka::new(&graph)?.solve()?;
            Ok(Some(forest.leaders.into_iter().map(|l| l as i64).collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for (name, algorithm) in [
            ("Reduce", Algorithm::Reduce),
            ("PrefixSum", Algorithm::PrefixSum),
            ("BellmanFord", Algorithm::BellmanFord),
            ("Johnson", Algorithm::Johnson),
            ("FastComp", Algorithm::FastComp),
            ("GaleShapley", Algorithm::GaleShapley),
            ("Boruvka", Algorithm::Boruvka),
        ] {
            assert_eq!(name.parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "Dijkstra".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, DispatchError::UnknownAlgorithm(name) if name == "Dijkstra"));
    }
}
