//! End-to-end scenarios: the seed vectors for every instance, the boundary
//! behaviors, and dispatcher runs over real input files.

#![cfg(not(feature = "loom"))]

use llp::algo::{
    BellmanFord, Boruvka, FastComp, GaleShapley, Johnson, MatchingProblem, PrefixSum, Reduce,
};
use llp::dispatch::{self, Algorithm};
use llp::error::DispatchError;
use llp::graph::{DiGraph, UndirectedGraph};
use llp::INF;
use std::io::Write;
use tempfile::NamedTempFile;

fn undirected(n: usize, edges: &[(usize, usize)]) -> DiGraph {
    let mut g = DiGraph::new(n);
    for &(a, b) in edges {
        g.add_edge(a, b, 1);
        g.add_edge(b, a, 1);
    }
    g
}

#[test]
fn reduce_seed_tree() {
    let tree = Reduce::new(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap().solve().unwrap();
    assert_eq!(tree, vec![55, 37, 18, 34, 3, 7, 11, 15, 19]);
}

#[test]
fn prefix_sum_seed() {
    let sums = PrefixSum::new(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap().solve().unwrap();
    assert_eq!(sums, vec![1, 3, 6, 10, 15, 21, 28, 36]);
}

#[test]
fn prefix_sum_equals_reduce_total() {
    let input: Vec<i64> = (1..=10).collect();
    let sums = PrefixSum::new(&input).unwrap().solve().unwrap();
    let tree = Reduce::new(&input).unwrap().solve().unwrap();
    assert_eq!(*sums.last().unwrap(), tree[0]);
}

#[test]
fn bellman_ford_seed() {
    let mut g = DiGraph::new(4);
    g.add_edge(0, 1, 10);
    g.add_edge(0, 2, -1);
    let paths = BellmanFord::new(&g, 0).unwrap().solve().unwrap();
    assert_eq!(paths.distances().unwrap(), &[0, 10, -1, INF]);
}

#[test]
fn bellman_ford_negative_cycle_seed() {
    let mut g = DiGraph::new(3);
    g.add_edge(0, 1, 1);
    g.add_edge(1, 2, -5);
    g.add_edge(2, 1, 1);
    let paths = BellmanFord::new(&g, 0).unwrap().solve().unwrap();
    assert!(paths.has_negative_cycle());
    assert!(paths.into_distances().is_none());
}

#[test]
fn johnson_seed_prices() {
    let mut g = DiGraph::new(6);
    g.add_edge(0, 1, -2);
    g.add_edge(1, 2, -1);
    g.add_edge(0, 3, -1);
    g.add_edge(2, 4, -3);
    g.add_edge(4, 5, 10);
    let price = Johnson::new(&g).unwrap().solve().unwrap().unwrap();
    assert_eq!(price, vec![0, 2, 3, 1, 6, 0]);
}

#[test]
fn johnson_negative_cycle_absent_result() {
    let mut g = DiGraph::new(3);
    g.add_edge(0, 1, 1);
    g.add_edge(1, 2, -5);
    g.add_edge(2, 1, 1);
    assert!(Johnson::new(&g).unwrap().solve().unwrap().is_none());
}

#[test]
fn fast_comp_seed_two_components() {
    let g = undirected(
        10,
        &[(0, 1), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 8), (8, 9)],
    );
    let parents = FastComp::new(&g).unwrap().solve().unwrap();
    assert_eq!(parents, vec![1, 1, 9, 9, 9, 9, 9, 9, 9, 9]);
}

#[test]
fn boruvka_small_forest() {
    let mut g = UndirectedGraph::new(4);
    g.add_edge(0, 1, 10);
    g.add_edge(0, 2, 6);
    g.add_edge(0, 3, 5);
    g.add_edge(1, 3, 15);
    g.add_edge(2, 3, 4);
    let forest = Boruvka::new(&g).unwrap().solve().unwrap();
    // (2,3,4) + (0,3,5) + (0,1,10); the 6-weight edge closes a cycle.
    assert_eq!(forest.total_weight(), 19);
    assert_eq!(forest.edges.len(), 3);
    assert_eq!(forest.leaders, vec![0; 4]);
}

#[test]
fn gale_shapley_two_pairs() {
    let problem = MatchingProblem::new(
        vec![vec![0, 1], vec![1, 0]],
        vec![vec![0, 1], vec![1, 0]],
    );
    let matching = GaleShapley::new(&problem).unwrap().solve().unwrap();
    assert_eq!(matching, vec![0, 1]);
}

// Boundary behaviors.

#[test]
fn empty_arrays_give_empty_results() {
    assert!(Reduce::new(&[]).unwrap().solve().unwrap().is_empty());
    assert!(PrefixSum::new(&[]).unwrap().solve().unwrap().is_empty());
}

#[test]
fn seven_elements_keep_length_seven() {
    let tree = Reduce::new(&[1, 2, 3, 4, 5, 6, 7]).unwrap().solve().unwrap();
    assert_eq!(tree.len(), 7);
    assert_eq!(tree[0], 28);

    let sums = PrefixSum::new(&[1, 2, 3, 4, 5, 6, 7]).unwrap().solve().unwrap();
    assert_eq!(sums, vec![1, 3, 6, 10, 15, 21, 28]);
}

#[test]
fn single_vertex_graphs() {
    let g = DiGraph::new(1);
    assert_eq!(
        BellmanFord::new(&g, 0).unwrap().solve().unwrap().distances().unwrap(),
        &[0]
    );
    assert_eq!(Johnson::new(&g).unwrap().solve().unwrap().unwrap(), vec![0]);
    assert_eq!(FastComp::new(&g).unwrap().solve().unwrap(), vec![0]);
}

#[test]
fn input_larger_than_the_worker_cap() {
    let n = 4096;
    let input: Vec<i64> = (1..=n).collect();
    let sums = PrefixSum::new(&input).unwrap().solve().unwrap();
    assert_eq!(sums[0], 1);
    assert_eq!(sums[(n - 1) as usize], n * (n + 1) / 2);
}

#[test]
fn long_chain_distances() {
    let n = 300;
    let mut g = DiGraph::new(n);
    for v in 0..n - 1 {
        g.add_edge(v, v + 1, 2);
    }
    let paths = BellmanFord::new(&g, 0).unwrap().solve().unwrap();
    let d = paths.into_distances().unwrap();
    assert_eq!(d[n - 1], 2 * (n as i64 - 1));
}

// Dispatcher runs over real files.

fn write_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn dispatch_reduce_from_file() {
    let file = write_input("10\n1 2 3 4 5\n6 7 8 9 10\n");
    let result = dispatch::run(Algorithm::Reduce, file.path(), 0).unwrap().unwrap();
    assert_eq!(result, vec![55, 37, 18, 34, 3, 7, 11, 15, 19]);
}

#[test]
fn dispatch_prefix_sum_from_file() {
    let file = write_input("8\n1 2 3 4 5 6 7 8\n");
    let result = dispatch::run(Algorithm::PrefixSum, file.path(), 0).unwrap().unwrap();
    assert_eq!(result, vec![1, 3, 6, 10, 15, 21, 28, 36]);
}

#[test]
fn dispatch_bellman_ford_matrix_form() {
    let file = write_input("4\n1,2\n10,-1\n*\n*\n\n\n*\n*\n");
    let result = dispatch::run(Algorithm::BellmanFord, file.path(), 0).unwrap().unwrap();
    assert_eq!(result, vec![0, 10, -1, INF]);
}

#[test]
fn dispatch_johnson_negative_cycle_is_absent_not_error() {
    let file = write_input("3\n1\n1\n2\n-5\n1\n1\n");
    let result = dispatch::run(Algorithm::Johnson, file.path(), 0).unwrap();
    assert!(result.is_none());
}

#[test]
fn dispatch_fast_comp_undirected_format() {
    let file = write_input("10\n1\n0\n3\n2 4\n3 5\n4 6\n5 7\n6 8\n7 9\n8\n");
    let result = dispatch::run(Algorithm::FastComp, file.path(), 0).unwrap().unwrap();
    assert_eq!(result, vec![1, 1, 9, 9, 9, 9, 9, 9, 9, 9]);
}

#[test]
fn dispatch_boruvka_edge_list() {
    let file = write_input("4\n5\n0 1 10\n0 2 6\n0 3 5\n1 3 15\n2 3 4\n");
    let result = dispatch::run(Algorithm::Boruvka, file.path(), 0).unwrap().unwrap();
    assert_eq!(result, vec![0, 0, 0, 0]);
}

#[test]
fn dispatch_gale_shapley_matching() {
    let file = write_input("2\n0 1\n1 0\n0 1\n1 0\n");
    let result = dispatch::run(Algorithm::GaleShapley, file.path(), 0).unwrap().unwrap();
    assert_eq!(result, vec![0, 1]);
}

#[test]
fn dispatch_bad_source_is_an_error() {
    let file = write_input("2\n*\n*\n\n\n");
    let err = dispatch::run(Algorithm::BellmanFord, file.path(), 9).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidSource { requested: 9, vertices: 2 }));
}

#[test]
fn dispatch_malformed_input_is_an_error() {
    let file = write_input("2\n1 2 3\n");
    let err = dispatch::run(Algorithm::Reduce, file.path(), 0).unwrap_err();
    assert!(matches!(err, DispatchError::Load(_)));
}

#[test]
fn dispatch_missing_file_is_an_error() {
    let err = dispatch::run(Algorithm::Reduce, "/nonexistent/input.txt", 0).unwrap_err();
    assert!(matches!(err, DispatchError::Load(_)));
}
