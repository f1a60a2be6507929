//! Maximum bipartite matching (Hopcroft–Karp).
//!
//! Used by the reuse analyzer to pair gate pairs of adjacent two-qubit
//! layers. Runs in O(E·√V); see Hopcroft & Karp, SIAM J. Comput. 2(4),
//! 1973.

use std::collections::VecDeque;

const INFINITE: u32 = u32::MAX;

/// Compute a maximum matching of a bipartite graph.
///
/// `adjacency[l]` lists the right vertices adjacent to left vertex `l`.
/// The result maps every right vertex to its matched left vertex, or
/// `None` if it is unmatched; its length is one past the greatest right
/// vertex mentioned in `adjacency`.
///
/// With `inverted` the roles of the two sides are flipped: the input is
/// read as `right -> lefts` and the result maps left vertices to right
/// vertices, so a caller can obtain both matching directions from one
/// adjacency list.
///
/// The algorithm is deterministic: for a fixed vertex order it always
/// returns the same matching.
pub fn maximum_bipartite_matching(
    adjacency: &[Vec<usize>],
    inverted: bool,
) -> Vec<Option<usize>> {
    if inverted {
        return maximum_bipartite_matching(&transpose(adjacency), false);
    }
    let n_left = adjacency.len();
    let n_right = adjacency
        .iter()
        .flatten()
        .max()
        .map_or(0, |&max_right| max_right + 1);

    let mut pair_left: Vec<Option<usize>> = vec![None; n_left];
    let mut pair_right: Vec<Option<usize>> = vec![None; n_right];
    let mut dist: Vec<u32> = vec![INFINITE; n_left];

    // Phase by phase: BFS layers the graph from the free left vertices,
    // then DFS augments along shortest alternating paths only.
    while bfs_layers(adjacency, &pair_left, &pair_right, &mut dist) {
        for left in 0..n_left {
            if pair_left[left].is_none() {
                try_augment(adjacency, &mut pair_left, &mut pair_right, &mut dist, left);
            }
        }
    }
    pair_right
}

/// Flip a `left -> rights` adjacency list into `right -> lefts`.
fn transpose(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n_right = adjacency
        .iter()
        .flatten()
        .max()
        .map_or(0, |&max_right| max_right + 1);
    let mut transposed = vec![Vec::new(); n_right];
    for (left, rights) in adjacency.iter().enumerate() {
        for &right in rights {
            transposed[right].push(left);
        }
    }
    transposed
}

/// BFS pass: compute shortest alternating-path distances from free left
/// vertices. Returns whether any augmenting path exists.
fn bfs_layers(
    adjacency: &[Vec<usize>],
    pair_left: &[Option<usize>],
    pair_right: &[Option<usize>],
    dist: &mut [u32],
) -> bool {
    let mut queue = VecDeque::new();
    for (left, matched) in pair_left.iter().enumerate() {
        if matched.is_none() {
            dist[left] = 0;
            queue.push_back(left);
        } else {
            dist[left] = INFINITE;
        }
    }
    let mut found_augmenting_path = false;
    while let Some(left) = queue.pop_front() {
        for &right in &adjacency[left] {
            match pair_right[right] {
                None => found_augmenting_path = true,
                Some(next_left) => {
                    if dist[next_left] == INFINITE {
                        dist[next_left] = dist[left] + 1;
                        queue.push_back(next_left);
                    }
                }
            }
        }
    }
    found_augmenting_path
}

/// DFS pass: augment along a shortest alternating path starting at
/// `left`, if one exists.
fn try_augment(
    adjacency: &[Vec<usize>],
    pair_left: &mut [Option<usize>],
    pair_right: &mut [Option<usize>],
    dist: &mut [u32],
    left: usize,
) -> bool {
    for i in 0..adjacency[left].len() {
        let right = adjacency[left][i];
        let reachable = match pair_right[right] {
            None => true,
            Some(next_left) => {
                dist[next_left] == dist[left] + 1
                    && try_augment(adjacency, pair_left, pair_right, dist, next_left)
            }
        };
        if reachable {
            pair_right[right] = Some(left);
            pair_left[left] = Some(right);
            return true;
        }
    }
    dist[left] = INFINITE;
    false
}
