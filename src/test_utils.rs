/// Shared graph fixtures for partition and merge tests
use crate::types::NeighborList;

/// 4 vertices with edges 0 -> 2 (weight 3) and 1 -> 3 (weight 2).
pub fn four_vertex_graph() -> Vec<NeighborList> {
    vec![vec![(2, 3)], vec![(3, 2)], vec![], vec![]]
}

/// Two directed cliques of `size` vertices each, joined by the edges
/// 0 -> size and size -> 0. All weights are 1.
/// Returns the neighbor lists and the clique of every vertex.
pub fn two_cliques(size: usize) -> (Vec<NeighborList>, Vec<usize>) {
    let num_vertices = 2 * size;
    let mut neighbors: Vec<NeighborList> = vec![Vec::new(); num_vertices];
    for clique in 0..2 {
        let start = clique * size;
        for u in start..start + size {
            for v in start..start + size {
                if u != v {
                    neighbors[u].push((v, 1));
                }
            }
        }
    }
    neighbors[0].push((size, 1));
    neighbors[size].push((0, 1));

    let truth = (0..num_vertices).map(|v| v / size).collect();
    (neighbors, truth)
}
