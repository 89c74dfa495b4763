use super::BoxId;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Sparse, symmetric `(box, box)` neighbour graph. Built once at init and
/// read-only for the run.
pub struct Adjacency {
    graph: UnGraph<BoxId, ()>,
    index: HashMap<BoxId, NodeIndex>,
}

impl Adjacency {
    pub fn new(box_ids: &[BoxId], edges: &[(BoxId, BoxId)]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index = HashMap::new();
        for &id in box_ids {
            index.insert(id, graph.add_node(id));
        }
        for &(a, b) in edges {
            let (Some(&na), Some(&nb)) = (index.get(&a), index.get(&b)) else {
                continue;
            };
            if !graph.contains_edge(na, nb) {
                graph.add_edge(na, nb, ());
            }
        }
        Self { graph, index }
    }

    pub fn neighbours(&self, id: BoxId) -> Vec<BoxId> {
        let Some(&node) = self.index.get(&id) else {
            return Vec::new();
        };
        self.graph
            .neighbors(node)
            .map(|n| self.graph[n])
            .collect()
    }

    /// a greedy colouring of the adjacency graph into independent sets:
    /// boxes sharing a colour have no edge between them. Exposed for
    /// spatial-partitioning callers (e.g. region-based reporting); the
    /// box-stepping loop itself stays single-threaded since a group's
    /// cohorts are shared, whole-of-grid state rather than partitioned
    /// per box.
    pub fn colouring(&self) -> Vec<Vec<BoxId>> {
        let mut colour_of: HashMap<NodeIndex, usize> = HashMap::new();
        for node in self.graph.node_indices() {
            let used: std::collections::HashSet<usize> = self
                .graph
                .neighbors(node)
                .filter_map(|n| colour_of.get(&n).copied())
                .collect();
            let colour = (0..).find(|c| !used.contains(c)).unwrap();
            colour_of.insert(node, colour);
        }
        let max_colour = colour_of.values().copied().max().unwrap_or(0);
        let mut groups = vec![Vec::new(); max_colour + 1];
        for (node, colour) in colour_of {
            groups[colour].push(self.graph[node]);
        }
        groups
    }
}
