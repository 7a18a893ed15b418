use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::fragment::error::GrammarError;
use crate::fragment::parse_tree::{NodeKind, ParseTree};
use crate::fragment::tokenizer::BondToken;
use crate::fragment::Role;

/// Connectivity of a parsed fragment: atoms and markers as nodes, one edge
/// per bond (ring closures included).
pub type FragmentGraph = UnGraph<NodeKind, Option<BondToken>>;

pub fn build_graph(tree: &ParseTree) -> FragmentGraph {
    let mut graph = FragmentGraph::default();
    let indices: Vec<NodeIndex> = tree.nodes.iter().map(|n| graph.add_node(n.kind)).collect();

    for (i, node) in tree.nodes.iter().enumerate() {
        for neighbor in &node.neighbors {
            let j = neighbor.node_idx;
            if i < j && graph.find_edge(indices[i], indices[j]).is_none() {
                graph.add_edge(indices[i], indices[j], neighbor.bond);
            }
        }
    }

    graph
}

/// Structural checks that need the whole graph: one component, and every
/// marker terminal. Only a linker may bond two markers to each other
/// (`[R][A]`, a direct bond).
pub fn check_structure(graph: &FragmentGraph, role: Role) -> Result<(), GrammarError> {
    if connected_components(graph) > 1 {
        return Err(GrammarError::Disconnected);
    }

    for idx in graph.node_indices() {
        if let NodeKind::Marker(marker) = graph[idx] {
            let degree = graph.neighbors(idx).count();
            if degree != 1 {
                return Err(GrammarError::MarkerDegree {
                    pos: marker.pos,
                    degree,
                });
            }
            let bonded_to_marker = graph
                .neighbors(idx)
                .any(|n| matches!(graph[n], NodeKind::Marker(_)));
            if bonded_to_marker && role != Role::Linker {
                return Err(GrammarError::MarkerPair { pos: marker.pos });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::parse_tree::build_parse_tree;
    use crate::fragment::tokenizer::tokenize;

    fn graph(s: &str) -> FragmentGraph {
        build_graph(&build_parse_tree(&tokenize(s).unwrap()).unwrap())
    }

    #[test]
    fn ring_closure_becomes_edge() {
        let g = graph("C1CC1[R1]");
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(check_structure(&g, Role::Scaffold).is_ok());
    }

    #[test]
    fn duplicate_ring_edge_collapsed() {
        // Ring closure between already-bonded neighbours.
        let g = graph("C1C1[R1]");
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn dot_disconnects() {
        let g = graph("C[R1].CC");
        assert_eq!(check_structure(&g, Role::Scaffold), Err(GrammarError::Disconnected));
    }

    #[test]
    fn lone_marker_has_degree_zero() {
        let g = graph("[R1]");
        assert_eq!(
            check_structure(&g, Role::Scaffold),
            Err(GrammarError::MarkerDegree { pos: 0, degree: 0 })
        );
    }

    #[test]
    fn marker_in_chain_middle() {
        let g = graph("C[R1]C");
        assert_eq!(
            check_structure(&g, Role::Scaffold),
            Err(GrammarError::MarkerDegree { pos: 1, degree: 2 })
        );
    }

    #[test]
    fn direct_bond_linker() {
        let g = graph("[R][A]");
        assert_eq!(g.edge_count(), 1);
        assert!(check_structure(&g, Role::Linker).is_ok());
    }

    #[test]
    fn marker_pair_outside_linker() {
        let g = graph("[R1][R2]");
        assert_eq!(
            check_structure(&g, Role::Scaffold),
            Err(GrammarError::MarkerPair { pos: 0 })
        );
        let g = graph("[A][A]");
        assert_eq!(
            check_structure(&g, Role::BuildingBlock),
            Err(GrammarError::MarkerPair { pos: 0 })
        );
    }

    #[test]
    fn branch_marker_is_terminal() {
        let g = graph("C([R1])NCC([R2])O[R3]");
        assert!(check_structure(&g, Role::Scaffold).is_ok());
    }
}
