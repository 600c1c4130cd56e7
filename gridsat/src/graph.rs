//! The implication graph.
use partial_ref::{partial, PartialRef};

use gridsat_formula::Lit;

use crate::context::{Context, DisjunctionsP, ImplGraphP, SolverStateP};

/// Directed graph over all literals of a case.
///
/// An edge `u → v` means that `u` being true forces `v` to be true. Node ids are literal codes.
#[derive(Default)]
pub struct ImplicationGraph {
    successors: Vec<Vec<Lit>>,
    edge_count: usize,
}

impl ImplicationGraph {
    /// Create a graph without edges.
    pub fn new(node_count: usize) -> ImplicationGraph {
        let mut graph = ImplicationGraph::default();
        graph.set_node_count(node_count);
        graph
    }

    /// Update structures for a new node count.
    pub fn set_node_count(&mut self, count: usize) {
        self.successors.resize(count, vec![]);
    }

    /// Number of nodes, i.e. of literals.
    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Literals directly implied by a given literal.
    pub fn successors(&self, lit: Lit) -> &[Lit] {
        &self.successors[lit.code()]
    }

    /// Add the edge `from → to` unless it is present.
    ///
    /// Returns whether the edge was new.
    pub fn add_edge(&mut self, from: Lit, to: Lit) -> bool {
        assert!(
            from.code() < self.node_count() && to.code() < self.node_count(),
            "edge {:?} -> {:?} outside of an implication graph with {} nodes",
            from,
            to,
            self.node_count()
        );

        let successors = &mut self.successors[from.code()];
        if successors.contains(&to) {
            false
        } else {
            successors.push(to);
            self.edge_count += 1;
            true
        }
    }

    /// Add the implications `!p → q` and `!q → p` of the disjunction `p ∨ q`.
    ///
    /// Returns the number of new edges.
    pub fn add_disjunction(&mut self, [p, q]: [Lit; 2]) -> usize {
        self.add_edge(!p, q) as usize + self.add_edge(!q, p) as usize
    }
}

/// Build the implication graph of all remaining disjunctions.
///
/// This allocates one node per literal of the grid.
pub fn build_graph(mut ctx: partial!(Context, mut ImplGraphP, DisjunctionsP, SolverStateP)) {
    let (graph, ctx) = ctx.split_part_mut(ImplGraphP);
    graph.set_node_count(ctx.part(SolverStateP).grid.lit_count());
    for &clause in ctx.part(DisjunctionsP).clauses() {
        graph.add_disjunction(clause);
    }
}
