//! Strongly connected components of the implication graph.
use std::cmp::min;

use partial_ref::{partial, PartialRef};

use gridsat_formula::{lit::LitIdx, Lit};

use crate::context::{Context, ImplGraphP, SccsP};
use crate::graph::ImplicationGraph;

/// Sentinel for nodes not visited yet and nodes without a component.
const UNSET: LitIdx = LitIdx::max_value();

/// Partition of the nodes of an implication graph into strongly connected components.
#[derive(Default)]
pub struct Sccs {
    /// Components in the order they were completed.
    ///
    /// This is a reverse topological order of the condensation.
    components: Vec<Vec<Lit>>,
    /// For each node the position of its component in `components`.
    component_of: Vec<LitIdx>,
}

impl Sccs {
    /// Components in completion order.
    pub fn components(&self) -> &[Vec<Lit>] {
        &self.components
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components were computed.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Position of the literal's component in completion order.
    pub fn component_of(&self, lit: Lit) -> usize {
        self.component_of[lit.code()] as usize
    }
}

/// Search state of Tarjan's algorithm.
///
/// The depth-first search uses an explicit stack of `(node, successor cursor)` frames, so the
/// search depth is not limited by the call stack.
struct Tarjan<'a> {
    graph: &'a ImplicationGraph,
    /// Discovery order of each node or `UNSET`.
    index: Vec<LitIdx>,
    lowlink: Vec<LitIdx>,
    on_stack: Vec<bool>,
    next_index: LitIdx,
    /// Visited nodes not yet assigned to a component.
    stack: Vec<Lit>,
    frames: Vec<(Lit, usize)>,
    sccs: Sccs,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a ImplicationGraph) -> Tarjan<'a> {
        let node_count = graph.node_count();
        Tarjan {
            graph,
            index: vec![UNSET; node_count],
            lowlink: vec![UNSET; node_count],
            on_stack: vec![false; node_count],
            next_index: 0,
            stack: vec![],
            frames: vec![],
            sccs: Sccs {
                components: vec![],
                component_of: vec![UNSET; node_count],
            },
        }
    }

    fn enter(&mut self, node: Lit) {
        let code = node.code();
        self.index[code] = self.next_index;
        self.lowlink[code] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[code] = true;
        self.frames.push((node, 0));
    }

    /// Pop the component rooted at `root` off the node stack.
    fn complete(&mut self, root: Lit) {
        let position = self.sccs.components.len() as LitIdx;
        let mut component = vec![];
        loop {
            let node = self
                .stack
                .pop()
                .expect("component root missing from the node stack");
            self.on_stack[node.code()] = false;
            self.sccs.component_of[node.code()] = position;
            component.push(node);
            if node == root {
                break;
            }
        }
        self.sccs.components.push(component);
    }

    fn search(&mut self, root: Lit) {
        let graph = self.graph;
        self.enter(root);

        while let Some(frame) = self.frames.last_mut() {
            let node = frame.0;
            let successors = graph.successors(node);

            if frame.1 < successors.len() {
                let next = successors[frame.1];
                frame.1 += 1;

                if self.index[next.code()] == UNSET {
                    self.enter(next);
                } else if self.on_stack[next.code()] {
                    self.lowlink[node.code()] =
                        min(self.lowlink[node.code()], self.index[next.code()]);
                }
            } else {
                self.frames.pop();

                if self.lowlink[node.code()] == self.index[node.code()] {
                    self.complete(node);
                }

                if let Some(&(parent, _)) = self.frames.last() {
                    self.lowlink[parent.code()] =
                        min(self.lowlink[parent.code()], self.lowlink[node.code()]);
                }
            }
        }
    }

    fn run(mut self) -> Sccs {
        for code in 0..self.graph.node_count() {
            if self.index[code] == UNSET {
                self.search(Lit::from_code(code));
            }
        }
        self.sccs
    }
}

/// Compute the strongly connected components of a graph.
pub fn tarjan(graph: &ImplicationGraph) -> Sccs {
    Tarjan::new(graph).run()
}

/// Compute the strongly connected components of the implication graph of the current case.
pub fn find_sccs(mut ctx: partial!(Context, mut SccsP, ImplGraphP)) {
    let sccs = tarjan(ctx.part(ImplGraphP));
    *ctx.part_mut(SccsP) = sccs;
}
