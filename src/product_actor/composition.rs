//! Cycle detection over the product composition graph.
//!
//! Edges run from a product to each of its `sources`. The traversal is a
//! depth-first walk with an explicit stack and an explicit on-path set, so
//! backtracking is a visible step rather than call-stack unwinding. Only a
//! back-edge to a node on the current path counts as a cycle; two branches
//! converging on a shared sub-product (a diamond) do not.

use std::collections::{HashMap, HashSet};
use std::vec;

use crate::actor_framework::Store;
use crate::domain::{Product, ProductId};

/// Read access to a snapshot of products by id.
pub trait ProductLookup {
    fn lookup(&self, id: &ProductId) -> Option<&Product>;
}

impl ProductLookup for Store<Product> {
    fn lookup(&self, id: &ProductId) -> Option<&Product> {
        self.get(id)
    }
}

impl ProductLookup for HashMap<ProductId, Product> {
    fn lookup(&self, id: &ProductId) -> Option<&Product> {
        self.get(id)
    }
}

struct Frame {
    id: ProductId,
    remaining: vec::IntoIter<ProductId>,
}

impl Frame {
    fn enter(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            remaining: product.sources.clone().into_iter(),
        }
    }
}

pub struct CompositionGraph<'a, L: ProductLookup + ?Sized> {
    products: &'a L,
}

impl<'a, L: ProductLookup + ?Sized> CompositionGraph<'a, L> {
    pub fn new(products: &'a L) -> Self {
        Self { products }
    }

    pub fn has_cycle(&self, candidates: &[Product]) -> bool {
        self.find_cycle(candidates).is_some()
    }

    /// Walks from each candidate in turn and returns the first cycle found,
    /// as the path from the repeated node back to itself.
    ///
    /// The on-path set is shared by the whole call. Every node is removed
    /// again when its frame is popped, so the set is empty whenever the walk
    /// moves on to the next candidate. Sources that no longer resolve
    /// (deleted products) are skipped.
    pub fn find_cycle(&self, candidates: &[Product]) -> Option<Vec<ProductId>> {
        let mut on_path: HashSet<ProductId> = HashSet::new();
        let mut stack: Vec<Frame> = Vec::new();

        for candidate in candidates {
            if on_path.contains(&candidate.id) {
                return Some(cycle_path(&stack, &candidate.id));
            }
            on_path.insert(candidate.id.clone());
            stack.push(Frame::enter(candidate));

            while let Some(frame) = stack.last_mut() {
                match frame.remaining.next() {
                    Some(child) => {
                        if on_path.contains(&child) {
                            return Some(cycle_path(&stack, &child));
                        }
                        if let Some(product) = self.products.lookup(&child) {
                            on_path.insert(child);
                            stack.push(Frame::enter(product));
                        }
                    }
                    None => {
                        if let Some(done) = stack.pop() {
                            on_path.remove(&done.id);
                        }
                    }
                }
            }
        }

        None
    }
}

fn cycle_path(stack: &[Frame], repeated: &ProductId) -> Vec<ProductId> {
    let start = stack
        .iter()
        .position(|frame| &frame.id == repeated)
        .unwrap_or(0);
    stack[start..]
        .iter()
        .map(|frame| frame.id.clone())
        .chain(std::iter::once(repeated.clone()))
        .collect()
}
