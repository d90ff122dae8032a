//! Bill of materials: a directed graph from output products to the inputs
//! they consume, weighted by the quantity needed per unit of output.

use super::identity::ProductKey;
use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Serialized form: output -> input -> quantity per unit output.
pub type RecipeTable = BTreeMap<ProductKey, BTreeMap<ProductKey, f64>>;

/// The recipes of one plant.
///
/// Each output product has at most one recipe. Recipes share product
/// vertices but never edges, so replacing one recipe leaves the others as
/// they were.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RecipeTable", into = "RecipeTable")]
pub struct BillOfMaterials {
    graph: StableDiGraph<ProductKey, f64>,
    index: HashMap<ProductKey, NodeIndex>,
    recipes: BTreeSet<ProductKey>,
}

impl BillOfMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    fn vertex(&mut self, product: &ProductKey) -> NodeIndex {
        if let Some(&idx) = self.index.get(product) {
            return idx;
        }
        let idx = self.graph.add_node(product.clone());
        self.index.insert(product.clone(), idx);
        idx
    }

    /// Sets the recipe for `output`, replacing any previous one.
    ///
    /// An empty input list is still a recipe: the output is produced from nothing.
    pub fn set_recipe<I>(&mut self, output: &ProductKey, inputs: I)
    where
        I: IntoIterator<Item = (ProductKey, f64)>,
    {
        let out = self.vertex(output);
        let stale: Vec<_> = self
            .graph
            .edges_directed(out, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        for &(edge, _) in &stale {
            self.graph.remove_edge(edge);
        }
        for (input, quantity) in inputs {
            let inp = self.vertex(&input);
            self.graph.update_edge(out, inp, quantity);
        }
        self.recipes.insert(output.clone());
        for (_, target) in stale {
            self.prune(target);
        }
    }

    /// Drops a vertex that is neither an output nor consumed by any recipe.
    fn prune(&mut self, idx: NodeIndex) {
        let Some(product) = self.graph.node_weight(idx) else { return };
        if self.recipes.contains(product)
            || self.graph.neighbors_directed(idx, Direction::Incoming).next().is_some()
        {
            return;
        }
        if let Some(product) = self.graph.remove_node(idx) {
            self.index.remove(&product);
        }
    }

    /// True if there is a recipe for `output`.
    pub fn has_recipe(&self, output: &str) -> bool {
        self.recipes.contains(output)
    }

    /// True if the recipe for `output` consumes `input`. False when there is no recipe.
    pub fn consumes(&self, output: &str, input: &str) -> bool {
        self.quantity(output, input).is_some()
    }

    /// Units of `input` consumed per unit of `output`.
    pub fn quantity(&self, output: &str, input: &str) -> Option<f64> {
        if !self.recipes.contains(output) {
            return None;
        }
        let out = *self.index.get(output)?;
        let inp = *self.index.get(input)?;
        self.graph.find_edge(out, inp).and_then(|e| self.graph.edge_weight(e)).copied()
    }

    /// The inputs of the recipe for `output`, ordered by product name.
    pub fn recipe(&self, output: &str) -> Option<BTreeMap<&ProductKey, f64>> {
        if !self.recipes.contains(output) {
            return None;
        }
        let out = *self.index.get(output)?;
        Some(
            self.graph
                .edges_directed(out, Direction::Outgoing)
                .map(|e| (&self.graph[e.target()], *e.weight()))
                .collect(),
        )
    }

    /// Output products that have a recipe.
    pub fn outputs(&self) -> impl Iterator<Item = &ProductKey> {
        self.recipes.iter()
    }

    /// Every product mentioned by any recipe, as output or input.
    pub fn products(&self) -> impl Iterator<Item = &ProductKey> {
        self.index.keys()
    }

    /// Products ordered so that every input comes before the outputs made from it.
    ///
    /// Returns the product on a cycle if the recipes are circular.
    pub fn production_order(&self) -> Result<Vec<ProductKey>, ProductKey> {
        let order = toposort(&self.graph, None).map_err(|cycle| self.graph[cycle.node_id()].clone())?;
        // Edges run output -> input, so the topological order lists outputs first.
        Ok(order.into_iter().rev().map(|idx| self.graph[idx].clone()).collect())
    }

    /// True if no output has a recipe.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl From<RecipeTable> for BillOfMaterials {
    fn from(table: RecipeTable) -> Self {
        let mut bom = Self::new();
        for (output, inputs) in table {
            bom.set_recipe(&output, inputs);
        }
        bom
    }
}

impl From<BillOfMaterials> for RecipeTable {
    fn from(bom: BillOfMaterials) -> Self {
        bom.recipes
            .iter()
            .map(|output| {
                let inputs = bom
                    .recipe(&output.0)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(input, quantity)| (input.clone(), quantity))
                    .collect();
                (output.clone(), inputs)
            })
            .collect()
    }
}
