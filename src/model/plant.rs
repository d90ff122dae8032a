//! Plants: facilities that turn input products into outputs.

use super::bom::BillOfMaterials;
use super::error::ModelError;
use super::identity::{name_identity, Location, NodeKind, Product, ProductKey};
use super::node::{Facility, Node, ProductMap, SiteCosts};
use serde::{Deserialize, Serialize};

/// How a plant makes one output product.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantProduct {
    pub inputs: Vec<(ProductKey, f64)>,
    pub unit_cost: f64,
    pub maximum_throughput: f64,
    /// Production lead time in periods.
    pub time: u32,
}

impl PlantProduct {
    pub fn new(unit_cost: f64) -> Self {
        Self { inputs: Vec::new(), unit_cost, maximum_throughput: f64::INFINITY, time: 0 }
    }

    /// Adds `quantity` units of `input` per unit of output to the recipe.
    pub fn with_input(mut self, input: &Product, quantity: f64) -> Self {
        self.inputs.push((input.key(), quantity));
        self
    }

    pub fn with_maximum_throughput(mut self, units: f64) -> Self {
        self.maximum_throughput = units;
        self
    }

    pub fn with_time(mut self, periods: u32) -> Self {
        self.time = periods;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    facility: Facility,
    pub costs: SiteCosts,
    bill_of_materials: BillOfMaterials,
    unit_cost: ProductMap<f64>,
    maximum_throughput: ProductMap<f64>,
    time: ProductMap<u32>,
}

name_identity!(Plant => facility.name);

impl Plant {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            facility: Facility::new(name, location),
            costs: SiteCosts::default(),
            bill_of_materials: BillOfMaterials::new(),
            unit_cost: ProductMap::new(),
            maximum_throughput: ProductMap::new(),
            time: ProductMap::new(),
        }
    }

    pub fn with_costs(mut self, costs: SiteCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Declares that this plant produces `product`. Re-adding replaces the recipe and terms.
    pub fn add_product(&mut self, product: &Product, terms: PlantProduct) -> &mut Self {
        let key = product.key();
        self.bill_of_materials.set_recipe(&key, terms.inputs);
        self.unit_cost.insert(key.clone(), terms.unit_cost);
        self.maximum_throughput.insert(key.clone(), terms.maximum_throughput);
        self.time.insert(key, terms.time);
        self
    }

    /// True if this plant has a recipe for `output`.
    ///
    /// See [`Plant::has_bom_input`] to ask whether that recipe uses a given input.
    pub fn has_bom(&self, output: &Product) -> bool {
        self.bill_of_materials.has_recipe(output.name())
    }

    /// True if the recipe for `output` consumes `input`: the two-product
    /// form of [`Plant::has_bom`]. False when there is no recipe.
    pub fn has_bom_input(&self, output: &Product, input: &Product) -> bool {
        self.bill_of_materials.consumes(output.name(), input.name())
    }

    /// Units of `input` needed per unit of `output`.
    ///
    /// A missing recipe or input is an error, never zero consumption.
    pub fn get_bom(&self, output: &Product, input: &Product) -> Result<f64, ModelError> {
        self.bill_of_materials
            .quantity(output.name(), input.name())
            .ok_or_else(|| ModelError::MissingBomEntry {
                plant: self.facility.name.clone(),
                output: output.key(),
                input: input.key(),
            })
    }

    pub fn bill_of_materials(&self) -> &BillOfMaterials {
        &self.bill_of_materials
    }

    /// Products in an order where inputs precede the outputs made from them.
    pub fn production_order(&self) -> Result<Vec<ProductKey>, ModelError> {
        self.bill_of_materials.production_order().map_err(|product| ModelError::BomCycle {
            plant: self.facility.name.clone(),
            product,
        })
    }

    pub fn unit_cost(&self, product: &Product) -> Option<f64> {
        self.unit_cost.get(product.name()).copied()
    }

    /// Production lead time of `product` in periods.
    pub fn production_time(&self, product: &Product) -> Option<u32> {
        self.time.get(product.name()).copied()
    }
}

impl Node for Plant {
    fn kind(&self) -> NodeKind {
        NodeKind::Plant
    }

    fn facility(&self) -> &Facility {
        &self.facility
    }

    fn maximum_throughput(&self) -> Option<&ProductMap<f64>> {
        Some(&self.maximum_throughput)
    }

    fn configured_products(&self) -> Vec<&ProductKey> {
        self.unit_cost.keys().collect()
    }
}
