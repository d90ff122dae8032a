//! The `SupplyChainNetwork` aggregate: owns every entity, the demand list and
//! the derived lane adjacency index.
//!
//! Entities are registered once through `add_*` and looked up through
//! `get_*`. Nothing is ever removed. Once built, the network is handed
//! read-only to whatever engine consumes it; it is `Send + Sync` and needs no
//! internal locking for that.

pub mod adjacency;
pub mod settings;

pub use adjacency::LaneId;
pub use settings::PlanningSettings;

use crate::model::{
    Customer, Demand, Lane, Location, ModelError, Node, NodeKey, NodeKind, Plant, Product, ProductKey,
    Storage, Supplier,
};
use adjacency::AdjacencyIndex;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "NetworkRecord")]
pub struct SupplyChainNetwork {
    products: BTreeMap<ProductKey, Product>,
    suppliers: BTreeMap<String, Supplier>,
    plants: BTreeMap<String, Plant>,
    storages: BTreeMap<String, Storage>,
    customers: BTreeMap<String, Customer>,
    lanes: Vec<Lane>,
    demands: Vec<Demand>,
    settings: PlanningSettings,

    // Derived from `lanes`; rebuilt on load.
    #[serde(skip)]
    adjacency: AdjacencyIndex,
}

/// The serialized shape of a network, without the derived index.
#[derive(Deserialize)]
struct NetworkRecord {
    products: BTreeMap<ProductKey, Product>,
    suppliers: BTreeMap<String, Supplier>,
    plants: BTreeMap<String, Plant>,
    storages: BTreeMap<String, Storage>,
    customers: BTreeMap<String, Customer>,
    lanes: Vec<Lane>,
    demands: Vec<Demand>,
    #[serde(default)]
    settings: PlanningSettings,
}

/// Loading checks what the builder methods would have checked on the way in.
impl TryFrom<NetworkRecord> for SupplyChainNetwork {
    type Error = ModelError;

    fn try_from(record: NetworkRecord) -> Result<Self, ModelError> {
        record.settings.validate()?;
        for demand in &record.demands {
            demand.validate()?;
        }
        for (key, product) in &record.products {
            if key.0 != product.name() {
                return Err(ModelError::KeyMismatch { key: key.0.clone(), name: product.name().to_string() });
            }
        }
        check_keys(&record.suppliers)?;
        check_keys(&record.plants)?;
        check_keys(&record.storages)?;
        check_keys(&record.customers)?;

        let adjacency = AdjacencyIndex::from_lanes(&record.lanes);
        debug!(lanes = record.lanes.len(), demands = record.demands.len(), "loaded network");
        Ok(Self {
            products: record.products,
            suppliers: record.suppliers,
            plants: record.plants,
            storages: record.storages,
            customers: record.customers,
            lanes: record.lanes,
            demands: record.demands,
            settings: record.settings,
            adjacency,
        })
    }
}

fn check_keys<N: Node>(set: &BTreeMap<String, N>) -> Result<(), ModelError> {
    match set.iter().find(|(key, node)| key.as_str() != node.name()) {
        Some((key, node)) => Err(ModelError::KeyMismatch { key: key.clone(), name: node.name().to_string() }),
        None => Ok(()),
    }
}

/// Inserts `node` under its name. A node with the same name is replaced.
fn register<N: Node>(set: &mut BTreeMap<String, N>, node: N) -> &mut N {
    match set.entry(node.name().to_string()) {
        Entry::Occupied(mut slot) => {
            warn!(node = %node.key(), "replacing a registered node with the same name");
            *slot.get_mut() = node;
            slot.into_mut()
        }
        Entry::Vacant(slot) => {
            debug!(node = %node.key(), "registered node");
            slot.insert(node)
        }
    }
}

impl SupplyChainNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PlanningSettings) -> Result<Self, ModelError> {
        settings.validate()?;
        Ok(Self { settings, ..Self::default() })
    }

    pub fn settings(&self) -> &PlanningSettings {
        &self.settings
    }

    pub fn horizon(&self) -> usize {
        self.settings.horizon
    }

    pub fn discount_factor(&self) -> f64 {
        self.settings.discount_factor
    }

    // --- Registration ---

    /// Registers `product`. A product with the same name is replaced.
    pub fn add_product(&mut self, product: Product) -> &Product {
        match self.products.entry(product.key()) {
            Entry::Occupied(mut slot) => {
                warn!(product = product.name(), "replacing a registered product with the same name");
                *slot.get_mut() = product;
                slot.into_mut()
            }
            Entry::Vacant(slot) => {
                debug!(product = product.name(), "registered product");
                slot.insert(product)
            }
        }
    }

    pub fn add_supplier(&mut self, supplier: Supplier) -> &mut Supplier {
        register(&mut self.suppliers, supplier)
    }

    pub fn add_plant(&mut self, plant: Plant) -> &mut Plant {
        register(&mut self.plants, plant)
    }

    pub fn add_storage(&mut self, storage: Storage) -> &mut Storage {
        register(&mut self.storages, storage)
    }

    pub fn add_customer(&mut self, customer: Customer) -> &mut Customer {
        register(&mut self.customers, customer)
    }

    /// Appends `lane` and indexes it under both endpoints.
    ///
    /// Lanes are never deduplicated: adding the same lane twice yields two
    /// parallel lanes. Endpoints need not be registered yet.
    pub fn add_lane(&mut self, lane: Lane) -> &Lane {
        let id = LaneId::new(self.lanes.len());
        if self.node(&lane.origin).is_none() || self.node(&lane.destination).is_none() {
            warn!(lane = id.0, origin = %lane.origin, destination = %lane.destination, "lane endpoint is not registered");
        }
        self.adjacency.record(id, &lane);
        debug!(lane = id.0, origin = %lane.origin, destination = %lane.destination, "added lane");
        self.lanes.push(lane);
        &self.lanes[id.index()]
    }

    /// Records that `customer` needs `demand[t]` units of `product` in each period `t`.
    ///
    /// Fails with `BadParameter` unless `0 <= service_level <= 1`; nothing is
    /// recorded on failure.
    pub fn add_demand(
        &mut self,
        customer: &Customer,
        product: &Product,
        demand: Vec<f64>,
        service_level: f64,
    ) -> Result<&Demand, ModelError> {
        self.add_demand_record(Demand::new(customer, product, demand, service_level))
    }

    /// Appends a fully built demand record after validating it.
    ///
    /// The record must name a customer; any other kind fails with `WrongNodeKind`.
    pub fn add_demand_record(&mut self, demand: Demand) -> Result<&Demand, ModelError> {
        demand.validate()?;
        debug!(customer = %demand.customer, product = %demand.product, periods = demand.demand.len(), "added demand");
        self.demands.push(demand);
        Ok(&self.demands[self.demands.len() - 1])
    }

    // --- Queries ---

    fn find_demand(&self, customer: &Customer, product: &Product) -> Option<&Demand> {
        self.demands.iter().find(|d| d.matches(customer, product))
    }

    /// Demand of `customer` for `product` in `period`; zero if none was recorded.
    ///
    /// When several records match, the first one registered answers.
    pub fn get_demand(&self, customer: &Customer, product: &Product, period: usize) -> Result<f64, ModelError> {
        match self.find_demand(customer, product) {
            Some(demand) => demand.quantity_at(period),
            None => Ok(0.0),
        }
    }

    /// Service level of `customer` for `product`; full service (1.0) if none was recorded.
    pub fn get_service_level(&self, customer: &Customer, product: &Product) -> f64 {
        self.find_demand(customer, product).map_or(1.0, |d| d.service_level)
    }

    /// Lanes whose destination is `node`, in the order they were added.
    pub fn get_lanes_in<N: Node + ?Sized>(&self, node: &N) -> Vec<&Lane> {
        self.lanes_for(self.adjacency.incoming(&node.key()))
    }

    /// Lanes whose origin is `node`, in the order they were added.
    pub fn get_lanes_out<N: Node + ?Sized>(&self, node: &N) -> Vec<&Lane> {
        self.lanes_for(self.adjacency.outgoing(&node.key()))
    }

    /// Ids of the lanes entering `node`, in the order they were added.
    pub fn lane_ids_in(&self, node: &NodeKey) -> &[LaneId] {
        self.adjacency.incoming(node)
    }

    pub fn lane_ids_out(&self, node: &NodeKey) -> &[LaneId] {
        self.adjacency.outgoing(node)
    }

    fn lanes_for(&self, ids: &[LaneId]) -> Vec<&Lane> {
        ids.iter().map(|id| &self.lanes[id.index()]).collect()
    }

    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(id.index())
    }

    // --- Accessors ---

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    pub fn plants(&self) -> impl Iterator<Item = &Plant> {
        self.plants.values()
    }

    pub fn storages(&self) -> impl Iterator<Item = &Storage> {
        self.storages.values()
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// Every registered node, grouped by variant.
    pub fn nodes(&self) -> impl Iterator<Item = &dyn Node> {
        self.suppliers
            .values()
            .map(|n| n as &dyn Node)
            .chain(self.plants.values().map(|n| n as &dyn Node))
            .chain(self.storages.values().map(|n| n as &dyn Node))
            .chain(self.customers.values().map(|n| n as &dyn Node))
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    pub fn has_product(&self, product: &ProductKey) -> bool {
        self.products.contains_key(product)
    }

    pub fn supplier(&self, name: &str) -> Option<&Supplier> {
        self.suppliers.get(name)
    }

    pub fn supplier_mut(&mut self, name: &str) -> Option<&mut Supplier> {
        self.suppliers.get_mut(name)
    }

    pub fn plant(&self, name: &str) -> Option<&Plant> {
        self.plants.get(name)
    }

    pub fn plant_mut(&mut self, name: &str) -> Option<&mut Plant> {
        self.plants.get_mut(name)
    }

    pub fn storage(&self, name: &str) -> Option<&Storage> {
        self.storages.get(name)
    }

    pub fn storage_mut(&mut self, name: &str) -> Option<&mut Storage> {
        self.storages.get_mut(name)
    }

    pub fn customer(&self, name: &str) -> Option<&Customer> {
        self.customers.get(name)
    }

    pub fn customer_mut(&mut self, name: &str) -> Option<&mut Customer> {
        self.customers.get_mut(name)
    }

    /// The registered node with this identity, seen through its capability set.
    pub fn node(&self, key: &NodeKey) -> Option<&dyn Node> {
        match key.kind {
            NodeKind::Supplier => self.suppliers.get(&key.name).map(|n| n as &dyn Node),
            NodeKind::Plant => self.plants.get(&key.name).map(|n| n as &dyn Node),
            NodeKind::Storage => self.storages.get(&key.name).map(|n| n as &dyn Node),
            NodeKind::Customer => self.customers.get(&key.name).map(|n| n as &dyn Node),
        }
    }

    pub fn location_of(&self, key: &NodeKey) -> Option<&Location> {
        self.node(key).map(|n| n.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlantProduct, StorageProduct, SupplierProduct};

    fn loc() -> Location {
        Location::new(0.0, 0.0)
    }

    #[test]
    fn test_network_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SupplyChainNetwork>();
    }

    #[test]
    fn test_adjacency_follows_insertion_order() {
        let mut net = SupplyChainNetwork::new();
        let a = net.add_storage(Storage::new("A", loc())).clone();
        let b = net.add_storage(Storage::new("B", loc())).clone();
        let c = net.add_storage(Storage::new("C", loc())).clone();
        let d = net.add_storage(Storage::new("D", loc())).clone();

        let l1 = net.add_lane(Lane::new(&a, &b).with_unit_cost(1.0)).clone();
        let l2 = net.add_lane(Lane::new(&a, &c).with_unit_cost(2.0)).clone();
        let l3 = net.add_lane(Lane::new(&d, &b).with_unit_cost(3.0)).clone();

        assert_eq!(net.get_lanes_out(&a), vec![&l1, &l2]);
        assert_eq!(net.get_lanes_in(&b), vec![&l1, &l3]);
        assert!(net.get_lanes_out(&c).is_empty());
        assert_eq!(net.get_lanes_in(&c), vec![&l2]);
        assert_eq!(net.lane_ids_out(&d.key()), &[LaneId(2)]);
    }

    #[test]
    fn test_unregistered_node_has_no_lanes() {
        let net = SupplyChainNetwork::new();
        let ghost = Customer::new("Ghost", loc());
        assert!(net.get_lanes_in(&ghost).is_empty());
        assert!(net.get_lanes_out(&ghost).is_empty());
    }

    #[test]
    fn test_duplicate_lanes_are_parallel_edges() {
        let mut net = SupplyChainNetwork::new();
        let s = net.add_supplier(Supplier::new("S", loc())).clone();
        let p = net.add_plant(Plant::new("P", loc())).clone();
        let lane = Lane::new(&s, &p);
        net.add_lane(lane.clone());
        net.add_lane(lane);
        assert_eq!(net.lanes().len(), 2);
        assert_eq!(net.get_lanes_out(&s).len(), 2);
        assert_eq!(net.get_lanes_in(&p).len(), 2);
    }

    #[test]
    fn test_same_name_registration_keeps_one_entry_last_wins() {
        let mut net = SupplyChainNetwork::new();
        net.add_product(Product::new("widget", 1.0));
        net.add_product(Product::new("widget", 2.0));
        assert_eq!(net.products().count(), 1);
        assert_eq!(net.product("widget").map(|p| p.unit_holding_cost), Some(2.0));

        net.add_customer(Customer::new("Shop", Location::new(0.1, 0.1)));
        net.add_customer(Customer::new("Shop", Location::new(0.2, 0.2)));
        assert_eq!(net.customers().count(), 1);
        assert_eq!(net.customer("Shop").map(|c| c.location().latitude), Some(0.2));
    }

    #[test]
    fn test_same_name_in_different_roles_are_different_nodes() {
        let mut net = SupplyChainNetwork::new();
        net.add_supplier(Supplier::new("Hub", loc()));
        net.add_customer(Customer::new("Hub", loc()));
        assert_eq!(net.nodes().count(), 2);
    }

    #[test]
    fn test_demand_validation_rejects_without_appending() {
        let mut net = SupplyChainNetwork::new();
        let c = net.add_customer(Customer::new("Shop", loc())).clone();
        let p = net.add_product(Product::new("widget", 1.0)).clone();

        let err = net.add_demand(&c, &p, vec![10.0, 20.0], 1.2).unwrap_err();
        assert!(matches!(err, ModelError::BadParameter { name: "service_level", .. }));
        assert!(net.demands().is_empty());

        net.add_demand(&c, &p, vec![10.0, 20.0], 0.9).unwrap();
        assert_eq!(net.get_demand(&c, &p, 1), Ok(20.0));
        assert_eq!(net.get_service_level(&c, &p), 0.9);
    }

    #[test]
    fn test_demand_defaults_when_nothing_recorded() {
        let net = SupplyChainNetwork::new();
        let c = Customer::new("Shop", loc());
        let p = Product::new("widget", 1.0);
        assert_eq!(net.get_demand(&c, &p, 7), Ok(0.0));
        assert_eq!(net.get_service_level(&c, &p), 1.0);
    }

    #[test]
    fn test_demand_period_beyond_series_fails() {
        let mut net = SupplyChainNetwork::new();
        let c = Customer::new("Shop", loc());
        let p = Product::new("widget", 1.0);
        net.add_demand(&c, &p, vec![10.0, 20.0], 1.0).unwrap();
        assert!(matches!(
            net.get_demand(&c, &p, 2),
            Err(ModelError::PeriodOutOfRange { period: 2, len: 2, .. })
        ));
    }

    #[test]
    fn test_first_matching_demand_answers() {
        let mut net = SupplyChainNetwork::new();
        let c = Customer::new("Shop", loc());
        let p = Product::new("widget", 1.0);
        net.add_demand(&c, &p, vec![5.0], 0.8).unwrap();
        net.add_demand(&c, &p, vec![9.0], 0.5).unwrap();
        assert_eq!(net.get_demand(&c, &p, 0), Ok(5.0));
        assert_eq!(net.get_service_level(&c, &p), 0.8);
    }

    #[test]
    fn test_nodes_can_be_configured_after_registration() {
        let mut net = SupplyChainNetwork::new();
        let widget = net.add_product(Product::new("widget", 1.0)).clone();
        let frame = net.add_product(Product::new("frame", 1.0)).clone();
        net.add_storage(Storage::new("DC", loc()));
        net.add_plant(Plant::new("Mill", loc()));

        if let Some(dc) = net.storage_mut("DC") {
            dc.add_product(&widget, StorageProduct::default().with_maximum_units(50.0));
        }
        if let Some(mill) = net.plant_mut("Mill") {
            mill.add_product(&widget, PlantProduct::new(2.0).with_input(&frame, 3.0));
        }
        net.add_supplier(Supplier::new("S", loc()))
            .add_product(&frame, SupplierProduct::new(1.0));

        let dc = net.storage("DC").unwrap();
        assert_eq!(dc.get_maximum_storage(&widget), Ok(50.0));
        assert_eq!(net.plant("Mill").unwrap().get_bom(&widget, &frame), Ok(3.0));
        assert!(net.supplier("S").unwrap().supplies(&frame));
    }

    #[test]
    fn test_node_lookup_by_key() {
        let mut net = SupplyChainNetwork::new();
        net.add_storage(Storage::new("DC", Location::new(0.5, 0.25)));
        let key = NodeKey::new(NodeKind::Storage, "DC");
        assert_eq!(net.node(&key).map(|n| n.kind()), Some(NodeKind::Storage));
        assert_eq!(net.location_of(&key), Some(&Location::new(0.5, 0.25)));
        assert!(net.node(&NodeKey::new(NodeKind::Plant, "DC")).is_none());
    }

    #[test]
    fn test_with_settings_validates() {
        assert!(SupplyChainNetwork::with_settings(PlanningSettings { horizon: 0, discount_factor: 1.0 }).is_err());
        let net = SupplyChainNetwork::with_settings(PlanningSettings::new(12, 0.9).unwrap()).unwrap();
        assert_eq!(net.horizon(), 12);
        assert_eq!(net.discount_factor(), 0.9);
    }

    #[test]
    fn test_json_round_trip_rebuilds_adjacency() {
        let mut net = SupplyChainNetwork::with_settings(PlanningSettings::new(2, 1.0).unwrap()).unwrap();
        let ore = net.add_product(Product::new("ore", 0.5)).clone();
        let s = net.add_supplier(Supplier::new("Mine", loc())).clone();
        let c = net.add_customer(Customer::new("Shop", loc())).clone();
        net.supplier_mut("Mine")
            .unwrap()
            .add_product(&ore, SupplierProduct::new(3.0).with_maximum_throughput(40.0));
        net.add_lane(Lane::new(&s, &c).with_can_ship(vec![true, false]));
        net.add_lane(Lane::new(&s, &c).with_unit_cost(9.0));
        net.add_demand(&c, &ore, vec![1.0, 2.0], 0.95).unwrap();

        let json = serde_json::to_string(&net).unwrap();
        let restored: SupplyChainNetwork = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.get_lanes_out(&s), net.get_lanes_out(&s));
        assert_eq!(restored.get_lanes_in(&c).len(), 2);
        assert_eq!(restored.get_demand(&c, &ore, 1), Ok(2.0));
        assert_eq!(restored.supplier("Mine").unwrap().get_maximum_throughput(&ore), Ok(40.0));
        assert_eq!(restored.horizon(), 2);
    }

    #[test]
    fn test_lane_ids_resolve_to_lanes() {
        let mut net = SupplyChainNetwork::new();
        let a = net.add_storage(Storage::new("A", loc())).clone();
        let b = net.add_storage(Storage::new("B", loc())).clone();
        net.add_lane(Lane::new(&a, &b).with_unit_cost(1.0));
        net.add_lane(Lane::new(&b, &a).with_unit_cost(2.0));
        net.add_lane(Lane::new(&a, &b).with_unit_cost(3.0));

        let ids = net.lane_ids_in(&b.key()).to_vec();
        assert_eq!(ids, vec![LaneId(0), LaneId(2)]);
        let costs: Vec<f64> = ids.iter().filter_map(|&id| net.lane(id)).map(|l| l.unit_cost).collect();
        assert_eq!(costs, vec![1.0, 3.0]);
        assert_eq!(net.lane(LaneId(1)).map(|l| &l.origin), Some(&b.key()));
        assert!(net.lane(LaneId(3)).is_none());
    }

    #[test]
    fn test_demand_keyed_to_a_supplier_is_refused() {
        let mut net = SupplyChainNetwork::new();
        let c = net.add_customer(Customer::new("Shop", loc())).clone();
        net.add_supplier(Supplier::new("Shop", loc()));
        let p = net.add_product(Product::new("widget", 1.0)).clone();

        let mut record = Demand::new(&c, &p, vec![9.0], 0.5);
        record.customer = NodeKey::new(NodeKind::Supplier, "Shop");
        assert!(matches!(net.add_demand_record(record), Err(ModelError::WrongNodeKind { .. })));
        assert!(net.demands().is_empty());
        assert_eq!(net.get_demand(&c, &p, 0), Ok(0.0));
        assert_eq!(net.get_service_level(&c, &p), 1.0);
    }

    fn loadable_network() -> serde_json::Value {
        let mut net = SupplyChainNetwork::with_settings(PlanningSettings::new(1, 1.0).unwrap()).unwrap();
        let ore = net.add_product(Product::new("ore", 0.5)).clone();
        net.add_supplier(Supplier::new("A", loc()));
        let c = net.add_customer(Customer::new("Shop", loc())).clone();
        net.add_demand(&c, &ore, vec![1.0], 0.9).unwrap();
        serde_json::to_value(&net).unwrap()
    }

    #[test]
    fn test_loading_checks_what_registration_checks() {
        let good = loadable_network();
        assert!(serde_json::from_value::<SupplyChainNetwork>(good.clone()).is_ok());

        let mut bad_settings = good.clone();
        bad_settings["settings"] = serde_json::json!({ "horizon": 0, "discount_factor": 42.0 });
        let err = serde_json::from_value::<SupplyChainNetwork>(bad_settings).unwrap_err();
        assert!(err.to_string().contains("horizon"), "Msg: {}", err);

        let mut bad_discount = good.clone();
        bad_discount["settings"] = serde_json::json!({ "horizon": 3, "discount_factor": 42.0 });
        let err = serde_json::from_value::<SupplyChainNetwork>(bad_discount).unwrap_err();
        assert!(err.to_string().contains("discount_factor"), "Msg: {}", err);

        let mut bad_demand = good.clone();
        bad_demand["demands"][0]["service_level"] = serde_json::json!(7.5);
        bad_demand["demands"][0]["probability"] = serde_json::json!(-3.0);
        let err = serde_json::from_value::<SupplyChainNetwork>(bad_demand).unwrap_err();
        assert!(err.to_string().contains("service_level"), "Msg: {}", err);

        let mut misfiled = good.clone();
        misfiled["suppliers"]["A"]["facility"]["name"] = serde_json::json!("B");
        let err = serde_json::from_value::<SupplyChainNetwork>(misfiled).unwrap_err();
        assert!(err.to_string().contains("stored under 'A' is named 'B'"), "Msg: {}", err);

        let mut misfiled_product = good;
        misfiled_product["products"]["ore"]["name"] = serde_json::json!("slag");
        assert!(serde_json::from_value::<SupplyChainNetwork>(misfiled_product).is_err());
    }
}
