//! Route planning over a store-layout graph.
//!
//! Given a shopping list of section indices, the planner chooses the order
//! in which to visit them between the entrance and billing counter anchors,
//! then expands that ordering into the full node-by-node walk by stitching
//! together pairwise shortest paths.

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::constants::Weight;
use crate::error::NoValidRouteError;
use crate::graph::{Graph, NodeIndex};
use crate::statistics::PlanStats;

/// Search strategy used to order the stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exhaustive permutation search. Optimal, O(K!) in the list length, so
    /// only suitable for short shopping lists.
    Exact,
    /// Nearest-neighbor heuristic. O(K²) length queries, not optimal.
    Greedy,
}

/// A planned shopping route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Anchors and shopping-list sections in visiting order.
    pub stops: Vec<NodeIndex>,
    /// The full walk, including junction sections between stops.
    pub nodes: Vec<NodeIndex>,
    /// Total cost of the stop ordering.
    pub weight: Weight,
}

/// Plans routes over a read-only graph.
///
/// Pairwise shortest-path lengths are cached for the lifetime of the
/// planner, so the exact strategy runs at most (K+2)² searches for a list
/// of K sections.
pub struct RoutePlanner<'a> {
    pub stats: PlanStats,
    g: &'a Graph,
    entrance: NodeIndex,
    billing: NodeIndex,
    distances: FxHashMap<(NodeIndex, NodeIndex), Option<Weight>>,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(graph: &'a Graph, entrance: NodeIndex, billing: NodeIndex) -> Self {
        RoutePlanner {
            stats: PlanStats::default(),
            g: graph,
            entrance,
            billing,
            distances: FxHashMap::default(),
        }
    }

    /// Plan a route from the entrance to the billing counter that visits
    /// every entry of `shopping_list`. Duplicate entries are visited once
    /// per occurrence.
    pub fn plan(
        &mut self,
        shopping_list: &[NodeIndex],
        strategy: Strategy,
    ) -> Result<Route, NoValidRouteError> {
        self.stats.init();

        let (stops, weight) = match strategy {
            Strategy::Exact => self.exact_ordering(shopping_list),
            Strategy::Greedy => self.greedy_ordering(shopping_list),
        }?;

        let nodes = self.expand(&stops);
        self.stats.finish();

        debug!(
            "Planned route with {} stops, cost {weight}: {}",
            stops.len(),
            self.stats
        );

        Ok(Route {
            stops,
            nodes,
            weight,
        })
    }

    /// Memoized shortest-path length. `None` marks a disconnected pair.
    fn distance(&mut self, source: NodeIndex, target: NodeIndex) -> Option<Weight> {
        if let Some(&cached) = self.distances.get(&(source, target)) {
            return cached;
        }
        let length = self.g.shortest_path_length(source, target).ok();
        self.distances.insert((source, target), length);
        length
    }

    /// Cost of visiting the list in the given order, entrance to billing
    /// counter. `None` if any leg is unreachable.
    fn ordering_cost(&mut self, ordering: &[NodeIndex]) -> Option<Weight> {
        let mut cost = 0.0;
        let mut current = self.entrance;
        for &stop in ordering {
            cost += self.distance(current, stop)?;
            current = stop;
        }
        cost += self.distance(current, self.billing)?;
        Some(cost)
    }

    /// Enumerate all K! orders of the shopping list and keep the cheapest
    /// feasible one. Orderings with an unreachable leg are skipped; if none
    /// survives the route is infeasible.
    fn exact_ordering(
        &mut self,
        shopping_list: &[NodeIndex],
    ) -> Result<(Vec<NodeIndex>, Weight), NoValidRouteError> {
        let mut perm = shopping_list.to_vec();
        let mut best: Option<(Vec<NodeIndex>, Weight)> = None;

        // Heap's algorithm, iterative variant: produces each permutation by
        // a single swap of the previous one.
        let k = perm.len();
        let mut counters = vec![0usize; k];

        self.consider(&perm, &mut best);

        let mut i = 0;
        while i < k {
            if counters[i] < i {
                if i % 2 == 0 {
                    perm.swap(0, i);
                } else {
                    perm.swap(counters[i], i);
                }
                self.consider(&perm, &mut best);
                counters[i] += 1;
                i = 0;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }

        let (ordering, weight) = best.ok_or(NoValidRouteError)?;
        Ok((self.with_anchors(ordering), weight))
    }

    fn consider(&mut self, perm: &[NodeIndex], best: &mut Option<(Vec<NodeIndex>, Weight)>) {
        self.stats.orderings_considered += 1;

        if let Some(cost) = self.ordering_cost(perm) {
            // Strict comparison: the first ordering reaching the minimum
            // cost wins, which keeps repeated calls deterministic.
            let better = match best {
                Some((_, best_cost)) => cost < *best_cost,
                None => true,
            };
            if better {
                *best = Some((perm.to_vec(), cost));
            }
        }
    }

    /// Nearest-neighbor ordering: from the current position always walk to
    /// the closest remaining section. Ties are broken by shopping-list
    /// order.
    fn greedy_ordering(
        &mut self,
        shopping_list: &[NodeIndex],
    ) -> Result<(Vec<NodeIndex>, Weight), NoValidRouteError> {
        let mut remaining = shopping_list.to_vec();
        let mut ordering = Vec::with_capacity(shopping_list.len());
        let mut weight = 0.0;
        let mut current = self.entrance;

        while !remaining.is_empty() {
            let mut nearest: Option<(usize, Weight)> = None;
            for (i, &stop) in remaining.iter().enumerate() {
                if let Some(d) = self.distance(current, stop) {
                    if nearest.map_or(true, |(_, best)| d < best) {
                        nearest = Some((i, d));
                    }
                }
            }

            let (i, d) = nearest.ok_or(NoValidRouteError)?;
            current = remaining.remove(i);
            ordering.push(current);
            weight += d;
        }

        weight += self
            .distance(current, self.billing)
            .ok_or(NoValidRouteError)?;

        self.stats.orderings_considered += 1;

        Ok((self.with_anchors(ordering), weight))
    }

    fn with_anchors(&self, ordering: Vec<NodeIndex>) -> Vec<NodeIndex> {
        let mut stops = Vec::with_capacity(ordering.len() + 2);
        stops.push(self.entrance);
        stops.extend(ordering);
        stops.push(self.billing);
        stops
    }

    /// Expand a stop ordering into the full node-by-node walk. The shared
    /// boundary node of consecutive legs appears once. A leg whose
    /// endpoints are disconnected is dropped from the walk instead of
    /// failing the whole route.
    fn expand(&self, stops: &[NodeIndex]) -> Vec<NodeIndex> {
        let mut full = Vec::new();
        for pair in stops.windows(2) {
            match self.g.shortest_path(pair[0], pair[1]) {
                Ok(sp) => full.extend_from_slice(&sp.nodes[..sp.nodes.len() - 1]),
                Err(err) => warn!("Dropping leg from walk: {err}"),
            }
        }
        full.push(stops[stops.len() - 1]);
        full
    }
}

/// Plan a route visiting every entry of `shopping_list`, from `entrance` to
/// `billing`.
///
/// Convenience wrapper around [`RoutePlanner`] for callers that do not need
/// planning statistics.
pub fn plan_route(
    graph: &Graph,
    entrance: NodeIndex,
    billing: NodeIndex,
    shopping_list: &[NodeIndex],
    strategy: Strategy,
) -> Result<Route, NoValidRouteError> {
    RoutePlanner::new(graph, entrance, billing).plan(shopping_list, strategy)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::layout::{store_layout, BILLING_COUNTER, ENTRANCE};

    use super::*;
    // Disambiguate from `proptest::prelude::Strategy` (trait) pulled in by the
    // glob import above; the planner's `Strategy` enum is what the tests mean.
    use super::Strategy;

    /// Entrance - A (1), A - B (1), B - Billing (1), A - Billing (5).
    /// Going through B is cheaper than the direct A - Billing aisle.
    fn detour_graph() -> Graph {
        Graph::from_layout(
            &["Entrance", "A", "B", "Billing Counter"],
            &[
                ("Entrance", "A", 1.0),
                ("A", "B", 1.0),
                ("B", "Billing Counter", 1.0),
                ("A", "Billing Counter", 5.0),
            ],
        )
        .unwrap()
    }

    fn anchors(g: &Graph) -> (NodeIndex, NodeIndex) {
        (
            g.node_index_of("Entrance").unwrap(),
            g.node_index_of("Billing Counter").unwrap(),
        )
    }

    fn resolve(g: &Graph, names: &[&str]) -> Vec<NodeIndex> {
        names
            .iter()
            .map(|&name| g.node_index_of(name).unwrap())
            .collect()
    }

    fn brute_force_permutations(items: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
        if items.is_empty() {
            return vec![Vec::new()];
        }
        let mut all = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let item = rest.remove(i);
            for mut perm in brute_force_permutations(&rest) {
                perm.insert(0, item);
                all.push(perm);
            }
        }
        all
    }

    fn ordering_cost(
        g: &Graph,
        entrance: NodeIndex,
        billing: NodeIndex,
        ordering: &[NodeIndex],
    ) -> Option<Weight> {
        let mut cost = 0.0;
        let mut current = entrance;
        for &stop in ordering {
            cost += g.shortest_path_length(current, stop).ok()?;
            current = stop;
        }
        cost += g.shortest_path_length(current, billing).ok()?;
        Some(cost)
    }

    #[test]
    fn takes_the_detour_through_b() {
        let g = detour_graph();
        let (entrance, billing) = anchors(&g);
        let list = resolve(&g, &["A"]);

        let route = plan_route(&g, entrance, billing, &list, Strategy::Exact).unwrap();

        assert_eq!(route.nodes, resolve(&g, &["Entrance", "A", "B", "Billing Counter"]));
        assert_relative_eq!(route.weight, 3.0);
    }

    #[test]
    fn empty_list_is_the_direct_path() {
        let g = detour_graph();
        let (entrance, billing) = anchors(&g);

        for strategy in [Strategy::Exact, Strategy::Greedy] {
            let route = plan_route(&g, entrance, billing, &[], strategy).unwrap();
            assert_eq!(route.stops, vec![entrance, billing]);
            assert_eq!(
                route.nodes,
                resolve(&g, &["Entrance", "A", "B", "Billing Counter"])
            );
            assert_relative_eq!(route.weight, 3.0);
        }
    }

    #[test]
    fn unreachable_billing_counter_is_no_valid_route() {
        let g = Graph::from_layout(
            &["Entrance", "Produce", "Billing Counter"],
            &[("Entrance", "Produce", 2.0)],
        )
        .unwrap();
        let (entrance, billing) = anchors(&g);
        let list = resolve(&g, &["Produce"]);

        for strategy in [Strategy::Exact, Strategy::Greedy] {
            assert_eq!(
                plan_route(&g, entrance, billing, &list, strategy),
                Err(NoValidRouteError)
            );
        }
    }

    #[test]
    fn unreachable_item_is_no_valid_route() {
        let g = Graph::from_layout(
            &["Entrance", "Island", "Billing Counter"],
            &[("Entrance", "Billing Counter", 2.0)],
        )
        .unwrap();
        let (entrance, billing) = anchors(&g);
        let list = resolve(&g, &["Island"]);

        for strategy in [Strategy::Exact, Strategy::Greedy] {
            assert_eq!(
                plan_route(&g, entrance, billing, &list, strategy),
                Err(NoValidRouteError)
            );
        }
    }

    #[test]
    fn duplicates_are_visited_once_per_occurrence() {
        let g = detour_graph();
        let (entrance, billing) = anchors(&g);
        let a = g.node_index_of("A").unwrap();

        let route = plan_route(&g, entrance, billing, &[a, a], Strategy::Exact).unwrap();

        assert_eq!(route.stops, vec![entrance, a, a, billing]);
        // The zero-length leg between the two occurrences adds no nodes.
        assert_eq!(route.nodes, resolve(&g, &["Entrance", "A", "B", "Billing Counter"]));
    }

    #[test]
    fn exact_matches_brute_force() {
        let g = store_layout();
        let (entrance, billing) = anchors(&g);
        let list = resolve(&g, &["Cheese", "Snacks", "Bread", "Dairy"]);

        let route = plan_route(&g, entrance, billing, &list, Strategy::Exact).unwrap();

        for perm in brute_force_permutations(&list) {
            let cost = ordering_cost(&g, entrance, billing, &perm).unwrap();
            assert!(route.weight <= cost + 1e-9);
        }
    }

    #[test]
    fn exact_considers_every_permutation() {
        let g = store_layout();
        let (entrance, billing) = anchors(&g);
        let list = resolve(&g, &["Cheese", "Snacks", "Bread", "Dairy"]);

        let mut planner = RoutePlanner::new(&g, entrance, billing);
        planner.plan(&list, Strategy::Exact).unwrap();

        assert_eq!(planner.stats.orderings_considered, 24);
    }

    #[test]
    fn exact_planning_is_deterministic() {
        let g = store_layout();
        let (entrance, billing) = anchors(&g);
        let list = resolve(&g, &["Milk", "Frozen", "Snacks"]);

        let first = plan_route(&g, entrance, billing, &list, Strategy::Exact).unwrap();
        let second = plan_route(&g, entrance, billing, &list, Strategy::Exact).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn greedy_walks_to_the_nearest_section_first() {
        let g = store_layout();
        let (entrance, billing) = anchors(&g);
        // Produce is 2 from the entrance, Pasta 8.
        let list = resolve(&g, &["Pasta", "Produce"]);

        let route = plan_route(&g, entrance, billing, &list, Strategy::Greedy).unwrap();

        assert_eq!(
            route.stops,
            resolve(&g, &["Entrance", "Produce", "Pasta", "Billing Counter"])
        );
    }

    #[test]
    fn dropped_leg_keeps_the_rest_of_the_walk() {
        let g = Graph::from_layout(
            &["Entrance", "Island", "Billing Counter"],
            &[("Entrance", "Billing Counter", 2.0)],
        )
        .unwrap();
        let (entrance, billing) = anchors(&g);
        let island = g.node_index_of("Island").unwrap();

        // Feed an infeasible ordering straight into expansion: both legs
        // touching the island are dropped, the walk ends at the billing
        // counter regardless.
        let planner = RoutePlanner::new(&g, entrance, billing);
        let walk = planner.expand(&[entrance, island, billing]);

        assert_eq!(walk, vec![billing]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn route_visits_every_item(picks in proptest::collection::vec(0usize..19, 0..5)) {
            let g = store_layout();
            let entrance = g.node_index_of(ENTRANCE).unwrap();
            let billing = g.node_index_of(BILLING_COUNTER).unwrap();

            // Skip the two anchors, sample from the 19 item sections.
            let list: Vec<NodeIndex> = picks.iter().map(|&i| NodeIndex::new(i + 1)).collect();

            for strategy in [Strategy::Exact, Strategy::Greedy] {
                let route = plan_route(&g, entrance, billing, &list, strategy).unwrap();

                prop_assert_eq!(route.nodes.first(), Some(&entrance));
                prop_assert_eq!(route.nodes.last(), Some(&billing));
                prop_assert_eq!(route.stops.len(), list.len() + 2);
                for item in &list {
                    prop_assert!(route.nodes.contains(item));
                }
            }
        }

        #[test]
        fn greedy_is_never_cheaper_than_exact(picks in proptest::collection::vec(0usize..19, 0..5)) {
            let g = store_layout();
            let entrance = g.node_index_of(ENTRANCE).unwrap();
            let billing = g.node_index_of(BILLING_COUNTER).unwrap();

            let list: Vec<NodeIndex> = picks.iter().map(|&i| NodeIndex::new(i + 1)).collect();

            let exact = plan_route(&g, entrance, billing, &list, Strategy::Exact).unwrap();
            let greedy = plan_route(&g, entrance, billing, &list, Strategy::Greedy).unwrap();

            prop_assert!(greedy.weight + 1e-9 >= exact.weight);
        }
    }
}
