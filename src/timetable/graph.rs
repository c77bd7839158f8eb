use itertools::Itertools;

use crate::model::schedule::{ConnectionGraph, LineTimetables};

/// Folds every route's consecutive stop pairs into one directed multigraph.
///
/// Edge lists keep one entry per traversal, so a route id shows up once for
/// every time its route drives the edge. Termini contribute no outgoing
/// edges. With routes in a fixed order the result is fully deterministic.
pub fn build_connection_graph(timetables: &LineTimetables) -> ConnectionGraph {
    let mut graph = ConnectionGraph::new();

    for (route_id, stops) in timetables {
        for (stop, next_stop) in stops.keys().tuple_windows() {
            graph
                .entry(stop.clone())
                .or_default()
                .entry(next_stop.clone())
                .or_default()
                .push(route_id.clone());
        }
    }

    graph
}
