//! cairo: runs every planning algorithm over the Greater Cairo dataset.
//!
//! ```text
//! cairo [--data <dir>] [--config <planner.json>] [--report <out.json>]
//! ```
//!
//! Without `--data` the embedded tables in [`data`] are used.  `RUST_LOG=debug`
//! shows per-query summaries from the library crates.

mod data;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use serde_json::json;

use tp_core::{NodeId, PlannerConfig, TimeOfDay};
use tp_data::{load_dataset, Dataset};
use tp_maintenance::{candidates, greedy_maintenance, optimize_maintenance, MaintenancePlan};
use tp_network::{
    find_nearest_facility, find_path, minimum_spanning_network, CongestionModel, Graph, RouteCache,
};
use tp_transit::{
    analyze_transfer_points, legs_from_network, public_transport_dp, station_populations,
    stations_from_graph,
};

// ── Scenario ──────────────────────────────────────────────────────────────────

const EMERGENCY_START:    &str              = "Maadi";
const TRIP:               (&str, &str)      = ("Maadi", "Heliopolis");
const CLOSED_ROAD:        (&str, &str)      = ("Downtown Cairo", "Heliopolis");
const MANDATORY:          [(&str, &str); 2] = [("F9", "3"), ("F10", "1")];
const TRANSIT_START:      &str              = "Maadi";
const MAX_VEHICLES:       usize             = 10;
const MAINTENANCE_BUDGET: f64               = 500.0; // million EGP

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Args {
    data:   Option<PathBuf>,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().map(PathBuf::from).with_context(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--data"   => args.data = Some(value()?),
            "--config" => args.config = Some(value()?),
            "--report" => args.report = Some(value()?),
            other      => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> Result<PlannerConfig> {
    let config: PlannerConfig = match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
        }
        None => PlannerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

// ── Formatting ────────────────────────────────────────────────────────────────

fn names(graph: &Graph, nodes: &[NodeId]) -> String {
    nodes.iter().map(|&n| graph.name(n)).collect::<Vec<_>>().join(" → ")
}

fn print_plan(graph: &Graph, label: &str, plan: &MaintenancePlan) {
    println!(
        "{label:<8} improvement {:>5.1}  cost {:>6.1}  roads {}",
        plan.improvement,
        plan.total_cost,
        plan.len()
    );
    for &id in &plan.selected {
        let road = graph.road(id);
        println!("           {} – {}", graph.name(road.from), graph.name(road.to));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;

    let dataset: Dataset = match &args.data {
        Some(dir) => load_dataset(dir).with_context(|| format!("loading {}", dir.display()))?,
        None => data::cairo()?,
    };
    let graph = dataset.graph()?;
    if args.data.is_none() {
        dataset.report_dangling(&graph);
    }

    println!("=== cairo — transport planning ===");
    println!(
        "Road network: {} nodes, {} roads, {} candidate roads, {} traffic samples",
        graph.node_count(),
        graph.road_count(),
        dataset.potential.len(),
        dataset.traffic.len()
    );
    println!();

    // 1. Emergency dispatch.
    println!("── Emergency dispatch from {EMERGENCY_START} ──");
    let mut dispatch = Vec::new();
    match dataset.emergency_graph()? {
        Some(emergency) => {
            let start = emergency.node_by_name(EMERGENCY_START)?;
            let facilities = emergency.facilities();
            for priority in [false, true] {
                let mode = if priority { "priority" } else { "normal" };
                match find_nearest_facility(&emergency, start, &facilities, priority)? {
                    Some(found) => {
                        println!(
                            "{mode:<8} {} (weight {:.2}, search cost {:.2}): {}",
                            emergency.name(found.facility),
                            found.weight,
                            found.path.cost,
                            names(&emergency, &found.path.nodes)
                        );
                        dispatch.push(json!({ "priority": priority, "result": found }));
                    }
                    None => println!("{mode:<8} no facility reachable"),
                }
            }
        }
        None => println!("(dataset has no emergency network)"),
    }
    let (from, to) = (graph.node_by_name(TRIP.0)?, graph.node_by_name(TRIP.1)?);
    let direct = find_path(&graph, from, to, false)?;
    println!("A* on the road network: {} (distance {:.1})", names(&graph, &direct.nodes), direct.cost);
    println!();

    // 2. Congestion-aware routing.
    println!("── Travel time {} → {} ──", TRIP.0, TRIP.1);
    let model = CongestionModel::new(config.congestion.clone());
    let cache = RouteCache::with_config(&config.cache);
    for time_of_day in TimeOfDay::ALL {
        let route = model.shortest_time_cached(&cache, &graph, from, to, time_of_day, &dataset.traffic)?;
        println!("{:<10} {:>6.2}  {}", time_of_day.to_string(), route.total_time, route.path.join(" → "));
    }
    // Second pass is served from the cache.
    for time_of_day in TimeOfDay::ALL {
        model.shortest_time_cached(&cache, &graph, from, to, time_of_day, &dataset.traffic)?;
    }
    let stats = cache.stats();
    println!("cache: {} hits, {} misses, {} entries", stats.hits, stats.misses, stats.entries);

    let closed = [(graph.node_by_name(CLOSED_ROAD.0)?, graph.node_by_name(CLOSED_ROAD.1)?)];
    let detour = model.recommend_alternate_route(
        &graph,
        from,
        to,
        &closed,
        TimeOfDay::Morning,
        &dataset.traffic,
    )?;
    if detour.is_reachable() {
        println!(
            "with {}–{} closed (Morning): {:.2}  {}",
            CLOSED_ROAD.0,
            CLOSED_ROAD.1,
            detour.total_time,
            detour.path.join(" → ")
        );
    } else {
        println!("with {}–{} closed: unreachable", CLOSED_ROAD.0, CLOSED_ROAD.1);
    }
    println!();

    // 3. Network expansion.
    println!("── Minimum-cost network ──");
    let pool = dataset.edge_pool(&graph, config.maintenance.cost_factor)?;
    let mandatory = MANDATORY
        .iter()
        .map(|&(a, b)| -> Result<(NodeId, NodeId)> { Ok((graph.node_id(a)?, graph.node_id(b)?)) })
        .collect::<Result<Vec<_>>>()?;
    let network = minimum_spanning_network(&graph, &pool, &mandatory)?;
    println!(
        "{} edges, total cost {:.1}, {} new roads costing {:.1}",
        network.edges.len(),
        network.total_cost,
        network.potential_count(),
        network.construction_cost()
    );
    for &(a, b) in &network.missing_mandatory {
        println!("mandatory {} – {} has no candidate road", graph.name(a), graph.name(b));
    }
    for edge in network.edges.iter().filter(|e| e.potential) {
        println!("  build {} – {} ({:.0})", graph.name(edge.from), graph.name(edge.to), edge.cost);
    }
    println!();

    // 4. Public transit.
    println!("── Transit from {TRANSIT_START} ({MAX_VEHICLES} vehicles) ──");
    let stations = stations_from_graph(&graph);
    let legs = legs_from_network(&graph, &dataset.traffic, TimeOfDay::Morning, &model);
    let populations = station_populations(&graph);
    let plan = public_transport_dp(
        &stations,
        &legs,
        &dataset.transit,
        &populations,
        TRANSIT_START,
        MAX_VEHICLES,
        &config.transit,
    )?;
    println!("coverage {:.1} with {} routes served", plan.coverage, plan.assignments.len());
    for a in &plan.assignments {
        println!("  route {} from slot {} with {} vehicle(s)", a.route_id, a.slot, a.vehicles);
    }
    for (station, time) in plan.travel.reachable().into_iter().take(6) {
        println!("  {station:<28} {time:>6.2}  {}", plan.travel.path_to(station)?.join(" → "));
    }
    let transfers = analyze_transfer_points(&dataset.transit);
    for hub in &transfers.hubs {
        println!("  hub {} served by {} routes", hub.station, hub.route_count);
    }
    for wait in &transfers.waits {
        println!(
            "  {}: route {} → {} waits {:.1} min",
            wait.hub, wait.from_route, wait.to_route, wait.avg_wait
        );
    }
    println!();

    // 5. Maintenance.
    println!("── Maintenance with budget {MAINTENANCE_BUDGET} ──");
    let items = candidates(&graph, &config.maintenance);
    let exact = optimize_maintenance(&items, MAINTENANCE_BUDGET)?;
    let greedy = greedy_maintenance(&items, MAINTENANCE_BUDGET)?;
    print_plan(&graph, "exact", &exact);
    print_plan(&graph, "greedy", &greedy);

    if let Some(path) = &args.report {
        let report = json!({
            "config":      config,
            "dispatch":    dispatch,
            "network":     network,
            "transit":     { "coverage": plan.coverage, "assignments": plan.assignments },
            "transfers":   transfers,
            "maintenance": { "exact": exact, "greedy": greedy },
        });
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}
