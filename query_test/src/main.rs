//! Exercises the kd tree against brute force on random data and reports timings.

use kd_tree::{euclidean_distance_squared, KdTree};

use clap::Parser;
use kdam::tqdm;
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Serialize, Deserialize, Debug, Clone)]
struct QueryConfig {
    num_points: usize,
    dimensionality: usize,
    num_queries: usize,
    radius_squared: f64,
    seed: u64,
}

impl QueryConfig {

    fn default() -> Self {
        return Self {
            num_points: 100_000,
            dimensionality: 3,
            num_queries: 1000,
            radius_squared: 0.01,
            seed: 0,
        }
    }

    fn from_file(filename: &str) -> Self {

        let serialized = std::fs::read_to_string(filename)
            .expect("QueryConfig file can't be found or read");

        let deserialized: Self = serde_yaml::from_str(&serialized)
            .expect("QueryConfig file can't be parsed");

        return deserialized;
    }
}

#[derive(Parser, Debug)] #[command(author, version, about, long_about = None)]
struct Args {

    //Optional yaml file with a QueryConfig; flags below override it
    #[arg(short, long)]
    config: Option<String>,

    //Number of random points to build the tree from
    #[arg(short, long)]
    num_points: Option<usize>,

    //Number of dimensions per point
    #[arg(short, long)]
    dimensionality: Option<usize>,

    //Number of random queries to run
    #[arg(short = 'q', long)]
    num_queries: Option<usize>,

    //Squared radius for the range queries
    #[arg(short, long)]
    radius_squared: Option<f64>,

    //Seed for the point and query generators
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {

    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(filename) => QueryConfig::from_file(filename),
        None => QueryConfig::default(),
    };
    if let Some(n) = args.num_points { config.num_points = n; }
    if let Some(d) = args.dimensionality { config.dimensionality = d; }
    if let Some(q) = args.num_queries { config.num_queries = q; }
    if let Some(r) = args.radius_squared { config.radius_squared = r; }
    if let Some(s) = args.seed { config.seed = s; }

    dbg!(&config);

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let points = random_points(&mut rng, config.num_points, config.dimensionality);

    let start = Instant::now();
    let tree = KdTree::build(points.clone(), config.dimensionality)
        .expect("tree construction failed");
    info!("build {} points: {}", config.num_points, start.elapsed().as_secs_f64());

    let queries = random_points(&mut rng, config.num_queries, config.dimensionality);

    let start = Instant::now();
    for query in tqdm!(queries.iter()) {

        let (d, _) = tree
            .find_nearest(query, euclidean_distance_squared)
            .expect("tree is not empty");

        let brute = points
            .iter()
            .map(|p| euclidean_distance_squared(p, query, config.dimensionality))
            .fold(f64::INFINITY, f64::min);

        if (d - brute).abs() > 1e-12 {
            panic!("nearest mismatch: tree {} vs brute force {}", d, brute);
        }
    }
    info!("{} nearest queries verified: {}", config.num_queries, start.elapsed().as_secs_f64());

    let start = Instant::now();
    let mut total_found = 0;
    for query in tqdm!(queries.iter()) {

        let found = tree.find_within(query, config.radius_squared, euclidean_distance_squared);
        total_found += found.len();

        let brute = points
            .iter()
            .filter(|p| euclidean_distance_squared(*p, query, config.dimensionality) <= config.radius_squared)
            .count();

        if found.len() != brute {
            panic!("range mismatch: tree found {} vs brute force {}", found.len(), brute);
        }
    }
    info!("{} range queries verified, {} total hits: {}",
          config.num_queries, total_found, start.elapsed().as_secs_f64());

    println!("OK");
}

fn random_points(rng: &mut SmallRng, n: usize, dimensionality: usize) -> Vec<Vec<f64>> {

    let mut data = vec![vec![0.0; dimensionality]; n];
    for point in data.iter_mut() {
        for c in point.iter_mut() {
            *c = rng.gen::<f64>();
        }
    }

    return data;
}
