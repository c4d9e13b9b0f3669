use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsi_progress_logger::no_logging;
use level_crawler::algo::visits::{breadth_first, Parallel, Sequential};
use level_crawler::source::{from_fn, MapSource, NeighborSource};
use level_crawler::threads;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

const NUM_NODES: usize = 2_000;
const OUTDEGREE: usize = 4;
const DEPTH: usize = 6;
const LATENCY: Duration = Duration::from_micros(200);

fn random_graph() -> MapSource {
    let mut rng = StdRng::seed_from_u64(0);
    let mut graph = MapSource::new();
    for node in 0..NUM_NODES {
        for _ in 0..OUTDEGREE {
            graph.add_arc(node.to_string(), rng.random_range(0..NUM_NODES).to_string());
        }
    }
    graph
}

pub fn bench_visits(c: &mut Criterion) {
    let graph = random_graph();
    // Lookups are dominated by latency, as with a remote service.
    let source = from_fn(|node| {
        std::thread::sleep(LATENCY);
        graph.neighbors(node)
    });
    let num_nodes = breadth_first::Seq::new(&graph)
        .visit("0", DEPTH, no_logging![])
        .num_nodes();

    let mut group = c.benchmark_group("Level visit");
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(10);
    group.throughput(Throughput::Elements(num_nodes as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| breadth_first::Seq::new(&source).visit("0", DEPTH, no_logging![]))
    });

    for num_threads in [1, 2, 4, 8, 16] {
        let thread_pool = threads![num_threads];
        group.bench_with_input(
            BenchmarkId::new("parallel", num_threads),
            &thread_pool,
            |b, thread_pool| {
                b.iter(|| {
                    breadth_first::ParQueue::new(&source).visit(
                        "0",
                        DEPTH,
                        thread_pool,
                        no_logging![],
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_visits);
criterion_main!(benches);
