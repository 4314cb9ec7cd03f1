use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use taxview_core::model::{ArcAttributes, ObjectId};
use taxview_hierarchy::{Diagnostics, Edge, Endpoint, HierarchyBuilder};

struct Tier {
    name: &'static str,
    nodes: u32,
    fan_out: u32,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        nodes: 200,
        fan_out: 4,
    },
    Tier {
        name: "medium",
        nodes: 5_000,
        fan_out: 8,
    },
    Tier {
        name: "large",
        nodes: 50_000,
        fan_out: 12,
    },
];

fn endpoint(id: u32) -> Endpoint {
    Endpoint {
        object: ObjectId::new(id),
        name: format!("ex:Concept{id}"),
        is_abstract: id % 7 == 0,
    }
}

/// A balanced tree plus an edge back to the grandparent every hundred nodes,
/// so the cycle guard does real work.
fn generate_edges(tier: &Tier) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(tier.nodes as usize);
    for child in 1..tier.nodes {
        let parent = (child - 1) / tier.fan_out;
        edges.push(Edge {
            source: endpoint(parent),
            target: endpoint(child),
            role: "http://example.com/role/Bench".to_string(),
            arcrole: "http://www.xbrl.org/2003/arcrole/parent-child".to_string(),
            attributes: ArcAttributes::NotApplicable,
        });
        if child % 100 == 0 && parent > tier.fan_out {
            let grandparent = (parent - 1) / tier.fan_out;
            edges.push(Edge {
                source: endpoint(child),
                target: endpoint(grandparent),
                role: "http://example.com/role/Bench".to_string(),
                arcrole: "http://www.xbrl.org/2003/arcrole/parent-child".to_string(),
                attributes: ArcAttributes::NotApplicable,
            });
        }
    }
    edges
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy.build");
    let builder = HierarchyBuilder::default();

    for tier in &TIERS {
        let edges = generate_edges(tier);
        group.throughput(Throughput::Elements(edges.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tier.name), &edges, |b, edges| {
            b.iter(|| {
                let mut sink = Diagnostics::new();
                let hierarchy = builder.build("bench", edges, &mut sink);
                black_box(hierarchy.node_count())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
