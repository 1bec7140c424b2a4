use ballast::{topological_sort, AdjacencyGraph, Bfs, Dfs, EdgeMode, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn chain_graph(size: u32, mode: EdgeMode) -> AdjacencyGraph {
    let mut graph = AdjacencyGraph::new(size, size, mode).unwrap();
    let ids: Vec<_> = (0..size)
        .map(|i| graph.add_vertex(Value::from_int(i as i32)).unwrap())
        .collect();
    for i in 0..size as usize - 1 {
        graph.add_edge(ids[i], ids[i + 1]).unwrap();
    }
    graph
}

fn bench_graph_mutation(c: &mut Criterion) {
    let size = 1000u32;

    c.bench_function("graph_build_chain_and_remove_middle", |b| {
        b.iter(|| {
            let mut graph = chain_graph(size, EdgeMode::Undirected);
            let middle = graph.vertices().nth(size as usize / 2).unwrap();
            graph.remove_vertex(middle).unwrap();
            black_box(graph.vertex_count());
        });
    });
}

fn bench_traversals(c: &mut Criterion) {
    let size = 1000u32;
    let undirected = chain_graph(size, EdgeMode::Undirected);
    let directed = chain_graph(size, EdgeMode::Directed);
    let root = undirected.vertices().next().unwrap();

    c.bench_function("bfs_chain", |b| {
        let mut bfs = Bfs::new(&undirected).unwrap();
        b.iter(|| {
            bfs.run(&undirected, root, &mut ()).unwrap();
            black_box(bfs.processed(root));
        });
    });

    c.bench_function("dfs_chain", |b| {
        let mut dfs = Dfs::new(&undirected).unwrap();
        b.iter(|| {
            dfs.reset(&undirected).unwrap();
            dfs.run(&undirected, root, &mut ()).unwrap();
            black_box(dfs.exit_time(root));
        });
    });

    c.bench_function("topo_sort_chain", |b| {
        let mut dfs = Dfs::new(&directed).unwrap();
        let mut out = vec![root; size as usize];
        b.iter(|| {
            black_box(topological_sort(&directed, &mut dfs, &mut out).unwrap());
        });
    });
}

criterion_group!(benches, bench_graph_mutation, bench_traversals);
criterion_main!(benches);
