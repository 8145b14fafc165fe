use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vaply_player::{
    parse_player_config_json, AnnotationSnapshot, ClosedAnnotations, NodePlayer,
    NodePlayerConfig,
};

fn dense_config(annotations: usize) -> NodePlayerConfig {
    let mut anns = Vec::with_capacity(annotations);
    let mut trigs = Vec::with_capacity(annotations);
    for i in 0..annotations {
        anns.push(format!(
            r#"{{ "code": "a{i}", "blocking": {}, "type": "card", "card": {{}} }}"#,
            i % 7 == 0
        ));
        trigs.push(format!(
            r#"{{ "type": "timeupdate", "targetCode": "a{i}",
                 "timeupdate": {{ "start": {}, "end": {} }} }}"#,
            i,
            i + 5
        ));
    }
    let json = format!(
        r#"{{
            "id": "bench", "title": "bench",
            "flow": {{ "type": "list", "list": {{ "nodes": ["n"] }} }},
            "nodes": [{{ "code": "n", "annotations": [{}], "triggers": [{}] }}]
        }}"#,
        anns.join(","),
        trigs.join(",")
    );
    parse_player_config_json(&json).expect("bench config")
}

fn bench_snapshot(c: &mut Criterion) {
    let cfg = dense_config(200);
    let node = cfg.node("n").expect("node");
    let closed = ClosedAnnotations::new();
    c.bench_function("snapshot_200_triggers", |b| {
        let mut t = 0u32;
        b.iter(|| {
            t = (t + 1) % 205;
            let snap = AnnotationSnapshot::evaluate(
                black_box(&t.to_string()),
                &node.annotations,
                &node.triggers,
                &closed,
            );
            black_box(snap.blocking)
        })
    });
}

fn bench_player_tick(c: &mut Criterion) {
    let mut player = NodePlayer::new(dense_config(200), None).expect("player");
    c.bench_function("player_time_update_200_triggers", |b| {
        let mut t = 0.0f64;
        b.iter(|| {
            t = (t + 0.25) % 205.0;
            let out = player.time_update(black_box(t)).expect("tick");
            black_box(out.events.len())
        })
    });
}

criterion_group!(benches, bench_snapshot, bench_player_tick);
criterion_main!(benches);
