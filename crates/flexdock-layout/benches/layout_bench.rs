//! Benchmarks for the layout pass, drop-target resolution and action dispatch.
//!
//! Run with: cargo bench -p flexdock-layout --bench layout_bench --no-default-features

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flexdock_layout::{Action, DockLocation, DragItem, Model, Rect};
use serde_json::{Value, json};
use std::hint::black_box;

/// A grid of `cols` columns, each a vertical row of `rows` tabsets with
/// three tabs, plus an open bottom border.
fn grid_json(cols: usize, rows: usize) -> Value {
    let columns: Vec<Value> = (0..cols)
        .map(|c| {
            let tabsets: Vec<Value> = (0..rows)
                .map(|r| {
                    let tabs: Vec<Value> = (0..3)
                        .map(|t| json!({"type": "tab", "id": format!("t{c}-{r}-{t}"), "name": format!("Tab {t}")}))
                        .collect();
                    json!({"type": "tabset", "id": format!("ts{c}-{r}"), "children": tabs})
                })
                .collect();
            json!({"type": "row", "weight": 100 + c * 10, "children": tabsets})
        })
        .collect();
    json!({
        "borders": [{"type": "border", "location": "bottom", "selected": 0,
                     "children": [{"type": "tab", "id": "log"}, {"type": "tab", "id": "term"}]}],
        "layout": {"type": "row", "children": columns}
    })
}

fn bench_layout_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/pass");
    for (cols, rows) in [(2, 2), (4, 4), (8, 8)] {
        let mut model = Model::from_json(&grid_json(cols, rows)).expect("valid layout");
        group.throughput(Throughput::Elements((cols * rows) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{cols}x{rows}")),
            &(cols, rows),
            |b, _| {
                let mut wide = false;
                b.iter(|| {
                    // Alternate sizes so every pass moves every rect.
                    wide = !wide;
                    let w = if wide { 1920 } else { 1280 };
                    black_box(model.layout(Rect::new(0, 0, w, 1080)))
                })
            },
        );
    }
    group.finish();
}

fn bench_drop_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/find_drop_target");
    let mut model = Model::from_json(&grid_json(8, 8)).expect("valid layout");
    model.layout(Rect::new(0, 0, 1920, 1080));
    let item = DragItem::existing("t0-0-0");
    group.bench_function("sweep_8x8", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for y in (0..1080).step_by(40) {
                for x in (0..1920).step_by(40) {
                    if model.find_drop_target(&item, x, y).is_some() {
                        hits += 1;
                    }
                }
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/dispatch");
    group.bench_function("move_tab_round_trip_4x4", |b| {
        let mut model = Model::from_json(&grid_json(4, 4)).expect("valid layout");
        model.layout(Rect::new(0, 0, 1920, 1080));
        b.iter(|| {
            model.dispatch(Action::move_node("t0-0-0", "ts3-3", DockLocation::Center, None));
            black_box(model.dispatch(Action::move_node("t0-0-0", "ts0-0", DockLocation::Center, Some(0))))
        })
    });
    group.bench_function("to_json_8x8", |b| {
        let model = Model::from_json(&grid_json(8, 8)).expect("valid layout");
        b.iter(|| black_box(model.to_json()))
    });
    group.finish();
}

criterion_group!(benches, bench_layout_pass, bench_drop_target, bench_dispatch);
criterion_main!(benches);
