//! Shopping list benchmarks
//!
//! - Reducer: add/toggle on a populated list (pure in-memory)
//! - Projection: filtered view over a large list
//! - Store: `add_item` round trip through the runtime with in-memory storage
//!
//! Run with: `cargo bench -p shopping-list`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use shopping_list::{Filter, ItemId, ListAction, ListEnvironment, ListReducer, ListState, ListStore};
use shopping_list_core::reducer::Reducer;
use shopping_list_testing::{InMemoryStorage, SequentialIdGenerator, test_clock};
use std::sync::Arc;

fn env() -> ListEnvironment {
    ListEnvironment::new(
        Arc::new(InMemoryStorage::new()),
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new()),
    )
}

fn populated(env: &ListEnvironment, n: usize) -> ListState {
    let reducer = ListReducer::new();
    let mut state = ListState::ready_with(Vec::new());
    for i in 0..n {
        let _ = reducer.reduce(
            &mut state,
            ListAction::AddItem {
                text: format!("item {i}"),
            },
            env,
        );
        if i % 3 == 0 {
            let id = state.items[0].id.clone();
            let _ = reducer.reduce(&mut state, ListAction::ToggleItem { id }, env);
        }
    }
    state
}

fn reducer_benchmarks(c: &mut Criterion) {
    let env = env();
    let reducer = ListReducer::new();
    let mut group = c.benchmark_group("reducer");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_item_100", |b| {
        let base = populated(&env, 100);
        b.iter_batched(
            || base.clone(),
            |mut state| {
                black_box(reducer.reduce(
                    &mut state,
                    ListAction::AddItem {
                        text: "Milk".to_string(),
                    },
                    &env,
                ))
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("toggle_unknown_100", |b| {
        let mut state = populated(&env, 100);
        let id = ItemId::new("missing");
        b.iter(|| {
            black_box(reducer.reduce(
                &mut state,
                ListAction::ToggleItem { id: id.clone() },
                &env,
            ))
        });
    });

    group.finish();
}

fn projection_benchmarks(c: &mut Criterion) {
    let env = env();
    let mut state = populated(&env, 1000);
    let mut group = c.benchmark_group("projection");
    group.throughput(Throughput::Elements(1000));

    for filter in Filter::ALL {
        state.filter = filter;
        let state = state.clone();
        group.bench_function(format!("filtered_items_{filter}"), |b| {
            b.iter(|| black_box(state.filtered_items()));
        });
    }

    group.bench_function("counts", |b| {
        b.iter(|| black_box((state.active_count(), state.completed_count())));
    });

    group.finish();
}

fn store_benchmarks(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let list = runtime.block_on(ListStore::open(env()));

    c.bench_function("store/add_item_and_wait", |b| {
        b.to_async(&runtime).iter(|| async {
            list.add_item("Milk").await.wait().await;
        });
    });
}

criterion_group!(benches, reducer_benchmarks, projection_benchmarks, store_benchmarks);
criterion_main!(benches);
