use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bst_set::Tree;

enum SetEnum<T> {
    Bst(Tree<T>),
    Std(BTreeSet<T>),
}

impl<T> SetEnum<T>
where
    T: Ord,
{
    fn contains(&self, value: &T) -> bool {
        match self {
            Self::Bst(t) => t.contains(value),
            Self::Std(t) => t.contains(value),
        }
    }

    fn insert(&mut self, value: T) {
        match self {
            Self::Bst(t) => {
                t.insert(value);
            }
            Self::Std(t) => {
                t.insert(value);
            }
        }
    }

    fn remove(&mut self, value: &T) {
        match self {
            Self::Bst(t) => {
                t.remove(value);
            }
            Self::Std(t) => {
                t.remove(value);
            }
        }
    }
}

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: u32) -> i32 {
    2i32.pow(num_levels) - 1
}

/// Orders `lo..hi` so that inserting the values one by one, without any rebalancing, yields a
/// full tree: each range's midpoint comes before either half.
fn balanced_order(lo: i32, hi: i32, out: &mut Vec<i32>) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    out.push(mid);
    balanced_order(lo, mid, out);
    balanced_order(mid + 1, hi, out);
}

/// Helper to bench a function on a set.
/// It creates a group for the given name and closure and runs it for various sizes, insertion
/// orders, and set implementations before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut SetEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11] {
        let num_nodes = num_nodes_in_full_tree(num_levels);
        let largest_element_in_tree = num_nodes - 1;

        let mut balanced = Vec::new();
        balanced_order(0, num_nodes, &mut balanced);
        let ascending: Vec<i32> = (0..num_nodes).collect();

        let orders = [("balanced", &balanced), ("ascending", &ascending)];
        for (order, values) in orders {
            let impls: [(&str, fn(&[i32]) -> SetEnum<i32>); 2] = [
                ("bst", |xs| SetEnum::Bst(xs.iter().copied().collect())),
                ("btreeset", |xs| SetEnum::Std(xs.iter().copied().collect())),
            ];
            for (implementation, build) in impls {
                let id = BenchmarkId::new(format!("{implementation}/{order}"), num_nodes);

                group.bench_function(id, |b| {
                    b.iter_custom(|iters| {
                        let mut time = std::time::Duration::ZERO;
                        for _ in 0..iters {
                            let mut set = black_box(build(values));
                            let instant = std::time::Instant::now();
                            f(&mut set, black_box(largest_element_in_tree));
                            time += instant.elapsed();
                        }
                        time
                    })
                });
            }
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |set, i| {
        let _found = black_box(set.contains(&i));
    });
    bench_helper(c, "remove", |set, i| {
        set.remove(&i);
    });

    bench_helper(c, "insert", |set, i| {
        set.insert(i + 1);
    });

    bench_helper(c, "contains-miss", |set, i| {
        let _found = black_box(set.contains(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |set, i| {
        set.remove(&(i + 1));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
