use strand::prelude::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_many_small_tasks() {
    let pool = make_thread_pool(8).unwrap();

    let futures: Vec<_> = (0u64..10_000)
        .map(|i| pool.invoke(move || Ok(i)))
        .collect();

    let mut sum = 0;
    for future in &futures {
        sum += future.get().unwrap();
    }

    assert_eq!(sum, 10_000 * 9_999 / 2);
}

#[test]
fn test_deep_then_chain() {
    let pool = make_thread_pool(4).unwrap();

    let mut current = pool.invoke(|| Ok(0u64));
    for _ in 0..100 {
        let captured = current.clone();
        current = pool.then(&captured.clone(), move || Ok(captured.get()? + 1));
    }

    assert_eq!(current.get().unwrap(), 100);
}

#[test]
fn test_wide_when_all() {
    let pool = make_thread_pool(8).unwrap();

    let inputs: Vec<_> = (0u64..256).map(|i| pool.invoke(move || Ok(i))).collect();
    let all = pool.when_all(inputs);

    let values = all.get().unwrap();
    assert_eq!(values.len(), 256);
    assert!(values.iter().enumerate().all(|(i, &v)| v == i as u64));
}

#[test]
fn test_panic_storm_leaves_the_pool_usable() {
    let pool = make_thread_pool(4).unwrap();

    let futures: Vec<_> = (0u32..200)
        .map(|i| {
            pool.invoke(move || {
                if i % 2 == 0 {
                    panic!("task {} gave up", i);
                }
                Ok(i)
            })
        })
        .collect();

    let failed = futures.iter().filter(|f| f.get().is_err()).count();
    assert_eq!(failed, 100);

    // The workers must all have survived.
    let alive = pool.invoke(|| Ok("still here"));
    assert_eq!(alive.get().unwrap(), "still here");
}

#[test]
fn test_unready_churn_resolves_once_the_gate_opens() {
    let pool = make_thread_pool(4).unwrap();

    let opened = Arc::new(AtomicU64::new(0));
    let gate = {
        let opened = opened.clone();
        pool.invoke(move || {
            std::thread::sleep(Duration::from_millis(50));
            opened.store(1, Ordering::SeqCst);
            Ok(())
        })
    };

    let dependents: Vec<_> = (0..100)
        .map(|i| {
            let opened = opened.clone();
            pool.then(&gate, move || {
                assert_eq!(opened.load(Ordering::SeqCst), 1);
                Ok(i)
            })
        })
        .collect();

    for (i, dependent) in dependents.iter().enumerate() {
        assert_eq!(dependent.get().unwrap(), i);
    }
}
