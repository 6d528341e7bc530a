use byte_keyed_table::{ByteKeyedTable, Result};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use test_log::test;

const ITEM_COUNT: i32 = 2_000;

#[test]
fn table_concurrent_read_after_build() -> Result<()> {
    let table = ByteKeyedTable::new(ITEM_COUNT as usize);

    for idx in 0..ITEM_COUNT {
        table.insert(format!("field_{idx}"), idx)?;
    }

    std::thread::scope(|s| {
        for t in 0..4 {
            let table = &table;

            s.spawn(move || {
                for idx in (t..ITEM_COUNT).step_by(4) {
                    let key = format!("field_{idx}");
                    assert_eq!(Some(idx), table.get(key.as_bytes()));
                    assert_eq!(None, table.get(format!("missing_{idx}").as_bytes()));
                }
            });
        }
    });

    Ok(())
}

#[test]
fn table_concurrent_read_during_build() -> Result<()> {
    // Small table, so readers constantly race with chain replacement
    let table = Arc::new(ByteKeyedTable::with_load_factor(1, 1.0)?);
    let done = Arc::new(AtomicBool::new(false));

    let readers = (0..4)
        .map(|_| {
            let table = table.clone();
            let done = done.clone();

            std::thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    for idx in 0..ITEM_COUNT {
                        // A key is either not there yet, or maps to its final value
                        if let Some(value) = table.get(format!("k{idx}").as_bytes()) {
                            assert_eq!(idx, value);
                        }
                    }
                }
            })
        })
        .collect::<Vec<_>>();

    for idx in 0..ITEM_COUNT {
        table.insert(format!("k{idx}"), idx)?;
    }

    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().expect("reader should not panic");
    }

    for idx in 0..ITEM_COUNT {
        assert_eq!(Some(idx), table.get(format!("k{idx}").as_bytes()));
    }
    assert_eq!(ITEM_COUNT as usize, table.len());

    Ok(())
}

#[test]
fn table_concurrent_inserts_keep_every_key() {
    let table = ByteKeyedTable::with_load_factor(1, 1.0).expect("load factor is valid");

    std::thread::scope(|s| {
        for t in 0..4 {
            let table = &table;

            s.spawn(move || {
                for idx in (t..1_000).step_by(4) {
                    table
                        .insert(idx.to_string(), idx)
                        .expect("keys are disjoint per thread");
                }
            });
        }
    });

    assert_eq!(1_000, table.len());

    for idx in 0..1_000 {
        assert_eq!(Some(idx), table.get(idx.to_string().as_bytes()));
    }
}
