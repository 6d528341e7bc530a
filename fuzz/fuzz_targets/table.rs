#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use byte_keyed_table::ByteKeyedTable;
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(Vec<u8>, i32),
    Get(Vec<u8>),
    GetRange(u8, u8),
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    let capacity = u8::arbitrary(&mut unstructured).unwrap_or_default();
    let load_factor = (f32::from(u8::arbitrary(&mut unstructured).unwrap_or_default()) / 64.0).max(0.01);

    let Ok(ops) = <Vec<Op> as Arbitrary>::arbitrary(&mut unstructured) else {
        return;
    };

    let table = ByteKeyedTable::with_load_factor(capacity.into(), load_factor).unwrap();
    let mut model = HashMap::<Vec<u8>, i32>::new();

    // Everything inserted so far, laid out like a decode buffer
    let mut buffer = Vec::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let inserted = table.insert(&key, value).is_ok();
                assert_eq!(!model.contains_key(&key), inserted);

                buffer.extend_from_slice(&key);
                model.entry(key).or_insert(value);
            }
            Op::Get(key) => {
                assert_eq!(model.get(&key).copied(), table.get(&key));
            }
            Op::GetRange(offset, count) => {
                let offset = usize::from(offset).min(buffer.len());
                let count = usize::from(count).min(buffer.len() - offset);

                let key = &buffer[offset..offset + count];
                assert_eq!(model.get(key).copied(), table.get_range(&buffer, offset, count));
            }
        }
    }

    assert_eq!(model.len(), table.len());
    assert_eq!(model.len(), table.stats().entry_count);
});
