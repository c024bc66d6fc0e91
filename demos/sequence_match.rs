//! Sequence Matching Demo
//!
//! Finds a pattern in a target under each gap policy and equality flag.
//!
//! ```bash
//! cargo run --example sequence_match
//! ```

use alice_seqmatch::{
    find_occurrences, values, CustomElement, GapPolicy, MatchConfig, SequenceIndex, Value,
};

#[derive(Debug)]
struct Reading {
    sensor: &'static str,
}

impl CustomElement for Reading {
    fn canonical_str(&self) -> Option<String> {
        Some(format!("Reading({})", self.sensor))
    }
}

fn readings(names: &[&'static str]) -> Vec<Value> {
    names
        .iter()
        .map(|&sensor| Value::object(Reading { sensor }))
        .collect()
}

fn main() -> alice_seqmatch::Result<()> {
    println!("=== ALICE-SeqMatch Demo ===\n");

    let pattern = values([1, 2]);
    let target = values([2, 2, 1, 2, 1]);
    println!("pattern = [1, 2], target = [2, 2, 1, 2, 1]\n");

    let defaults = MatchConfig::default();
    let disjoint = defaults.with_occurrence_gap(GapPolicy::NonNegative);
    let ordered = disjoint.with_element_gap(GapPolicy::NonNegative);

    for (label, config) in [
        ("overlapping, any order", defaults),
        ("disjoint, any order", disjoint),
        ("disjoint, ascending", ordered),
    ] {
        let found = find_occurrences(&pattern, &target, &config)?;
        println!("  {label:<24} -> {found:?}");
    }

    println!("\n--- Equality Flags ---\n");

    let nested = vec![Value::from("foo"), Value::from(vec!["bar", "baz"]), Value::Int(7)];
    let mut repeated = nested.clone();
    repeated.extend(nested.clone());
    let hashable = MatchConfig::new().with_ensure_hashable(true);
    println!(
        "  ensure_hashable          -> {:?}",
        find_occurrences(&nested, &repeated, &hashable)?
    );
    match find_occurrences(&nested, &repeated, &defaults) {
        Ok(found) => println!("  without ensure_hashable  -> {found:?}"),
        Err(e) => println!("  without ensure_hashable  -> error: {e}"),
    }

    let rounded = MatchConfig::new().with_float_precision(Some(3));
    println!(
        "  float_precision = 3      -> {:?}",
        find_occurrences(
            &values([1.111, 2.222, 3.333]),
            &values([1.1111, 2.2222, 3.3333]),
            &rounded
        )?
    );

    let by_str = MatchConfig::new().with_custom_str(true);
    println!(
        "  use_custom_str           -> {:?}",
        find_occurrences(
            &readings(&["a", "b"]),
            &readings(&["a", "b", "a"]),
            &by_str
        )?
    );

    println!("\n--- Reusable Index ---\n");

    let index = SequenceIndex::build(&values([1, 2, 3, 2, 4, 2, 3, 2]), &disjoint)?;
    println!("  {} positions, {} distinct keys", index.len(), index.distinct_keys());
    println!("  positions of 2: {:?}", index.positions(&Value::Int(2))?);
    println!("  find [2, 3, 2]: {:?}", index.find(&values([2, 3, 2]))?);
    println!("  find [4]:       {:?}", index.find(&values([4]))?);

    Ok(())
}
