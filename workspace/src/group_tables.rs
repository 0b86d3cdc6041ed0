//! Prints the Pauli and CNOT-Pauli lookup tables along with seeded random
//! elements and their inverses.
//!
//! Usage: `group_tables [OUTDIR]`. If `OUTDIR` is given, every table is also
//! saved there as JSON.

use std::path::PathBuf;
use itertools::Itertools;
use rb_groups::{
    encode::GroupFamily,
    error::GroupResult,
    group::Group,
    rng,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const NUM_SEEDS: u64 = 20;
const MAX_QUBITS: usize = 2;

fn print_tables(group: &Group, outdir: Option<&PathBuf>) -> GroupResult<()> {
    for n in 1..=MAX_QUBITS {
        let table = group.load_tables(n)?;
        println!(
            "test: generating the {} group table for {} qubits:",
            group.family(), n,
        );
        println!("{}", table.len());
        println!("[{}]", table.sorted_gatelists().into_iter().format(", "));
        if let Some(dir) = outdir {
            let path = dir.join(format!("{}{}.json", group.family(), n));
            table.save_json(&path)?;
            info!(path = %path.display(), "wrote table");
        }
    }
    Ok(())
}

fn print_samples(group: &mut Group) -> GroupResult<()> {
    let family = group.family();
    for n in 1..=MAX_QUBITS {
        for seed in 0..NUM_SEEDS {
            rng::seed(seed);
            println!(
                "test: generating a pseudo-random {} using the tables - {} qubit - seed={}:",
                family, n, seed,
            );
            let gates = group.random_gates(n)?;
            println!("{}", gates);
            println!(
                "test: inverting a pseudo-random {} using the tables - {} qubit - seed={}:",
                family, n, seed,
            );
            println!("{}", group.find_inverse_gates(n, &gates)?);
            println!("-------------------------------------------------------");
        }
    }
    Ok(())
}

fn main() -> GroupResult<()> {
    let filter
        = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let outdir: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);
    if let Some(dir) = outdir.as_ref() {
        std::fs::create_dir_all(dir)?;
    }

    for family in [GroupFamily::Pauli, GroupFamily::CNOTPauli] {
        let mut group = Group::new(family, MAX_QUBITS)?;
        info!(%family, "enumerating group");
        print_tables(&group, outdir.as_ref())?;
        print_samples(&mut group)?;
    }
    Ok(())
}
