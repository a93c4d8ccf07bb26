//! Evaluate an [`LVPredictor`] against one or more traces.
//!
//! usage: evaluate-lvp [--config <file.toml>] [trace files]
//!
//! With no trace files, the default synthetic workloads are used.

use anyhow::{ bail, Context, Result };
use lvpred::*;
use lvpred::sim::*;
use lvpred::trace::synth::Workload;
use std::env;

fn run_test(cfg: LVPConfig, trace: &BinaryTrace) -> Result<()> {
    let lvp = cfg.build().context("invalid predictor configuration")?;
    let mut sim = LoadValueSim::new(lvp);
    sim.run(trace.as_slice());

    println!("[*] {}, {} records", trace.name(), trace.num_entries());
    println!("{}", sim.report());
    println!("  Unique loads: {}", sim.stat.num_unique_loads());

    let low = sim.stat.get_low_rate_loads(4);
    if !low.is_empty() {
        println!("  Low hit-rate loads:");
        for (pc, data) in low {
            println!("    {:016x} {:8}/{:8} {:.4}",
                pc, data.hits, data.preds, data.hit_rate()
            );
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut cfg = LVPConfig::default();
    let mut files = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = match args.next() {
                    Some(p) => p,
                    None => bail!("usage: evaluate-lvp [--config <file>] [trace files]"),
                };
                cfg = LVPConfig::from_file(&path)
                    .with_context(|| format!("failed to load {}", path))?;
            },
            _ => files.push(arg),
        }
    }
    cfg.validate().context("invalid predictor configuration")?;
    log::info!("Using {:?} ({} bits)", cfg, cfg.storage_bits());

    if files.is_empty() {
        for workload in Workload::defaults() {
            run_test(cfg, &workload.generate())?;
        }
        return Ok(());
    }

    for trace in BinaryTraceSet::new_from_slice(&files) {
        let trace = trace?;
        if trace.num_loads() == 0 {
            log::warn!("{} has no loads, skipping", trace.name());
            continue;
        }
        run_test(cfg, &trace)?;
    }
    Ok(())
}
