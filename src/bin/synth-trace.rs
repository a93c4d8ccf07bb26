//! Write a synthetic workload to a trace file.
//!
//! usage: synth-trace <workload> <output file>

use anyhow::{ anyhow, Result };
use lvpred::trace::synth::Workload;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        let prog = args.first().map_or("synth-trace", |s| s.as_str());
        println!("usage: {} <workload> <output file>", prog);
        println!("workloads:");
        for w in Workload::defaults() {
            println!("  {}", w.name());
        }
        return Ok(());
    }

    let workload = Workload::from_name(&args[1])
        .ok_or_else(|| anyhow!("unknown workload '{}'", args[1]))?;
    let trace = workload.generate();
    trace.write_file(&args[2])?;
    println!("[*] Wrote {} records to {}", trace.num_entries(), args[2]);
    Ok(())
}
