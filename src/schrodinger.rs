use std::{ env, path::PathBuf };
use anyhow::Context;
use tise::{ config::SimulationConfig, io, observe, solve::System };

// solve the TISE for the potential configured in a working directory

fn main() -> anyhow::Result<()> {
    let dir: PathBuf
        = env::args().nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let inp = dir.join("schrodinger.inp");
    let cfg = SimulationConfig::read(&inp)
        .with_context(|| format!("reading {}", inp.display()))?;

    let sys = System::from_config(&cfg)?;
    let sols = sys.solve(cfg.mass, (cfg.first_ev, cfg.last_ev))?;
    let obs = observe::expectation_values(&sys, &sols);

    // nothing is persisted until every stage has succeeded
    io::write_potential(sys.get_x(), sys.get_V(), &dir)?;
    io::write_eigenvalues(&sols, &dir)?;
    io::write_eigenvectors(sys.get_x(), &sols, &dir)?;
    io::write_expectation_values(&obs, &dir)?;

    println!(
        "eigenvalues {}..={} on {} grid points:",
        cfg.first_ev, cfg.last_ev, cfg.n_points,
    );
    for (sol, ob) in sols.iter().zip(&obs) {
        println!(
            "  e = {:+.6e}  <x> = {:+.6e}  dx = {:.6e}",
            sol.e, ob.x_mean, ob.x_unc,
        );
    }
    Ok(())
}
