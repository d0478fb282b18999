use fxquat::drift::DriftSim;

fn main() -> std::io::Result<()> {
    let mut sim = DriftSim::from_args()?;
    sim.run()?;
    println!(
        "Ran {} cycles, worst angle error {} degrees",
        sim.cycles,
        sim.worst_angle_error.to_degrees()
    );
    Ok(())
}
