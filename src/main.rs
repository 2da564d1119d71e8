use csv::Writer;
use serde::Serialize;
use springsim::config::{ClothConfig, PendulumConfig};
use springsim::constants::{DEFAULT_STEPS, DEFAULT_STEP_SIZE};
use springsim::systems::{ClothSystem, PendulumSystem, SimpleSystem};
use springsim::{IntegratorKind, ParticleSystem, Simulation, SimulationError};
use std::env;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

const USAGE: &str = "usage:
  springsim s <e|t|r|R> <h> [steps]
  springsim p <num_particles> <particle_idx> <e|t|r|R> <h> [steps]
  springsim c <grid_size> <e|t|r|R> <h> [steps]";

/// One CSV row: a recorded vector of the state after a step.
#[derive(Debug, Serialize)]
struct Sample {
    step: usize,
    time: f64,
    particle: usize,
    x: f64,
    y: f64,
    z: f64,
}

/// What the command line asked for.
struct Run {
    system: Box<dyn ParticleSystem<3>>,
    integrator: IntegratorKind,
    h: f64,
    steps: usize,
    // State vector indices written to the CSV
    recorded: Vec<usize>,
}

fn parse_steps(arg: Option<&String>) -> Result<usize, Box<dyn Error>> {
    match arg {
        Some(s) => Ok(s.parse()?),
        None => Ok(DEFAULT_STEPS),
    }
}

fn parse_run(args: &[String]) -> Result<Run, Box<dyn Error>> {
    if args.len() < 4 {
        eprintln!("{USAGE}");
        log::warn!("too few arguments, running the simple system with RK4");
        return Ok(Run {
            system: Box::new(SimpleSystem::new()),
            integrator: IntegratorKind::Rk4,
            h: DEFAULT_STEP_SIZE,
            steps: DEFAULT_STEPS,
            recorded: vec![0],
        });
    }

    match args[1].as_str() {
        "s" => Ok(Run {
            system: Box::new(SimpleSystem::new()),
            integrator: args[2].parse()?,
            h: args[3].parse()?,
            steps: parse_steps(args.get(4))?,
            recorded: vec![0],
        }),
        "p" => {
            if args.len() < 6 {
                return Err(USAGE.into());
            }
            let num_particles: usize = args[2].parse()?;
            let particle: usize = args[3].parse()?;
            if particle >= num_particles {
                return Err(SimulationError::InvalidConfig(format!(
                    "particle index {particle} out of range for {num_particles} particles"
                ))
                .into());
            }
            let system = PendulumSystem::new(&PendulumConfig::with_particles(num_particles))?;
            Ok(Run {
                system: Box::new(system),
                integrator: args[4].parse()?,
                h: args[5].parse()?,
                steps: parse_steps(args.get(6))?,
                recorded: vec![2 * particle],
            })
        }
        "c" => {
            if args.len() < 5 {
                return Err(USAGE.into());
            }
            let grid_size: usize = args[2].parse()?;
            let system = ClothSystem::new(&ClothConfig::square(grid_size))?;
            Ok(Run {
                system: Box::new(system),
                integrator: args[3].parse()?,
                h: args[4].parse()?,
                steps: parse_steps(args.get(5))?,
                recorded: (0..grid_size * grid_size).map(|i| 2 * i).collect(),
            })
        }
        other => Err(format!("unknown system '{other}'\n{USAGE}").into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Run {
        system,
        integrator,
        h,
        steps,
        recorded,
    } = parse_run(&args)?;

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let file = File::create(output_dir.join("simulation_data.csv"))?;
    let mut writer = Writer::from_writer(file);

    let mut simulation = Simulation::with_integrator(system, integrator);
    let mut write_error = None;
    simulation.run(steps, h, |step, time, state| {
        for &index in &recorded {
            let v = state[index];
            let sample = Sample {
                step,
                time,
                particle: index / 2,
                x: v.x,
                y: v.y,
                z: v.z,
            };
            if let Err(e) = writer.serialize(sample) {
                write_error = write_error.take().or(Some(e));
            }
        }
    })?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    writer.flush()?;
    println!(
        "{} steps of {} written to output/simulation_data.csv",
        simulation.steps_taken(),
        integrator
    );

    Ok(())
}
