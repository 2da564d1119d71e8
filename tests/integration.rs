use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use springsim::config::{ClothConfig, PendulumConfig};
use springsim::errors::{ensure_len, Result, SimulationError};
use springsim::integrators::{IntegratorKind, Rkf45, TimeStepper};
use springsim::models::{ParticleSystem, State};
use springsim::systems::{ClothSystem, PendulumSystem, SimpleSystem};
use springsim::Simulation;

/// `f(x) = velocity` for every vector.
struct ConstantDrift {
    state: State<3>,
    velocity: na::Vector3<f64>,
}

/// `f(x) = -rate * x`.
struct Decay {
    state: State<3>,
    rate: f64,
}

/// Returns a derivative one vector too long.
struct Malformed {
    state: State<3>,
}

impl ParticleSystem<3> for ConstantDrift {
    fn state(&self) -> State<3> {
        self.state.clone()
    }

    fn set_state(&mut self, state: State<3>) -> Result<()> {
        ensure_len(self.state.len(), state.len())?;
        self.state = state;
        Ok(())
    }

    fn eval_f(&self, state: &State<3>) -> Result<State<3>> {
        Ok(state.iter().map(|_| self.velocity).collect())
    }
}

impl ParticleSystem<3> for Decay {
    fn state(&self) -> State<3> {
        self.state.clone()
    }

    fn set_state(&mut self, state: State<3>) -> Result<()> {
        ensure_len(self.state.len(), state.len())?;
        self.state = state;
        Ok(())
    }

    fn eval_f(&self, state: &State<3>) -> Result<State<3>> {
        Ok(state.clone() * -self.rate)
    }
}

impl ParticleSystem<3> for Malformed {
    fn state(&self) -> State<3> {
        self.state.clone()
    }

    fn set_state(&mut self, state: State<3>) -> Result<()> {
        self.state = state;
        Ok(())
    }

    fn eval_f(&self, state: &State<3>) -> Result<State<3>> {
        Ok(State::zeros(state.len() + 1))
    }
}

/// L1 error of the simple system against its closed form at `t = 1`.
fn simple_error(kind: IntegratorKind, h: f64) -> f64 {
    let mut system = SimpleSystem::new();
    let initial = system.state();
    let mut stepper = kind.build::<3>();
    let steps = (1.0 / h).round() as usize;
    for _ in 0..steps {
        stepper.take_step(&mut system, h).unwrap();
    }
    let exact = SimpleSystem::exact(&initial, steps as f64 * h);
    system.state().l1_distance(&exact).unwrap()
}

#[test]
fn fixed_step_integrators_converge_at_their_order() {
    let cases = [
        (IntegratorKind::ForwardEuler, 0.01),
        (IntegratorKind::Trapezoidal, 0.1),
        (IntegratorKind::Rk4, 0.1),
    ];
    for (kind, h) in cases {
        let coarse = simple_error(kind, h);
        let fine = simple_error(kind, h / 2.0);
        let observed = (coarse / fine).log2();
        assert!(
            (observed - kind.order() as f64).abs() < 0.3,
            "{kind}: observed order {observed}"
        );
    }
}

#[test]
fn eval_f_does_not_touch_the_system() {
    let system = PendulumSystem::new(&PendulumConfig::default()).unwrap();
    let before = system.state();

    let mut rng = StdRng::seed_from_u64(42);
    let probe: State<3> = (0..before.len())
        .map(|_| {
            na::Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();

    let first = system.eval_f(&probe).unwrap();
    let second = system.eval_f(&probe).unwrap();
    assert_eq!(first, second);
    assert_eq!(system.state(), before);
}

#[test]
fn zero_step_leaves_state_unchanged() {
    for kind in IntegratorKind::ALL {
        let mut system = PendulumSystem::new(&PendulumConfig::default()).unwrap();
        let before = system.state();
        let taken = kind.build::<3>().take_step(&mut system, 0.0).unwrap();

        assert_eq!(taken, 0.0, "{kind}");
        assert_eq!(system.state(), before, "{kind}");
    }
}

#[test]
fn steps_preserve_state_length() {
    for kind in IntegratorKind::ALL {
        let mut cloth = ClothSystem::new(&ClothConfig::square(3)).unwrap();
        let len = cloth.state_len();
        let mut stepper = kind.build::<3>();
        for _ in 0..5 {
            stepper.take_step(&mut cloth, 0.01).unwrap();
        }
        assert_eq!(cloth.state().len(), len, "{kind}");
    }
}

#[test]
fn constant_derivative_is_integrated_exactly() {
    for kind in IntegratorKind::ALL {
        let mut system = ConstantDrift {
            state: State::zeros(1),
            velocity: na::Vector3::new(1.0, 0.0, 0.0),
        };
        let taken = kind.build::<3>().take_step(&mut system, 1.0).unwrap();

        assert_relative_eq!(taken, 1.0);
        assert_abs_diff_eq!(system.state()[0], na::Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }
}

#[test]
fn adaptive_step_shrinks_on_stiff_decay() {
    let system = Decay {
        state: State::new(vec![na::Vector3::new(1.0, 0.0, 0.0)]),
        rate: 1000.0,
    };
    let rkf45 = Rkf45::default();
    let adaptation = rkf45.adapt::<3>(&system, &system.state(), 1.0).unwrap();

    assert!(adaptation.error > rkf45.controller().tolerance());
    assert!(adaptation.next_step < 1.0);
}

#[test]
fn adaptive_step_survives_zero_error() {
    let mut system = Decay {
        state: State::zeros(2),
        rate: 1000.0,
    };
    let mut rkf45 = Rkf45::default();
    let taken = TimeStepper::<3>::take_step(&mut rkf45, &mut system, 0.1).unwrap();

    assert_relative_eq!(taken, 0.1);
    assert_eq!(rkf45.last_step_size(), Some(0.1));
    assert!(system.state().is_finite());
    assert_eq!(system.state(), State::zeros(2));
}

#[test]
fn pinned_cloth_corners_do_not_move() {
    let mut cloth = ClothSystem::new(&ClothConfig::square(4)).unwrap();
    let left = cloth.position(0, 0);
    let right = cloth.position(0, 3);
    let free = cloth.position(3, 3);

    let mut stepper = IntegratorKind::Rk4.build::<3>();
    for _ in 0..100 {
        stepper.take_step(&mut cloth, 0.01).unwrap();
    }

    assert_eq!(cloth.position(0, 0), left);
    assert_eq!(cloth.position(0, 3), right);
    assert_ne!(cloth.position(3, 3), free);
    assert!(cloth.state().is_finite());
}

#[test]
fn sweep_motion_drags_the_pinned_corners() {
    let mut cloth = ClothSystem::new(&ClothConfig::square(3)).unwrap();
    cloth.set_motion(true);

    let mut stepper = IntegratorKind::Rk4.build::<3>();
    for _ in 0..10 {
        stepper.take_step(&mut cloth, 0.01).unwrap();
    }

    assert_relative_eq!(cloth.position(0, 0).z, -0.1, epsilon = 1e-9);
    assert_relative_eq!(cloth.position(0, 2).z, -0.1, epsilon = 1e-9);
    assert_eq!(cloth.position(0, 0).x, 0.0);
}

#[test]
fn drag_dissipates_pendulum_energy() {
    let system = PendulumSystem::new(&PendulumConfig::default()).unwrap();
    let initial = system.total_energy();

    let mut simulation = Simulation::<3>::with_integrator(Box::new(system), IntegratorKind::Rk4);
    simulation.run(200, 0.01, |_, _, _| {}).unwrap();

    let state = simulation.state();
    assert!(state.is_finite());
    let mut settled = PendulumSystem::new(&PendulumConfig::default()).unwrap();
    settled.set_state(state).unwrap();
    assert!(settled.total_energy() < initial);
}

#[test]
fn malformed_derivative_is_reported_without_committing() {
    for kind in IntegratorKind::ALL {
        let mut system = Malformed {
            state: State::zeros(2),
        };
        let result = kind.build::<3>().take_step(&mut system, 0.1);

        assert_eq!(
            result,
            Err(SimulationError::ShapeMismatch {
                expected: 2,
                found: 3
            }),
            "{kind}"
        );
        assert_eq!(system.state(), State::zeros(2));
    }
}

#[test]
fn planar_system_follows_the_circle() {
    let initial = State::new(vec![na::Vector2::new(1.0, 0.0), na::Vector2::new(0.0, 2.0)]);
    let mut system = SimpleSystem::with_state(initial.clone()).unwrap();

    let mut simulation_time = 0.0;
    let mut stepper = IntegratorKind::Rk4.build::<2>();
    for _ in 0..20 {
        simulation_time += stepper.take_step(&mut system, 0.05).unwrap();
    }

    let exact = SimpleSystem::exact(&initial, simulation_time);
    assert!(system.state().l1_distance(&exact).unwrap() < 1e-6);
}

#[test]
fn unknown_selector_is_rejected() {
    assert_eq!(
        "x".parse::<IntegratorKind>(),
        Err(SimulationError::UnknownIntegrator('x'))
    );
}
