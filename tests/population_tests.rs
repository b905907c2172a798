#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::error::{ConfigError, SimulationError};
use flappy_evo::simulation::obstacle::Obstacle;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::population::Population;
use flappy_evo::simulation::sense::Sense;
use ndarray::Array1;

const DT: f32 = 1.0 / 60.0;

fn create_test_params() -> Params {
    Params {
        population_size: 10,
        max_generation_time: Some(2.0),
        seed: Some(42),
        ..Params::default()
    }
}

/// Only sees its own height.
struct AltitudeSense;

impl Sense for AltitudeSense {
    fn sense(&self, bird: &Bird, _obstacle: &Obstacle, params: &Params) -> Array1<f32> {
        Array1::from_vec(vec![bird.y() / params.world_height, 1.0])
    }

    fn input_size(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "Altitude"
    }
}

#[test]
fn test_population_creation() {
    let params = create_test_params();
    let population = Population::new(params.clone()).unwrap();

    assert_eq!(population.birds().len(), params.population_size);
    assert_eq!(population.alive_count(), params.population_size);
    assert_eq!(population.generation(), 0);
    assert_eq!(population.generation_time(), 0.0);
    assert!(population.history().is_empty());

    for bird in population.birds() {
        assert!(bird.is_alive());
        assert_eq!(bird.fitness(), 0.0);
        assert_eq!(bird.brain().shape(), params.layer_sizes.as_slice());
    }

    let first = population.obstacles().front().unwrap();
    assert_eq!(first.x, params.obstacle_start_x);
    assert!(population.obstacles().back().unwrap().x >= params.world_width);
}

#[test]
fn test_invalid_params_are_rejected() {
    let params = Params {
        population_size: 0,
        ..create_test_params()
    };

    assert!(matches!(
        Population::new(params),
        Err(SimulationError::Config(ConfigError::Invalid(_)))
    ));
}

#[test]
fn test_sense_must_match_input_layer() {
    let result = Population::with_sense(create_test_params(), Box::new(AltitudeSense));
    assert!(matches!(
        result,
        Err(SimulationError::DimensionMismatch {
            expected: 4,
            actual: 2
        })
    ));

    let params = Params {
        layer_sizes: vec![2, 3, 1],
        ..create_test_params()
    };
    let mut population = Population::with_sense(params, Box::new(AltitudeSense)).unwrap();
    let stats = population.run_generation(DT).unwrap();
    assert_eq!(stats.population, 10);
}

#[test]
fn test_tick_advances_world() {
    let params = create_test_params();
    let mut population = Population::new(params.clone()).unwrap();

    let finished = population.tick(DT).unwrap();

    assert!(finished.is_none());
    assert!((population.generation_time() - DT).abs() < 1e-6);
    let first = population.obstacles().front().unwrap();
    assert!((first.x - (params.obstacle_start_x - params.obstacle_speed * DT)).abs() < 1e-4);
    for bird in population.birds() {
        assert!(bird.is_alive());
        assert!((bird.fitness() - DT).abs() < 1e-6);
        assert_ne!(bird.y(), params.world_height / 2.0);
    }
}

#[test]
fn test_step_runs_frame_skip_ticks() {
    let params = Params {
        frame_skip: 3,
        ..create_test_params()
    };
    let mut population = Population::new(params).unwrap();

    let finished = population.step(DT).unwrap();

    assert!(finished.is_empty());
    assert!((population.generation_time() - 3.0 * DT).abs() < 1e-5);
}

#[test]
fn test_falling_birds_end_the_generation() {
    // No lift: every bird drops onto the floor at the same tick, long before
    // reaching the first obstacle
    let params = Params {
        flap_impulse: 0.0,
        max_generation_time: None,
        ..create_test_params()
    };
    let mut population = Population::new(params).unwrap();

    let mut ticks = 0;
    let stats = loop {
        ticks += 1;
        if let Some(stats) = population.tick(DT).unwrap() {
            break stats;
        }
    };

    // y after n ticks is 240 + n(n + 1) / 8; the body leaves the world at n = 43
    assert_eq!(ticks, 43);
    assert_eq!(stats.generation, 0);
    assert_eq!(stats.population, 10);
    assert!(!stats.uniform_fallback);
    assert!((stats.best_fitness - 43.0 * DT).abs() < 1e-3);
    assert!((stats.mean_fitness - stats.best_fitness).abs() < 1e-5);
    assert!((stats.fitness_sum - 10.0 * stats.best_fitness).abs() < 1e-3);
    assert!(stats.diversity > 0.0);

    assert_eq!(population.generation(), 1);
    assert_eq!(population.generation_time(), 0.0);
    assert_eq!(population.alive_count(), 10);
}

#[test]
fn test_birds_crash_into_obstacle() {
    // Nearly weightless birds hold their height while the first obstacle
    // scrolls into them. The opening is narrower than a bird, so every bird
    // hits the wall whatever its gap centre.
    let params = Params {
        gravity: 1.0,
        flap_impulse: 0.0,
        gap_half_height: 5.0,
        obstacle_start_x: 120.0,
        ..create_test_params()
    };
    let mut population = Population::new(params.clone()).unwrap();

    let mut ticks = 0;
    let stats = loop {
        ticks += 1;
        let obstacle = *population.obstacles().front().unwrap();
        let finished = population.tick(DT).unwrap();
        if ticks < 12 {
            assert!(finished.is_none());
            assert_eq!(population.alive_count(), 10);
            for bird in population.birds() {
                assert!(!bird.is_out_of_bounds(params.world_height));
            }
        }
        if let Some(stats) = finished {
            // The wall reaches the front of the body (80 + 12) on tick 12
            assert!(obstacle.x - params.obstacle_speed * DT <= 92.0);
            break stats;
        }
    };

    assert_eq!(ticks, 12);
    assert!((stats.duration - 12.0 * DT).abs() < 1e-4);
    assert!(stats.duration < params.max_generation_time.unwrap());
    assert!((stats.best_fitness - 12.0 * DT).abs() < 1e-4);
    assert!((stats.mean_fitness - stats.best_fitness).abs() < 1e-5);

    // The next generation starts on a fresh course
    assert_eq!(population.generation(), 1);
    assert_eq!(population.alive_count(), 10);
    let first = population.obstacles().front().unwrap();
    assert_eq!(first.x, params.obstacle_start_x);
    assert!(population.obstacles().back().unwrap().x >= params.world_width);
    for bird in population.birds() {
        assert_eq!(bird.x(), params.bird_lane_x);
        assert_eq!(bird.y(), params.world_height / 2.0);
    }
}

#[test]
fn test_tick_rejects_invalid_time_step() {
    let mut population = Population::new(create_test_params()).unwrap();

    for dt in [0.0, -DT, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            population.tick(dt),
            Err(SimulationError::InvalidTimeStep(_))
        ));
    }
    assert!(matches!(
        population.step(0.0),
        Err(SimulationError::InvalidTimeStep(_))
    ));
    assert_eq!(population.generation_time(), 0.0);
    assert_eq!(population.obstacles().front().unwrap().x, 400.0);
}

#[test]
fn test_population_size_is_invariant() {
    let params = create_test_params();
    let mut population = Population::new(params.clone()).unwrap();

    for generation in 0..5 {
        let stats = population.run_generation(DT).unwrap();

        assert_eq!(stats.generation, generation);
        assert_eq!(stats.population, params.population_size);
        assert_eq!(population.birds().len(), params.population_size);
        assert_eq!(population.alive_count(), params.population_size);
        for bird in population.birds() {
            assert_eq!(bird.fitness(), 0.0);
        }
    }
    assert_eq!(population.generation(), 5);
}

#[test]
fn test_generation_time_cap() {
    let params = Params {
        max_generation_time: Some(0.25),
        ..create_test_params()
    };
    let mut population = Population::new(params).unwrap();

    let stats = population.run_generation(DT).unwrap();

    assert!(stats.duration <= 0.25 + DT);
    assert!(stats.best_fitness <= stats.duration + 1e-4);
    assert!(stats.fitness_sum > 0.0);
}

#[test]
fn test_zero_fitness_generation_falls_back_to_uniform_selection() {
    let params = Params {
        population_size: 5,
        ..create_test_params()
    };
    let mut population = Population::new(params).unwrap();
    for bird in population.birds_mut() {
        bird.kill();
    }

    let stats = population.advance_generation().unwrap();

    assert!(stats.uniform_fallback);
    assert_eq!(stats.fitness_sum, 0.0);
    assert_eq!(population.birds().len(), 5);
    assert_eq!(population.alive_count(), 5);
    assert_eq!(population.generation(), 1);
}

#[test]
fn test_same_seed_same_evolution() {
    let params = create_test_params();
    let mut a = Population::new(params.clone()).unwrap();
    let mut b = Population::new(params).unwrap();

    for _ in 0..3 {
        assert_eq!(a.run_generation(DT).unwrap(), b.run_generation(DT).unwrap());
    }
    for (x, y) in a.birds().iter().zip(b.birds()) {
        assert_eq!(x.brain().weights(), y.brain().weights());
    }
}

#[test]
fn test_history_is_bounded() {
    let params = Params {
        population_size: 4,
        max_generation_time: Some(0.5),
        stats_history: 2,
        ..create_test_params()
    };
    let mut population = Population::new(params).unwrap();

    for _ in 0..4 {
        population.run_generation(DT).unwrap();
    }

    let history = population.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().unwrap().generation, 3);
    assert_eq!(history.iter().next().unwrap().generation, 2);
    assert!(history.best_fitness_ever().unwrap() > 0.0);
}
