use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::config::{GameFormat, SimulationConfig, TeamStrengths};
use crate::domain::results::{Recommendation, SimulationResults};
use crate::domain::side::Side;
use crate::domain::strategy::Strategy;
use crate::services::config_yaml::{ConfigYamlError, describe_counts, load_config_from_yaml_file};
use crate::services::match_play::{MatchSetup, play_match};

/// Trials handled by one worker task. Fixed so that a seed reproduces the
/// same results whatever the size of the thread pool.
pub const TRIALS_PER_CHUNK: usize = 4096;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("simulation count must be greater than zero")]
    InvalidSimulationCount,
    #[error("points per game must be greater than zero")]
    InvalidPointsPerGame,
    #[error("no player ratings supplied")]
    MissingPlayers,
    #[error("{format} needs {expected} player ratings, got {actual}")]
    PlayerCount {
        format: GameFormat,
        expected: String,
        actual: usize,
    },
    #[error("player rating must be a finite positive number, got {0}")]
    InvalidRating(f64),
    #[error("invalid simulation config: {0}")]
    Config(#[from] ConfigYamlError),
}

pub fn simulate_from_config_file(
    config_path: &str,
    seed: Option<u64>,
) -> Result<SimulationResults, SimulationError> {
    let config = load_config_from_yaml_file(config_path)?;
    match seed {
        Some(seed) => run_simulation_seeded(&config, seed),
        None => run_simulation(&config),
    }
}

pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResults, SimulationError> {
    let seed = rand::thread_rng().next_u64();
    run_simulation_seeded(config, seed)
}

/// Runs both strategies on the rayon pool. Each chunk of trials gets its own
/// generator derived from `seed`, and chunk tallies are summed.
pub fn run_simulation_seeded(
    config: &SimulationConfig,
    seed: u64,
) -> Result<SimulationResults, SimulationError> {
    let strengths = team_strengths(config)?;
    debug!(
        seed,
        chunks = config.simulation_count.div_ceil(TRIALS_PER_CHUNK),
        threads = rayon::current_num_threads(),
        "starting simulation"
    );

    let serve_first_wins = count_wins_in_parallel(config, strengths, Strategy::ServeFirst, seed);
    let choose_side_wins = count_wins_in_parallel(config, strengths, Strategy::ChooseSide, seed);
    Ok(build_results(config, serve_first_wins, choose_side_wins))
}

/// Sequential run drawing every rally from `rng`; each trial plays the
/// serve-first match and then the choose-side match.
pub fn run_simulation_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationResults, SimulationError> {
    let strengths = team_strengths(config)?;
    let serve_first = match_setup(config, strengths, Strategy::ServeFirst);
    let choose_side = match_setup(config, strengths, Strategy::ChooseSide);

    let mut serve_first_wins = 0;
    let mut choose_side_wins = 0;
    for _ in 0..config.simulation_count {
        if play_match(&serve_first, rng).winner == Side::A {
            serve_first_wins += 1;
        }
        if play_match(&choose_side, rng).winner == Side::A {
            choose_side_wins += 1;
        }
    }

    Ok(build_results(config, serve_first_wins, choose_side_wins))
}

fn team_strengths(config: &SimulationConfig) -> Result<TeamStrengths, SimulationError> {
    if config.simulation_count == 0 {
        return Err(SimulationError::InvalidSimulationCount);
    }
    if config.points_per_game == 0 {
        return Err(SimulationError::InvalidPointsPerGame);
    }
    if config.players.is_empty() {
        return Err(SimulationError::MissingPlayers);
    }
    if let Some(rating) = config
        .players
        .iter()
        .find(|rating| !rating.is_finite() || **rating <= 0.0)
    {
        return Err(SimulationError::InvalidRating(*rating));
    }

    let strengths = TeamStrengths::from_players(config.game_format, &config.players).ok_or_else(
        || SimulationError::PlayerCount {
            format: config.game_format,
            expected: describe_counts(config.game_format.accepted_player_counts()),
            actual: config.players.len(),
        },
    )?;
    if config.game_format == GameFormat::Singles && config.players.len() == 1 {
        warn!(
            rating = config.players[0],
            "singles config has one rating, both sides play at that strength"
        );
    }
    Ok(strengths)
}

/// Both strategies keep the configured side advantage for side A; they only
/// differ in who serves the first game.
fn match_setup(
    config: &SimulationConfig,
    strengths: TeamStrengths,
    strategy: Strategy,
) -> MatchSetup {
    MatchSetup {
        strengths,
        points_to_win: config.points_per_game,
        wins_needed: config.match_format.wins_needed(),
        side_advantage: config.side_advantage,
        first_point_rule: config.first_point_rule,
        a_serves_first: strategy.a_serves_first(),
        format: config.game_format,
    }
}

fn count_wins_in_parallel(
    config: &SimulationConfig,
    strengths: TeamStrengths,
    strategy: Strategy,
    seed: u64,
) -> usize {
    let setup = match_setup(config, strengths, strategy);
    let trials = config.simulation_count;
    let chunks = trials.div_ceil(TRIALS_PER_CHUNK);

    let wins: usize = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * TRIALS_PER_CHUNK;
            let len = TRIALS_PER_CHUNK.min(trials - start);
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, strategy, chunk));
            (0..len)
                .filter(|_| play_match(&setup, &mut rng).winner == Side::A)
                .count()
        })
        .sum();

    debug!(?strategy, wins, trials, "strategy tally");
    wins
}

fn chunk_seed(seed: u64, strategy: Strategy, chunk: usize) -> u64 {
    let stream = match strategy {
        Strategy::ServeFirst => 0,
        Strategy::ChooseSide => 1,
    };
    seed ^ ((chunk as u64) << 1 | stream).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn build_results(
    config: &SimulationConfig,
    serve_first_wins: usize,
    choose_side_wins: usize,
) -> SimulationResults {
    let trials = config.simulation_count as f64;
    let serve_first_win_rate = serve_first_wins as f64 / trials;
    let choose_side_win_rate = choose_side_wins as f64 / trials;
    let recommendation = Recommendation::from_win_rates(serve_first_win_rate, choose_side_win_rate);

    let optimal_server = match recommendation {
        Recommendation::ServeFirst => optimal_server(config),
        Recommendation::ChooseSide => None,
    };

    info!(
        simulations = config.simulation_count,
        serve_first_win_rate,
        choose_side_win_rate,
        %recommendation,
        "simulation finished"
    );

    SimulationResults {
        simulation_count: config.simulation_count,
        recommendation,
        serve_first_win_rate,
        choose_side_win_rate,
        optimal_server,
    }
}

/// Side A teammate who should open serve; ties go to player 1.
fn optimal_server(config: &SimulationConfig) -> Option<u8> {
    match (config.game_format, config.players.as_slice()) {
        (GameFormat::Doubles, [first, second, ..]) => Some(if first >= second { 1 } else { 2 }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::MatchFormat;
    use crate::test_support::{doubles_config, singles_config};

    #[test]
    fn run_simulation_rejects_zero_simulations() {
        let mut config = singles_config(&[4.5]);
        config.simulation_count = 0;
        let err = run_simulation_seeded(&config, 1).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSimulationCount));
    }

    #[test]
    fn run_simulation_rejects_zero_points_per_game() {
        let mut config = singles_config(&[4.5]);
        config.points_per_game = 0;
        let err = run_simulation_seeded(&config, 1).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidPointsPerGame));
    }

    #[test]
    fn run_simulation_rejects_missing_players() {
        let config = singles_config(&[]);
        let err = run_simulation_seeded(&config, 1).unwrap_err();
        assert!(matches!(err, SimulationError::MissingPlayers));
    }

    #[test]
    fn run_simulation_rejects_wrong_doubles_roster() {
        let config = doubles_config(&[4.5, 4.0, 4.5]);
        let err = run_simulation_seeded(&config, 1).unwrap_err();
        assert_eq!(err.to_string(), "doubles needs 4 player ratings, got 3");
    }

    #[test]
    fn run_simulation_rejects_non_finite_and_non_positive_ratings() {
        for rating in [f64::NAN, f64::INFINITY, 0.0, -3.0] {
            let config = singles_config(&[4.5, rating]);
            let err = run_simulation_seeded(&config, 1).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidRating(_)));
        }
    }

    #[test]
    fn huge_finite_doubles_ratings_still_simulate() {
        let mut config = doubles_config(&[1e308; 4]);
        config.simulation_count = 50;
        let results = run_simulation_seeded(&config, 1).unwrap();
        assert!((0.0..=1.0).contains(&results.serve_first_win_rate));
        assert!((0.0..=1.0).contains(&results.choose_side_win_rate));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = doubles_config(&[4.5, 4.0, 4.5, 4.0]);
        let first = run_simulation_seeded(&config, 99).unwrap();
        let second = run_simulation_seeded(&config, 99).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_runs_do_not_depend_on_thread_count() {
        let mut config = singles_config(&[4.5, 4.2]);
        config.simulation_count = 3 * TRIALS_PER_CHUNK + 17;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();

        let single_threaded = pool.install(|| run_simulation_seeded(&config, 5)).unwrap();
        let default_pool = run_simulation_seeded(&config, 5).unwrap();
        assert_eq!(single_threaded, default_pool);
    }

    #[test]
    fn rng_driven_runs_are_reproducible() {
        let config = singles_config(&[4.5, 4.0]);
        let first = run_simulation_with_rng(&config, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = run_simulation_with_rng(&config, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.simulation_count, config.simulation_count);
    }

    #[test]
    fn win_rates_stay_within_unit_interval() {
        for side_advantage in [-5, 0, 5] {
            for match_format in [MatchFormat::BestOf1, MatchFormat::BestOf3] {
                let mut config = doubles_config(&[2.0, 8.0, 6.5, 3.0]);
                config.side_advantage = side_advantage;
                config.match_format = match_format;
                config.simulation_count = 200;
                let results = run_simulation_seeded(&config, 17).unwrap();
                assert!((0.0..=1.0).contains(&results.serve_first_win_rate));
                assert!((0.0..=1.0).contains(&results.choose_side_win_rate));
            }
        }
    }

    #[test]
    fn chunk_seeds_differ_per_strategy_and_chunk() {
        let seeds = [
            chunk_seed(10, Strategy::ServeFirst, 0),
            chunk_seed(10, Strategy::ChooseSide, 0),
            chunk_seed(10, Strategy::ServeFirst, 1),
            chunk_seed(10, Strategy::ChooseSide, 1),
        ];
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn nearby_seeds_share_no_chunk_streams() {
        let streams = |seed| {
            (0..64)
                .flat_map(|chunk| {
                    [Strategy::ServeFirst, Strategy::ChooseSide]
                        .map(|strategy| chunk_seed(seed, strategy, chunk))
                })
                .collect::<Vec<u64>>()
        };
        for offset in 1..=4 {
            let base = streams(1000);
            let nearby = streams(1000 + offset);
            assert!(base.iter().all(|seed| !nearby.contains(seed)));
        }
    }

    #[test]
    fn build_results_reports_optimal_server_only_for_serve_first() {
        let config = doubles_config(&[3.5, 4.0, 4.5, 4.0]);
        let results = build_results(&config, 700, 300);
        assert_eq!(results.recommendation, Recommendation::ServeFirst);
        assert_eq!(results.optimal_server, Some(2));
        assert!((results.serve_first_win_rate - 0.7).abs() < 1e-12);

        let results = build_results(&config, 300, 700);
        assert_eq!(results.recommendation, Recommendation::ChooseSide);
        assert_eq!(results.optimal_server, None);
    }

    #[test]
    fn build_results_breaks_rating_tie_toward_player_one() {
        let config = doubles_config(&[4.0, 4.0, 4.5, 4.0]);
        let results = build_results(&config, 600, 400);
        assert_eq!(results.optimal_server, Some(1));
    }

    #[test]
    fn singles_never_suggests_a_server() {
        let config = singles_config(&[5.0, 4.0]);
        let results = build_results(&config, 900, 100);
        assert_eq!(results.recommendation, Recommendation::ServeFirst);
        assert_eq!(results.optimal_server, None);
    }

    #[test]
    fn equal_tallies_recommend_choosing_a_side() {
        let config = singles_config(&[4.5]);
        let results = build_results(&config, 500, 500);
        assert_eq!(results.recommendation, Recommendation::ChooseSide);
    }
}
