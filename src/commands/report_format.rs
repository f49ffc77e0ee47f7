use crate::domain::config::SimulationConfig;
use crate::domain::results::SimulationResults;

pub fn format_simulation_report(config: &SimulationConfig, results: &SimulationResults) -> String {
    let ratings = config
        .players
        .iter()
        .map(|rating| format!("{rating:.1}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    lines.push(format!("Game format: {}", config.game_format));
    lines.push(format!("Ratings: {ratings}"));
    lines.push(format!("Points per game: {}", config.points_per_game));
    lines.push(format!("Match format: best of {}", config.match_format.max_games()));
    lines.push(format!("Side advantage: {}", config.side_advantage));
    lines.push(format!(
        "First point rule: {}",
        if config.first_point_rule { "on" } else { "off" }
    ));
    lines.push(format!("Simulations: {}", results.simulation_count));
    lines.push(String::new());
    lines.push(format!("Recommendation: {}", results.recommendation));
    if let Some(player) = results.optimal_server {
        lines.push(format!("Optimal server: Player {player}"));
    }
    lines.push(String::new());
    lines.push("Strategy | Win rate".to_string());
    lines.push("---------|---------".to_string());
    lines.push(format_rate_row("Serve First", results.serve_first_win_rate));
    lines.push(format_rate_row("Choose Side", results.choose_side_win_rate));

    lines.join("\n")
}

fn format_rate_row(label: &str, rate: f64) -> String {
    format!("{label} | {percent:.2}%", percent = rate * 100.0)
}
