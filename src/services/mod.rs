pub mod config_yaml;
pub mod game;
pub mod match_play;
pub mod point_model;
pub mod results_chart;
pub mod simulation;
