//! Bauxite network planner: a web form that picks which alumina plants to open
//! and how to route bauxite and alumina through a fixed three-mine, four-plant,
//! two-smelter network at minimum cost, by solving a small MILP per request.

pub mod config;
pub mod convert;
pub mod domain;
pub mod handlers;
pub mod models;
pub mod render;
