pub mod formulation;
pub mod network;
pub mod program;
pub mod solve;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod validate;
