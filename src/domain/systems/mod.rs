// Per-tick simulation systems. Each one only touches the state it is handed.

pub mod ai;
pub mod damage;
pub mod movement;
pub mod projectiles;
