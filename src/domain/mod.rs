// Domain layer: core simulation types and rules.

pub mod errors;
pub mod events;
pub mod geometry;
pub mod intent;
pub mod ports;
pub mod simulation;
pub mod state;
pub mod systems;
pub mod tuning;

pub use errors::SetupError;
pub use events::SimEvent;
pub use intent::{Controls, Intent, TickInput};
pub use ports::Clock;
pub use simulation::{MatchSetup, Simulation};
pub use state::{
    Controller, EntitySnapshot, Facing, MatchMode, MatchPhase, PlayerSlot, ProjectileSnapshot,
    SimEntity, SimProjectile,
};
pub use tuning::MatchTuning;
