//! Match state, turn controller, and the scoring engine

pub mod battlefield;
pub mod logger;
pub mod opponent;
pub mod phase;
pub mod resolve;
pub mod staging;
pub mod state;

pub use battlefield::{ActiveSummon, Battlefield};
pub use logger::{LogEntry, MatchLogger, OutputMode, VerbosityLevel};
pub use opponent::{choose_best_play, eligible_summons, BestPlay};
pub use phase::TurnPhase;
pub use resolve::{attune, preview, resolve, AttunementRoll, Resolution, RuleFlags};
pub use staging::{can_stage, Staging};
pub use state::{ChainEvent, MatchState, TurnOutcome};
