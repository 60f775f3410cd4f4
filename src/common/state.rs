//! Global state machine and the external pause signal.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}

/// Raised by the cutscene collaborator while a cinematic plays.
///
/// The simulation only ever reads this flag; while it is set the player tick and
/// the enemy population are frozen.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cinematic {
    pub active: bool,
}
