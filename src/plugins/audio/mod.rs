//! Sound cue seam.
//!
//! The simulation never plays audio itself. It writes [`SoundCue`] messages and
//! moves on; whatever backend is installed drains them. The default consumer
//! only traces them.

use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Shot,
    AlertA,
    AlertB,
    CutA,
    CutB,
    CutC,
    PainA,
    PainB,
    PainC,
    DeathA,
    DeathB,
    DeathC,
    DeathD,
    AreaAlarm,
    Clue,
    WalkLoop,
    RunLoop,
}

impl SoundId {
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundId::Shot => "audio/shot.wav",
            SoundId::AlertA => "audio/alert_a.wav",
            SoundId::AlertB => "audio/alert_b.wav",
            SoundId::CutA => "audio/cut_a.wav",
            SoundId::CutB => "audio/cut_b.wav",
            SoundId::CutC => "audio/cut_c.wav",
            SoundId::PainA => "audio/pain_a.wav",
            SoundId::PainB => "audio/pain_b.wav",
            SoundId::PainC => "audio/pain_c.wav",
            SoundId::DeathA => "audio/death_a.wav",
            SoundId::DeathB => "audio/death_b.wav",
            SoundId::DeathC => "audio/death_c.wav",
            SoundId::DeathD => "audio/death_d.wav",
            SoundId::AreaAlarm => "audio/area_alarm.wav",
            SoundId::Clue => "audio/clue.wav",
            SoundId::WalkLoop => "audio/walk_loop.wav",
            SoundId::RunLoop => "audio/run_loop.wav",
        }
    }

    pub fn alert(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) { SoundId::AlertA } else { SoundId::AlertB }
    }

    pub fn cut(rng: &mut impl Rng) -> Self {
        [SoundId::CutA, SoundId::CutB, SoundId::CutC][rng.gen_range(0..3)]
    }

    pub fn pain(rng: &mut impl Rng) -> Self {
        [SoundId::PainA, SoundId::PainB, SoundId::PainC][rng.gen_range(0..3)]
    }

    /// One of four death screams, or silence one time in five.
    pub fn death(rng: &mut impl Rng) -> Option<Self> {
        match rng.gen_range(0..5) {
            0 => Some(SoundId::DeathA),
            1 => Some(SoundId::DeathB),
            2 => Some(SoundId::DeathC),
            3 => Some(SoundId::DeathD),
            _ => None,
        }
    }
}

/// Fire-and-forget request to the audio collaborator.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Play(SoundId),
    StartLoop(SoundId),
    StopLoop(SoundId),
}

pub fn plugin(app: &mut App) {
    app.add_message::<SoundCue>()
        .add_systems(Update, trace_sound_cues);
}

fn trace_sound_cues(mut cues: MessageReader<SoundCue>) {
    for cue in cues.read() {
        match cue {
            SoundCue::Play(id) => debug!("sound: play {}", id.asset_path()),
            SoundCue::StartLoop(id) => debug!("sound: loop {}", id.asset_path()),
            SoundCue::StopLoop(id) => debug!("sound: stop {}", id.asset_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn death_is_sometimes_silent() {
        let mut rng = StdRng::seed_from_u64(7);
        let outcomes: Vec<_> = (0..200).map(|_| SoundId::death(&mut rng)).collect();
        assert!(outcomes.iter().any(Option::is_none));
        assert!(outcomes.iter().any(|o| *o == Some(SoundId::DeathD)));
    }

    #[test]
    fn variants_stay_in_their_family() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(matches!(SoundId::alert(&mut rng), SoundId::AlertA | SoundId::AlertB));
            assert!(matches!(SoundId::cut(&mut rng), SoundId::CutA | SoundId::CutB | SoundId::CutC));
            assert!(matches!(SoundId::pain(&mut rng), SoundId::PainA | SoundId::PainB | SoundId::PainC));
        }
    }
}
