//! Audio playback using rodio
//!
//! One looping music track and two sound effects, all decoded once at
//! startup. Missing files or a missing output device make the affected calls
//! silent no-ops.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::{Buffered, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::AssetError;
use crate::settings::Settings;

/// Decoded clip that can be cloned cheaply for each playback
pub type Clip = Buffered<Decoder<BufReader<File>>>;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flaps
    Jump,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Path relative to the asset root
    pub fn file(self) -> &'static str {
        match self {
            SoundEffect::Jump => "Audio/jump.wav",
            SoundEffect::GameOver => "Audio/over.wav",
        }
    }
}

/// Background music track, relative to the asset root
pub const MUSIC_FILE: &str = "Audio/bgm.wav";

/// Audio requests queued by the screen machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Play(SoundEffect),
    StartMusic,
    StopMusic,
}

/// Decode an audio file fully into memory
pub fn load_clip(path: &Path) -> Result<Clip, AssetError> {
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AssetError::Audio {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoder.buffered())
}

fn load_or_log(path: &Path) -> Option<Clip> {
    load_clip(path).inspect_err(|err| err.log()).ok()
}

/// Audio manager for the game
pub struct AudioManager {
    /// Output stream must stay alive for its handle to work
    output: Option<(OutputStream, OutputStreamHandle)>,
    music_track: Option<Clip>,
    jump: Option<Clip>,
    game_over: Option<Clip>,
    /// Currently playing music, if any
    music: Option<Sink>,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    /// Open the default output device and decode all clips
    pub fn new(settings: &Settings) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("No audio output device ({err}) - audio disabled");
                None
            }
        };

        let root = &settings.asset_root;
        let manager = Self {
            output,
            music_track: load_or_log(&root.join(MUSIC_FILE)),
            jump: load_or_log(&root.join(SoundEffect::Jump.file())),
            game_over: load_or_log(&root.join(SoundEffect::GameOver.file())),
            music: None,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        };
        log::info!(
            "Audio ready: output={}, music={}, jump={}, game_over={}",
            manager.output.is_some(),
            manager.music_track.is_some(),
            manager.jump.is_some(),
            manager.game_over.is_some()
        );
        manager
    }

    /// A manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            music_track: None,
            jump: None,
            game_over: None,
            music: None,
            sfx_volume: 0.0,
            music_volume: 0.0,
        }
    }

    fn handle(&self) -> Option<&OutputStreamHandle> {
        self.output.as_ref().map(|(_, handle)| handle)
    }

    /// Carry out a queued cue
    pub fn apply(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Play(effect) => self.play(effect),
            AudioCue::StartMusic => self.start_music(),
            AudioCue::StopMusic => self.stop_music(),
        }
    }

    /// Play a sound effect (fire and forget)
    pub fn play(&self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let clip = match effect {
            SoundEffect::Jump => &self.jump,
            SoundEffect::GameOver => &self.game_over,
        };
        let (Some(handle), Some(clip)) = (self.handle(), clip) else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(self.sfx_volume);
                sink.append(clip.clone());
                sink.detach();
            }
            Err(err) => log::warn!("Failed to play {effect:?}: {err}"),
        }
    }

    /// Start the music track from the beginning, looping forever
    pub fn start_music(&mut self) {
        self.stop_music();
        let (Some(handle), Some(track)) = (self.handle(), &self.music_track) else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(self.music_volume);
                sink.append(track.clone().repeat_infinite());
                self.music = Some(sink);
            }
            Err(err) => log::warn!("Failed to start music: {err}"),
        }
    }

    /// Stop the music track
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    /// Whether music is currently playing
    pub fn music_playing(&self) -> bool {
        self.music.as_ref().is_some_and(|sink| !sink.empty())
    }
}
