//! Ambient focus sound playback state

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Overall volume applied on top of the individual layers
pub const MASTER_GAIN: f32 = 0.08;

/// One sine layer of the ambient soundscape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLayer {
    pub frequency_hz: f32,
    pub gain: f32,
}

/// Low drones layered for a calm background
pub const AMBIENT_LAYERS: [AmbientLayer; 4] = [
    AmbientLayer { frequency_hz: 55.0, gain: 0.12 },
    AmbientLayer { frequency_hz: 73.0, gain: 0.10 },
    AmbientLayer { frequency_hz: 110.0, gain: 0.08 },
    AmbientLayer { frequency_hz: 147.0, gain: 0.06 },
];

/// Serializable view of the audio companion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStatus {
    pub available: bool,
    pub enabled: bool,
    pub playing: bool,
    pub status: String,
}

/// Playback state of the ambient sound companion.
///
/// Sound is rendered by whoever consumes this state; the service only tracks
/// whether it should be audible. Failures never propagate to the caller.
#[derive(Debug, Clone)]
pub struct AmbientAudio {
    available: bool,
    enabled: bool,
    playing: bool,
    position_secs: u64,
}

impl AmbientAudio {
    /// Create the audio companion. `available` is false when no output device
    /// can be used; `enabled` is the user's on/off preference.
    pub fn new(available: bool, enabled: bool) -> Self {
        if !available {
            warn!("Ambient audio output unavailable, continuing without sound");
        }
        Self {
            available,
            enabled,
            playing: false,
            position_secs: 0,
        }
    }

    pub fn play(&mut self) {
        if !self.enabled || !self.available {
            debug!("Skipping ambient audio playback (enabled={}, available={})",
                   self.enabled, self.available);
            return;
        }
        if !self.playing {
            info!("Starting ambient focus sound");
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            info!("Pausing ambient focus sound");
            self.playing = false;
        }
    }

    /// Pause and rewind to the beginning
    pub fn stop(&mut self) {
        self.pause();
        self.position_secs = 0;
    }

    /// Advance the playback position while sound is audible
    pub fn advance(&mut self, secs: u64) {
        if self.playing {
            self.position_secs += secs;
        }
    }

    /// Flip the user's preference. Disabling silences playback immediately.
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        info!("Ambient audio {}", if self.enabled { "enabled" } else { "disabled" });
        if !self.enabled {
            self.stop();
        }
        self.enabled
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_secs(&self) -> u64 {
        self.position_secs
    }

    /// Human readable status line
    pub fn status(&self) -> &'static str {
        if !self.available {
            "Audio unavailable"
        } else if !self.enabled {
            "Audio disabled"
        } else if self.playing {
            "Playing ambient focus sound"
        } else {
            "Ambient sound ready"
        }
    }

    pub fn snapshot(&self) -> AudioStatus {
        AudioStatus {
            available: self.available,
            enabled: self.enabled,
            playing: self.playing,
            status: self.status().to_string(),
        }
    }
}

impl Default for AmbientAudio {
    fn default() -> Self {
        Self::new(true, true)
    }
}
