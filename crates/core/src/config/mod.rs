use serde::{Deserialize, Serialize};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub video: VideoConfig,
    pub audio: AudioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            video: VideoConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl AppConfig {
    /// Number of PCM samples that cover exactly one video frame.
    pub fn samples_per_frame(&self) -> usize {
        (self.audio.sample_rate / self.video.frame_rate) as usize
    }
}

/// Configuration for the raw video channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frame_rate: 60,
        }
    }
}

/// Configuration for the raw audio channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
        }
    }
}

/// Description of the two raw output streams.
///
/// The streams themselves carry no framing or headers, so this descriptor is
/// the only way format parameters reach the downstream encoder. The
/// application prints it as JSON for the encoder wrapper to consume.
#[derive(Debug, Clone, Serialize)]
pub struct StreamFormat {
    pub video: VideoStreamFormat,
    pub audio: AudioStreamFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoStreamFormat {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub pixel_format: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioStreamFormat {
    pub sample_rate: u32,
    pub channels: u32,
    pub sample_format: &'static str,
    pub samples_per_frame: usize,
}

impl StreamFormat {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            video: VideoStreamFormat {
                width: config.video.width,
                height: config.video.height,
                frame_rate: config.video.frame_rate,
                pixel_format: "bgra",
            },
            audio: AudioStreamFormat {
                sample_rate: config.audio.sample_rate,
                channels: 1,
                sample_format: "s16le",
                samples_per_frame: config.samples_per_frame(),
            },
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| crate::SortVizError::msg(err.to_string()))
    }

    /// Example invocation for muxing the two raw streams with the system
    /// `ffmpeg`. The binary is a runtime prerequisite of the encoder wrapper,
    /// not of this crate.
    pub fn ffmpeg_example(&self, video_path: &str, audio_path: &str, output: &str) -> String {
        format!(
            "ffmpeg -f rawvideo -pix_fmt {} -s {}x{} -r {} -i {} \
             -f {} -ar {} -ac {} -i {} {}",
            self.video.pixel_format,
            self.video.width,
            self.video.height,
            self.video.frame_rate,
            video_path,
            self.audio.sample_format,
            self.audio.sample_rate,
            self.audio.channels,
            audio_path,
            output,
        )
    }
}
