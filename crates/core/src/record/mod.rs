use std::io::Write;

use crate::Result;

/// The two append-only byte channels consumed by the downstream encoder.
///
/// Frames and audio buffers must be appended in strict temporal order; the
/// streams carry no framing, so format parameters travel out of band via
/// [`crate::config::StreamFormat`].
pub trait MediaSink {
    fn append_video_frame(&mut self, frame: &[u8]) -> Result<()>;

    fn append_audio_samples(&mut self, samples: &[u8]) -> Result<()>;

    /// Flushes any buffering underneath; called once after the last stage.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink writing each channel to an arbitrary byte stream, typically a pipe
/// into an encoder such as FFmpeg.
#[derive(Debug)]
pub struct StreamSink<V, A> {
    video: V,
    audio: A,
}

impl<V: Write, A: Write> StreamSink<V, A> {
    pub fn new(video: V, audio: A) -> Self {
        Self { video, audio }
    }
}

impl<V: Write, A: Write> MediaSink for StreamSink<V, A> {
    fn append_video_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.video.write_all(frame)?;
        Ok(())
    }

    fn append_audio_samples(&mut self, samples: &[u8]) -> Result<()> {
        self.audio.write_all(samples)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.video.flush()?;
        self.audio.flush()?;
        Ok(())
    }
}

/// Sink that retains everything in memory; the test double for the pipeline.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub video_frames: Vec<Vec<u8>>,
    pub audio_buffers: Vec<Vec<u8>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaSink for InMemorySink {
    fn append_video_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.video_frames.push(frame.to_vec());
        Ok(())
    }

    fn append_audio_samples(&mut self, samples: &[u8]) -> Result<()> {
        self.audio_buffers.push(samples.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_sink_passes_bytes_through_in_order() {
        let mut sink = StreamSink::new(Vec::new(), Vec::new());

        sink.append_video_frame(&[1, 2, 3]).unwrap();
        sink.append_video_frame(&[4]).unwrap();
        sink.append_audio_samples(&[9, 9]).unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.video, [1, 2, 3, 4]);
        assert_eq!(sink.audio, [9, 9]);
    }
}
