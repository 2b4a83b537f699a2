//! Turns render-trigger events into a synchronised stream of video frames
//! and audio buffers.

use std::time::{Duration, Instant};

use crate::array::{Counters, RenderHook, Touched};
use crate::audio::{self, ToneSynth};
use crate::clock::RenderThrottle;
use crate::config::AppConfig;
use crate::record::MediaSink;
use crate::render::{Color, FrameCanvas};
use crate::Result;

const HUD_X: u32 = 15;
const HUD_Y: u32 = 15;
const HUD_LINE_HEIGHT: u32 = 16;

/// Display state for the run in progress: the HUD label and the green
/// verified-prefix watermark.
#[derive(Debug, Clone, Default)]
struct RunContext {
    label: String,
    verified: usize,
}

/// The stage between the instrumented array and the output channels.
///
/// On every render-trigger event it applies the frame-skip throttle; when a
/// frame materialises it draws the bar chart and HUD, synthesises the
/// matching audio buffer, and appends both to the sink in order.
#[derive(Debug)]
pub struct RenderPipeline<C, S> {
    canvas: C,
    sink: S,
    throttle: RenderThrottle,
    synth: ToneSynth,
    context: RunContext,
    audio_buffer: Vec<i16>,
    audio_bytes: Vec<u8>,
}

impl<C: FrameCanvas, S: MediaSink> RenderPipeline<C, S> {
    pub fn new(config: &AppConfig, canvas: C, sink: S) -> Self {
        let samples = config.samples_per_frame();
        Self {
            canvas,
            sink,
            throttle: RenderThrottle::new(0),
            synth: ToneSynth::new(config.audio.sample_rate),
            context: RunContext::default(),
            audio_buffer: vec![0; samples],
            audio_bytes: vec![0; samples * 2],
        }
    }

    /// Starts a new labelled run: sets the HUD label and frame-skip factor
    /// and zeroes the algorithm clock.
    pub fn begin_run(&mut self, label: &str, skip_frames: u32) {
        self.context.label.clear();
        self.context.label.push_str(label);
        self.throttle.set_skip_frames(skip_frames);
        self.reset_clock();
    }

    /// Zeroes the algorithm-attributed clock, so for instance the shuffle's
    /// own cost is not charged to the run that follows it.
    pub fn reset_clock(&mut self) {
        self.throttle.begin_run(Instant::now());
    }

    pub fn process_time(&self) -> Duration {
        self.throttle.process_time()
    }

    /// Moves the green verification watermark; elements below it are drawn
    /// as verified.
    pub fn set_verified(&mut self, verified: usize) {
        self.context.verified = verified;
    }

    /// Emits `ticks` frames of the current state with fully-zeroed audio --
    /// the pause before and after each run. Bypasses the throttle and does
    /// not charge process time.
    pub fn settle(&mut self, values: &[u32], counters: &Counters, ticks: u32) -> Result<()> {
        audio::write_silence(&mut self.audio_buffer);
        for _ in 0..ticks {
            self.draw_frame(values, counters, Touched::None);
            self.emit()?;
        }
        Ok(())
    }

    /// Materialises one frame regardless of the throttle state.
    pub fn force_frame(
        &mut self,
        values: &[u32],
        counters: &Counters,
        touched: Touched,
    ) -> Result<()> {
        self.materialise(values, counters, touched)
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn materialise(&mut self, values: &[u32], counters: &Counters, touched: Touched) -> Result<()> {
        self.draw_frame(values, counters, touched);

        let pitch = touched
            .primary()
            .map(|index| values[index] as f32 / values.len().max(1) as f32);
        self.synth.render(pitch, &mut self.audio_buffer);

        self.emit()
    }

    fn draw_frame(&mut self, values: &[u32], counters: &Counters, touched: Touched) {
        let total = values.len();
        self.canvas.clear();

        for (index, value) in values.iter().enumerate() {
            let color = if touched.contains(index) {
                Color::RED
            } else if index < self.context.verified {
                Color::GREEN
            } else {
                Color::WHITE
            };
            let height = *value as f32 / total.max(1) as f32;
            self.canvas.draw_bar(index, total, height, color);
        }

        let label = if self.context.label.is_empty() {
            "(no name)"
        } else {
            self.context.label.as_str()
        };
        let process_ms = self.throttle.process_time().as_secs_f64() * 1000.0;
        let lines = [
            format!("Sort name: {label}"),
            format!("Array size: {total}"),
            format!("Array Access: {}", counters.array_access),
            format!("Comparisons: {}", counters.comparisons),
            format!("Process Time: {process_ms:.3} ms"),
        ];
        for (line, text) in lines.iter().enumerate() {
            self.canvas
                .draw_text(HUD_X, HUD_Y + HUD_LINE_HEIGHT * line as u32, text);
        }
    }

    fn emit(&mut self) -> Result<()> {
        self.sink.append_video_frame(self.canvas.pixel_buffer())?;

        for (chunk, sample) in self.audio_bytes.chunks_exact_mut(2).zip(&self.audio_buffer) {
            chunk.copy_from_slice(&sample.to_le_bytes());
        }
        self.sink.append_audio_samples(&self.audio_bytes)?;
        Ok(())
    }
}

impl<C: FrameCanvas, S: MediaSink> RenderHook for RenderPipeline<C, S> {
    fn on_step(&mut self, values: &[u32], counters: &Counters, touched: Touched) -> Result<()> {
        if self.throttle.on_event(Instant::now()) {
            self.materialise(values, counters, touched)?;
        }
        self.throttle.mark_exit(Instant::now());
        Ok(())
    }
}
