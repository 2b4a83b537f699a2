//! PCM tone synthesis for the audio channel.

use std::f32::consts::TAU;

const BASE_FREQ_HZ: f32 = 220.0;
const FREQ_SPAN_HZ: f32 = 780.0;
const AMPLITUDE: f32 = i16::MAX as f32 / 8.0;

/// Streaming tone generator for the sonification channel.
///
/// Each buffer linearly cross-fades from the previous call's frequency to
/// the current one, so pitch jumps between touched elements never click.
/// The synthesis clock and previous pitch persist across sorting runs; only
/// continuity of sound depends on them.
#[derive(Debug, Clone)]
pub struct ToneSynth {
    sample_period: f64,
    clock: f64,
    previous_scale: f32,
}

impl ToneSynth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_period: 1.0 / f64::from(sample_rate),
            clock: 0.0,
            previous_scale: 0.0,
        }
    }

    /// Fills `buffer` with one frame's worth of tone. `pitch_scale` in
    /// `[0, 1]` maps linearly onto 220–1000 Hz; `None` carries the previous
    /// pitch forward (a cross-fade between two renders of the same tone).
    ///
    /// The fade weights run over `0..=1` inclusive: the first sample is a
    /// full-weight previous-frequency sample, the last a full-weight
    /// current-frequency one.
    pub fn render(&mut self, pitch_scale: Option<f32>, buffer: &mut [i16]) {
        let target = pitch_scale.unwrap_or(self.previous_scale);
        let last = buffer.len().saturating_sub(1).max(1) as f32;

        for (i, sample) in buffer.iter_mut().enumerate() {
            let time = self.clock as f32;
            let new_wave = harmonic_wave(time, target);
            let old_wave = harmonic_wave(time, self.previous_scale);

            let fade = i as f32 / last;
            let wave = new_wave * fade + old_wave * (1.0 - fade);
            *sample = (wave * AMPLITUDE) as i16;
            self.clock += self.sample_period;
        }
        self.previous_scale = target;
    }
}

/// Writes one buffer of true silence, for settle ticks. Does not advance
/// the synthesis clock.
pub fn write_silence(buffer: &mut [i16]) {
    buffer.fill(0);
}

/// Fundamental plus two octave harmonics at half and quarter amplitude.
fn harmonic_wave(time: f32, scale: f32) -> f32 {
    let freq = BASE_FREQ_HZ + scale * FREQ_SPAN_HZ;
    let phase = TAU * freq * time;
    phase.sin() + (phase * 2.0).sin() / 2.0 + (phase * 4.0).sin() / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_fade_is_full_weight_at_the_buffer_bounds() {
        let mut synth = ToneSynth::new(4_410);
        let mut first = [0i16; 32];
        synth.render(Some(0.2), &mut first);

        let clock = synth.clock;
        let period = synth.sample_period;

        let mut second = [0i16; 32];
        synth.render(Some(0.9), &mut second);

        // First sample: the old 0.2-scale tone at full weight.
        let expected_first = (harmonic_wave(clock as f32, 0.2) * AMPLITUDE) as i16;
        assert_eq!(second[0], expected_first);

        // Last sample: the new 0.9-scale tone at full weight, at the clock
        // value reached by 31 per-sample increments.
        let mut time = clock;
        for _ in 0..31 {
            time += period;
        }
        let expected_last = (harmonic_wave(time as f32, 0.9) * AMPLITUDE) as i16;
        assert_eq!(second[31], expected_last);
    }

    #[test]
    fn no_touch_carries_the_previous_pitch_forward() {
        let mut primed = ToneSynth::new(4_410);
        let mut buffer = [0i16; 16];
        primed.render(Some(0.5), &mut buffer);

        let mut explicit = primed.clone();
        let mut carried = [0i16; 16];
        let mut repeated = [0i16; 16];
        primed.render(None, &mut carried);
        explicit.render(Some(0.5), &mut repeated);

        assert_eq!(carried, repeated);
    }

    #[test]
    fn pitch_maps_onto_the_audible_range() {
        assert!((BASE_FREQ_HZ - 220.0).abs() < f32::EPSILON);
        assert!((BASE_FREQ_HZ + FREQ_SPAN_HZ - 1000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn silence_is_all_zero() {
        let mut buffer = [123i16; 8];
        write_silence(&mut buffer);
        assert_eq!(buffer, [0i16; 8]);
    }
}
