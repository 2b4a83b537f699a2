//! Fixed programme sequencing: shuffle, settle, sort, verify, settle.

use crate::array::{InstrumentedArray, Touched};
use crate::config::AppConfig;
use crate::pipeline::RenderPipeline;
use crate::record::MediaSink;
use crate::render::FrameCanvas;
use crate::sorts::{Algorithm, RadixBase};
use crate::{Result, SortVizError};

const SETTLE_TICKS: u32 = 60;
const SHUFFLE_LABEL: &str = "Shuffling...";
const DEFAULT_SEED: u64 = 1;

/// One entry of the session programme.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub algorithm: Algorithm,
    pub array_size: usize,
    pub skip_frames: u32,
}

/// The fixed demonstration sequence: the linearithmic family at 4096
/// elements with heavy frame skipping, then the quadratic family at 256
/// with light skipping, so total video duration stays comparable across
/// algorithms of very different operation counts.
pub fn default_program() -> Vec<Stage> {
    const LARGE: usize = 4096;
    const LARGE_SKIP: u32 = 64;
    const SMALL: usize = 256;
    const SMALL_SKIP: u32 = 8;

    vec![
        Stage {
            algorithm: Algorithm::Radix(RadixBase::Four),
            array_size: LARGE,
            skip_frames: LARGE_SKIP,
        },
        Stage {
            algorithm: Algorithm::Radix(RadixBase::Eight),
            array_size: LARGE,
            skip_frames: LARGE_SKIP,
        },
        Stage {
            algorithm: Algorithm::Radix(RadixBase::Sixteen),
            array_size: LARGE,
            skip_frames: LARGE_SKIP,
        },
        Stage {
            algorithm: Algorithm::Quick,
            array_size: LARGE,
            skip_frames: LARGE_SKIP,
        },
        Stage {
            algorithm: Algorithm::Merge,
            array_size: LARGE,
            skip_frames: LARGE_SKIP,
        },
        Stage {
            algorithm: Algorithm::Bubble,
            array_size: SMALL,
            skip_frames: SMALL_SKIP,
        },
        Stage {
            algorithm: Algorithm::Insertion,
            array_size: SMALL,
            skip_frames: SMALL_SKIP,
        },
    ]
}

/// Owns the array, render pipeline and RNG for one process-lifetime session
/// and drives stages through their full lifecycle.
pub struct Session<C, S> {
    array: InstrumentedArray<RenderPipeline<C, S>>,
    rng: fastrand::Rng,
}

impl<C: FrameCanvas, S: MediaSink> Session<C, S> {
    pub fn new(config: &AppConfig, canvas: C, sink: S) -> Self {
        Self::with_seed(config, canvas, sink, DEFAULT_SEED)
    }

    /// A fixed seed keeps whole sessions reproducible end to end.
    pub fn with_seed(config: &AppConfig, canvas: C, sink: S, seed: u64) -> Self {
        let pipeline = RenderPipeline::new(config, canvas, sink);
        Self {
            array: InstrumentedArray::new(0, pipeline),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Runs every stage of `program` in order.
    pub fn run_program(&mut self, program: &[Stage]) -> Result<()> {
        for stage in program {
            self.run_stage(stage)?;
        }
        Ok(())
    }

    /// Shuffle, settle, sort, verify, settle for a single stage.
    pub fn run_stage(&mut self, stage: &Stage) -> Result<()> {
        self.array.reset(stage.array_size);

        self.array.hook_mut().set_verified(0);
        self.array
            .hook_mut()
            .begin_run(SHUFFLE_LABEL, stage.skip_frames);
        self.array.shuffle(&mut self.rng)?;
        self.array.reset_counters();
        self.array.hook_mut().reset_clock();

        self.settle()?;

        self.array
            .hook_mut()
            .begin_run(stage.algorithm.name(), stage.skip_frames);
        stage.algorithm.run(&mut self.array, &mut self.rng)?;

        self.verify(stage.algorithm)?;

        // The trailing pause still shows the fully-verified green sweep;
        // the watermark clears when the next stage begins.
        self.settle()
    }

    /// Flushes the output channels; call once after the last stage.
    pub fn finish(&mut self) -> Result<()> {
        self.array.hook_mut().flush()
    }

    fn settle(&mut self) -> Result<()> {
        let (values, counters, pipeline) = self.array.parts_mut();
        pipeline.settle(values, counters, SETTLE_TICKS)
    }

    /// Linear scan asserting the array is the identity permutation, moving
    /// the green watermark one element per (throttled) render event, then
    /// one forced frame of the completed sweep.
    fn verify(&mut self, algorithm: Algorithm) -> Result<()> {
        for index in 0..self.array.len() {
            let value = self.array.values()[index];
            if value as usize != index {
                return Err(SortVizError::Verification {
                    algorithm: algorithm.name().to_string(),
                    index,
                    value,
                });
            }
            self.array.hook_mut().set_verified(index + 1);
            self.array.observe(Touched::One(index))?;
        }

        let (values, counters, pipeline) = self.array.parts_mut();
        pipeline.force_frame(values, counters, Touched::None)
    }
}
