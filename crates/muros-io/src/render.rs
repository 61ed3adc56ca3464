//! Offline block-driven rendering.

use crate::wav::StereoSamples;
use muros_host::WallProcessor;

/// Streams a stereo buffer through a [`WallProcessor`] in place, block by
/// block, exactly as a real-time host would deliver it.
///
/// The processor must already be [`prepare`](WallProcessor::prepare)d for
/// the buffer's sample rate. The final block may be shorter than
/// `block_size`; parameter changes made between blocks from another
/// thread take effect on the next block, as in a live stream.
pub fn render(processor: &mut WallProcessor, samples: &mut StereoSamples, block_size: usize) {
    debug_assert!(block_size > 0);
    let frames = samples.len();
    tracing::debug!(frames, block_size, "rendering stereo buffer");

    for (left, right) in samples
        .left
        .chunks_mut(block_size)
        .zip(samples.right.chunks_mut(block_size))
    {
        let mut channels: [&mut [f32]; 2] = [left, right];
        processor.process(&mut channels, 2);
    }
}
