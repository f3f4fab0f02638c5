// Picks the two modules the interpreter treats specially.

use crate::{ModuleId, ParentBlock};

/// Module with the highest RF peak amplitude, used by the scanner to scale
/// B1. Blocks without RF count as amplitude 0 and on ties the lowest index
/// wins, so a sequence without any RF pulse yields `ModuleId::DELAY`.
pub fn find_b1_scaling(parent_blocks: &[Option<ParentBlock>]) -> ModuleId {
    let mut peaks = parent_blocks.iter().map(|block| {
        block
            .as_ref()
            .and_then(|b| b.rf.as_ref())
            .map_or(0.0, |rf| rf.amp)
    });

    let Some(mut peak) = peaks.next() else {
        return ModuleId::DELAY;
    };
    let mut best = 0;
    for (n, amp) in peaks.enumerate() {
        if amp > peak {
            peak = amp;
            best = n + 1;
        }
    }
    ModuleId(best)
}

/// The last parent block containing an ADC event, `ModuleId::DELAY` if there
/// is none.
pub fn find_readout(parent_blocks: &[Option<ParentBlock>]) -> ModuleId {
    parent_blocks
        .iter()
        .rposition(|block| block.as_ref().is_some_and(|b| b.adc.is_some()))
        .map_or(ModuleId::DELAY, ModuleId)
}
