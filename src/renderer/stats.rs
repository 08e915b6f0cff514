// renderer/stats.rs
use super::batch::SortableBatch;
use std::collections::HashSet;
use std::fmt;

/// State-change counts for a batch list drawn in the given order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    pub batches: usize,
    pub distinct_programs: usize,
    /// Program binds, counting the first one.
    pub program_switches: usize,
    /// Adjacent pairs flipping blending on or off.
    pub blend_toggles: usize,
    /// Opaque batches drawn after the first blended one.
    pub blend_order_violations: usize,
}

impl SortStats {
    pub fn measure<B: SortableBatch>(batches: &[B]) -> Self {
        let mut programs = HashSet::new();
        let mut stats = SortStats {
            batches: batches.len(),
            ..SortStats::default()
        };

        let mut previous: Option<(B::Program, bool)> = None;
        let mut seen_blended = false;

        for batch in batches {
            let program = batch.program();
            let blended = batch.is_blended();

            match &previous {
                Some((prev_program, prev_blended)) => {
                    if *prev_program != program {
                        stats.program_switches += 1;
                    }
                    if *prev_blended != blended {
                        stats.blend_toggles += 1;
                    }
                }
                None => stats.program_switches += 1,
            }

            if blended {
                seen_blended = true;
            } else if seen_blended {
                stats.blend_order_violations += 1;
            }

            programs.insert(program.clone());
            previous = Some((program, blended));
        }

        stats.distinct_programs = programs.len();
        stats
    }

    /// Program switches beyond the unavoidable one per distinct program.
    pub fn redundant_program_switches(&self) -> usize {
        self.program_switches.saturating_sub(self.distinct_programs)
    }
}

impl fmt::Display for SortStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} batches, {} programs, {} program switches, {} blend toggles",
            self.batches, self.distinct_programs, self.program_switches, self.blend_toggles
        )
    }
}
