use serde::Serialize;

use super::state::{ProcessId, Ticks};

/// One contiguous stretch of CPU occupancy. `process` is `None` while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GanttSlice {
    pub start: Ticks,
    pub end: Ticks,
    pub process: Option<ProcessId>,
}

impl GanttSlice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.process.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GanttTrace {
    slices: Vec<GanttSlice>,
}

impl GanttTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&mut self, start: Ticks, end: Ticks, process: Option<ProcessId>) {
        debug_assert!(start < end, "Empty gantt slice [{start}, {end})");
        debug_assert_eq!(
            self.slices.last().map_or(0, |slice| slice.end),
            start,
            "Gantt slice must start where the previous one ended"
        );
        self.slices.push(GanttSlice {
            start,
            end,
            process,
        });
    }

    pub fn slices(&self) -> &[GanttSlice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Total ticks each process held the CPU, in first-seen order.
    pub fn occupancy(&self) -> Vec<(ProcessId, Ticks)> {
        let mut totals: Vec<(ProcessId, Ticks)> = Vec::new();
        for slice in &self.slices {
            let Some(process) = slice.process else {
                continue;
            };
            match totals.iter_mut().find(|(id, _)| *id == process) {
                Some((_, total)) => *total += slice.duration(),
                None => totals.push((process, slice.duration())),
            }
        }
        totals
    }
}

impl<'a> IntoIterator for &'a GanttTrace {
    type Item = &'a GanttSlice;
    type IntoIter = std::slice::Iter<'a, GanttSlice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}
