//! Per-Process Page Table.
//!
//! A page table tracks, for every frame of one process's virtual address space, whether the
//! frame is resident and when it was last touched. It also owns the residency queue that the
//! FIFO and Clock policies use to remember load order.
//!
//! The table enforces no policy on its own: `mark_resident` and `mark_evicted` only keep the
//! resident count consistent with the frame flags. Capacity is checked by the swap strategies
//! before loading and by the simulator after every event.

use std::collections::VecDeque;

use crate::common::error::{Result, SimError};

/// State of a single frame within a process's table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Index of the frame within its table.
    pub index: usize,
    /// Whether the frame currently occupies physical memory.
    pub resident: bool,
    /// Cycle of the most recent load or (under LRU) access.
    pub last_access_cycle: u64,
}

/// One slot of the residency queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    /// Frame index held by this slot.
    pub frame: usize,
    /// Second-chance bit used by the Clock policy.
    pub referenced: bool,
}

/// Load-ordered queue of resident frame indices.
///
/// The head is the oldest entry. For Clock, the head is also the hand position: rotating the
/// head to the tail advances the hand.
#[derive(Clone, Debug, Default)]
pub struct ResidencyQueue {
    entries: VecDeque<QueueEntry>,
}

impl ResidencyQueue {
    /// Appends a frame at the tail with its second-chance bit set.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if the queue cannot grow.
    pub fn push(&mut self, frame: usize) -> Result<()> {
        self.entries.try_reserve(1).map_err(|e| {
            SimError::allocation(None, format!("residency queue for frame {frame}: {e}"))
        })?;
        self.entries.push_back(QueueEntry {
            frame,
            referenced: true,
        });
        Ok(())
    }

    /// Removes and returns the head entry.
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    /// Returns the head entry without removing it.
    pub fn head(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    /// Clears the head's second-chance bit and moves it to the tail.
    ///
    /// Does not allocate: the slot freed at the head is reused at the tail.
    pub fn rotate(&mut self) {
        if let Some(mut entry) = self.entries.pop_front() {
            entry.referenced = false;
            self.entries.push_back(entry);
        }
    }

    /// Sets the second-chance bit of `frame` in place, if queued.
    ///
    /// Returns `true` if the frame was found.
    pub fn mark_referenced(&mut self, frame: usize) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.frame == frame) {
            entry.referenced = true;
            true
        } else {
            false
        }
    }

    /// Whether `frame` is queued.
    pub fn contains(&self, frame: usize) -> bool {
        self.entries.iter().any(|entry| entry.frame == frame)
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.entries.iter()
    }

    /// Frame indices from head to tail.
    pub fn frames(&self) -> Vec<usize> {
        self.entries.iter().map(|entry| entry.frame).collect()
    }
}

/// Page table of one process.
#[derive(Clone, Debug)]
pub struct PageTable {
    frames: Vec<Frame>,
    resident: usize,
    capacity: usize,
    queue: ResidencyQueue,
}

impl PageTable {
    /// Creates a table of `num_pages` non-resident frames with a frame budget of `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if `num_pages` is zero or the frame array cannot be
    /// reserved.
    pub fn new(num_pages: usize, capacity: usize) -> Result<Self> {
        if num_pages == 0 {
            return Err(SimError::allocation(
                None,
                "page table must hold at least one page",
            ));
        }
        let mut frames = Vec::new();
        frames
            .try_reserve_exact(num_pages)
            .map_err(|e| SimError::allocation(None, format!("{num_pages} frames: {e}")))?;
        frames.extend((0..num_pages).map(|index| Frame {
            index,
            ..Frame::default()
        }));

        Ok(Self {
            frames,
            resident: 0,
            capacity,
            queue: ResidencyQueue::default(),
        })
    }

    /// Number of frames in the table.
    pub fn num_pages(&self) -> usize {
        self.frames.len()
    }

    /// Per-process frame budget.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of frames currently resident.
    pub const fn resident_count(&self) -> usize {
        self.resident
    }

    /// Whether another frame may be loaded without exceeding the budget.
    pub const fn has_room(&self) -> bool {
        self.resident < self.capacity
    }

    /// Whether `frame` is resident. Out-of-range frames are never resident.
    pub fn is_resident(&self, frame: usize) -> bool {
        self.frames.get(frame).is_some_and(|f| f.resident)
    }

    /// Returns the state of `frame`, if in range.
    pub fn frame(&self, frame: usize) -> Option<&Frame> {
        self.frames.get(frame)
    }

    /// All frames, in index order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Indices of the resident frames, in index order.
    pub fn resident_frames(&self) -> Vec<usize> {
        self.frames
            .iter()
            .filter(|f| f.resident)
            .map(|f| f.index)
            .collect()
    }

    /// Marks `frame` resident and stamps it with `cycle`.
    ///
    /// The resident count only changes if the frame was not already resident.
    ///
    /// # Panics
    ///
    /// Panics if `frame` is out of range; callers validate indices first.
    pub fn mark_resident(&mut self, frame: usize, cycle: u64) {
        let entry = &mut self.frames[frame];
        if !entry.resident {
            entry.resident = true;
            self.resident += 1;
        }
        entry.last_access_cycle = cycle;
    }

    /// Marks `frame` non-resident.
    ///
    /// The resident count only changes if the frame was resident.
    ///
    /// # Panics
    ///
    /// Panics if `frame` is out of range; callers validate indices first.
    pub fn mark_evicted(&mut self, frame: usize) {
        let entry = &mut self.frames[frame];
        if entry.resident {
            entry.resident = false;
            self.resident -= 1;
        }
    }

    /// Records an access to `frame` at `cycle`.
    pub fn touch(&mut self, frame: usize, cycle: u64) {
        if let Some(entry) = self.frames.get_mut(frame) {
            entry.last_access_cycle = cycle;
        }
    }

    /// Circular scan for the first non-resident frame at or after `start`.
    ///
    /// Returns `None` when every frame is resident.
    pub fn next_non_resident(&self, start: usize) -> Option<usize> {
        let n = self.frames.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&frame| !self.frames[frame].resident)
    }

    /// Residency queue used by FIFO and Clock.
    pub const fn queue(&self) -> &ResidencyQueue {
        &self.queue
    }

    /// Mutable access to the residency queue.
    pub const fn queue_mut(&mut self) -> &mut ResidencyQueue {
        &mut self.queue
    }
}
