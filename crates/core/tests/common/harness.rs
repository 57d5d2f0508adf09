use vmsim_core::config::{Algorithm, Config, SwapMode};
use vmsim_core::core::PageTable;
use vmsim_core::sim::{Access, ProcessSpec, Simulator, TraceEvent};

/// Page size used by the harness.
pub const PAGE_SIZE: u64 = 2;

/// Installs a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("vmsim_core=trace")
        .try_init();
}

/// Builds a configuration whose memory gives each of `processes` processes exactly
/// `capacity` frames of `PAGE_SIZE` bytes.
pub fn config_with_capacity(
    capacity: usize,
    processes: usize,
    algorithm: Algorithm,
    mode: SwapMode,
) -> Config {
    Config::new(PAGE_SIZE, algorithm, mode)
        .with_memory_size(capacity as u64 * processes as u64 * PAGE_SIZE)
}

/// Byte address that maps to `frame` (addresses are 1-based).
pub const fn address_of(frame: usize) -> i64 {
    (frame as u64 * PAGE_SIZE + 1) as i64
}

/// Event touching `frame` of `pid`.
pub const fn event(pid: usize, frame: usize) -> TraceEvent {
    TraceEvent::new(pid as i64, address_of(frame))
}

/// One-process simulator driven by frame indices.
pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// One process of `num_pages` pages with a budget of `capacity` frames.
    pub fn new(num_pages: usize, capacity: usize, algorithm: Algorithm, mode: SwapMode) -> Self {
        init_tracing();
        let config = config_with_capacity(capacity, 1, algorithm, mode);
        let processes = [ProcessSpec::new("p0", num_pages as u64 * PAGE_SIZE)];
        let sim = Simulator::new(&config, &processes).unwrap();
        Self { sim }
    }

    /// Accesses `frame` of process 0.
    pub fn access(&mut self, frame: usize) -> Access {
        self.sim.step(event(0, frame)).unwrap()
    }

    /// Accesses each frame in turn, returning how many missed.
    pub fn access_all(&mut self, frames: &[usize]) -> usize {
        frames
            .iter()
            .filter(|&&frame| !self.access(frame).is_hit())
            .count()
    }

    /// Page table of process 0.
    pub fn table(&self) -> &PageTable {
        self.sim.table(0).unwrap()
    }

    /// Resident frames of process 0.
    pub fn resident(&self) -> Vec<usize> {
        self.table().resident_frames()
    }

    /// Queue of process 0, head first.
    pub fn queue(&self) -> Vec<usize> {
        self.table().queue().frames()
    }
}
