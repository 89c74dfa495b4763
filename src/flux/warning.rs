/// Counts numerical clamp events (negative tracer after commit,
/// divide-by-zero guard tripped) — a clamp event is local, never fatal:
/// clamp to 0, increment this counter, log a line tagged with `(time,
/// box, layer, group)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WarningCounter {
    clamps: u64,
}

impl WarningCounter {
    pub fn record_clamp(&mut self, time: f64, context: &str) {
        self.clamps += 1;
        log::warn!("Time: {time} clamped negative tracer to 0 ({context})");
    }

    pub fn clamps(&self) -> u64 {
        self.clamps
    }
}
