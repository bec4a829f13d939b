use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::client::OutlineService;
use crate::types::EngineEvent;

/// Background liveness poller: probes once immediately, then on a fixed
/// interval, independent of the extraction worker so a long upload never
/// starves the probe. `stop()` (or dropping the poller) tears the interval
/// down.
pub struct HealthPoller {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl HealthPoller {
    pub fn start(
        service: Arc<dyn OutlineService>,
        interval: Duration,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("tokio runtime");
            while !stop_flag.load(Ordering::Relaxed) {
                let report = runtime.block_on(service.health());
                if event_tx.send(EngineEvent::Health(report)).is_err() {
                    break;
                }
                // Sleep in short slices so stop() is honored promptly.
                let mut remaining = interval;
                while !remaining.is_zero() && !stop_flag.load(Ordering::Relaxed) {
                    let slice = remaining.min(Duration::from_millis(250));
                    thread::sleep(slice);
                    remaining = remaining.saturating_sub(slice);
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
