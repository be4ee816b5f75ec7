use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info, warn};
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Config;
use crate::error::{ExtractError, InventoryError, ProbeError};
use crate::locator::MediaLocator;
use crate::metadata::{normalize, MediaRecord};
use crate::probe::{FfprobeProbe, Probe};
use crate::progress::ProgressReporter;
use crate::report::ReportSink;

/// Outcome for one input path, emitted exactly once per path.
#[derive(Debug)]
pub struct Completion {
    pub path: PathBuf,
    pub outcome: Result<MediaRecord, ExtractError>,
}

/// Completion events in the order workers finish them. Joins the workers
/// once every event has been received.
pub struct Completions {
    receiver: Receiver<Completion>,
    handles: Vec<JoinHandle<()>>,
}

impl Iterator for Completions {
    type Item = Completion;

    fn next(&mut self) -> Option<Completion> {
        match self.receiver.recv() {
            Ok(completion) => Some(completion),
            Err(_) => {
                // All senders are gone, so every worker has returned
                for handle in self.handles.drain(..) {
                    let _ = handle.join();
                }
                None
            }
        }
    }
}

/// Fan `paths` out to `concurrency` worker threads. Each worker takes one
/// path at a time from a shared queue and runs it to completion before
/// taking the next, so at most `concurrency` probes are in flight.
pub fn process(paths: Vec<PathBuf>, concurrency: usize, probe: Arc<dyn Probe>) -> Completions {
    let num_workers = concurrency.max(1);

    let (work_sender, work_receiver) = bounded::<PathBuf>(num_workers * 2);
    let (result_sender, result_receiver) = bounded::<Completion>(num_workers * 2);

    let mut handles = Vec::with_capacity(num_workers + 1);
    for worker_id in 0..num_workers {
        let work_rx = work_receiver.clone();
        let result_tx = result_sender.clone();
        let probe = Arc::clone(&probe);

        handles.push(thread::spawn(move || {
            worker_thread(worker_id, probe.as_ref(), work_rx, result_tx);
        }));
    }

    drop(work_receiver);
    drop(result_sender);

    handles.push(thread::spawn(move || {
        for path in paths {
            if work_sender.send(path).is_err() {
                break; // Workers have shut down
            }
        }
    }));

    Completions {
        receiver: result_receiver,
        handles,
    }
}

fn worker_thread(
    worker_id: usize,
    probe: &dyn Probe,
    work_receiver: Receiver<PathBuf>,
    result_sender: Sender<Completion>,
) {
    debug!("Worker {} started", worker_id);

    for path in work_receiver {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| extract(probe, &path)))
            .unwrap_or_else(|payload| Err(ExtractError::Panicked(panic_message(payload))));

        if result_sender.send(Completion { path, outcome }).is_err() {
            break; // Consumer has gone away
        }
    }

    debug!("Worker {} finished", worker_id);
}

/// Probe and normalize one file.
pub fn extract(probe: &dyn Probe, path: &Path) -> Result<MediaRecord, ExtractError> {
    let size = fs::metadata(path).map_err(ProbeError::Unreadable)?.len();
    let result = probe.probe(path)?;
    Ok(normalize(&result, size, path)?)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_files: usize,
    pub processed: usize,
    pub skipped: usize,
}

/// Drives one batch run: locate, probe in parallel, write the report.
pub struct Processor {
    config: Config,
    probe: Arc<dyn Probe>,
}

impl Processor {
    /// Processor backed by the ffprobe binary named in the config.
    pub fn new(config: Config) -> Self {
        let ffprobe = FfprobeProbe::new(&config.ffprobe);
        if !ffprobe.is_available() {
            warn!(
                "'{}' could not be run; every file will be skipped",
                config.ffprobe.display()
            );
        }
        Self::with_probe(config, Arc::new(ffprobe))
    }

    pub fn with_probe(config: Config, probe: Arc<dyn Probe>) -> Self {
        Processor { config, probe }
    }

    pub fn run(&self) -> Result<RunSummary, InventoryError> {
        info!("Scanning directory: {}", self.config.root_dir.display());

        let files: Vec<PathBuf> = MediaLocator::new(
            &self.config.root_dir,
            &self.config.extensions,
            self.config.follow_links,
        )?
        .collect();

        let mut stats = RunSummary {
            total_files: files.len(),
            ..Default::default()
        };
        info!(
            "Found {} media files, probing with {} workers",
            stats.total_files, self.config.concurrency
        );

        // Header goes out even when there is nothing to probe
        let mut sink = ReportSink::create(&self.config.output)?;
        let progress = ProgressReporter::new(stats.total_files as u64, self.config.show_progress);

        for completion in process(files, self.config.concurrency, Arc::clone(&self.probe)) {
            progress.tick();

            match completion.outcome {
                Ok(record) => {
                    sink.append(&record)?;
                    stats.processed += 1;
                }
                Err(e) => {
                    stats.skipped += 1;
                    progress.suspend(|| {
                        warn!("Error processing file {}: {}", completion.path.display(), e);
                    });
                }
            }
        }

        progress.finish();
        sink.finish()?;

        Ok(stats)
    }
}
