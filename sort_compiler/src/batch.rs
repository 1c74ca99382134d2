//! Batch parsing of many sort expressions
//!
//! Inputs are split into one contiguous chunk per worker. Workers run on
//! scoped threads and share the resist snapshot by reference; results come
//! back in input order.

use crate::logging::codes;
use crate::pipeline::{self, ParseOptions, ParsedExpression, SortExpressionError};
use crate::symbols::ResistNameSet;
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub ignore_length_limit: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4),
            ignore_length_limit: false,
        }
    }
}

/// Outcome for one input line
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub index: usize,
    pub input: String,
    pub result: Result<ParsedExpression, SortExpressionError>,
}

/// Batch processing results, in input order
#[derive(Debug)]
pub struct BatchResults {
    pub entries: Vec<BatchEntry>,
    pub processing_duration: Duration,
}

impl BatchResults {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            processing_duration: Duration::new(0, 0),
        }
    }

    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.len() - self.success_count()
    }

    pub fn success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.success_count() as f64 / self.entries.len() as f64
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = (&BatchEntry, &SortExpressionError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.result.as_ref().err().map(|error| (entry, error)))
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch parsing completed: {} expressions, {} valid ({:.1}%), {} rejected, {:.2}s total",
            self.entries.len(),
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

impl Default for BatchResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Parse every input on scoped worker threads
pub fn parse_many<S>(
    inputs: &[S],
    resists: &ResistNameSet,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError>
where
    S: AsRef<str> + Sync,
{
    let start_time = Instant::now();
    let mut results = BatchResults::new();

    if inputs.is_empty() {
        return Ok(results);
    }

    let threads = config.max_threads.max(1);
    let chunk_size = calculate_chunk_size(inputs.len(), threads);
    let options = ParseOptions {
        ignore_length_limit: config.ignore_length_limit,
    };

    crate::log_debug!("Parallel parsing configuration",
        "total_expressions" => inputs.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    thread::scope(|scope| -> Result<(), BatchError> {
        let handles: Vec<_> = inputs
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(offset, input)| {
                            let input = input.as_ref();
                            BatchEntry {
                                index: chunk_index * chunk_size + offset,
                                input: input.to_string(),
                                result: pipeline::parse_sort_expression_with_options(
                                    input, resists, options,
                                ),
                            }
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let entries = handle.join().map_err(|_| BatchError::ThreadError {
                message: "parser worker panicked".to_string(),
            })?;
            results.entries.extend(entries);
        }

        Ok(())
    })?;

    results.processing_duration = start_time.elapsed();

    crate::log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch parsing completed",
        "expressions" => results.entries.len(),
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}

/// One contiguous chunk per thread
fn calculate_chunk_size(total: usize, threads: usize) -> usize {
    total.div_ceil(threads).max(1)
}
