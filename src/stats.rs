//! Accuracy statistics over randomly sampled target points.
//!
//! Draws uniform random points on the paper, looks up the closest mark
//! for each, and reports the error distribution as a cumulative
//! histogram plus percentiles. Trials use a seeded generator so reports
//! are reproducible.

use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builder::Signal;
use crate::database::Database;
use crate::geom::Point2D;

/// Options for a statistics run.
#[derive(Clone, Debug)]
pub struct StatOptions {
    /// Number of random trial points. Default: 1000
    pub num_trials: usize,
    /// Number of histogram buckets. Default: 11
    pub num_buckets: usize,
    /// Width of each bucket. Default: 0.001
    pub bucket_size: f64,
    /// Seed for the trial-point generator. Default: 0
    pub seed: u64,
}

impl Default for StatOptions {
    fn default() -> Self {
        Self {
            num_trials: 1000,
            num_buckets: 11,
            bucket_size: 0.001,
            seed: 0,
        }
    }
}

/// Snapshot of a statistics run in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatProgress {
    /// The run is starting.
    Begin,
    /// One trial finished.
    Working {
        /// Trial index.
        index: usize,
        /// Error of this trial's best mark.
        error: f64,
    },
    /// The run is complete.
    Done,
}

impl Database {
    /// Compute the error statistics report.
    pub fn calculate_statistics(&self, opts: &StatOptions) -> String {
        self.calculate_statistics_with_progress(opts, &mut |_| Signal::Continue)
    }

    /// Compute the error statistics report, reporting each trial to a
    /// callback that may cancel the run early. A cancelled run reports
    /// the trials completed so far.
    pub fn calculate_statistics_with_progress(
        &self,
        opts: &StatOptions,
        progress: &mut dyn FnMut(&StatProgress) -> Signal,
    ) -> String {
        progress(&StatProgress::Begin);

        if self.num_marks() == 0 || opts.num_trials == 0 || opts.num_buckets == 0 {
            progress(&StatProgress::Done);
            return "No marks in the database; no statistics computed.\n".to_string();
        }

        let mut rng = StdRng::seed_from_u64(opts.seed);
        let mut buckets = vec![0usize; opts.num_buckets];
        let mut errors = Vec::with_capacity(opts.num_trials);
        let mut trials_run = opts.num_trials;

        for i in 0..opts.num_trials {
            let test_pt = Point2D::new(
                rng.gen_range(0.0..=self.paper().width()),
                rng.gen_range(0.0..=self.paper().height()),
            );

            // find_nearest_mark is Some whenever marks exist.
            let Some(best) = self.find_nearest_mark(test_pt) else {
                break;
            };
            let error = self.mark(best).distance_to(test_pt);
            errors.push(error);

            let bucket = ((error / opts.bucket_size) as usize).min(opts.num_buckets - 1);
            buckets[bucket] += 1;

            if progress(&StatProgress::Working { index: i, error }) == Signal::Cancel {
                trials_run = i + 1;
                break;
            }
        }

        let report = compose_report(&buckets, &mut errors, trials_run, opts.bucket_size);
        progress(&StatProgress::Done);
        report
    }
}

fn compose_report(
    buckets: &[usize],
    errors: &mut [f64],
    trials: usize,
    bucket_size: f64,
) -> String {
    let mut out = String::new();
    let pct = |n: usize| 100.0 * n as f64 / trials as f64;

    let _ = writeln!(out, "Distribution of errors for {} trials:", trials);
    let mut total = 0;
    for (i, count) in buckets.iter().enumerate().take(buckets.len() - 1) {
        total += count;
        let _ = writeln!(
            out,
            "error < {:.3} = {} ({:.1}%)",
            bucket_size * (i + 1) as f64,
            total,
            pct(total)
        );
    }
    let over = trials.saturating_sub(total);
    let _ = writeln!(
        out,
        "error > {:.3} = {} ({:.1}%)",
        bucket_size * (buckets.len() - 1) as f64,
        over,
        pct(over)
    );

    errors.sort_by(f64::total_cmp);
    let _ = writeln!(out);
    let _ = writeln!(out, "Distribution of errors:");
    for p in [10, 20, 50, 80, 90, 95, 99] {
        let idx = (p as f64 / 100.0 * errors.len() as f64) as usize;
        let idx = idx.min(errors.len() - 1);
        let _ = writeln!(out, "{}th percentile :{:.4}", p, errors[idx]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn small_db() -> Database {
        Database::build(Config::default().with_max_rank(2)).unwrap()
    }

    #[test]
    fn test_report_shape_and_determinism() {
        let db = small_db();
        let opts = StatOptions {
            num_trials: 50,
            ..StatOptions::default()
        };

        let a = db.calculate_statistics(&opts);
        let b = db.calculate_statistics(&opts);
        assert_eq!(a, b, "same seed must give the same report");

        assert!(a.contains("Distribution of errors for 50 trials:"));
        assert!(a.contains("50th percentile :"));
    }

    #[test]
    fn test_cancellation_truncates_trials() {
        let db = small_db();
        let opts = StatOptions {
            num_trials: 100,
            ..StatOptions::default()
        };

        let mut seen = 0usize;
        let report = db.calculate_statistics_with_progress(&opts, &mut |p| match p {
            StatProgress::Working { .. } => {
                seen += 1;
                if seen >= 10 {
                    Signal::Cancel
                } else {
                    Signal::Continue
                }
            }
            _ => Signal::Continue,
        });

        assert!(report.contains("Distribution of errors for 10 trials:"));
    }

    #[test]
    fn test_callback_sees_begin_and_done() {
        let db = small_db();
        let opts = StatOptions {
            num_trials: 3,
            ..StatOptions::default()
        };
        let mut events = Vec::new();
        db.calculate_statistics_with_progress(&opts, &mut |p| {
            events.push(*p);
            Signal::Continue
        });
        assert_eq!(events.first(), Some(&StatProgress::Begin));
        assert_eq!(events.last(), Some(&StatProgress::Done));
        assert!(events.len() >= 5);
    }
}
