//! Evaluation of the initial design, sequentially or on a worker pool.
//!
//! The pool is a dedicated tokio runtime: every design point becomes a
//! blocking task gated by a semaphore, and results are written back into the
//! slot of the row they came from, so output row `i` always corresponds to
//! design row `i` regardless of completion order.
//!
//! Evaluation failures are fatal. The returned error is wrapped in
//! [`Error::Evaluation`] carrying the lowest failing row index. A panicking
//! objective is reported the same way in both modes.

use core::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::bounds::MappedObjective;
use crate::error::{Error, Result};
use crate::objective::{Evaluation, Objective};

/// A fixed-size pool of worker threads for blocking evaluations.
///
/// The pool may be used and dropped from inside another async runtime.
pub struct WorkerPool {
    runtime: Option<Runtime>,
    workers: usize,
}

impl WorkerPool {
    /// Create a pool running at most `workers` evaluations at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerPool`] if `workers` is zero or the runtime
    /// cannot be started.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::WorkerPool("at least one worker is required".into()));
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name("samo-cobra-worker")
            .build()
            .map_err(|e| Error::WorkerPool(e.to_string()))?;
        Ok(Self {
            runtime: Some(runtime),
            workers,
        })
    }

    /// Create a pool with one worker per available core.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerPool`] if the runtime cannot be started.
    pub fn with_available_parallelism() -> Result<Self> {
        let workers = std::thread::available_parallelism().map_or(1, core::num::NonZeroUsize::get);
        Self::new(workers)
    }

    /// Number of concurrent evaluations.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `f` to every item concurrently and return the outputs in input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskError`] if a task panics or is cancelled.
    ///
    /// When called from inside an async runtime, the work is driven from a
    /// scoped helper thread and the calling thread blocks until it is done.
    ///
    /// # Examples
    ///
    /// ```
    /// use samo_cobra::evaluator::WorkerPool;
    ///
    /// let pool = WorkerPool::new(3).unwrap();
    /// let squares = pool.map((0..10).collect(), |x: u64| x * x).unwrap();
    /// assert_eq!(squares, vec![0, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
    /// ```
    pub fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or(Error::Internal("worker pool runtime is gone"))?;
        if tokio::runtime::Handle::try_current().is_err() {
            return self.run(runtime, items, f);
        }
        // block_on refuses to nest inside a runtime, so hop to a plain thread.
        std::thread::scope(|scope| {
            scope
                .spawn(move || self.run(runtime, items, f))
                .join()
                .unwrap_or_else(|_| Err(Error::TaskError("evaluation driver panicked".into())))
        })
    }

    fn run<T, R, F>(&self, runtime: &Runtime, items: Vec<T>, f: F) -> Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let n = items.len();
        let f = Arc::new(f);
        runtime.block_on(async {
            let semaphore = Arc::new(Semaphore::new(self.workers));
            let mut join_set: JoinSet<(usize, R)> = JoinSet::new();

            for (index, item) in items.into_iter().enumerate() {
                let permit = Arc::clone(&semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::TaskError(e.to_string()))?;
                let f = Arc::clone(&f);
                join_set.spawn_blocking(move || {
                    let out = f(item);
                    drop(permit);
                    (index, out)
                });
            }

            let mut slots: Vec<Option<R>> = core::iter::repeat_with(|| None).take(n).collect();
            while let Some(joined) = join_set.join_next().await {
                let (index, out) = joined.map_err(|e| Error::TaskError(e.to_string()))?;
                slots[index] = Some(out);
            }
            slots
                .into_iter()
                .map(|slot| slot.ok_or(Error::Internal("worker pool lost a result")))
                .collect::<Result<Vec<R>>>()
        })
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // A plain drop blocks on the runtime's threads, which panics in async code.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl core::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

/// Objective and constraint matrices of an evaluated design, row-aligned
/// with it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Responses {
    /// One row of objective values per design point.
    pub objectives: Vec<Vec<f64>>,
    /// One row of constraint values per design point.
    pub constraints: Vec<Vec<f64>>,
}

/// Evaluate every row of `design` through `objective`.
///
/// With a pool, rows are evaluated concurrently; without one, in order on the
/// calling thread, stopping at the first failure.
///
/// # Errors
///
/// Returns [`Error::Evaluation`] for the lowest failing row, wrapping
/// [`Error::Objective`], [`Error::ObjectiveDimensionMismatch`],
/// [`Error::ConstraintDimensionMismatch`] or [`Error::NonFiniteResponse`].
/// A panic inside the objective becomes [`Error::Objective`] for its row.
/// Pool failures are returned as [`Error::TaskError`].
pub fn evaluate_design<F>(
    design: &[Vec<f64>],
    objective: &Arc<MappedObjective<F>>,
    n_obj: usize,
    n_constraints: usize,
    pool: Option<&WorkerPool>,
) -> Result<Responses>
where
    F: Objective + Send + Sync + 'static,
{
    let evaluations: Vec<Result<Evaluation>> = match pool {
        Some(pool) => {
            let objective = Arc::clone(objective);
            pool.map(design.to_vec(), move |x: Vec<f64>| {
                evaluate_row(&objective, &x, n_obj, n_constraints)
            })?
        }
        None => {
            let mut out = Vec::with_capacity(design.len());
            for x in design {
                let result = evaluate_row(objective, x, n_obj, n_constraints);
                let failed = result.is_err();
                out.push(result);
                if failed {
                    break;
                }
            }
            out
        }
    };

    let mut responses = Responses {
        objectives: Vec::with_capacity(design.len()),
        constraints: Vec::with_capacity(design.len()),
    };
    for (index, evaluation) in evaluations.into_iter().enumerate() {
        let evaluation = evaluation.map_err(|e| e.at_point(index))?;
        trace_debug!(index, feasible = evaluation.is_feasible(), "design point evaluated");
        responses.objectives.push(evaluation.objectives);
        responses.constraints.push(evaluation.constraints);
    }
    Ok(responses)
}

fn evaluate_row<F: Objective>(
    objective: &MappedObjective<F>,
    x: &[f64],
    n_obj: usize,
    n_constraints: usize,
) -> Result<Evaluation> {
    panic::catch_unwind(AssertUnwindSafe(|| objective.evaluate(x)))
        .unwrap_or_else(|payload| Err(Error::Objective(panic_message(payload.as_ref()))))
        .and_then(|e| validate(e, n_obj, n_constraints))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned());
    match message {
        Some(m) => format!("objective panicked: {m}"),
        None => "objective panicked".to_string(),
    }
}

fn validate(evaluation: Evaluation, n_obj: usize, n_constraints: usize) -> Result<Evaluation> {
    if evaluation.objectives.len() != n_obj {
        return Err(Error::ObjectiveDimensionMismatch {
            expected: n_obj,
            got: evaluation.objectives.len(),
        });
    }
    if evaluation.constraints.len() != n_constraints {
        return Err(Error::ConstraintDimensionMismatch {
            expected: n_constraints,
            got: evaluation.constraints.len(),
        });
    }
    if evaluation
        .objectives
        .iter()
        .chain(&evaluation.constraints)
        .any(|v| !v.is_finite())
    {
        return Err(Error::NonFiniteResponse);
    }
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};
    use core::time::Duration;

    use super::*;
    use crate::bounds::NormalizedBox;
    use crate::problem::ProblemSpec;

    fn mapped<F: Objective>(f: F) -> Arc<MappedObjective<F>> {
        let problem = ProblemSpec::new(vec![0.0], vec![10.0], vec![100.0], 1).unwrap();
        let normalized = NormalizedBox::new(-1.0, 1.0, 1).unwrap();
        Arc::new(MappedObjective::new(f, normalized, &problem))
    }

    #[allow(clippy::cast_precision_loss)]
    fn design(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| vec![-1.0 + 2.0 * i as f64 / (n - 1) as f64])
            .collect()
    }

    #[test]
    fn test_sequential_evaluates_in_native_space() {
        let objective = mapped(|x: &[f64]| Ok::<_, String>((vec![x[0]], vec![x[0] - 5.0])));
        let responses = evaluate_design(&design(3), &objective, 1, 1, None).unwrap();
        assert_eq!(responses.objectives, vec![vec![0.0], vec![5.0], vec![10.0]]);
        assert_eq!(responses.constraints, vec![vec![-5.0], vec![0.0], vec![5.0]]);
    }

    #[test]
    fn test_parallel_preserves_row_order() {
        // Early rows sleep longest, so they finish last.
        let objective = mapped(|x: &[f64]| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delay = ((10.0 - x[0]) * 2.0) as u64;
            std::thread::sleep(Duration::from_millis(delay));
            Ok::<_, String>((vec![x[0]], vec![0.0]))
        });
        let pool = WorkerPool::new(4).unwrap();
        let points = design(12);
        let parallel = evaluate_design(&points, &objective, 1, 1, Some(&pool)).unwrap();
        let sequential = evaluate_design(&points, &objective, 1, 1, None).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_pool_runs_concurrently_up_to_worker_count() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        let pool = WorkerPool::new(2).unwrap();
        pool.map(
            (0..8).collect::<Vec<u32>>(),
            move |_: u32| {
                let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(20));
                r.fetch_sub(1, Ordering::SeqCst);
            },
        )
        .unwrap();
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_failure_reports_lowest_row() {
        let objective = mapped(|x: &[f64]| {
            if x[0] > 4.0 {
                Err(format!("too large: {}", x[0]))
            } else {
                Ok((vec![x[0]], vec![0.0]))
            }
        });
        let pool = WorkerPool::new(3).unwrap();
        for pool in [None, Some(&pool)] {
            let err = evaluate_design(&design(6), &objective, 1, 1, pool).unwrap_err();
            match err {
                Error::Evaluation { index, source } => {
                    assert_eq!(index, 3);
                    assert!(matches!(*source, Error::Objective(_)));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_sequential_stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let objective = mapped(move |_: &[f64]| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<Evaluation, _>("boom")
        });
        assert!(evaluate_design(&design(5), &objective, 1, 1, None).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_malformed_responses_are_rejected() {
        let short = mapped(|_: &[f64]| Ok::<_, String>((Vec::<f64>::new(), vec![0.0])));
        let err = evaluate_design(&design(2), &short, 1, 1, None).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation { index: 0, ref source }
                if matches!(**source, Error::ObjectiveDimensionMismatch { expected: 1, got: 0 })
        ));

        let extra = mapped(|_: &[f64]| Ok::<_, String>((vec![1.0], vec![0.0, 0.0])));
        let err = evaluate_design(&design(2), &extra, 1, 1, None).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation { ref source, .. }
                if matches!(**source, Error::ConstraintDimensionMismatch { expected: 1, got: 2 })
        ));

        let nan = mapped(|_: &[f64]| Ok::<_, String>((vec![f64::NAN], vec![0.0])));
        let err = evaluate_design(&design(2), &nan, 1, 1, None).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation { ref source, .. } if matches!(**source, Error::NonFiniteResponse)
        ));
    }

    #[test]
    fn test_panicking_objective_reports_its_row() {
        let objective = mapped(|x: &[f64]| {
            assert!(x[0] <= 4.0, "out of range");
            Ok::<_, String>((vec![x[0]], vec![0.0]))
        });
        let pool = WorkerPool::new(3).unwrap();
        for pool in [None, Some(&pool)] {
            match evaluate_design(&design(6), &objective, 1, 1, pool).unwrap_err() {
                Error::Evaluation { index, source } => {
                    assert_eq!(index, 3);
                    assert!(
                        matches!(*source, Error::Objective(ref m) if m.contains("out of range")),
                        "{source}"
                    );
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    fn host_runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread().build().unwrap()
    }

    #[test]
    fn test_map_inside_async_runtime() {
        let pool = WorkerPool::new(2).unwrap();
        let doubled = host_runtime()
            .block_on(async { pool.map(vec![1, 2, 3], |x: i32| x * 2) })
            .unwrap();
        assert_eq!(doubled, vec![2, 4, 6]);
    }

    #[test]
    fn test_drop_inside_async_runtime() {
        let pool = WorkerPool::new(2).unwrap();
        pool.map(vec![0u8; 4], |x: u8| x).unwrap();
        host_runtime().block_on(async move { drop(pool) });
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(WorkerPool::new(0), Err(Error::WorkerPool(_))));
    }

    #[test]
    fn test_empty_design() {
        let objective = mapped(|x: &[f64]| Ok::<_, String>((vec![x[0]], vec![0.0])));
        let pool = WorkerPool::new(2).unwrap();
        let responses = evaluate_design(&[], &objective, 1, 1, Some(&pool)).unwrap();
        assert!(responses.objectives.is_empty());
    }
}
