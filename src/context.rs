//! The initialized optimization context and the structs it is composed of.
//!
//! [`CobraContext`] owns everything initialization produced: the problem,
//! the resolved [`Settings`], the evaluated design, its Pareto and
//! standardized views, the epsilon thresholds and bookkeeping tables the
//! refinement loop fills in later. Build one with
//! [`CobraContext::initialize`].

use core::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::{MappedObjective, NormalizedBox};
use crate::config::Settings;
use crate::epsilon::EpsilonState;
use crate::evaluator::{Responses, WorkerPool};
use crate::objective::Objective;
use crate::pareto;
use crate::problem::ProblemSpec;
use crate::standardize::StandardizationState;
use crate::tracker::ParetoState;
use crate::types::{Kernel, Phase, ResponseView};

/// The evaluated design in normalized coordinates and its raw responses.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignState {
    /// Evaluated points, one row per point.
    pub design: Vec<Vec<f64>>,
    /// Raw objective values, row-aligned with `design`.
    pub objectives: Vec<Vec<f64>>,
    /// Raw constraint values, row-aligned with `design`.
    pub constraints: Vec<Vec<f64>>,
    /// Number of violated constraints per row.
    pub num_viol: Vec<usize>,
    /// Largest violation per row, 0 for feasible rows.
    pub max_viol: Vec<f64>,
}

impl DesignState {
    /// Pair a design with its responses and summarize the violations.
    ///
    /// # Examples
    ///
    /// ```
    /// use samo_cobra::context::DesignState;
    /// use samo_cobra::evaluator::Responses;
    ///
    /// let state = DesignState::new(
    ///     vec![vec![0.0], vec![1.0]],
    ///     Responses {
    ///         objectives: vec![vec![1.0], vec![2.0]],
    ///         constraints: vec![vec![0.5, -1.0, 2.0], vec![-0.5, 0.0, -3.0]],
    ///     },
    /// );
    /// assert_eq!(state.num_viol, vec![2, 0]);
    /// assert_eq!(state.max_viol, vec![2.0, 0.0]);
    /// ```
    #[must_use]
    pub fn new(design: Vec<Vec<f64>>, responses: Responses) -> Self {
        let num_viol = responses
            .constraints
            .iter()
            .map(|row| row.iter().filter(|&&c| c > 0.0).count())
            .collect();
        let max_viol = responses
            .constraints
            .iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .collect();
        Self {
            design,
            objectives: responses.objectives,
            constraints: responses.constraints,
            num_viol,
            max_viol,
        }
    }

    /// Number of evaluated points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.design.len()
    }

    /// Whether no point has been evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.design.is_empty()
    }
}

/// A response channel a surrogate is fitted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    /// Objective column `j`.
    Objective(usize),
    /// Constraint column `i`.
    Constraint(usize),
}

/// Key of one surrogate error history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurrogateKey {
    /// Response channel.
    pub channel: Channel,
    /// Whether the surrogate is fitted to the log-modulus view.
    pub plog: bool,
    /// Kernel of the surrogate.
    pub kernel: Kernel,
}

impl fmt::Display for SurrogateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Channel::Objective(j) => write!(f, "OBJ{j}")?,
            Channel::Constraint(i) => write!(f, "CON{i}")?,
        }
        if self.plog {
            f.write_str("PLOG")?;
        }
        f.write_str(self.kernel.name())
    }
}

/// Per-point prediction errors of every candidate surrogate.
///
/// Entries keep insertion order: for each kernel, every objective (plain
/// then plog) followed by every constraint (plain then plog).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurrogateErrors {
    entries: Vec<(SurrogateKey, Vec<f64>)>,
}

impl SurrogateErrors {
    /// Zero-filled histories of length `n_points` for every kernel and channel.
    #[must_use]
    pub fn zeros(kernels: &[Kernel], n_obj: usize, n_constraints: usize, n_points: usize) -> Self {
        let mut entries = Vec::with_capacity(kernels.len() * 2 * (n_obj + n_constraints));
        for &kernel in kernels {
            let channels = (0..n_obj)
                .map(Channel::Objective)
                .chain((0..n_constraints).map(Channel::Constraint));
            for channel in channels {
                for plog in [false, true] {
                    let key = SurrogateKey {
                        channel,
                        plog,
                        kernel,
                    };
                    entries.push((key, vec![0.0; n_points]));
                }
            }
        }
        Self { entries }
    }

    /// History of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &SurrogateKey) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Mutable history of `key`, if present.
    pub fn get_mut(&mut self, key: &SurrogateKey) -> Option<&mut Vec<f64>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate over keys and histories in insertion order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&SurrogateKey, &[f64])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of histories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no histories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Surrogate selection for every channel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestPredictor {
    /// Kernel per objective.
    pub obj_kernel: Vec<Kernel>,
    /// View per objective.
    pub obj_view: Vec<ResponseView>,
    /// Kernel per constraint.
    pub con_kernel: Vec<Kernel>,
    /// View per constraint.
    pub con_view: Vec<ResponseView>,
}

impl BestPredictor {
    /// Placeholder selection: `kernel` everywhere, linear views.
    #[must_use]
    pub fn initial(kernel: Kernel, n_obj: usize, n_constraints: usize) -> Self {
        Self {
            obj_kernel: vec![kernel; n_obj],
            obj_view: vec![ResponseView::Standardized; n_obj],
            con_kernel: vec![kernel; n_constraints],
            con_view: vec![ResponseView::Rescaled; n_constraints],
        }
    }
}

/// Tables the refinement loop appends to, one entry per evaluated point
/// unless noted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunBookkeeping {
    /// Candidate surrogate kernels.
    pub kernels: Vec<Kernel>,
    /// Surrogate selection history, one entry per iteration.
    pub best_predictor: Vec<BestPredictor>,
    /// Phase that produced each point.
    pub phase: Vec<Phase>,
    /// Wall time spent proposing each point, in seconds.
    pub optimization_time: Vec<f64>,
    /// Prediction errors per surrogate.
    pub surrogate_errors: SurrogateErrors,
}

impl RunBookkeeping {
    /// Tables for an initial design of `n_points` points.
    #[must_use]
    pub fn initial(n_points: usize, n_obj: usize, n_constraints: usize) -> Self {
        let kernels = Kernel::ALL.to_vec();
        Self {
            best_predictor: vec![BestPredictor::initial(Kernel::ALL[0], n_obj, n_constraints)],
            phase: vec![Phase::Init; n_points],
            optimization_time: vec![0.0; n_points],
            surrogate_errors: SurrogateErrors::zeros(&kernels, n_obj, n_constraints, n_points),
            kernels,
        }
    }
}

/// Everything initialization produced, ready for the refinement loop.
///
/// The context owns the mapped objective and, in all-cores mode, the
/// worker pool so later stages evaluate through the same mapping and
/// threads.
pub struct CobraContext<F> {
    /// The problem being optimized.
    pub problem: ProblemSpec,
    /// The normalized box all points live in.
    pub bounds: NormalizedBox,
    /// Resolved configuration.
    pub settings: Settings,
    /// Evaluated initial design.
    pub design: DesignState,
    /// Feasible Pareto front and hypervolume history.
    pub pareto: ParetoState,
    /// Standardized views of every response channel.
    pub scaling: StandardizationState,
    /// Constraint relaxation thresholds.
    pub epsilon: EpsilonState,
    /// Tables for the refinement loop.
    pub bookkeeping: RunBookkeeping,
    pub(crate) objective: Arc<MappedObjective<F>>,
    pub(crate) pool: Option<Arc<WorkerPool>>,
}

impl<F: Objective> CobraContext<F> {
    /// Number of evaluated points.
    #[must_use]
    pub fn n_evaluations(&self) -> usize {
        self.design.len()
    }

    /// Number of evaluated points satisfying every constraint.
    #[must_use]
    pub fn feasible_count(&self) -> usize {
        self.design
            .constraints
            .iter()
            .filter(|row| pareto::is_feasible(row))
            .count()
    }

    /// Whether the run spends its budget on a single initial design.
    #[must_use]
    pub fn is_one_shot(&self) -> bool {
        self.settings.one_shot
    }

    /// The worker pool, present in all-cores mode.
    #[must_use]
    pub fn pool(&self) -> Option<&Arc<WorkerPool>> {
        self.pool.as_ref()
    }

    /// The objective wrapped to accept normalized points.
    #[must_use]
    pub fn mapped_objective(&self) -> &Arc<MappedObjective<F>> {
        &self.objective
    }

    /// Native coordinates of design row `i`, if it exists.
    #[must_use]
    pub fn native_point(&self, i: usize) -> Option<Vec<f64>> {
        let x = self.design.design.get(i)?;
        self.bounds.to_native(x, &self.problem).ok()
    }
}

impl<F> fmt::Debug for CobraContext<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CobraContext")
            .field("problem", &self.problem)
            .field("settings", &self.settings)
            .field("n_evaluations", &self.design.len())
            .field("current_hv", &self.pareto.current_hv)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
