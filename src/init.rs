use std::sync::Arc;

use crate::bounds::{MappedObjective, NormalizedBox};
use crate::config::CobraConfig;
use crate::context::{CobraContext, DesignState, RunBookkeeping};
use crate::epsilon::EpsilonState;
use crate::error::Result;
use crate::evaluator::{self, WorkerPool};
use crate::objective::Objective;
use crate::problem::ProblemSpec;
use crate::sampler;
use crate::standardize::StandardizationState;
use crate::tracker::ParetoState;
use crate::types::ExecutionMode;

impl<F> CobraContext<F>
where
    F: Objective + Send + Sync + 'static,
{
    /// Sample, evaluate and summarize the initial design of `problem`.
    ///
    /// Configuration is resolved and validated before anything is sampled,
    /// so a configuration error never costs an evaluation. In all-cores mode
    /// a worker pool is created and kept in the context for later stages.
    ///
    /// # Errors
    ///
    /// - Any configuration error of [`CobraConfig::resolve`].
    /// - [`Error::WorkerPool`](crate::Error::WorkerPool) if the pool cannot be started.
    /// - [`Error::Evaluation`](crate::Error::Evaluation) if the objective fails or
    ///   returns a malformed response for some design point.
    ///
    /// # Examples
    ///
    /// ```
    /// use samo_cobra::prelude::*;
    ///
    /// let problem = ProblemSpec::new(vec![-5.0; 3], vec![5.0; 3], vec![50.0, 50.0], 0)?;
    /// let config = CobraConfig::builder()
    ///     .one_shot(true)
    ///     .max_evaluations(20)
    ///     .build()?;
    ///
    /// let context = CobraContext::initialize(problem, &config, |x: &[f64]| {
    ///     let f1: f64 = x.iter().map(|v| v * v).sum();
    ///     let f2: f64 = x.iter().map(|v| (v - 2.0).powi(2)).sum();
    ///     Ok::<_, String>((vec![f1, f2], Vec::<f64>::new()))
    /// })?;
    ///
    /// assert_eq!(context.settings.init_design_points, 10);
    /// assert_eq!(context.n_evaluations(), 10);
    /// assert!(context.pool().is_some());
    /// # Ok::<(), samo_cobra::Error>(())
    /// ```
    pub fn initialize(problem: ProblemSpec, config: &CobraConfig, objective: F) -> Result<Self> {
        let mut settings = config.resolve(&problem)?;
        let n_obj = problem.n_obj();
        let n_constraints = problem.n_constraints();

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "cobra_init",
            dimension = problem.dimension(),
            n_obj,
            n_constraints,
            strategy = %settings.sampling
        )
        .entered();

        let bounds = NormalizedBox::new(
            config.normalized_lower,
            config.normalized_upper,
            problem.dimension(),
        )?;
        let epsilon = EpsilonState::schedule(
            bounds.domain_width(),
            n_constraints,
            config.epsilon_init.as_deref(),
            config.epsilon_max.as_deref(),
            settings.one_shot,
            settings.epsilon_learning_rate,
        )?;

        let pool = match settings.execution {
            ExecutionMode::AllCores => {
                let pool = WorkerPool::with_available_parallelism()?;
                trace_debug!(workers = pool.workers(), "worker pool created");
                settings.compute_starting_points =
                    settings.compute_starting_points.max(pool.workers());
                Some(Arc::new(pool))
            }
            ExecutionMode::Sequential => None,
        };

        let mut rng = fastrand::Rng::with_seed(settings.seed);
        let design = sampler::initial_design(
            settings.sampling,
            settings.init_design_points,
            &bounds,
            &mut rng,
        )?;
        trace_info!(points = design.len(), "initial design sampled");

        let objective = Arc::new(MappedObjective::new(objective, bounds.clone(), &problem));
        let responses = evaluator::evaluate_design(
            &design,
            &objective,
            n_obj,
            n_constraints,
            pool.as_deref(),
        )?;
        trace_info!(points = responses.objectives.len(), "initial design evaluated");

        let pareto = ParetoState::track(
            &responses.objectives,
            &responses.constraints,
            problem.reference(),
        );
        let scaling = StandardizationState::compute(
            &responses.objectives,
            &responses.constraints,
            n_obj,
            n_constraints,
        );
        let design = DesignState::new(design, responses);
        let bookkeeping = RunBookkeeping::initial(design.len(), n_obj, n_constraints);

        trace_info!(
            current_hv = pareto.current_hv,
            pareto_size = pareto.front_size(),
            "initialization complete"
        );

        Ok(Self {
            problem,
            bounds,
            settings,
            design,
            pareto,
            scaling,
            epsilon,
            bookkeeping,
            objective,
            pool,
        })
    }
}
