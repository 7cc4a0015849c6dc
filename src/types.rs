//! Closed tag sets used by the configuration and the run bookkeeping.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Strategy used to draw the initial design in the normalized box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SamplingStrategy {
    /// Independent uniform draws.
    Random,
    /// Centered, maximin-optimized Latin hypercube.
    LatinHypercube,
    /// Halton low-discrepancy sequence.
    #[default]
    Halton,
    /// Random subset of the box corners.
    BoundarySubset,
}

impl SamplingStrategy {
    /// The canonical tag of this strategy.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            SamplingStrategy::Random => "RANDOM",
            SamplingStrategy::LatinHypercube => "LHS",
            SamplingStrategy::Halton => "HALTON",
            SamplingStrategy::BoundarySubset => "BOUNDARIES",
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SamplingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RANDOM" => Ok(SamplingStrategy::Random),
            "LHS" | "LATIN_HYPERCUBE" => Ok(SamplingStrategy::LatinHypercube),
            "HALTON" => Ok(SamplingStrategy::Halton),
            "BOUNDARIES" | "BOUNDARY_SUBSET" => Ok(SamplingStrategy::BoundarySubset),
            _ => Err(Error::UnknownSamplingStrategy(s.to_string())),
        }
    }
}

/// Infill criterion the refinement loop will use to pick new points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InfillCriterion {
    /// Predicted hypervolume improvement.
    #[default]
    Phv,
    /// S-metric selection.
    Sms,
}

impl fmt::Display for InfillCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfillCriterion::Phv => f.write_str("PHV"),
            InfillCriterion::Sms => f.write_str("SMS"),
        }
    }
}

impl FromStr for InfillCriterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PHV" => Ok(InfillCriterion::Phv),
            "SMS" => Ok(InfillCriterion::Sms),
            _ => Err(Error::UnknownInfillCriterion(s.to_string())),
        }
    }
}

/// How the initial design is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExecutionMode {
    /// Evaluate on a worker pool with one worker per available core.
    #[default]
    AllCores,
    /// Evaluate one point after another on the calling thread.
    Sequential,
}

/// Radial basis function kernels the refinement loop may fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kernel {
    /// `r^3`
    Cubic,
    /// `exp(-(εr)^2)`
    Gaussian,
    /// `sqrt(1 + (εr)^2)`
    Multiquadric,
    /// `1 / (1 + (εr)^2)`
    InverseQuadric,
    /// `1 / sqrt(1 + (εr)^2)`
    InverseMultiquadric,
    /// `r^2 log r`
    ThinPlateSpline,
}

impl Kernel {
    /// The kernel catalog, in selection order.
    pub const ALL: [Kernel; 6] = [
        Kernel::Cubic,
        Kernel::Gaussian,
        Kernel::Multiquadric,
        Kernel::InverseQuadric,
        Kernel::InverseMultiquadric,
        Kernel::ThinPlateSpline,
    ];

    /// Upper-case name used in bookkeeping keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Cubic => "CUBIC",
            Kernel::Gaussian => "GAUSSIAN",
            Kernel::Multiquadric => "MULTIQUADRIC",
            Kernel::InverseQuadric => "INVQUADRIC",
            Kernel::InverseMultiquadric => "INVMULTIQUADRIC",
            Kernel::ThinPlateSpline => "THINPLATESPLINE",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which numeric view of a response channel a surrogate is trained on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResponseView {
    /// Objective, mean/std standardized.
    Standardized,
    /// Objective, log-modulus transformed then standardized.
    PlogStandardized,
    /// Constraint, divided by its spread.
    Rescaled,
    /// Constraint, log-modulus transformed then divided by its spread.
    PlogRescaled,
}

/// Label recording which phase produced a design point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum Phase {
    /// The point belongs to the initial design.
    Init,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Init => f.write_str("init"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_strategy_tags() {
        for strategy in [
            SamplingStrategy::Random,
            SamplingStrategy::LatinHypercube,
            SamplingStrategy::Halton,
            SamplingStrategy::BoundarySubset,
        ] {
            assert_eq!(strategy.tag().parse::<SamplingStrategy>().unwrap(), strategy);
        }
        assert_eq!(
            "latin_hypercube".parse::<SamplingStrategy>().unwrap(),
            SamplingStrategy::LatinHypercube
        );
        assert_eq!(
            "BOUNDARY_SUBSET".parse::<SamplingStrategy>().unwrap(),
            SamplingStrategy::BoundarySubset
        );
        assert!(matches!(
            "SOBOL".parse::<SamplingStrategy>(),
            Err(Error::UnknownSamplingStrategy(tag)) if tag == "SOBOL"
        ));
    }

    #[test]
    fn test_infill_criterion_tags() {
        assert_eq!("PHV".parse::<InfillCriterion>().unwrap(), InfillCriterion::Phv);
        assert_eq!("sms".parse::<InfillCriterion>().unwrap(), InfillCriterion::Sms);
        assert!("EI".parse::<InfillCriterion>().is_err());
        assert_eq!(InfillCriterion::Sms.to_string(), "SMS");
    }

    #[test]
    fn test_kernel_catalog_order() {
        let names: Vec<_> = Kernel::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            [
                "CUBIC",
                "GAUSSIAN",
                "MULTIQUADRIC",
                "INVQUADRIC",
                "INVMULTIQUADRIC",
                "THINPLATESPLINE"
            ]
        );
    }

    #[test]
    fn test_phase_label() {
        assert_eq!(Phase::Init.to_string(), "init");
    }
}
