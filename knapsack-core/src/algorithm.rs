//! Names of the available solving algorithms.
//!
//! # Examples
//! ```
//! use knapsack_core::Algorithm;
//!
//! assert_eq!(Algorithm::BestFirst.as_str(), "best-first");
//! assert_eq!("depth-first".parse::<Algorithm>(), Ok(Algorithm::DepthFirst));
//! assert!(!Algorithm::GreedyDensity.is_exact());
//! ```

use thiserror::Error;

/// A solving strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Algorithm {
    /// Depth-first branch-and-bound over the include/exclude tree.
    DepthFirst,
    /// Best-first branch-and-bound driven by a bound-ordered frontier.
    BestFirst,
    /// Tabulation over capacity and item count.
    DynamicProgramming,
    /// Take items in input order while they fit.
    #[cfg_attr(feature = "serde", serde(rename = "greedy-input"))]
    GreedyInputOrder,
    /// Take items in descending value density while they fit.
    GreedyDensity,
}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{name}'")]
pub struct ParseAlgorithmError {
    /// The rejected name.
    pub name: String,
}

impl Algorithm {
    /// Every algorithm, exact ones first.
    pub const ALL: [Self; 5] = [
        Self::DepthFirst,
        Self::BestFirst,
        Self::DynamicProgramming,
        Self::GreedyInputOrder,
        Self::GreedyDensity,
    ];

    /// Return the kebab-case name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DepthFirst => "depth-first",
            Self::BestFirst => "best-first",
            Self::DynamicProgramming => "dynamic-programming",
            Self::GreedyInputOrder => "greedy-input",
            Self::GreedyDensity => "greedy-density",
        }
    }

    /// Whether the algorithm always returns a proven optimum.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(
            self,
            Self::DepthFirst | Self::BestFirst | Self::DynamicProgramming
        )
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == lowered)
            .ok_or_else(|| ParseAlgorithmError { name: s.to_owned() })
    }
}
