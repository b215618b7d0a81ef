//! Database configuration.
//!
//! All options live in a single [`Config`] value that is validated once
//! and then threaded through the build; the resulting database keeps its
//! copy, so rebuilding with different settings means building a new
//! database.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::refs::{Rank, RefKey};

fn default_dimension() -> f64 {
    1.0
}

fn default_max_rank() -> Rank {
    6
}

fn default_population_cap() -> usize {
    500_000
}

fn default_divisions() -> u32 {
    5000
}

fn default_good_enough_error() -> f64 {
    0.005
}

fn default_min_aspect_ratio() -> f64 {
    0.100
}

fn default_min_angle_sine() -> f64 {
    0.342 // sin 20°
}

fn default_status_skip() -> usize {
    200_000
}

fn default_true() -> bool {
    true
}

/// Configuration for building and querying a reference database.
///
/// Every field has a default; a `Config::default()` builds the standard
/// unit-square database. Deserializable from YAML with any subset of
/// fields present.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Paper width in arbitrary units. Default: 1.0
    #[serde(default = "default_dimension")]
    pub paper_width: f64,

    /// Paper height in arbitrary units. Default: 1.0
    #[serde(default = "default_dimension")]
    pub paper_height: f64,

    /// Width as the user entered it, kept verbatim for display.
    #[serde(default)]
    pub paper_width_text: Option<String>,

    /// Height as the user entered it, kept verbatim for display.
    #[serde(default)]
    pub paper_height_text: Option<String>,

    /// Highest rank of reference to construct. Default: 6
    #[serde(default = "default_max_rank")]
    pub max_rank: Rank,

    /// Hard cap on the number of lines. Default: 500 000
    #[serde(default = "default_population_cap")]
    pub max_lines: usize,

    /// Hard cap on the number of marks. Default: 500 000
    #[serde(default = "default_population_cap")]
    pub max_marks: usize,

    /// Mark key divisions along x. Default: 5000
    #[serde(default = "default_divisions")]
    pub num_x: u32,

    /// Mark key divisions along y. Default: 5000
    #[serde(default = "default_divisions")]
    pub num_y: u32,

    /// Line key divisions in angle. Default: 5000
    #[serde(default = "default_divisions")]
    pub num_a: u32,

    /// Line key divisions in distance. Default: 5000
    #[serde(default = "default_divisions")]
    pub num_d: u32,

    /// Error below which lower rank wins over accuracy. Default: 0.005
    #[serde(default = "default_good_enough_error")]
    pub good_enough_error: f64,

    /// Minimum aspect ratio of a foldable flap. Default: 0.100
    #[serde(default = "default_min_aspect_ratio")]
    pub min_aspect_ratio: f64,

    /// Minimum sine of the angle between lines defining a mark.
    /// Default: 0.342 (sin 20°)
    #[serde(default = "default_min_angle_sine")]
    pub min_angle_sine: f64,

    /// Restrict alignments to those foldable with opaque paper.
    /// Default: true
    #[serde(default = "default_true")]
    pub visibility_matters: bool,

    /// Sort lines by worst-case endpoint error instead of the cheaper
    /// Pythagorean proxy. Default: true
    #[serde(default = "default_true")]
    pub line_worst_case_error: bool,

    /// Construction attempts between progress callbacks. Default: 200 000
    #[serde(default = "default_status_skip")]
    pub database_status_skip: usize,

    /// Prefix verbal instructions with the axiom number. Default: true
    #[serde(default = "default_true")]
    pub axioms_in_verbal_directions: bool,

    /// Add clarifying coordinates to ambiguous instructions.
    /// Default: true
    #[serde(default = "default_true")]
    pub clarify_verbal_ambiguities: bool,

    /// Enable axiom O1 (crease through two points). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_1: bool,

    /// Enable axiom O2 (point onto point). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_2: bool,

    /// Enable axiom O3 (line onto line). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_3: bool,

    /// Enable axiom O4 (line onto itself through a point). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_4: bool,

    /// Enable axiom O5 (point onto line through a point). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_5: bool,

    /// Enable axiom O6 (two points onto two lines). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_6: bool,

    /// Enable axiom O7 (line onto itself, point onto line). Default: true
    #[serde(default = "default_true")]
    pub use_axiom_7: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paper_width: default_dimension(),
            paper_height: default_dimension(),
            paper_width_text: None,
            paper_height_text: None,
            max_rank: default_max_rank(),
            max_lines: default_population_cap(),
            max_marks: default_population_cap(),
            num_x: default_divisions(),
            num_y: default_divisions(),
            num_a: default_divisions(),
            num_d: default_divisions(),
            good_enough_error: default_good_enough_error(),
            min_aspect_ratio: default_min_aspect_ratio(),
            min_angle_sine: default_min_angle_sine(),
            visibility_matters: true,
            line_worst_case_error: true,
            database_status_skip: default_status_skip(),
            axioms_in_verbal_directions: true,
            clarify_verbal_ambiguities: true,
            use_axiom_1: true,
            use_axiom_2: true,
            use_axiom_3: true,
            use_axiom_4: true,
            use_axiom_5: true,
            use_axiom_6: true,
            use_axiom_7: true,
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Builder-style setter for the paper dimensions.
    pub fn with_paper(mut self, width: f64, height: f64) -> Self {
        self.paper_width = width;
        self.paper_height = height;
        self
    }

    /// Builder-style setter for the rank ceiling.
    pub fn with_max_rank(mut self, max_rank: Rank) -> Self {
        self.max_rank = max_rank;
        self
    }

    /// Builder-style setter enabling exactly one axiom.
    pub fn with_only_axiom(mut self, axiom: u8) -> Self {
        self.use_axiom_1 = axiom == 1;
        self.use_axiom_2 = axiom == 2;
        self.use_axiom_3 = axiom == 3;
        self.use_axiom_4 = axiom == 4;
        self.use_axiom_5 = axiom == 5;
        self.use_axiom_6 = axiom == 6;
        self.use_axiom_7 = axiom == 7;
        self
    }

    /// True if any axiom constructor is enabled.
    pub fn any_axiom_enabled(&self) -> bool {
        self.use_axiom_1
            || self.use_axiom_2
            || self.use_axiom_3
            || self.use_axiom_4
            || self.use_axiom_5
            || self.use_axiom_6
            || self.use_axiom_7
    }

    /// Check all option values, returning the first problem found.
    ///
    /// Called at the start of every build; a database is never
    /// constructed from an invalid configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.paper_width > 0.0) {
            return Err(Error::Config(format!(
                "paper_width must be positive, got {}",
                self.paper_width
            )));
        }
        if !(self.paper_height > 0.0) {
            return Err(Error::Config(format!(
                "paper_height must be positive, got {}",
                self.paper_height
            )));
        }
        for (name, n) in [
            ("num_x", self.num_x),
            ("num_y", self.num_y),
            ("num_a", self.num_a),
            ("num_d", self.num_d),
        ] {
            if n == 0 {
                return Err(Error::Config(format!("{} must be positive", name)));
            }
        }
        // Key values reach (n + 1) * (m + 1); both products must fit the
        // key type.
        let key_max = RefKey::MAX as u64;
        if (self.num_x as u64 + 1) * (self.num_y as u64 + 1) > key_max {
            return Err(Error::Config(format!(
                "num_x * num_y = {} overflows the mark key range",
                self.num_x as u64 * self.num_y as u64
            )));
        }
        if (self.num_a as u64 + 1) * (self.num_d as u64 + 1) > key_max {
            return Err(Error::Config(format!(
                "num_a * num_d = {} overflows the line key range",
                self.num_a as u64 * self.num_d as u64
            )));
        }
        if self.good_enough_error < 0.0 {
            return Err(Error::Config(format!(
                "good_enough_error must be non-negative, got {}",
                self.good_enough_error
            )));
        }
        if self.min_aspect_ratio < 0.0 {
            return Err(Error::Config(format!(
                "min_aspect_ratio must be non-negative, got {}",
                self.min_aspect_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.min_angle_sine) {
            return Err(Error::Config(format!(
                "min_angle_sine must lie in [0, 1], got {}",
                self.min_angle_sine
            )));
        }
        if !self.any_axiom_enabled() {
            return Err(Error::Config("no axioms enabled".to_string()));
        }
        Ok(())
    }
}
