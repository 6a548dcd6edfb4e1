//! Parameter documents for the branch-and-price solver.
//!
//! The solver reads a flat JSON object of tuning parameters. Heuristics are switched off with a
//! boolean toggle and their numeric parameters are then set to [`DISABLED_SENTINEL`], so every
//! document has the same set of keys.
use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Value given to the numeric parameters of a disabled heuristic
pub const DISABLED_SENTINEL: i64 = -1;

/// A heuristic of the solver which can be disabled
#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    /// Greedy construction heuristics
    FastHeuristics,
    /// Randomised reduction of the labelling graph
    SmartGraphReduction,
    /// Periodic elementary labelling
    ElementaryLabelling,
    /// Labelling on the reduced graph
    ReducedLabelling,
}

/// Tuning parameters for the solver
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct SolverParameters {
    /// Maximum out-arcs considered by the greedy heuristic
    pub greedy_max_outarcs: i64,
    /// Number of times the greedy heuristic is rerun
    pub greedy_reruns: i64,
    /// Number of columns to generate before resolving the master problem
    pub max_cols_to_solve_mp: i64,
    /// Whether to try the greedy heuristics
    pub try_fast_heuristics: bool,
    /// Whether to run elementary labelling
    pub try_elementary_labelling: bool,
    /// Whether to run smart graph reduction
    pub try_smart_graph_reduction: bool,
    /// Whether to run labelling on the reduced graph
    pub try_reduced_labelling: bool,
    /// Run elementary labelling at every nth node of the branching tree
    pub elementary_labelling_every_n_nodes: i64,
    /// Lower bound on the chance of keeping an arc during graph reduction
    #[serde(serialize_with = "serialize_chance")]
    pub smart_min_chance: f64,
    /// Upper bound on the chance of keeping an arc during graph reduction
    #[serde(serialize_with = "serialize_chance")]
    pub smart_max_chance: f64,
    /// Price of the dummy columns which make the master problem feasible
    pub dummy_column_price: i64,
    /// Number of cores for the LP solver
    pub cplex_cores: u32,
    /// Overall time limit in seconds
    pub time_limit_in_s: u32,
    /// Whether to run labelling in parallel
    pub parallel_labelling: bool,
    /// Whether to branch early
    pub early_branching: bool,
    /// Timeout before branching early, in seconds
    pub early_branching_timeout: u32,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            greedy_max_outarcs: 10,
            greedy_reruns: 100,
            max_cols_to_solve_mp: 10000,
            try_fast_heuristics: true,
            try_elementary_labelling: true,
            try_smart_graph_reduction: true,
            try_reduced_labelling: true,
            elementary_labelling_every_n_nodes: 5,
            smart_min_chance: 0.1,
            smart_max_chance: 0.6,
            dummy_column_price: 1_000_000_000_000_000,
            cplex_cores: 2,
            time_limit_in_s: 900,
            parallel_labelling: true,
            early_branching: false,
            early_branching_timeout: 60,
        }
    }
}

/// Disabled chances are written as the integer sentinel
fn serialize_chance<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *value == DISABLED_SENTINEL as f64 {
        serializer.serialize_i64(DISABLED_SENTINEL)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl SolverParameters {
    /// Switch off a heuristic, overwriting its numeric parameters with [`DISABLED_SENTINEL`]
    pub fn disable(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::FastHeuristics => {
                self.try_fast_heuristics = false;
                self.greedy_max_outarcs = DISABLED_SENTINEL;
                self.greedy_reruns = DISABLED_SENTINEL;
            }
            Toggle::SmartGraphReduction => {
                self.try_smart_graph_reduction = false;
                self.smart_min_chance = DISABLED_SENTINEL as f64;
                self.smart_max_chance = DISABLED_SENTINEL as f64;
            }
            Toggle::ElementaryLabelling => {
                self.try_elementary_labelling = false;
                self.elementary_labelling_every_n_nodes = DISABLED_SENTINEL;
            }
            Toggle::ReducedLabelling => self.try_reduced_labelling = false,
        }
    }

    /// Default parameters with the given heuristics disabled
    pub fn with_disabled(toggles: &[Toggle]) -> Self {
        let mut params = Self::default();
        for toggle in toggles {
            params.disable(*toggle);
        }

        params
    }

    /// Write the parameters as pretty-printed JSON, followed by a newline
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }

    /// Write the parameters to the file at `file_path`.
    ///
    /// An existing file is only replaced if `overwrite` is true.
    pub fn write_to_path(&self, file_path: &Path, overwrite: bool) -> Result<()> {
        ensure!(
            overwrite || !file_path.exists(),
            "Output file {} already exists. Use --overwrite to replace it.",
            file_path.display()
        );

        let file = File::create(file_path)
            .with_context(|| format!("Could not create output file {}", file_path.display()))?;
        self.write(BufWriter::new(file))
            .with_context(|| format!("Error writing {}", file_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn to_json(params: &SolverParameters) -> Value {
        let mut buf = Vec::new();
        params.write(&mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn default_document() {
        let json = to_json(&SolverParameters::default());
        assert_eq!(json.as_object().unwrap().len(), 16);
        assert_eq!(json["greedy_max_outarcs"], 10);
        assert_eq!(json["smart_min_chance"], 0.1);
        assert_eq!(json["dummy_column_price"], 1_000_000_000_000_000i64);
        assert!(json["dummy_column_price"].is_i64());
        assert_eq!(json["early_branching"], false);
    }

    #[rstest]
    #[case(Toggle::FastHeuristics, "try_fast_heuristics", &["greedy_max_outarcs", "greedy_reruns"])]
    #[case(
        Toggle::SmartGraphReduction,
        "try_smart_graph_reduction",
        &["smart_min_chance", "smart_max_chance"]
    )]
    #[case(
        Toggle::ElementaryLabelling,
        "try_elementary_labelling",
        &["elementary_labelling_every_n_nodes"]
    )]
    #[case(Toggle::ReducedLabelling, "try_reduced_labelling", &[])]
    fn disable_toggle(
        #[case] toggle: Toggle,
        #[case] flag: &str,
        #[case] dependents: &[&str],
    ) {
        let default = to_json(&SolverParameters::default());
        let json = to_json(&SolverParameters::with_disabled(&[toggle]));
        assert_eq!(json[flag], false);

        for (key, value) in json.as_object().unwrap() {
            if key == flag {
                continue;
            }

            if dependents.contains(&key.as_str()) {
                assert_eq!(*value, json!(-1), "{key} should be disabled");
            } else {
                assert_eq!(*value, default[key], "{key} should be unchanged");
            }
        }
    }

    #[test]
    fn disable_several() {
        let params =
            SolverParameters::with_disabled(&[Toggle::FastHeuristics, Toggle::ReducedLabelling]);
        assert!(!params.try_fast_heuristics);
        assert!(!params.try_reduced_labelling);
        assert!(params.try_smart_graph_reduction);
        assert_eq!(params.greedy_reruns, DISABLED_SENTINEL);
    }

    #[test]
    fn toggle_names() {
        assert_eq!(
            Toggle::from_str("smart-graph-reduction", false).unwrap(),
            Toggle::SmartGraphReduction
        );
        assert!(Toggle::from_str("smart", false).is_err());
    }
}
