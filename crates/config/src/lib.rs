//! Study manifests for the classical sizing toolkit.
//!
//! A manifest names a study and carries an optional `[constraint]` table (constraint
//! diagram inputs) and an optional `[weight]` table (fuel-fraction sizing inputs). Files
//! ending in `.toml` are parsed as TOML, anything else as YAML.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One sizing study.
#[derive(Debug, Deserialize, Clone)]
pub struct StudyConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub constraint: Option<ConstraintStudyConfig>,
    #[serde(default)]
    pub weight: Option<WeightStudyConfig>,
}

/// Constraint-diagram inputs. Speeds m/s, wing loading N/m² or kg/m² as used consistently.
#[derive(Debug, Deserialize, Clone)]
pub struct ConstraintStudyConfig {
    pub aspect_ratio: f64,
    /// Zero-lift drag; read off `cd0_table` when absent.
    #[serde(default)]
    pub cd0: Option<f64>,
    /// Coefficient table (CSV, `alpha` plus `CLtot`/`CDtot`), relative to the manifest.
    #[serde(default)]
    pub cd0_table: Option<PathBuf>,
    pub propeller_efficiency: f64,
    /// Explicit Oswald efficiency; estimated from `planform` when absent.
    #[serde(default)]
    pub oswald_efficiency: Option<f64>,
    #[serde(default)]
    pub planform: Option<PlanformConfig>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub gravity: Option<f64>,
    pub wing_loading: WingLoadingConfig,
    #[serde(default)]
    pub sustained_turn: Option<SustainedTurnConfig>,
    #[serde(default)]
    pub cruise: Option<CruiseConfig>,
    #[serde(default)]
    pub climb: Option<ClimbConfig>,
    #[serde(default)]
    pub takeoff: Option<TakeoffConfig>,
    #[serde(default)]
    pub stall: Option<StallConfig>,
    #[serde(default)]
    pub max_range: Option<MaxRangeConfig>,
    #[serde(default)]
    pub lift_slope: Option<LiftSlopeConfig>,
    #[serde(default)]
    pub optimum: Vec<OptimumPairConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PlanformConfig {
    pub taper_ratio: f64,
    #[serde(default)]
    pub quarter_chord_sweep_deg: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WingLoadingConfig {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_wing_loading_samples")]
    pub samples: usize,
}

fn default_wing_loading_samples() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SustainedTurnConfig {
    pub load_factor: f64,
    pub speed: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CruiseConfig {
    pub speed: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ClimbConfig {
    pub climb_rate: f64,
    pub climb_speed: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TakeoffConfig {
    pub ground_roll: f64,
    pub surface: String,
    pub cl_takeoff: f64,
    pub cd_takeoff: f64,
    pub cl_max: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct StallConfig {
    pub stall_speed: f64,
    pub cl_max: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MaxRangeConfig {
    pub cruise_speed: f64,
}

/// Wing lift-curve slope inputs; the aspect ratio comes from the enclosing table.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LiftSlopeConfig {
    pub mach: f64,
    /// Airfoil lift-curve slope (1/rad).
    pub airfoil_lift_slope: f64,
    pub exposed_area: f64,
    pub reference_area: f64,
    #[serde(default)]
    pub max_thickness_sweep_deg: f64,
    #[serde(default = "default_true")]
    pub fuselage_spillover: bool,
    #[serde(default)]
    pub fuselage_diameter: Option<f64>,
    #[serde(default)]
    pub span: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// Two constraint names whose intersection is reported.
#[derive(Debug, Deserialize, Clone)]
pub struct OptimumPairConfig {
    pub first: String,
    pub second: String,
}

/// Fuel-fraction weight sizing inputs.
#[derive(Debug, Deserialize, Clone)]
pub struct WeightStudyConfig {
    /// `imperial` (default) or `si`.
    #[serde(default)]
    pub units: Option<String>,
    pub aspect_ratio: f64,
    pub wetted_area_ratio: f64,
    pub crew_weight: f64,
    pub payload_weight: f64,
    pub empty_weight_category: String,
    pub lift_to_drag_category: String,
    pub propulsion: String,
    pub mission: Vec<MissionLegConfig>,
    #[serde(default)]
    pub range_sweep: Option<RangeSweepConfig>,
    #[serde(default)]
    pub solver: Option<SolverConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(tag = "type")]
pub enum MissionLegConfig {
    #[serde(rename = "cruise")]
    Cruise { range: f64, speed: f64 },
    #[serde(rename = "loiter")]
    Loiter {
        endurance_hours: f64,
        #[serde(default)]
        speed: f64,
    },
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RangeSweepConfig {
    pub low: f64,
    pub high: f64,
    #[serde(default)]
    pub samples: Option<usize>,
}

/// Overrides for the gross-weight root finder; unset fields keep their defaults.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct SolverConfig {
    #[serde(default)]
    pub initial_guess: Option<f64>,
    #[serde(default)]
    pub absolute_tolerance: Option<f64>,
    #[serde(default)]
    pub relative_tolerance: Option<f64>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub max_bracket_expansions: Option<usize>,
}

impl StudyConfig {
    /// Make relative file references absolute against the manifest's directory.
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(table) = self
            .constraint
            .as_mut()
            .and_then(|c| c.cd0_table.as_mut())
        {
            if table.is_relative() {
                *table = base.join(&*table);
            }
        }
    }
}

/// Errors that can occur while loading study manifests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a single study manifest.
pub fn load_study<P: AsRef<Path>>(path: P) -> Result<StudyConfig, ConfigError> {
    let path = path.as_ref();
    let mut study: StudyConfig = if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    study.resolve_paths(manifest_dir(path));
    Ok(study)
}

/// Load every study from a directory of TOML manifests, a single TOML manifest, or a YAML
/// list of studies.
pub fn load_studies<P: AsRef<Path>>(path: P) -> Result<Vec<StudyConfig>, ConfigError> {
    let path = path.as_ref();
    let mut studies: Vec<StudyConfig> = load_records(path)?;
    let base = if path.is_dir() { path } else { manifest_dir(path) };
    for study in &mut studies {
        study.resolve_paths(base);
    }
    Ok(studies)
}

fn manifest_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new(""))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
