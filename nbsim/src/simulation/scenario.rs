//! Build ready-to-run simulations from scenario files
//!
//! A scenario file is either planets text (`.txt` and anything unrecognised)
//! or YAML (`.yaml`/`.yml`). Loading happens once, before the loop, and any
//! malformed input is fatal here rather than during the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::configuration::config::ScenarioConfig;
use crate::configuration::planets::parse_planets;
use crate::simulation::engine::Simulation;
use crate::simulation::params::Parameters;
use crate::simulation::states::Universe;

/// Directory bundled scenarios live in
pub const SCENARIO_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Planets,
    Yaml,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => Self::Yaml,
            _ => Self::Planets,
        }
    }
}

/// A loaded starting universe together with where it came from
#[derive(Debug, Clone)]
pub struct Scenario {
    pub source: PathBuf,
    pub universe: Universe,
}

impl Scenario {
    /// Use `path` as given if it exists, otherwise look it up in [`SCENARIO_DIR`]
    pub fn resolve_path(path: &Path) -> PathBuf {
        if path.exists() || path.is_absolute() {
            return path.to_path_buf();
        }
        let bundled = Path::new(SCENARIO_DIR).join(path);
        if bundled.exists() {
            log::debug!("using bundled scenario {}", bundled.display());
            bundled
        } else {
            path.to_path_buf()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = Self::resolve_path(path);
        let text = fs::read_to_string(&source)
            .with_context(|| format!("failed to read scenario {}", source.display()))?;

        let universe = Self::parse(&text, ScenarioFormat::from_path(&source))
            .with_context(|| format!("malformed scenario {}", source.display()))?;

        log::info!(
            "loaded {} bodies from {} (radius {:e})",
            universe.len(),
            source.display(),
            universe.radius
        );
        Ok(Self { source, universe })
    }

    pub fn parse(text: &str, format: ScenarioFormat) -> Result<Universe> {
        match format {
            ScenarioFormat::Planets => parse_planets(text),
            ScenarioFormat::Yaml => ScenarioConfig::from_yaml_str(text)?.build_universe(),
        }
    }

    pub fn into_simulation(self, parameters: Parameters) -> Result<Simulation> {
        Simulation::new(self.universe, parameters)
    }
}
