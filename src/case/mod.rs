//! Case artifacts: specs, the synthetic dataset, the kernel definition,
//! and the control manifest tying them together.
//!
//! One case = one `(entity_count, step_count)` engine invocation. The
//! materializer writes exactly three artifacts at deterministic paths
//! inside the case workspace:
//!
//! - `simcontrol.toml`: control manifest naming the other two files and
//!   the dataset columns carrying spatial X, Y, and identity
//! - `in_data.csv`: header `Name,X0,Y0` plus one row per entity
//! - `cl-kernels.toml`: the fixed, hand-authored kernel definition
//!
//! Kernel source text is an opaque blob; validating it is entirely the
//! engine's concern.

use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Inclusive upper bound for generated entity coordinates.
pub const COORD_MAX: u32 = 600;

/// Dataset column carrying the spatial X coordinate.
pub const X_COLUMN: &str = "X0";
/// Dataset column carrying the spatial Y coordinate.
pub const Y_COLUMN: &str = "Y0";
/// Dataset column carrying entity identity.
pub const NAME_COLUMN: &str = "Name";

/// Control manifest filename inside a case workspace.
pub const MANIFEST_FILENAME: &str = "simcontrol.toml";
/// Dataset filename inside a case workspace.
pub const DATASET_FILENAME: &str = "in_data.csv";
/// Kernel definition filename inside a case workspace.
pub const KERNELS_FILENAME: &str = "cl-kernels.toml";

/// One sweep point: how many entities to simulate for how many steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseSpec {
    pub entity_count: u64,
    pub step_count: u64,
}

impl CaseSpec {
    #[must_use]
    pub fn new(entity_count: u64, step_count: u64) -> Self {
        Self {
            entity_count,
            step_count,
        }
    }

    /// Deterministic workspace directory name for this case.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!(
            "sim_{}_entities_{}_steps",
            self.entity_count, self.step_count
        )
    }
}

/// One row of the synthetic input dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub name: String,
    pub x: u32,
    pub y: u32,
}

impl EntityRecord {
    /// Generate the record for `index`: deterministic name, uniformly
    /// random coordinates in `[0, COORD_MAX]` independently per axis.
    pub fn generate<R: Rng + ?Sized>(index: u64, rng: &mut R) -> Self {
        Self {
            name: format!("entity{index}"),
            x: rng.random_range(0..=COORD_MAX),
            y: rng.random_range(0..=COORD_MAX),
        }
    }
}

/// Generate the full dataset for one case, in row order `entity0..`.
pub fn generate_dataset<R: Rng + ?Sized>(entity_count: u64, rng: &mut R) -> Vec<EntityRecord> {
    (0..entity_count)
        .map(|i| EntityRecord::generate(i, rng))
        .collect()
}

/// One named typed scalar constant: `[name, type_tag, value]`.
///
/// List order in [`KernelSpec::data_constants`] must match the positional
/// constant-argument order of the kernel source; the harness passes the
/// list through without validating that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConstant(pub String, pub String, pub f64);

impl DataConstant {
    #[must_use]
    pub fn new(name: &str, type_tag: &str, value: f64) -> Self {
        Self(name.to_string(), type_tag.to_string(), value)
    }
}

/// One named compute kernel: column mapping, ordered constants, optional
/// compiler options, and the source blob passed to the engine verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub name: String,
    pub colmap: BTreeMap<String, String>,
    pub data_constants: Vec<DataConstant>,
    pub cl_program_compiler_options: String,
    pub source: String,
}

/// Kernel definition artifact: an array of `[[kernel]]` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelFile {
    pub kernel: Vec<KernelSpec>,
}

/// The hand-authored flocking kernel used for every sweep case. It is
/// entity-count-independent; the same text is written for every case.
#[must_use]
pub fn default_kernel() -> KernelFile {
    let mut colmap = BTreeMap::new();
    colmap.insert("x0".to_string(), X_COLUMN.to_string());
    colmap.insert("y0".to_string(), Y_COLUMN.to_string());
    KernelFile {
        kernel: vec![KernelSpec {
            name: "compute_position".to_string(),
            colmap,
            data_constants: vec![
                DataConstant::new("red_entity_speed_coef", "float", 1.75),
                DataConstant::new("blue_entity_speed_coef", "float", 1.0),
            ],
            cl_program_compiler_options: String::new(),
            source: FLOCKING_KERNEL_SOURCE.to_string(),
        }],
    }
}

/// OpenCL source for the default kernel. Opaque to the harness.
const FLOCKING_KERNEL_SOURCE: &str = r"
kernel void compute_position (
    global float* X0,
    global float* Y0,
    global char* entity_x_direction, // 0 == positive 1 == negative
    global char* entity_y_direction,
    float blue_entity_speed_coef,
    float red_entity_speed_coef
)
{
    const size_t i = get_global_id(0);
    if (i == 0) {
      if (entity_x_direction[i] == 0) {
        X0[i] = X0[i] + (blue_entity_speed_coef);
      }
      else {
        X0[i] = X0[i] - (blue_entity_speed_coef);
      }

      if (entity_y_direction[i] == 0) {
        Y0[i] = Y0[i] + (blue_entity_speed_coef);
      }
      else {
        Y0[i] = Y0[i] - (blue_entity_speed_coef);
      }

      if (X0[i] > 500) {
        entity_x_direction[i] = 1;
      }
      if (X0[i] < 50) {
        entity_x_direction[i] = 0;
      }
      if (Y0[i] > 400) {
        entity_y_direction[i] = 1;
      }
      if (Y0[i] < 40) {
        entity_y_direction[i] = 0;
      }

    }
    else {
      float x_dist_to_i0 = X0[i] - X0[0];
      float y_dist_to_i0 = Y0[i] - Y0[0];
      float dist = fabs(x_dist_to_i0) + fabs(y_dist_to_i0);
      if (dist > 25.0) {
        // Move 10% faster
        X0[i] = X0[i] + (red_entity_speed_coef * (-x_dist_to_i0 / 90.0) );
        Y0[i] = Y0[i] + (red_entity_speed_coef * (-y_dist_to_i0 / 90.0) );
      }
      else {
        // Move slower
        X0[i] = X0[i] + (red_entity_speed_coef * (-x_dist_to_i0 / 100.0) );
        Y0[i] = Y0[i] + (red_entity_speed_coef * (-y_dist_to_i0 / 100.0) );
      }

      // We also move away from our neighbor (i-1)
      float x_dist_to_i1 = X0[i] - X0[i-1];
      float y_dist_to_i1 = Y0[i] - Y0[i-1];
      X0[i] = X0[i] + (red_entity_speed_coef * (x_dist_to_i1 / 100.0) );
      Y0[i] = Y0[i] + (red_entity_speed_coef * (y_dist_to_i1 / 100.0) );
    }
}
";

/// `[simulation]` table of the control manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSection {
    pub input_data_file_path: PathBuf,
    pub cl_kernels_file_path: PathBuf,
    pub gis_x_attr_name: String,
    pub gis_y_attr_name: String,
    pub gis_name_attr: String,
}

/// Top-level control manifest: points the engine at the dataset and kernel
/// definition and names the columns carrying X, Y, and identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlManifest {
    pub simulation: SimulationSection,
    /// Manifest-level constant overrides. Always written, always empty.
    pub data_constants: BTreeMap<String, f64>,
}

impl ControlManifest {
    #[must_use]
    pub fn new(dataset: PathBuf, kernels: PathBuf) -> Self {
        Self {
            simulation: SimulationSection {
                input_data_file_path: dataset,
                cl_kernels_file_path: kernels,
                gis_x_attr_name: X_COLUMN.to_string(),
                gis_y_attr_name: Y_COLUMN.to_string(),
                gis_name_attr: NAME_COLUMN.to_string(),
            },
            data_constants: BTreeMap::new(),
        }
    }
}

/// Paths of the three artifacts written for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePaths {
    pub manifest: PathBuf,
    pub dataset: PathBuf,
    pub kernels: PathBuf,
}

impl CasePaths {
    /// Deterministic artifact paths inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            manifest: dir.join(MANIFEST_FILENAME),
            dataset: dir.join(DATASET_FILENAME),
            kernels: dir.join(KERNELS_FILENAME),
        }
    }
}

/// Builds the on-disk artifacts for one case.
#[derive(Debug, Clone)]
pub struct CaseMaterializer {
    kernels: KernelFile,
}

impl Default for CaseMaterializer {
    fn default() -> Self {
        Self::new(default_kernel())
    }
}

impl CaseMaterializer {
    #[must_use]
    pub fn new(kernels: KernelFile) -> Self {
        Self { kernels }
    }

    /// Write the control manifest, dataset, and kernel definition for
    /// `spec` into `dir`, returning the paths used.
    ///
    /// # Errors
    ///
    /// Returns an error if any artifact cannot be serialized or written.
    pub fn materialize(&self, spec: &CaseSpec, dir: &Path) -> Result<CasePaths> {
        let paths = CasePaths::in_dir(dir);

        let manifest = ControlManifest::new(paths.dataset.clone(), paths.kernels.clone());
        fs::write(&paths.manifest, toml::to_string_pretty(&manifest)?)?;

        let mut rng = rand::rng();
        let records = generate_dataset(spec.entity_count, &mut rng);
        write_dataset(&paths.dataset, &records)?;

        fs::write(&paths.kernels, toml::to_string_pretty(&self.kernels)?)?;

        tracing::debug!(
            entities = spec.entity_count,
            steps = spec.step_count,
            dir = %dir.display(),
            "materialized case artifacts"
        );
        Ok(paths)
    }
}

/// Write the dataset artifact: header row, then one row per record.
fn write_dataset(path: &Path, records: &[EntityRecord]) -> Result<()> {
    let mut out = fs::File::create(path)?;
    writeln!(out, "{NAME_COLUMN},{X_COLUMN},{Y_COLUMN}")?;
    for record in records {
        writeln!(out, "{},{},{}", record.name, record.x, record.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dir_name_is_deterministic() {
        let spec = CaseSpec::new(64, 9000);
        assert_eq!(spec.dir_name(), "sim_64_entities_9000_steps");
    }

    #[test]
    fn test_dataset_rows_and_order() {
        let mut rng = rand::rng();
        let records = generate_dataset(5, &mut rng);
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.name, format!("entity{i}"));
            assert!(record.x <= COORD_MAX);
            assert!(record.y <= COORD_MAX);
        }
    }

    #[test]
    fn test_materialize_writes_three_artifacts() {
        let dir = TempDir::new().expect("temp dir");
        let spec = CaseSpec::new(8, 10);
        let paths = CaseMaterializer::default()
            .materialize(&spec, dir.path())
            .expect("materialize");

        assert!(paths.manifest.is_file());
        assert!(paths.dataset.is_file());
        assert!(paths.kernels.is_file());

        let dataset = fs::read_to_string(&paths.dataset).expect("read dataset");
        let lines: Vec<&str> = dataset.lines().collect();
        assert_eq!(lines[0], "Name,X0,Y0");
        assert_eq!(lines.len(), 9, "header plus 8 data rows");
        assert!(lines[1].starts_with("entity0,"));
        assert!(lines[8].starts_with("entity7,"));
    }

    #[test]
    fn test_manifest_references_sibling_artifacts() {
        let dir = TempDir::new().expect("temp dir");
        let spec = CaseSpec::new(2, 3);
        let paths = CaseMaterializer::default()
            .materialize(&spec, dir.path())
            .expect("materialize");

        let manifest: ControlManifest =
            toml::from_str(&fs::read_to_string(&paths.manifest).expect("read manifest"))
                .expect("parse manifest");
        assert_eq!(manifest.simulation.input_data_file_path, paths.dataset);
        assert_eq!(manifest.simulation.cl_kernels_file_path, paths.kernels);
        assert_eq!(manifest.simulation.gis_x_attr_name, "X0");
        assert_eq!(manifest.simulation.gis_y_attr_name, "Y0");
        assert_eq!(manifest.simulation.gis_name_attr, "Name");
        assert!(manifest.data_constants.is_empty());
    }

    #[test]
    fn test_kernel_file_round_trips_constant_order() {
        let kernels = default_kernel();
        let text = toml::to_string_pretty(&kernels).expect("serialize kernels");
        let parsed: KernelFile = toml::from_str(&text).expect("parse kernels");

        assert_eq!(parsed.kernel.len(), 1);
        let kernel = &parsed.kernel[0];
        assert_eq!(kernel.name, "compute_position");
        assert_eq!(kernel.colmap.get("x0").map(String::as_str), Some("X0"));
        assert_eq!(kernel.colmap.get("y0").map(String::as_str), Some("Y0"));
        // Constant order is positional; serialization must preserve it.
        assert_eq!(kernel.data_constants[0].0, "red_entity_speed_coef");
        assert_eq!(kernel.data_constants[1].0, "blue_entity_speed_coef");
        assert!(!kernel.source.trim().is_empty());
    }
}
