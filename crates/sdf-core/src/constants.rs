//! Shared constants for the SDF-CVF toolchain.

/// Project config file name, looked up in the repository root.
pub const PROJECT_CONFIG_FILE: &str = "sdf.toml";

/// User config directory under `$HOME`.
pub const USER_CONFIG_DIR: &str = ".sdf";

// ---- Parity ----

/// Score assigned to an incomplete quartet.
pub const INCOMPLETE_PARITY_SCORE: f64 = 0.5;

/// Default code↔docs warning threshold.
pub const DEFAULT_CODE_DOCS_WARN: f64 = 0.85;

/// Default code↔tests warning threshold.
pub const DEFAULT_CODE_TESTS_WARN: f64 = 0.85;

/// Default code↔traces warning threshold. Traces align more loosely.
pub const DEFAULT_CODE_TRACES_WARN: f64 = 0.70;

/// Default weighted-parity weights.
pub const DEFAULT_DOCS_WEIGHT: f64 = 0.40;
pub const DEFAULT_TESTS_WEIGHT: f64 = 0.40;
pub const DEFAULT_TRACES_WEIGHT: f64 = 0.20;

/// Characters of bucket text fed to the fallback embedder.
pub const DEFAULT_MAX_EMBED_CHARS: usize = 1000;

// ---- Gates ----

/// Default threshold used by the installed pre-commit hook.
pub const DEFAULT_HOOK_THRESHOLD: f64 = 0.70;

// ---- Blast radius ----

/// Factor above which a change is considered high impact.
pub const DEFAULT_HIGH_IMPACT_THRESHOLD: f64 = 5.0;

/// Directories never descended into when building the import graph.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 8] = [
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "node_modules",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
];

// ---- DORA ----

/// Default metrics database file.
pub const DEFAULT_DORA_DB_PATH: &str = "dora_metrics.db";

/// Default metrics window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Default correlation window in days.
pub const DEFAULT_CORRELATION_WINDOW_DAYS: u32 = 90;

/// Parity above this is the "high" cohort.
pub const DEFAULT_HIGH_PARITY_CUTOFF: f64 = 0.85;

/// Minimum deployments before a correlation is reported.
pub const DEFAULT_MIN_CORRELATION_SAMPLES: usize = 10;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const MINUTES_PER_WEEK: f64 = 10_080.0;
pub const MINUTES_PER_SIX_MONTHS: f64 = 259_200.0;
