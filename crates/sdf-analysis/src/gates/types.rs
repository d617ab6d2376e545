//! Gate types and per-kind presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sdf_core::config::{GatePolicyConfig, GatesConfig};

/// Named gate context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateKind {
    PreCommit,
    PrePush,
    PullRequest,
    Deployment,
}

impl GateKind {
    pub const ALL: [GateKind; 4] = [
        Self::PreCommit,
        Self::PrePush,
        Self::PullRequest,
        Self::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::PrePush => "pre-push",
            Self::PullRequest => "pull-request",
            Self::Deployment => "deployment",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "pre-commit" => Ok(Self::PreCommit),
            "pre-push" => Ok(Self::PrePush),
            "pull-request" | "pr" | "pr-review" => Ok(Self::PullRequest),
            "deployment" | "deploy" => Ok(Self::Deployment),
            other => Err(format!(
                "unknown gate kind '{other}' (expected pre-commit, pre-push, pull-request or deployment)"
            )),
        }
    }
}

/// Policy for one gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    pub gate_kind: GateKind,
    pub parity_threshold: f64,
    pub require_complete_quartet: bool,
    pub allow_override: bool,
    pub strict_mode: bool,
}

impl GateConfig {
    /// 0.85, incomplete allowed, overridable.
    pub fn pre_commit() -> Self {
        Self {
            gate_kind: GateKind::PreCommit,
            parity_threshold: 0.85,
            require_complete_quartet: false,
            allow_override: true,
            strict_mode: false,
        }
    }

    /// 0.90, complete required, not overridable. Usually tuned per repository.
    pub fn pre_push() -> Self {
        Self {
            gate_kind: GateKind::PrePush,
            parity_threshold: 0.90,
            require_complete_quartet: true,
            allow_override: false,
            strict_mode: false,
        }
    }

    /// 0.90, complete required, reviewer may override.
    pub fn pull_request() -> Self {
        Self {
            gate_kind: GateKind::PullRequest,
            parity_threshold: 0.90,
            require_complete_quartet: true,
            allow_override: true,
            strict_mode: false,
        }
    }

    /// 0.95, complete required, no override, any warning fails.
    pub fn deployment() -> Self {
        Self {
            gate_kind: GateKind::Deployment,
            parity_threshold: 0.95,
            require_complete_quartet: true,
            allow_override: false,
            strict_mode: true,
        }
    }

    /// Compiled preset for `kind`.
    pub fn preset(kind: GateKind) -> Self {
        match kind {
            GateKind::PreCommit => Self::pre_commit(),
            GateKind::PrePush => Self::pre_push(),
            GateKind::PullRequest => Self::pull_request(),
            GateKind::Deployment => Self::deployment(),
        }
    }

    /// Preset for `kind` with the operator's `[gates]` overrides applied.
    pub fn for_kind(kind: GateKind, gates: &GatesConfig) -> Self {
        let policy = match kind {
            GateKind::PreCommit => &gates.pre_commit,
            GateKind::PrePush => &gates.pre_push,
            GateKind::PullRequest => &gates.pull_request,
            GateKind::Deployment => &gates.deployment,
        };
        Self::preset(kind).with_policy(policy)
    }

    /// The gate run by the installed pre-commit hook: pre-commit policy at
    /// the hook threshold.
    pub fn hook(gates: &GatesConfig) -> Self {
        Self::for_kind(GateKind::PreCommit, gates).with_threshold(gates.effective_hook_threshold())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.parity_threshold = threshold;
        self
    }

    fn with_policy(mut self, policy: &GatePolicyConfig) -> Self {
        if let Some(v) = policy.parity_threshold {
            self.parity_threshold = v;
        }
        if let Some(v) = policy.require_complete_quartet {
            self.require_complete_quartet = v;
        }
        if let Some(v) = policy.allow_override {
            self.allow_override = v;
        }
        if let Some(v) = policy.strict_mode {
            self.strict_mode = v;
        }
        self
    }
}

/// Decision rendered by a gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub gate_kind: GateKind,
    pub passed: bool,
    pub parity_score: f64,
    pub threshold: f64,
    /// Why the gate failed, or the single line "Parity gate passed".
    pub reasons: Vec<String>,
    pub can_override: bool,
    /// Warnings carried over from the parity result.
    pub warnings: Vec<String>,
}
