//! Simulator Command-Line Contract
//! ===============================
//!
//! Typed form of the options the Game of Life simulator accepts, and the
//! single place where they are rendered to argv. Rendering order is fixed:
//!
//! ```text
//! --pretty --color --narrow --surface S --delay D <seed> --expand --iterations N <passthrough...>
//! ```
//!
//! Options are only emitted when set. Passthrough arguments always come last
//! so a caller can override anything the runner chose.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Color output of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    On,
    Off,
}

impl ColorMode {
    pub fn is_on(&self) -> bool {
        matches!(self, ColorMode::On)
    }
}

/// Shape of the universe, passed through to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Edges wrap around
    Sphere,
    /// Cells outside the board are dead
    Rectangle,
    Infinite,
    Torus,
}

impl Surface {
    /// Returns all surfaces.
    pub fn all() -> Vec<Surface> {
        vec![
            Surface::Sphere,
            Surface::Rectangle,
            Surface::Infinite,
            Surface::Torus,
        ]
    }

    /// Returns the name used on the simulator command line.
    pub fn name(&self) -> &'static str {
        match self {
            Surface::Sphere => "sphere",
            Surface::Rectangle => "rectangle",
            Surface::Infinite => "infinite",
            Surface::Torus => "torus",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Surface {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sphere" => Ok(Surface::Sphere),
            "rectangle" | "rect" => Ok(Surface::Rectangle),
            "infinite" => Ok(Surface::Infinite),
            "torus" => Ok(Surface::Torus),
            _ => Err(CoreError::InvalidSurface(s.to_string())),
        }
    }
}

/// Maximum number of generations per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationBound {
    /// Run until interrupted (the simulator's own default)
    #[default]
    Unbounded,
    Limit(u64),
}

impl IterationBound {
    /// Returns the limit, or `None` when unbounded.
    pub fn limit(&self) -> Option<u64> {
        match self {
            IterationBound::Unbounded => None,
            IterationBound::Limit(n) => Some(*n),
        }
    }
}

impl fmt::Display for IterationBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationBound::Unbounded => write!(f, "inf"),
            IterationBound::Limit(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for IterationBound {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "inf" | "infinity" | "unbounded" | "forever" => Ok(IterationBound::Unbounded),
            other => other
                .parse::<u64>()
                .map(IterationBound::Limit)
                .map_err(|_| CoreError::InvalidIterations(s.to_string())),
        }
    }
}

/// Initial board of an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    /// Built-in glider formation
    Glider,
    /// Pattern loaded from a file
    File(PathBuf),
}

/// Full option set for one simulator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorArgs {
    pub pretty: bool,
    pub color: ColorMode,
    pub narrow: bool,
    pub surface: Option<Surface>,
    /// Seconds between generations
    pub delay_secs: f64,
    pub seed: Seed,
    /// Grow the loaded pattern to the display size
    pub expand: bool,
    pub iterations: IterationBound,
    /// Appended verbatim after everything else
    pub passthrough: Vec<String>,
}

impl SimulatorArgs {
    /// Renders the options to argv (without the program name).
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(12 + self.passthrough.len());

        if self.pretty {
            args.push("--pretty".to_string());
        }
        if self.color.is_on() {
            args.push("--color".to_string());
        }
        if self.narrow {
            args.push("--narrow".to_string());
        }
        if let Some(surface) = self.surface {
            args.push("--surface".to_string());
            args.push(surface.name().to_string());
        }

        args.push("--delay".to_string());
        args.push(self.delay_secs.to_string());

        match &self.seed {
            Seed::Glider => args.push("--glider-board".to_string()),
            Seed::File(path) => {
                args.push("--file".to_string());
                args.push(path.to_string_lossy().into_owned());
            }
        }

        if self.expand {
            args.push("--expand".to_string());
        }
        if let Some(limit) = self.iterations.limit() {
            args.push("--iterations".to_string());
            args.push(limit.to_string());
        }

        args.extend(self.passthrough.iter().cloned());
        args
    }
}
