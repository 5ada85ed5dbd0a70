//! Terminal rendering of story beats and session summaries.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use ss_core::{Choice, GameState, Node, Outcome, Transition};

/// Widest energy bar, in cells.
pub const GAUGE_CELLS: i64 = 20;

/// Narration wrap width used when none is given.
pub const DEFAULT_WIDTH: usize = 78;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Wrap width for narration.
    pub width: usize,
    /// Emit ANSI colours.
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: true,
        }
    }
}

/// Turns story data into printable text.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer. Turning colour off disables it process-wide.
    pub fn new(config: RenderConfig) -> Self {
        if !config.color {
            colored::control::set_override(false);
        }
        Self {
            config: RenderConfig {
                width: config.width.max(20),
                ..config
            },
        }
    }

    /// Wrap narration paragraph by paragraph, keeping blank lines.
    pub fn wrap(&self, text: &str) -> String {
        text.lines()
            .map(|paragraph| {
                if paragraph.trim().is_empty() {
                    String::new()
                } else {
                    textwrap::fill(paragraph, self.config.width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The banner printed when a session starts.
    pub fn title(&self, title: &str) -> String {
        format!("  {}\n  Type a number to choose, 'quit' to leave.\n", title.bold())
    }

    /// A beat: its text, the energy gauge, and the numbered choices.
    pub fn beat(&self, node: &Node, state: &GameState, choices: &[&Choice]) -> String {
        let mut out = format!("\n{}\n\n", self.wrap(&node.text));
        out.push_str(&format!("{}\n", self.gauge(state)));
        out.push_str(&self.choices(choices));
        out
    }

    /// The numbered choice list.
    pub fn choices(&self, choices: &[&Choice]) -> String {
        choices
            .iter()
            .enumerate()
            .map(|(i, choice)| format!("  {}. {}\n", i + 1, choice.label))
            .collect()
    }

    /// The energy gauge, e.g. `Energy: 7/12 [#######.....]`.
    ///
    /// One cell per point up to [`GAUGE_CELLS`]; larger tracks are scaled.
    pub fn gauge(&self, state: &GameState) -> String {
        let energy = &state.energy;
        let current = i64::from(energy.current());
        let max = i64::from(energy.max()).max(1);
        let cells = max.min(GAUGE_CELLS);
        let filled = (current * cells + max / 2) / max;
        let bar = format!(
            "[{}{}]",
            "#".repeat(usize::try_from(filled).unwrap_or(0)),
            ".".repeat(usize::try_from(cells - filled).unwrap_or(0))
        );
        let bar = if current * 4 <= max {
            bar.as_str().red()
        } else {
            bar.as_str().cyan()
        };
        format!("Energy: {energy} {bar}")
    }

    /// What happened after a choice was taken. `state` is the state after it.
    pub fn transition(&self, transition: &Transition, state: &GameState) -> String {
        let mut out = String::new();
        if let Some(response) = &transition.response {
            out.push_str(&format!("\n{}\n", self.wrap(response)));
        }
        let delta = transition.energy_after - transition.energy_before;
        if delta != 0 {
            let line = format!("Energy {delta:+}: {}", state.energy);
            out.push_str(&format!("{}\n", line.as_str().dimmed()));
        }
        out
    }

    /// The closing message of a finished session.
    pub fn outcome(&self, node: &Node, outcome: Outcome, state: &GameState) -> String {
        let banner = format!("The journey ends: {outcome}.");
        let banner = match outcome {
            Outcome::Success => banner.as_str().green().bold(),
            Outcome::Failure => banner.as_str().red().bold(),
            Outcome::Neutral => banner.as_str().yellow().bold(),
        };
        format!(
            "\n{}\n\n{banner}\nFinal energy: {} after {} turns.\n",
            self.wrap(&node.text),
            state.energy,
            state.turns()
        )
    }

    /// A notice shown for rejected input.
    pub fn notice(&self, message: &str) -> String {
        format!("{}\n", message.yellow())
    }

    /// A table of energy and every flag.
    pub fn summary(&self, state: &GameState) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Flag", "Value"]);
        table.add_row(vec!["energy".to_string(), state.energy.to_string()]);
        for (key, value) in state.flags.iter() {
            table.add_row(vec![key.to_string(), value.to_string()]);
        }
        format!("{table}\n")
    }
}

/// The final state as pretty-printed JSON.
pub fn json(state: &GameState) -> Result<String, String> {
    serde_json::to_string_pretty(state).map_err(|e| format!("failed to serialize state: {e}"))
}
