//! # Terminal Renderer
//!
//! Draws the table in place with plain ANSI escapes:
//!
//! ```text
//! Dining philosophers problem
//! (Press ^C to stop program)
//! T - Thinking
//! H - Hungry
//! E - Eating
//!
//! T|H|E|T|H
//! meals: 3 2 4 3 2
//! ```

use std::io::{self, Write};

use symposium_core::{ActorState, Frame, Observer};

const CLEAR_SCREEN: &str = "\x1b[2J";
const HOME: &str = "\x1b[1;1H";
const FRAME_ROW: &str = "\x1b[7;1H";
const CLEAR_LINE: &str = "\x1b[2K";

const LEGEND: &str = "Dining philosophers problem\n\
                      (Press ^C to stop program)\n\
                      T - Thinking\n\
                      H - Hungry\n\
                      E - Eating\n";

/// States joined with `|`, e.g. `T|H|E`.
#[must_use]
pub fn render_states(states: &[ActorState]) -> String {
    let mut line = String::with_capacity(states.len() * 2);
    for (i, state) in states.iter().enumerate() {
        if i > 0 {
            line.push('|');
        }
        line.push(state.symbol());
    }
    line
}

/// Meal counters separated by spaces.
#[must_use]
pub fn render_meals(meals: &[u64]) -> String {
    let counts: Vec<String> = meals.iter().map(u64::to_string).collect();
    format!("meals: {}", counts.join(" "))
}

/// Redraws the table on every frame.
pub struct TerminalRenderer<W> {
    out: W,
    drawn_legend: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Renders to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renders to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            drawn_legend: false,
        }
    }

    /// Hands back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if !self.drawn_legend {
            write!(self.out, "{CLEAR_SCREEN}{HOME}{LEGEND}")?;
            self.drawn_legend = true;
        }
        write!(
            self.out,
            "{FRAME_ROW}{CLEAR_LINE}{}\n{CLEAR_LINE}{}",
            render_states(&frame.states),
            render_meals(&frame.meals)
        )?;
        self.out.flush()
    }
}

impl<W: Write + Send + 'static> Observer for TerminalRenderer<W> {
    fn observe(&mut self, frame: &Frame) -> io::Result<()> {
        self.draw(frame)
    }

    fn finish(&mut self, frame: &Frame) -> io::Result<()> {
        self.draw(frame)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
