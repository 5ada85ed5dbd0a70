//! Interactive play on stdin/stdout.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use ss_core::{Engine, GameState, Outcome, Selection, SessionConfig, StoryError};

use crate::prompt::{Input, parse_input};
use crate::render::{self, RenderConfig, Renderer};

const FAREWELL: &str = "SwimmingStar folds her rays away for a while. See you soon.";

/// Options of the `play` command.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub session: SessionConfig,
    pub render: RenderConfig,
    /// Print the flag table at the end.
    pub summary: bool,
    /// Print the final state as JSON at the end.
    pub json: bool,
}

/// How a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A terminal node was reached.
    Finished(Outcome),
    /// The player typed quit/exit or closed the input.
    Quit,
}

pub fn run(options: &PlayOptions) -> Result<(), String> {
    let graph = super::load_story()?;
    let engine = Engine::new(&graph, options.session.clone());
    let renderer = Renderer::new(options.render);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let (end, state) = run_session(&engine, &renderer, stdin.lock(), stdout.lock())?;
    match end {
        SessionEnd::Finished(outcome) => info!("finished with {outcome} after {} turns", state.turns()),
        SessionEnd::Quit => info!("left at '{}' after {} turns", state.current, state.turns()),
    }

    if options.summary {
        println!("\n{}", renderer.summary(&state));
    }
    if options.json {
        println!("{}", render::json(&state)?);
    }
    Ok(())
}

/// Run one session until it ends, the player quits, or input runs out.
pub fn run_session<R: BufRead, W: Write>(
    engine: &Engine<'_>,
    renderer: &Renderer,
    mut reader: R,
    mut writer: W,
) -> Result<(SessionEnd, GameState), String> {
    let mut state = engine.start();
    emit(&mut writer, &renderer.title(engine.graph().title()))?;

    let mut buf = Vec::new();
    let mut show_beat = true;

    loop {
        let node = engine.current_node(&state).map_err(|e| e.to_string())?;
        if let Some(outcome) = node.outcome {
            emit(&mut writer, &renderer.outcome(node, outcome, &state))?;
            return Ok((SessionEnd::Finished(outcome), state));
        }

        let choices = engine
            .available_choices(&state)
            .map_err(|e| e.to_string())?;
        if choices.is_empty() {
            return Err(format!("no choice is available at '{}'", node.id));
        }
        if show_beat {
            emit(&mut writer, &renderer.beat(node, &state, &choices))?;
            show_beat = false;
        }

        emit(&mut writer, "> ")?;
        writer.flush().map_err(|e| e.to_string())?;

        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                // EOF
                emit(&mut writer, &format!("\n{FAREWELL}\n"))?;
                return Ok((SessionEnd::Quit, state));
            }
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        // Undecodable bytes become U+FFFD and are rejected as malformed.
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        let pick = match parse_input(&line) {
            Ok(Input::Quit) => {
                emit(&mut writer, &format!("{FAREWELL}\n"))?;
                return Ok((SessionEnd::Quit, state));
            }
            Ok(Input::Pick(n)) => n,
            Err(e) => {
                debug!("rejected input: {e}");
                emit(&mut writer, &renderer.notice("Enter the number of your choice."))?;
                emit(&mut writer, &renderer.choices(&choices))?;
                continue;
            }
        };

        match engine.advance(&mut state, &Selection::Number(pick)) {
            Ok(transition) => {
                emit(&mut writer, &renderer.transition(&transition, &state))?;
                show_beat = true;
            }
            Err(StoryError::InvalidChoice(selection)) => {
                debug!("rejected choice {selection} at '{}'", state.current);
                emit(&mut writer, &renderer.notice("Invalid choice, try again."))?;
                emit(&mut writer, &renderer.choices(&choices))?;
            }
            Err(e) => return Err(e.to_string()),
        }
    }
}

fn emit<W: Write>(writer: &mut W, text: &str) -> Result<(), String> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| format!("failed to write output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use ss_core::StoryGraph;

    fn plain() -> Renderer {
        Renderer::new(RenderConfig {
            width: 78,
            color: false,
        })
    }

    fn play(graph: &StoryGraph, config: SessionConfig, input: &str) -> (SessionEnd, GameState, String) {
        let engine = Engine::new(graph, config);
        let mut out = Vec::new();
        let (end, state) =
            run_session(&engine, &plain(), Cursor::new(input.to_string()), &mut out).unwrap();
        (end, state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn exit_at_first_prompt_leaves_state_untouched() {
        let graph = ss_story::swimming_star().unwrap();
        let engine = Engine::new(&graph, SessionConfig::default());
        let (end, state, out) = play(&graph, SessionConfig::default(), "exit\n");
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(state, engine.start());
        assert!(out.contains(FAREWELL));
    }

    #[test]
    fn end_of_input_quits() {
        let graph = ss_story::swimming_star().unwrap();
        let (end, state, _) = play(&graph, SessionConfig::default(), "1\n");
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(state.turns(), 1);
    }

    #[test]
    fn bad_input_is_reported_and_reprompted() {
        let graph = ss_story::swimming_star().unwrap();
        let (end, state, out) = play(&graph, SessionConfig::default(), "abc\n99\n0\n\nquit\n");
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(state.turns(), 0);
        assert!(out.contains("Enter the number of your choice."));
        assert_eq!(out.matches("Invalid choice, try again.").count(), 2);
    }

    #[test]
    fn undecodable_input_is_reprompted() {
        let graph = ss_story::swimming_star().unwrap();
        let engine = Engine::new(&graph, SessionConfig::default());
        let mut out = Vec::new();
        let input: &[u8] = b"\xff\xfe\n1\nquit\n";
        let (end, state) = run_session(&engine, &plain(), input, &mut out).unwrap();
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(state.turns(), 1);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Enter the number of your choice."));
    }

    #[test]
    fn numbered_walkthrough_reaches_the_serene_ending() {
        let graph = ss_story::swimming_star().unwrap();
        let input = "1\n2\n2\n2\n1\n1\n1\n2\n1\n1\n1\n1\n2\n3\n3\n1\n";
        let (end, state, out) = play(&graph, SessionConfig::default(), input);
        assert_eq!(end, SessionEnd::Finished(Outcome::Success));
        assert_eq!(state.current.as_str(), ss_story::SERENE);
        assert!(out.contains("The journey ends: success."));
    }

    #[test]
    fn running_dry_ends_in_failure() {
        let graph = ss_story::swimming_star().unwrap();
        let config = SessionConfig::default().with_initial_energy(2);
        let (end, state, out) = play(&graph, config, "1\n2\n");
        assert_eq!(end, SessionEnd::Finished(Outcome::Failure));
        assert_eq!(state.current.as_str(), ss_story::EXTINGUISHED);
        assert!(out.contains("The journey ends: failure."));
    }
}
