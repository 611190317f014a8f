//! Human input and board rendering seams.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::{debug, instrument};

use crate::{Board, GameError, GameErrorKind};

/// Source of raw position text for human players.
pub trait MoveInput: Send {
    /// Blocks until one line of input is available and returns it trimmed.
    ///
    /// No format validation happens here.
    fn read_position(&mut self, prompt: &str) -> Result<String, GameError>;
}

/// Sink the engine shows the board and turn messages to.
pub trait Renderer: Send {
    /// Shows the current board.
    fn render(&mut self, board: &Board) -> Result<(), GameError>;

    /// Shows a one-line status message.
    fn message(&mut self, _text: &str) -> Result<(), GameError> {
        Ok(())
    }
}

/// Reads positions line by line from any buffered reader.
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead + Send> LineInput<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads one line, failing on end of input.
    pub fn read_line(&mut self) -> Result<String, GameError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(GameError::new(GameErrorKind::Io(
                "end of input".to_string(),
            )));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead + Send> MoveInput for LineInput<R> {
    #[instrument(skip(self))]
    fn read_position(&mut self, prompt: &str) -> Result<String, GameError> {
        let line = self.read_line()?;
        debug!(input = %line, "Read position");
        Ok(line)
    }
}

/// Replays a fixed list of answers; used for simulated players and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates an input that returns `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl MoveInput for ScriptedInput {
    fn read_position(&mut self, _prompt: &str) -> Result<String, GameError> {
        self.lines
            .pop_front()
            .ok_or_else(|| GameError::new(GameErrorKind::Io("script exhausted".to_string())))
    }
}

/// Prints boards and messages to a writer, typically stdout.
#[derive(Debug)]
pub struct ConsoleRenderer<W> {
    out: W,
}

impl<W: Write + Send> ConsoleRenderer<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, board: &Board) -> Result<(), GameError> {
        write!(self.out, "{}", board.display())?;
        self.out.flush()?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), GameError> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }
}

/// Sends boards to the log instead of a terminal; used by batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn render(&mut self, board: &Board) -> Result<(), GameError> {
        debug!(board = %board.display(), "Board");
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), GameError> {
        debug!("{}", text);
        Ok(())
    }
}
