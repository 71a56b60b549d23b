// SPDX: CC0-1.0

use crate::{
    persist::ConfigStore,
    plotter::{Outcome, Plotter, State},
    validate::{Field, ValidateErr},
};
use anyhow::Context;
use core::fmt;
use std::io::{self, stdin, BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Function,
    Params,
    Window,
    Set,
    Show,
    Export,
}

impl Command {
    pub const fn exhaustive() -> &'static [Command] {
        &[
            Self::Help,
            Self::Quit,
            Self::Function,
            Self::Params,
            Self::Window,
            Self::Set,
            Self::Show,
            Self::Export,
        ]
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::Help => "display help for each command",
            Self::Quit => "quit the shell",
            Self::Function => "choose the function to plot (sin, cos, sinc)",
            Self::Params => "set amplitude, frequency, phase and offset",
            Self::Window => "set the x and y ranges of the plot",
            Self::Set => "set a single field, as 'field = value'",
            Self::Show => "print the current settings and plot",
            Self::Export => "write the current plot to an svg file",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Function => "fn",
            Self::Params => "params",
            Self::Window => "window",
            Self::Set => "set",
            Self::Show => "show",
            Self::Export => "export",
        }
    }
}

impl core::str::FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for c in Self::exhaustive() {
            if s == c.name() {
                return Ok(*c);
            }
        }
        Err(())
    }
}

/// Prompt for one line. `None` once standard input is exhausted.
pub fn input<W: Write>(out: W, prompt: impl fmt::Display) -> anyhow::Result<Option<String>> {
    fn inner<W: Write>(mut out: W, prompt: impl fmt::Display) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut stdin = stdin().lock();
        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    let s = inner(out, prompt).context("read from standard input failed")?;
    Ok(s)
}

pub fn read_fromstr<W: Write, T: core::str::FromStr>(
    mut out: W,
    prompt: impl fmt::Display,
    ignore_empty: bool,
) -> anyhow::Result<Result<Option<T>, <T as core::str::FromStr>::Err>>
where
    <T as core::str::FromStr>::Err: fmt::Display,
{
    let Some(input) = input(&mut out, prompt)? else {
        return Ok(Ok(None));
    };
    if ignore_empty && input.is_empty() {
        return Ok(Ok(None));
    }
    match input.parse::<T>() {
        Ok(new) => Ok(Ok(Some(new))),
        Err(err) => {
            writeln!(out)?;
            underline(&mut out, &input)?;
            writeln!(out, "parse error: {err}")?;
            Ok(Err(err))
        }
    }
}

pub fn underline<W: Write>(mut out: W, src: &str) -> io::Result<()> {
    writeln!(out, "{src}")?;
    writeln!(out, "{}", "^".repeat(src.chars().count().max(1)))?;
    Ok(())
}

/// The candidate closest to `text`, if any is close enough to be a likely typo.
pub fn most_similar<'a>(
    text: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let text = text.to_ascii_lowercase();
    candidates
        .into_iter()
        .map(|c| {
            (
                strsim::normalized_damerau_levenshtein(&text, &c.to_ascii_lowercase()),
                c,
            )
        })
        .reduce(|(acc_sim, acc), (sim, c)| if sim > acc_sim { (sim, c) } else { (acc_sim, acc) })
        .filter(|(sim, _)| *sim > 0.3)
        .map(|(_, c)| c)
}

pub fn suggest<'a, W: Write>(
    mut out: W,
    what: &str,
    text: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> io::Result<()> {
    if let Some(close) = most_similar(text, candidates) {
        writeln!(out, "note: {what} '{close}' has a similar name")?;
    }
    Ok(())
}

pub fn field_error<W: Write>(mut out: W, text: &str, err: ValidateErr) -> io::Result<()> {
    writeln!(out)?;
    underline(&mut out, text)?;
    writeln!(out, "error: {err}")
}

pub fn report<W: Write>(mut out: W, outcome: Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Recomputed => writeln!(out, "plot updated"),
        Outcome::Blocked => writeln!(out, "plot not updated: some input is invalid"),
        Outcome::Unchanged | Outcome::Ignored => Ok(()),
    }
}

/// One-line summary of the inputs as typed.
pub fn status<W: Write, S: ConfigStore>(mut out: W, plotter: &Plotter<S>) -> io::Result<()> {
    let t = |field: Field| plotter.text(field);
    write!(
        out,
        "y = {a} * {kind}({f} * x + {p}) + {o}, x in [{xmin}, {xmax}], y in [{ymin}, {ymax}]",
        a = t(Field::Amplitude),
        kind = plotter.kind(),
        f = t(Field::Frequency),
        p = t(Field::Phase),
        o = t(Field::Offset),
        xmin = t(Field::XMin),
        xmax = t(Field::XMax),
        ymin = t(Field::YMin),
        ymax = t(Field::YMax),
    )?;
    if plotter.state() == State::Blocked {
        write!(out, " (invalid)")?;
    }
    writeln!(out)
}
