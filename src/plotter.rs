// SPDX: CC0-1.0

//! The recompute controller.
//!
//! A [`Plotter`] owns two layers of input: the text the user typed for each
//! field, and the verdicts of validating that text. Every edit goes through
//! one entry point ([`Plotter::edit`] or [`Plotter::select`]); if the edit
//! changed something and all inputs are valid at once, the whole pipeline
//! (sample, project, place axes, save) runs before the call returns and the
//! result replaces the previous [`Frame`] in one assignment. Invalid input
//! never clears the last good frame.

use crate::{
    export::Exporter,
    persist::{ConfigStore, PersistedConfig},
    project::{self, AxisGeometry, ProjectedPoint},
    sample::{self, FunctionKind, Sample, ShapeParams},
    validate::{self, Axis, Field, ValidateErr},
    Interval, Number, Surface,
};
use std::{collections::HashMap, path::Path};

/// Sampling density of the live plot.
pub const PLOT_STEPS: usize = 1200;

pub const DEFAULT_X: Interval = Interval::new(-10.0, 10.0);
pub const DEFAULT_Y: Interval = Interval::new(-10.0, 10.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// The current frame reflects the current inputs.
    Idle,
    /// Some input is invalid; the current frame (if any) is stale.
    Blocked,
}

/// What an edit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The name does not refer to anything the plot depends on.
    Ignored,
    /// The new value equals the old one.
    Unchanged,
    /// The value was stored, but inputs are not all valid.
    Blocked,
    Recomputed,
}

/// Field text exactly as entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texts {
    amplitude: String,
    frequency: String,
    phase: String,
    offset: String,
    xmin: String,
    xmax: String,
    ymin: String,
    ymax: String,
}

impl Texts {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Amplitude => &self.amplitude,
            Field::Frequency => &self.frequency,
            Field::Phase => &self.phase,
            Field::Offset => &self.offset,
            Field::XMin => &self.xmin,
            Field::XMax => &self.xmax,
            Field::YMin => &self.ymin,
            Field::YMax => &self.ymax,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Amplitude => &mut self.amplitude,
            Field::Frequency => &mut self.frequency,
            Field::Phase => &mut self.phase,
            Field::Offset => &mut self.offset,
            Field::XMin => &mut self.xmin,
            Field::XMax => &mut self.xmax,
            Field::YMin => &mut self.ymin,
            Field::YMax => &mut self.ymax,
        }
    }

    fn from_config(config: &PersistedConfig) -> Self {
        let p = &config.parameters;
        let (x, y) = (config.x(), config.y());
        Self {
            amplitude: format_number(p.amplitude),
            frequency: format_number(p.frequency),
            phase: format_number(p.phase),
            offset: format_number(p.offset),
            xmin: format_number(x.min),
            xmax: format_number(x.max),
            ymin: format_number(y.min),
            ymax: format_number(y.max),
        }
    }
}

impl Default for Texts {
    fn default() -> Self {
        Self::from_config(&PersistedConfig::new(
            FunctionKind::default(),
            ShapeParams::default(),
            DEFAULT_X,
            DEFAULT_Y,
        ))
    }
}

/// Shortest text that parses back to exactly `val`, independent of locale.
pub fn format_number(val: Number) -> String {
    val.to_string()
}

/// Everything one successful recompute produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub kind: FunctionKind,
    pub params: ShapeParams,
    pub x: Interval,
    pub y: Interval,
    pub series: Vec<Sample>,
    pub points: Vec<ProjectedPoint>,
    pub axes: AxisGeometry,
}

#[derive(Debug)]
pub struct Plotter<S> {
    store: S,
    kind: FunctionKind,
    texts: Texts,
    param_errs: HashMap<Field, ValidateErr>,
    range_errs: HashMap<Axis, ValidateErr>,
    surface: Surface,
    frame: Option<Frame>,
    state: State,
    save_warning: Option<String>,
}

impl<S: ConfigStore> Plotter<S> {
    pub fn new(store: S) -> Self {
        Self::with_surface(store, Surface::default())
    }

    /// Seed inputs from `store` if it holds a usable record, otherwise from
    /// the defaults, then recompute once.
    pub fn with_surface(store: S, surface: Surface) -> Self {
        let mut plotter = Self {
            store,
            kind: FunctionKind::default(),
            texts: Texts::default(),
            param_errs: HashMap::new(),
            range_errs: HashMap::new(),
            surface,
            frame: None,
            state: State::Blocked,
            save_warning: None,
        };

        if let Some(config) = plotter.store.load() {
            log::debug!("seeding inputs from saved settings");
            plotter.kind = config.kind;
            plotter.texts = Texts::from_config(&config);
        }
        for field in Field::exhaustive() {
            plotter.revalidate(*field);
        }
        plotter.recompute();
        plotter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn text(&self, field: Field) -> &str {
        self.texts.get(field)
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// The last good output, if there ever was one.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn series(&self) -> &[Sample] {
        match self.frame {
            Some(ref frame) => &frame.series,
            None => &[],
        }
    }

    pub fn points(&self) -> &[ProjectedPoint] {
        match self.frame {
            Some(ref frame) => &frame.points,
            None => &[],
        }
    }

    /// Why the most recent save failed, until a later save succeeds.
    pub fn save_warning(&self) -> Option<&str> {
        self.save_warning.as_deref()
    }

    /// The message to show next to `field`. Both bounds of an axis share the
    /// error of their pair.
    pub fn error(&self, field: Field) -> Option<ValidateErr> {
        match field.axis() {
            None => self.param_errs.get(&field).copied(),
            Some(axis) => self.range_errs.get(&axis).copied(),
        }
    }

    /// All failing groups: parameters in field order, then x, then y.
    pub fn errors(&self) -> Vec<ValidateErr> {
        Field::params()
            .iter()
            .filter_map(|field| self.param_errs.get(field))
            .chain([Axis::X, Axis::Y].iter().filter_map(|axis| self.range_errs.get(axis)))
            .copied()
            .collect()
    }

    pub fn params_have_errors(&self) -> bool {
        !self.param_errs.is_empty()
    }

    pub fn range_has_errors(&self, axis: Axis) -> bool {
        self.range_errs.contains_key(&axis)
    }

    /// Bounds of `axis` as currently typed.
    pub fn interval(&self, axis: Axis) -> Result<Interval, ValidateErr> {
        validate::interval(
            axis,
            self.texts.get(axis.min_field()),
            self.texts.get(axis.max_field()),
        )
    }

    /// Shape parameters as currently typed.
    pub fn shape_params(&self) -> Result<ShapeParams, ValidateErr> {
        let t = &self.texts;
        Ok(ShapeParams {
            amplitude: validate::validate(Field::Amplitude, &t.amplitude)?,
            frequency: validate::validate(Field::Frequency, &t.frequency)?,
            phase: validate::validate(Field::Phase, &t.phase)?,
            offset: validate::validate(Field::Offset, &t.offset)?,
        })
    }

    /// Gating predicate: parameters carry no errors and both intervals,
    /// re-derived from their text, are usable.
    pub fn can_recompute(&self) -> bool {
        !self.params_have_errors()
            && self.interval(Axis::X).is_ok()
            && self.interval(Axis::Y).is_ok()
    }

    /// Set the text of `field`.
    pub fn edit(&mut self, field: Field, text: impl Into<String>) -> Outcome {
        let text = text.into();
        let slot = self.texts.slot_mut(field);
        if *slot == text {
            return Outcome::Unchanged;
        }
        *slot = text;
        self.revalidate(field);
        self.recompute()
    }

    /// Like [`Plotter::edit`], for callers that only know the field by name.
    pub fn edit_named(&mut self, name: &str, text: impl Into<String>) -> Outcome {
        match name.parse::<Field>() {
            Ok(field) => self.edit(field, text),
            Err(err) => {
                log::trace!("{err}");
                Outcome::Ignored
            }
        }
    }

    pub fn select(&mut self, kind: FunctionKind) -> Outcome {
        if self.kind == kind {
            return Outcome::Unchanged;
        }
        self.kind = kind;
        self.recompute()
    }

    /// Fit the current frame to a new surface. Nothing is resampled or saved.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        if let Some(frame) = self.frame.take() {
            let points = project::project(&frame.series, frame.y, surface);
            let axes = project::compute_axes(frame.x, frame.y, surface).unwrap_or(frame.axes);
            self.frame = Some(Frame {
                points,
                axes,
                ..frame
            });
        }
    }

    /// Whether there is anything to export.
    pub fn can_export(&self) -> bool {
        !self.series().is_empty()
    }

    /// Hand the last good series and its y bounds to `exporter`.
    pub fn export<E: Exporter>(&self, exporter: &E, path: &Path) -> anyhow::Result<bool> {
        match self.frame {
            Some(ref frame) => exporter.export(&frame.series, frame.y, path),
            None => Ok(false),
        }
    }

    fn revalidate(&mut self, field: Field) {
        match field.axis() {
            None => match validate::validate(field, self.texts.get(field)) {
                Ok(_) => {
                    self.param_errs.remove(&field);
                }
                Err(err) => {
                    self.param_errs.insert(field, err);
                }
            },
            Some(axis) => match self.interval(axis) {
                Ok(_) => {
                    self.range_errs.remove(&axis);
                }
                Err(err) => {
                    self.range_errs.insert(axis, err);
                }
            },
        }
    }

    fn recompute(&mut self) -> Outcome {
        if !self.can_recompute() {
            return self.block();
        }
        let (Ok(x), Ok(y), Ok(params)) = (
            self.interval(Axis::X),
            self.interval(Axis::Y),
            self.shape_params(),
        ) else {
            return self.block();
        };

        let series = sample::evaluate(self.kind, &params, x, PLOT_STEPS);
        let points = project::project(&series, y, self.surface);
        let axes = project::compute_axes(x, y, self.surface)
            .or_else(|| self.frame.as_ref().map(|frame| frame.axes))
            .unwrap_or_default();

        log::debug!(
            "recomputed {kind} {params} over x {x}, y {y}: {n} samples",
            kind = self.kind,
            n = series.len()
        );
        self.frame = Some(Frame {
            kind: self.kind,
            params,
            x,
            y,
            series,
            points,
            axes,
        });
        self.state = State::Idle;

        self.persist(&PersistedConfig::new(self.kind, params, x, y));
        Outcome::Recomputed
    }

    fn block(&mut self) -> Outcome {
        log::info!("not plotting: {} invalid input(s)", self.errors().len());
        self.state = State::Blocked;
        Outcome::Blocked
    }

    fn persist(&mut self, config: &PersistedConfig) {
        match self.store.save(config) {
            Ok(()) => self.save_warning = None,
            Err(err) => {
                log::warn!("settings not saved: {err:#}");
                self.save_warning = Some(format!("{err:#}"));
            }
        }
    }
}
