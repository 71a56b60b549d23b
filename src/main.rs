// SPDX: CC0-1.0

use chrono::{DateTime, Local};
use clap::Parser;
use function_plotter::{
    export::SvgExporter,
    persist::{ConfigStore, JsonStore, MemoryStore},
    plotter::{Plotter, State as PlotState},
    sample::FunctionKind,
    shell::{self, Command},
    validate::Field,
    view::{self, Cells},
    Number, Surface,
};
use std::{
    io::{stdout, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

fn output_svg_filename(now: DateTime<Local>) -> String {
    format!(
        "{}_output-{}.{}",
        env!("CARGO_PKG_NAME"),
        now.format("%Y-%m-%d_%H-%M-%S"),
        "svg"
    )
}

/// Plot a shaped sine, cosine or sinc and export it as svg.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Settings file to restore from and save to
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Neither read nor write a settings file
    #[arg(long, conflicts_with = "settings")]
    no_persist: bool,

    /// Width of the drawing surface
    #[arg(long, default_value_t = 800.0)]
    width: Number,

    /// Height of the drawing surface
    #[arg(long, default_value_t = 640.0)]
    height: Number,

    /// Columns of the terminal plot
    #[arg(long, default_value_t = 72)]
    cols: usize,

    /// Rows of the terminal plot
    #[arg(long, default_value_t = 20)]
    rows: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match try_main(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

struct State {
    plotter: Plotter<Box<dyn ConfigStore>>,
    cells: Cells,
}

fn try_main(args: Args) -> anyhow::Result<()> {
    if !(args.width > 0.0 && args.height > 0.0) {
        anyhow::bail!("surface size must be positive, got {}x{}", args.width, args.height);
    }

    let store: Box<dyn ConfigStore> = if args.no_persist {
        Box::new(MemoryStore::default())
    } else {
        let path = args.settings.unwrap_or_else(JsonStore::default_path);
        log::info!("settings file: {}", path.display());
        Box::new(JsonStore::new(path))
    };
    let surface = Surface::new(args.width, args.height);
    log::debug!("{surface}");
    let mut state = State {
        plotter: Plotter::with_surface(store, surface),
        cells: Cells {
            cols: args.cols,
            rows: args.rows,
        },
    };

    let mut stdout = BufWriter::new(stdout());
    loop {
        shell::status(&mut stdout, &state.plotter)?;

        let Some(mut try_cmd) = shell::input(&mut stdout, "> ")? else {
            writeln!(stdout)?;
            break;
        };
        try_cmd.make_ascii_lowercase();
        writeln!(stdout)?;

        if let Ok(cmd) = try_cmd.parse::<Command>() {
            match cmd {
                Command::Help => {
                    for c in Command::exhaustive() {
                        writeln!(stdout, "{name}: {help}", name = c.name(), help = c.help())?;
                    }
                }

                Command::Quit => break,

                Command::Function => set_function(&mut stdout, &mut state)?,

                Command::Params => set_fields(&mut stdout, &mut state, Field::params())?,

                Command::Window => set_fields(&mut stdout, &mut state, Field::bounds())?,

                Command::Set => set_one(&mut stdout, &mut state)?,

                Command::Show => show(&mut stdout, &state)?,

                Command::Export => export(&mut stdout, &state)?,
            }
        } else if !try_cmd.is_empty() {
            writeln!(stdout, r#"Unknown command, try "help" for help"#)?;
            shell::suggest(
                &mut stdout,
                "command",
                &try_cmd,
                Command::exhaustive().iter().map(|c| c.name()),
            )?;
        }

        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn set_function<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    let names = FunctionKind::exhaustive()
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "note: one of {names}; leave blank to skip")?;

    match shell::read_fromstr::<_, FunctionKind>(
        &mut out,
        format_args!("?function (is {cur}) = ", cur = state.plotter.kind()),
        true,
    )? {
        Ok(Some(kind)) => {
            let outcome = state.plotter.select(kind);
            shell::report(&mut out, outcome)?;
        }
        Ok(None) => {}
        Err(err) => {
            shell::suggest(
                &mut out,
                "function",
                &err.0,
                FunctionKind::exhaustive().iter().map(|k| k.name()),
            )?;
        }
    }
    Ok(())
}

fn set_fields<W: Write>(mut out: W, state: &mut State, fields: &[Field]) -> anyhow::Result<()> {
    writeln!(out, "note: leave blank to skip")?;

    let mut last = None;
    for field in fields {
        let Some(text) = shell::input(
            &mut out,
            format_args!(
                "?{name} (is {cur}) = ",
                name = field.name(),
                cur = state.plotter.text(*field)
            ),
        )?
        else {
            break;
        };
        if text.is_empty() {
            continue;
        }
        last = Some(state.plotter.edit(*field, text.as_str()));
        if let Some(err) = state.plotter.error(*field) {
            shell::field_error(&mut out, &text, err)?;
        }
    }

    if let Some(outcome) = last {
        shell::report(&mut out, outcome)?;
    }
    Ok(())
}

fn set_one<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    let Some(line) = shell::input(&mut out, "?field = value: ")? else {
        return Ok(());
    };
    let Some((name, text)) = line.split_once('=') else {
        if !line.is_empty() {
            writeln!(out, "error: expected 'field = value'")?;
        }
        return Ok(());
    };

    let (name, text) = (name.trim(), text.trim());
    match name.parse::<Field>() {
        Ok(field) => {
            let outcome = state.plotter.edit(field, text);
            if let Some(err) = state.plotter.error(field) {
                shell::field_error(&mut out, text, err)?;
            }
            shell::report(&mut out, outcome)?;
        }
        Err(err) => {
            writeln!(out, "error: {err}")?;
            shell::suggest(
                &mut out,
                "field",
                name,
                Field::exhaustive().iter().map(|f| f.name()),
            )?;
        }
    }
    Ok(())
}

fn show<W: Write>(mut out: W, state: &State) -> anyhow::Result<()> {
    let plotter = &state.plotter;
    for field in Field::exhaustive() {
        writeln!(out, "{name:>9} = {text}", name = field.name(), text = plotter.text(*field))?;
    }
    for err in plotter.errors() {
        writeln!(out, "error: {err}")?;
    }
    if let Some(warning) = plotter.save_warning() {
        writeln!(out, "warning: settings were not saved: {warning}")?;
    }
    writeln!(out)?;

    match plotter.frame() {
        Some(frame) => {
            if plotter.state() == PlotState::Blocked {
                writeln!(out, "note: showing the last valid plot")?;
            }
            writeln!(
                out,
                "{n} samples of {kind}",
                n = frame.series.len(),
                kind = frame.kind
            )?;
            view::draw(&mut out, frame, plotter.surface(), state.cells)?;
        }
        None => writeln!(out, "nothing has been plotted yet")?,
    }
    Ok(())
}

fn export<W: Write>(mut out: W, state: &State) -> anyhow::Result<()> {
    if !state.plotter.can_export() {
        writeln!(out, "error: nothing to export")?;
        return Ok(());
    }

    let default_path = output_svg_filename(Local::now());
    let Some(path) = shell::input(
        &mut out,
        format_args!("?path (leave blank for {default_path}) = "),
    )?
    else {
        return Ok(());
    };
    let path = PathBuf::from(if path.is_empty() { default_path } else { path });

    match state.plotter.export(&SvgExporter::default(), &path) {
        Ok(true) => writeln!(out, "wrote {}", path.display())?,
        Ok(false) => writeln!(out, "error: nothing to export")?,
        Err(err) => writeln!(out, "export failed: {err:#}")?,
    }
    Ok(())
}
