// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::process;

use clap::{crate_version, value_parser, Arg, ArgMatches, Command};
use seamcarve::logging::init_logging;
use seamcarve::{CarveConfig, Mode, SeamCarver, SeamError, SeamResult, Tick};

fn cli() -> Command {
    Command::new("seamcarve")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware narrowing of images by vertical seam carving")
        .arg(
            Arg::new("input")
                .help("The image to carve")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the carved image")
                .short('o')
                .long("output")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seams")
                .help("Number of columns to remove")
                .short('n')
                .long("seams")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("pace")
                .help("Ticks each seam stays highlighted before removal")
                .long("pace")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("config")
                .help("JSON configuration file")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("luminance")
                .help("Also write the luminance preview here")
                .long("luminance")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("energy")
                .help("Also write the energy preview here")
                .long("energy")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("highlight")
                .help("Also write the source with its first seam painted red")
                .long("highlight")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .help("Log filter, e.g. info or seamcarve=debug")
                .long("log-level"),
        )
}

fn load_config(matches: &ArgMatches) -> SeamResult<CarveConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CarveConfig::from_file(path)?,
        None => CarveConfig::default(),
    };
    if let Some(seams) = matches.get_one::<u32>("seams") {
        config.seams_to_remove = *seams;
    }
    if let Some(pace) = matches.get_one::<u32>("pace") {
        config.removal_pace = *pace;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn required_path<'a>(matches: &'a ArgMatches, name: &str) -> SeamResult<&'a PathBuf> {
    matches
        .get_one::<PathBuf>(name)
        .ok_or_else(|| SeamError::config(format!("missing required argument <{}>", name)))
}

fn run(matches: &ArgMatches) -> SeamResult<()> {
    let config = load_config(matches)?;
    init_logging(&config.logging);

    let input = required_path(matches, "input")?;
    let output = required_path(matches, "output")?;

    let source = image::open(input)?.to_rgba8();
    tracing::info!(?input, width = source.width(), height = source.height(), "loaded image");
    let mut carver = SeamCarver::new(source, config)?;

    for (mode, flag) in [
        (Mode::PreviewLuminance, "luminance"),
        (Mode::PreviewEnergy, "energy"),
    ] {
        if let Some(path) = matches.get_one::<PathBuf>(flag) {
            carver.set_mode(mode)?;
            carver.render().save(path)?;
            tracing::info!(?path, "wrote {} preview", flag);
        }
    }

    let mut highlight = matches.get_one::<PathBuf>("highlight");
    carver.set_mode(Mode::Carving)?;
    loop {
        match carver.tick()? {
            Some(Tick::SeamHighlight) => {
                if let Some(path) = highlight.take() {
                    carver.render().save(path)?;
                    tracing::info!(?path, "wrote seam highlight");
                }
            }
            Some(Tick::Removed) => {}
            Some(Tick::Done) | None => break,
        }
    }
    if let Some(path) = highlight {
        tracing::warn!(?path, "no seam was selected, highlight not written");
    }

    let carved = carver.render();
    carved.save(output)?;
    tracing::info!(
        ?output,
        width = carved.width(),
        height = carved.height(),
        "wrote carved image"
    );
    Ok(())
}

fn main() {
    let matches = cli().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("seamcarve: {}", err);
        process::exit(1);
    }
}
