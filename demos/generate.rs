// Copyright (c) 2024 Mike Tsao

//! The `generate` example builds a sight-reading exercise and prints it as
//! JSON.
//!
//! ```sh
//! cargo run --example generate -- --difficulty intermediate --measures 8
//! cargo run --example generate -- --style scale:C4:major
//! cargo run --example generate -- --style chords:G3:minor --measures 2
//! cargo run --example generate -- --style progression:C4:I,IV,V,I --seed 17
//! ```

use clap::Parser;
use etude::prelude::*;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Difficulty preset: beginner, intermediate, advanced, or expert
    #[clap(short, long, default_value = "beginner")]
    difficulty: String,

    /// Exercise style: "random", "scale:<root>:<kind>",
    /// "chords:<root>:<quality>", or "progression:<tonic>:<I,IV,V,...>".
    /// Roots take note names ("C4") or MIDI numbers ("60").
    #[clap(short, long, default_value = "random")]
    style: String,

    /// How many measures to generate (fixed-form styles pick their own length)
    #[clap(short, long, default_value_t = 4)]
    measures: usize,

    /// Seed for reproducible output; omit for a fresh exercise each run
    #[clap(long)]
    seed: Option<u128>,

    /// Pretty-print the JSON
    #[clap(short, long, value_parser)]
    pretty: bool,
}

fn parse_root(s: &str) -> anyhow::Result<MidiPitch> {
    if let Ok(key) = s.parse::<u8>() {
        Ok(MidiPitch(key))
    } else {
        Ok(s.parse::<NoteName>()?.to_pitch()?)
    }
}

fn parse_style(s: &str) -> anyhow::Result<ExerciseStyle> {
    let mut parts = s.split(':');
    match parts.next().unwrap_or_default() {
        "random" => Ok(ExerciseStyle::RandomMelodic),
        "scale" => {
            let root = parse_root(parts.next().unwrap_or("C4"))?;
            let kind = parts.next().unwrap_or("major").parse()?;
            Ok(ExerciseStyle::Scale(ScaleRun { root, kind }))
        }
        "chords" => {
            let root = parse_root(parts.next().unwrap_or("C4"))?;
            let quality = parts.next().unwrap_or("major").parse()?;
            Ok(ExerciseStyle::Chords(ChordBlocks { root, quality }))
        }
        "progression" => {
            let tonic = parse_root(parts.next().unwrap_or("C4"))?;
            let numerals = parts
                .next()
                .unwrap_or("I,IV,V,I")
                .split(',')
                .map(|numeral| numeral.trim().parse())
                .collect::<Result<Vec<RomanNumeral>, _>>()?;
            Ok(ExerciseStyle::Progression(DegreeProgression {
                tonic,
                numerals,
            }))
        }
        other => anyhow::bail!("unrecognized style {other:?}"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = args.difficulty.parse::<Difficulty>()?.config();
    let style = parse_style(&args.style)?;
    let mut rng = match args.seed {
        Some(seed) => Rng::new_with_seed(seed),
        None => Rng::default(),
    };

    match style.generate(&config, args.measures, &mut rng) {
        Ok(exercise) => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&exercise)?
            } else {
                serde_json::to_string(&exercise)?
            };
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            eprintln!("error while generating exercise: {e}");
            Err(e.into())
        }
    }
}
