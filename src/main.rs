// mapflat - pack a JSON map into a flat blob and emit the matching C header
//
// Pipeline:
//   1. Load the schema (built-in, or --schema file)
//   2. Validate the JSON map and encode the blob in memory
//   3. Write the C definitions, then the blob
//
// Usage: mapflat [--schema FILE] [--input FILE] [--header FILE] [--blob FILE]
//        mapflat inspect BLOB [--schema FILE]

use anyhow::{Context, bail};
use mapflat::{Document, Schema, emitter, parse_file, writer};
use std::env;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: mapflat [--schema FILE] [--input FILE] [--header FILE] [--blob FILE]\n       mapflat inspect BLOB [--schema FILE]";

struct Options {
    schema: Option<PathBuf>,
    input: PathBuf,
    header: PathBuf,
    blob: PathBuf,
    inspect: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut opts = Options {
        schema: None,
        input: PathBuf::from("map.json"),
        header: PathBuf::from("build/map.h"),
        blob: PathBuf::from("build/map.bytes"),
        inspect: None,
    };

    let mut i = 0;
    if args.first().map(String::as_str) == Some("inspect") {
        let Some(blob) = args.get(1) else {
            bail!("inspect needs a blob path\n{}", USAGE);
        };
        opts.inspect = Some(PathBuf::from(blob));
        i = 2;
    }

    while i < args.len() {
        let value = args
            .get(i + 1)
            .with_context(|| format!("{} needs a value\n{}", args[i], USAGE))?;
        match args[i].as_str() {
            "--schema" => opts.schema = Some(PathBuf::from(value)),
            "--input" => opts.input = PathBuf::from(value),
            "--header" => opts.header = PathBuf::from(value),
            "--blob" => opts.blob = PathBuf::from(value),
            other => bail!("unknown argument {}\n{}", other, USAGE),
        }
        i += 2;
    }

    Ok(opts)
}

fn load_schema(path: Option<&Path>) -> anyhow::Result<Schema> {
    match path {
        Some(path) => Schema::from_path(path)
            .with_context(|| format!("loading schema {}", path.display())),
        None => Ok(Schema::map_default()),
    }
}

fn generate(opts: &Options, schema: &Schema) -> anyhow::Result<()> {
    // Validate and encode before touching either output file.
    let doc = Document::from_path(schema, &opts.input)
        .with_context(|| format!("reading map {}", opts.input.display()))?;
    let blob = writer::to_bytes(schema, &doc).context("encoding map data")?;

    emitter::write_definitions(&opts.header, schema).context("emitting definitions")?;
    writer::write_blob(&opts.blob, &blob).context("writing blob")?;

    println!("done!");
    Ok(())
}

fn inspect(path: &Path, schema: &Schema) -> anyhow::Result<()> {
    let data = parse_file(schema, path).with_context(|| format!("parsing {}", path.display()))?;
    for section in &data.sections {
        println!(
            "{}: {} records x {} floats",
            section.json_key(),
            section.count(),
            section.field_count()
        );
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let opts = parse_args(&args)?;
    let schema = load_schema(opts.schema.as_deref())?;
    log::debug!("schema has {} kinds", schema.len());

    match &opts.inspect {
        Some(blob) => inspect(blob, &schema),
        None => generate(&opts, &schema),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
