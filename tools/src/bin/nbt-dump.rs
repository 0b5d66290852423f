use std::io::Read;
use std::path::Path;

use clap::{App, Arg};
use env_logger::Env;
use log::{debug, error};
use nedit::read::ReadOpts;
use nedit::{Compound, Compression, Value};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    let mut data = vec![];
    match file {
        Some(path) => {
            data = std::fs::read(Path::new(path))?;
        }
        None => {
            std::io::stdin().read_to_end(&mut data)?;
        }
    }
    debug!("read {} bytes", data.len());
    Ok(data)
}

fn parse_compression(name: &str) -> Option<Compression> {
    match name {
        "none" => Some(Compression::None),
        "gzip" => Some(Compression::Gzip),
        "zlib" => Some(Compression::Zlib),
        _ => None,
    }
}

fn print_compound(compound: &Compound, indent: usize) {
    for (name, value) in compound {
        print!("{:indent$}{:?} {}", "", name, value.tag(), indent = indent);
        print_value(value, indent);
    }
}

fn print_value(value: &Value, indent: usize) {
    match value {
        Value::Compound(c) => {
            println!(" ({} entries)", c.len());
            print_compound(c, indent + 4);
        }
        Value::List(list) => {
            println!(" of {} ({} elements)", list.element_tag(), list.len());
            for element in list {
                print!("{:indent$}-", "", indent = indent + 4);
                print_value(element, indent + 4);
            }
        }
        Value::String(s) => println!(" {:?}", s),
        Value::ByteArray(v) => println!(" {:?}", v),
        Value::IntArray(v) => println!(" {:?}", v),
        Value::LongArray(v) => println!(" {:?}", v),
        Value::Byte(v) => println!(" {}", v),
        Value::Short(v) => println!(" {}", v),
        Value::Int(v) => println!(" {}", v),
        Value::Long(v) => println!(" {}", v),
        Value::Float(v) => println!(" {}", v),
        Value::Double(v) => println!(" {}", v),
    }
}

fn run() -> Result<()> {
    let matches = App::new("nbt-dump")
        .about("Print the contents of an NBT document")
        .arg(Arg::with_name("file").takes_value(true).required(false))
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .required(false),
        )
        .arg(
            Arg::with_name("compression")
                .long("compression")
                .takes_value(true)
                .required(false)
                .possible_values(&["auto", "none", "gzip", "zlib"])
                .default_value("auto"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    let mut opts = ReadOpts::new();
    if let Some(depth) = matches.value_of("max-depth") {
        opts = opts.max_depth(depth.parse()?);
    }

    let data = read_input(matches.value_of("file"))?;

    let (name, compound) = match matches.value_of("compression").and_then(parse_compression) {
        Some(compression) => nedit::from_reader_with_opts(data.as_slice(), compression, opts)?,
        None => nedit::decode_with_opts(&data, opts)?,
    };

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&compound)?);
    } else {
        println!("{:?} Compound ({} entries)", name, compound.len());
        print_compound(&compound, 4);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
