use clap::{App, Arg, ArgMatches, SubCommand};
use slabbuf::{error::BufferError, Buffer, BufferPool, Encoding, PoolConfig, Result};

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("slabbuf-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect text encodings, fixed-width values and pool layouts")
        .subcommand(
            SubCommand::with_name("convert")
                .about("Re-encode text from one encoding to another")
                .arg(
                    Arg::with_name("from")
                        .short("f")
                        .long("from")
                        .value_name("ENCODING")
                        .help("Encoding of the input")
                        .default_value("utf8")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("to")
                        .short("t")
                        .long("to")
                        .value_name("ENCODING")
                        .help("Encoding of the output")
                        .default_value("hex")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("input")
                        .value_name("TEXT")
                        .help("Text to convert")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("byte-length")
                .about("Number of bytes a string occupies once encoded")
                .arg(
                    Arg::with_name("encoding")
                        .short("e")
                        .long("encoding")
                        .value_name("ENCODING")
                        .help("Target encoding")
                        .default_value("utf8")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("input")
                        .value_name("TEXT")
                        .help("Text to measure")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("read")
                .about("Decode a fixed-width value from hex bytes")
                .arg(
                    Arg::with_name("type")
                        .short("t")
                        .long("type")
                        .value_name("TYPE")
                        .help("Value type")
                        .possible_values(&[
                            "u8", "i8", "u16be", "u16le", "i16be", "i16le", "u32be", "u32le",
                            "i32be", "i32le", "u64be", "u64le", "i64be", "i64le", "f32be",
                            "f32le", "f64be", "f64le",
                        ])
                        .default_value("u8")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("offset")
                        .short("o")
                        .long("offset")
                        .value_name("OFFSET")
                        .help("Byte offset of the value")
                        .default_value("0")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("input")
                        .value_name("HEX")
                        .help("Bytes as hex digits")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("pool")
                .about("Show where a sequence of allocations lands in the pool")
                .arg(
                    Arg::with_name("pool_size")
                        .short("p")
                        .long("pool-size")
                        .value_name("SIZE")
                        .help("Slab size in bytes")
                        .default_value("8192")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("sizes")
                        .value_name("SIZE")
                        .help("Allocation sizes, in order")
                        .required(true)
                        .multiple(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("convert", Some(convert_matches)) => handle_convert(convert_matches),
        ("byte-length", Some(length_matches)) => handle_byte_length(length_matches),
        ("read", Some(read_matches)) => handle_read(read_matches),
        ("pool", Some(pool_matches)) => handle_pool(pool_matches),
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .value_of(name)
        .ok_or_else(|| BufferError::invalid_parameter(name, "missing value"))
}

fn parse_size(matches: &ArgMatches, name: &str) -> Result<usize> {
    let raw = value(matches, name)?;
    raw.parse()
        .map_err(|_| BufferError::invalid_parameter(name, format!("Invalid size: {}", raw)))
}

fn handle_convert(matches: &ArgMatches) -> Result<()> {
    let from: Encoding = value(matches, "from")?.parse()?;
    let to: Encoding = value(matches, "to")?.parse()?;
    let buffer = Buffer::from_encoded(value(matches, "input")?, from)?;
    println!("{}", buffer.to_string_encoded(to));
    Ok(())
}

fn handle_byte_length(matches: &ArgMatches) -> Result<()> {
    let encoding: Encoding = value(matches, "encoding")?.parse()?;
    println!("{}", Buffer::byte_length(value(matches, "input")?, encoding));
    Ok(())
}

fn handle_read(matches: &ArgMatches) -> Result<()> {
    let buffer = Buffer::from_encoded(value(matches, "input")?, Encoding::Hex)?;
    let offset = parse_size(matches, "offset")?;
    let rendered = match value(matches, "type")? {
        "u8" => buffer.read_u8(offset)?.to_string(),
        "i8" => buffer.read_i8(offset)?.to_string(),
        "u16be" => buffer.read_u16_be(offset)?.to_string(),
        "u16le" => buffer.read_u16_le(offset)?.to_string(),
        "i16be" => buffer.read_i16_be(offset)?.to_string(),
        "i16le" => buffer.read_i16_le(offset)?.to_string(),
        "u32be" => buffer.read_u32_be(offset)?.to_string(),
        "u32le" => buffer.read_u32_le(offset)?.to_string(),
        "i32be" => buffer.read_i32_be(offset)?.to_string(),
        "i32le" => buffer.read_i32_le(offset)?.to_string(),
        "u64be" => buffer.read_u64_be(offset)?.to_string(),
        "u64le" => buffer.read_u64_le(offset)?.to_string(),
        "i64be" => buffer.read_i64_be(offset)?.to_string(),
        "i64le" => buffer.read_i64_le(offset)?.to_string(),
        "f32be" => buffer.read_f32_be(offset)?.to_string(),
        "f32le" => buffer.read_f32_le(offset)?.to_string(),
        "f64be" => buffer.read_f64_be(offset)?.to_string(),
        "f64le" => buffer.read_f64_le(offset)?.to_string(),
        other => return Err(BufferError::invalid_parameter("type", format!("Unknown type: {}", other))),
    };
    println!("{}", rendered);
    Ok(())
}

fn handle_pool(matches: &ArgMatches) -> Result<()> {
    let pool_size = parse_size(matches, "pool_size")?;
    let pool = BufferPool::new(PoolConfig::default().with_pool_size(pool_size))?;

    let sizes = matches
        .values_of("sizes")
        .ok_or_else(|| BufferError::invalid_parameter("sizes", "missing value"))?;

    println!("Pool size: {} bytes", pool.pool_size());
    let mut previous: Option<Buffer> = None;
    for (i, raw) in sizes.enumerate() {
        let size: usize = raw
            .parse()
            .map_err(|_| BufferError::invalid_parameter("sizes", format!("Invalid size: {}", raw)))?;
        let buffer = pool.alloc(size);
        let placement = match &previous {
            _ if buffer.is_empty() => "empty",
            _ if buffer.store().len() == size && size >= pool.config().large_object_threshold() => {
                "dedicated"
            }
            Some(prev) if prev.shares_store(&buffer) => "slab",
            None => "slab",
            Some(_) => "slab (new)",
        };
        println!(
            "  #{:<3} size {:>6}  offset {:>6}  {}",
            i,
            size,
            buffer.byte_offset(),
            placement
        );
        if placement.starts_with("slab") {
            previous = Some(buffer);
        }
    }

    println!("\n{}", pool.stats().summary());
    Ok(())
}
