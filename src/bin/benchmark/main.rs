use packed_varint::ops::{Element, Sortable};
use packed_varint::{Bits, Result, VarInt};

use std::io::Read;
use std::time::Instant;
use std::{env, process};

use getopts::Options;

mod utils;

//-----------------------------------------------------------------------------

fn main() {
    let config = Config::new();

    println!("Generating a random VarInt with {} elements of width {}", config.len, config.width);
    let (mut v, _) = packed_varint::internal::random_var_int(config.width, config.len);
    println!("Size:     {}", utils::var_int_size(&v));
    println!("");

    println!("Generating {} random operations", config.ops);
    let queries = utils::generate_queries(config.ops, config.len);
    let operands = utils::generate_operands(config.ops, config.width);
    let divisors = utils::generate_divisors(config.ops, config.width);
    let shifts = utils::generate_shifts(config.ops, config.width);
    println!("");

    get(&v, &queries);
    set(&mut v, &queries, &operands);
    element_op(&mut v, &queries, &operands, "add", VarInt::add);
    element_op(&mut v, &queries, &operands, "sub", VarInt::sub);
    element_op(&mut v, &queries, &operands, "mul", VarInt::mul);
    element_op(&mut v, &queries, &divisors, "div", VarInt::div);
    element_op(&mut v, &queries, &divisors, "rem", VarInt::rem);
    element_op(&mut v, &queries, &operands, "xor", VarInt::xor);
    shift(&mut v, &queries, &shifts);
    compare(&mut v, &queries, &operands);

    sort(&mut v);
    encode_decode(&v);

    utils::report_memory_usage();
}

//-----------------------------------------------------------------------------

pub struct Config {
    pub width: usize,
    pub len: usize,
    pub ops: usize,
}

impl Config {
    const WIDTH: usize = 100;
    const LEN: usize = 1_000_000;
    const OPS: usize = 1_000_000;

    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optopt("w", "width", "use elements of INT bits (default 100)", "INT");
        opts.optopt("l", "len", "number of elements (default 1000000)", "INT");
        opts.optopt("n", "ops", "number of operations per test (default 1000000)", "INT");
        opts.optflag("h", "help", "print this help");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f.to_string());
                process::exit(1);
            }
        };

        let mut config = Config {
            width: Self::WIDTH,
            len: Self::LEN,
            ops: Self::OPS,
        };
        if matches.opt_present("h") {
            let header = format!("Usage: {} [options]", program);
            print!("{}", opts.usage(&header));
            process::exit(0);
        }
        if let Some(s) = matches.opt_str("w") {
            config.width = Self::parse_positive(&s, "--width");
        }
        if let Some(s) = matches.opt_str("l") {
            config.len = Self::parse_positive(&s, "--len");
        }
        if let Some(s) = matches.opt_str("n") {
            config.ops = Self::parse_positive(&s, "--ops");
        }

        config
    }

    fn parse_positive(s: &str, option: &str) -> usize {
        match s.parse::<usize>() {
            Ok(n) => {
                if n == 0 {
                    eprintln!("{}: value must be positive", option);
                    process::exit(1);
                }
                n
            },
            Err(f) => {
                eprintln!("{}: {}", option, f.to_string());
                process::exit(1);
            },
        }
    }
}

//-----------------------------------------------------------------------------

fn get(v: &VarInt, queries: &[usize]) {
    println!("Running {} get queries", queries.len());
    let now = Instant::now();
    let mut value = Bits::zero(v.width());
    let mut total = 0;
    for &index in queries.iter() {
        if v.get_into(index, &mut value).is_ok() && !value.is_empty() {
            total += 1;
        }
    }
    utils::report_results(queries.len(), total, "nonzero", now.elapsed());
}

fn set(v: &mut VarInt, queries: &[usize], operands: &[Bits]) {
    println!("Running {} set operations", queries.len());
    let now = Instant::now();
    let mut total = 0;
    for (&index, value) in queries.iter().zip(operands.iter()) {
        if v.set(index, value).is_err() {
            total += 1;
        }
    }
    utils::report_results(queries.len(), total, "errors", now.elapsed());
}

fn element_op<F>(v: &mut VarInt, queries: &[usize], operands: &[Bits], name: &str, op: F)
where
    F: Fn(&mut VarInt, usize, &Bits) -> Result<()>,
{
    println!("Running {} {} operations", queries.len(), name);
    let now = Instant::now();
    let mut total = 0;
    for (&index, value) in queries.iter().zip(operands.iter()) {
        if op(v, index, value).is_err() {
            total += 1;
        }
    }
    utils::report_results(queries.len(), total, "errors", now.elapsed());
}

fn shift(v: &mut VarInt, queries: &[usize], shifts: &[usize]) {
    println!("Running {} lsh and rsh operations", queries.len());
    let now = Instant::now();
    let mut total = 0;
    for (&index, &amount) in queries.iter().zip(shifts.iter()) {
        if v.lsh(index, amount).is_err() || v.rsh(index, amount).is_err() {
            total += 1;
        }
    }
    utils::report_results(2 * queries.len(), total, "errors", now.elapsed());
}

fn compare(v: &mut VarInt, queries: &[usize], operands: &[Bits]) {
    println!("Running {} comparisons", queries.len());
    let now = Instant::now();
    let mut total = 0;
    for (&index, value) in queries.iter().zip(operands.iter()) {
        if let Ok(std::cmp::Ordering::Less) = v.cmp_at(index, value) {
            total += 1;
        }
    }
    utils::report_results(queries.len(), total, "smaller", now.elapsed());
}

fn sort(v: &mut VarInt) {
    println!("Sorting {} elements", v.len());
    let now = Instant::now();
    v.sort();
    let duration = now.elapsed();
    println!("Time:     {:.3} seconds", duration.as_secs_f64());
    println!("Sorted:   {}", v.is_sorted());
    println!("");
}

fn encode_decode(v: &VarInt) {
    println!("Encoding and decoding {}", utils::var_int_size(v));
    let now = Instant::now();
    let mut bytes: Vec<u8> = Vec::new();
    if let Err(f) = v.encode().read_to_end(&mut bytes) {
        eprintln!("Encoding failed: {}", f);
        process::exit(1);
    }
    let copy = match VarInt::decode(&mut bytes.as_slice()) {
        Ok(copy) => copy,
        Err(f) => {
            eprintln!("Decoding failed: {}", f);
            process::exit(1);
        },
    };
    let duration = now.elapsed();
    println!("Time:     {:.3} seconds", duration.as_secs_f64());
    println!("Equal:    {}", copy == *v);
    println!("");
}

//-----------------------------------------------------------------------------
