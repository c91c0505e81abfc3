use packed_varint::ops::Element;
use packed_varint::serialize::Serialize;
use packed_varint::{internal, Bits, VarInt};

use std::time::Duration;

use rand::Rng;

//-----------------------------------------------------------------------------

pub fn generate_queries(n: usize, len: usize) -> Vec<usize> {
    let mut result: Vec<usize> = Vec::with_capacity(n);

    let mut rng = rand::thread_rng();
    for _ in 0..n {
        let value = rng.gen::<usize>() % len;
        result.push(value);
    }

    result
}

// Operands of about half the width, so that products usually fit.
pub fn generate_operands(n: usize, width: usize) -> Vec<Bits> {
    (0..n).map(|_| internal::random_short(width, (width + 1) / 2)).collect()
}

pub fn generate_divisors(n: usize, width: usize) -> Vec<Bits> {
    (0..n).map(|_| internal::random_nonzero(width)).collect()
}

pub fn generate_shifts(n: usize, width: usize) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(0, width + 1)).collect()
}

//-----------------------------------------------------------------------------

pub fn readable_size(bytes: usize) -> (f64, &'static str) {
    let units: Vec<(f64, &'static str)> = vec![
        (1.0, "B"),
        (1024.0, "KiB"),
        (1024.0 * 1024.0, "MiB"),
        (1024.0 * 1024.0 * 1024.0, "GiB"),
        (1024.0 * 1024.0 * 1024.0 * 1024.0, "TiB"),
    ];

    let value = bytes as f64;
    let mut unit = 0;
    for i in 1..units.len() {
        if value >= units[i].0 {
            unit = i;
        } else {
            break;
        }
    }

    (value / units[unit].0, units[unit].1)
}

#[cfg(target_os = "linux")]
pub fn peak_memory_usage() -> Result<usize, &'static str> {
    unsafe {
        let mut rusage: libc::rusage = std::mem::zeroed();
        let retval = libc::getrusage(libc::RUSAGE_SELF, &mut rusage as *mut _);
        match retval {
            0 => Ok(rusage.ru_maxrss as usize * 1024),
            _ => Err("libc::getrusage call failed"),
        }
    }
}

#[cfg(target_os = "macos")]
pub fn peak_memory_usage() -> Result<usize, &'static str> {
    unsafe {
        let mut rusage: libc::rusage = std::mem::zeroed();
        let retval = libc::getrusage(libc::RUSAGE_SELF, &mut rusage as *mut _);
        match retval {
            0 => Ok(rusage.ru_maxrss as usize),
            _ => Err("libc::getrusage call failed"),
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn peak_memory_usage() -> Result<usize, &'static str> {
    Err("No peak_memory_usage implementation for this OS")
}

//-----------------------------------------------------------------------------

pub fn var_int_size(v: &VarInt) -> String {
    let bytes = v.size_in_bytes();
    let (size, unit) = readable_size(bytes);
    let bpe = (bytes as f64 * 8.0) / (v.len() as f64);

    format!("{:.3} {} ({:.3} bits/element)", size, unit, bpe)
}

pub fn report_results(ops: usize, total: usize, label: &str, duration: Duration) {
    let ns = (duration.as_nanos() as f64) / (ops as f64);
    println!("Time:     {:.3} seconds ({:.1} ns/op)", duration.as_secs_f64(), ns);
    println!("Count:    {} {}", total, label);
    println!("");
}

pub fn report_memory_usage() {
    match peak_memory_usage() {
        Ok(bytes) => {
            let (size, unit) = readable_size(bytes);
            println!("Peak memory usage: {:.3} {}", size, unit);
        },
        Err(f) => {
            println!("{}", f);
        },
    }
    println!("");
}

//-----------------------------------------------------------------------------
