extern crate chrono;

use chrono::{DateTime, NaiveDateTime};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use color_eyre::eyre::{eyre, Result};

/// One line of a sensor timestamps file: microsecond epoch timestamp plus the
/// capture chunk it belongs to. Further columns are ignored.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct TimestampRecord {
    pub timestamp: u64,
    pub chunk: u32
}

impl TimestampRecord {
    pub fn datetime(&self) -> NaiveDateTime {
        let seconds = (self.timestamp / 1_000_000) as i64;
        let nanoseconds = (self.timestamp % 1_000_000) as u32 * 1_000;
        DateTime::from_timestamp(seconds, nanoseconds)
            .expect("timestamp out of calendar range")
            .naive_utc()
    }
}

pub fn load_timestamps(file_path: &Path) -> Result<Vec<TimestampRecord>> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::<TimestampRecord>::new();

    for line in reader.lines() {
        let contents = line?;
        if contents.trim().is_empty() {
            continue;
        }
        let tokens = contents.split_whitespace().collect::<Vec<&str>>();
        if tokens.len() < 2 {
            return Err(eyre!("malformed timestamps line: {}", contents));
        }
        let timestamp = tokens[0].parse::<u64>().map_err(|_| eyre!("malformed timestamp: {}", tokens[0]))?;
        let chunk = tokens[1].parse::<u32>().map_err(|_| eyre!("malformed chunk index: {}", tokens[1]))?;
        records.push(TimestampRecord { timestamp, chunk });
    }

    Ok(records)
}

/// Lidar timestamp files carry one timestamp per line as the first token.
pub fn load_lidar_timestamps(file_path: &Path) -> Result<Vec<u64>> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let mut timestamps = Vec::<u64>::new();

    for line in reader.lines() {
        let contents = line?;
        let token = match contents.split_whitespace().next() {
            Some(token) => token,
            None => continue
        };
        let timestamp = token.parse::<u64>().map_err(|_| eyre!("malformed lidar timestamp: {}", token))?;
        timestamps.push(timestamp);
    }

    Ok(timestamps)
}

/// Reports a run of missing records at most once per chunk transition. A
/// found record resynchronizes the tracker to its chunk.
#[derive(Debug,Clone)]
pub struct ChunkTracker {
    current_chunk: u32
}

impl ChunkTracker {

    pub fn new() -> ChunkTracker {
        ChunkTracker { current_chunk: 0 }
    }

    /// Returns true when this missing record opens a new gap worth reporting.
    pub fn record_missing(&mut self, chunk: u32) -> bool {
        match chunk != self.current_chunk {
            true => {
                self.current_chunk = chunk;
                true
            },
            false => false
        }
    }

    pub fn record_found(&mut self, chunk: u32) {
        self.current_chunk = chunk;
    }
}
