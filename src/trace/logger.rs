use std::{fs::OpenOptions, io::Write, sync::Mutex};

use crate::trace::trace::TraceEvent;

enum Sink {
    File(Mutex<std::fs::File>),
    Memory(Mutex<Vec<String>>),
}

/// Appends lifecycle events as JSON lines.
pub struct TraceLogger {
    sink: Option<Sink>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        match file {
            Ok(f) => Self {
                sink: Some(Sink::File(Mutex::new(f))),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self { sink: None }
            }
        }
    }

    /// Keeps lines in memory; read them back with `lines()`.
    pub fn in_memory() -> Self {
        Self {
            sink: Some(Sink::Memory(Mutex::new(Vec::new()))),
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn log(&self, event: &TraceEvent) {
        let sink = match &self.sink {
            Some(s) => s,
            None => return, // tracing disabled
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        match sink {
            Sink::File(file_mutex) => {
                let mut file = match file_mutex.lock() {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("Warning: trace logger lock poisoned: {}", e);
                        return;
                    }
                };

                if let Err(e) = writeln!(file, "{}", json) {
                    eprintln!("Warning: failed to write trace event: {}", e);
                }
            }
            Sink::Memory(lines) => match lines.lock() {
                Ok(mut lines) => lines.push(json),
                Err(e) => eprintln!("Warning: trace logger lock poisoned: {}", e),
            },
        }
    }

    /// Lines recorded by an in-memory logger; empty for other sinks.
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Some(Sink::Memory(lines)) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

impl Default for TraceLogger {
    fn default() -> Self {
        Self::disabled()
    }
}
