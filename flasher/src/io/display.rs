/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Character LCD simulation and a lockable display handle.

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use super::DisplaySink;

// ── TextLcd ───────────────────────────────────────────────────────────────────

/// In-memory `cols × rows` character LCD.
///
/// Text is written at the cursor and clipped at the right edge.  Writes to a
/// row past the bottom are dropped.  Every row whose content changes is
/// logged at `info`.
#[derive(Debug, Clone)]
pub struct TextLcd {
    cols: usize,
    grid: Vec<Vec<char>>,
    cursor: (usize, usize),
}

impl TextLcd {
    pub fn new(cols: u8, rows: u8) -> Self {
        let cols = usize::from(cols);
        Self {
            cols,
            grid: vec![vec![' '; cols]; usize::from(rows)],
            cursor: (0, 0),
        }
    }

    /// Content of `row` with trailing blanks removed, or `None` if the row
    /// does not exist.
    pub fn row_text(&self, row: u8) -> Option<String> {
        self.grid
            .get(usize::from(row))
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
    }

    #[cfg(test)]
    fn rows(&self) -> usize {
        self.grid.len()
    }
}

impl DisplaySink for TextLcd {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor = (usize::from(col), usize::from(row));
    }

    fn write_text(&mut self, args: fmt::Arguments<'_>) {
        let mut text = String::new();
        // Writing into a String can't fail.
        let _ = text.write_fmt(args);

        let (col, row) = self.cursor;
        let Some(line) = self.grid.get_mut(row) else {
            debug!(row, text = %text, "write below last LCD row dropped");
            return;
        };

        let mut changed = false;
        let mut written = 0;
        for (cell, ch) in line.iter_mut().skip(col).zip(text.chars()) {
            changed |= *cell != ch;
            *cell = ch;
            written += 1;
        }
        self.cursor.0 = col + written;

        if changed {
            let shown: String = line.iter().collect();
            info!(row, "lcd |{}|", shown);
        }
    }
}

// ── SharedDisplay ─────────────────────────────────────────────────────────────

/// Cloneable, mutex-guarded handle to a display.
///
/// Needed whenever more than one task writes to the same display: each
/// positioned write holds the lock across the cursor move and the text, so
/// two writers can't interleave their output.  Also lets a test keep a handle
/// to the display a renderer task owns.
#[derive(Debug)]
pub struct SharedDisplay<D> {
    inner: Arc<Mutex<D>>,
}

impl<D> Clone for SharedDisplay<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: DisplaySink> SharedDisplay<D> {
    pub fn new(display: D) -> Self {
        Self {
            inner: Arc::new(Mutex::new(display)),
        }
    }

    /// Run `f` with exclusive access to the display.
    pub fn with<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<D: DisplaySink> DisplaySink for SharedDisplay<D> {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.with(|d| d.set_cursor(col, row));
    }

    fn write_text(&mut self, args: fmt::Arguments<'_>) {
        self.with(|d| d.write_text(args));
    }

    fn write_at(&mut self, col: u8, row: u8, args: fmt::Arguments<'_>) {
        self.with(|d| {
            d.set_cursor(col, row);
            d.write_text(args);
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn text_lands_at_cursor() {
        let mut lcd = TextLcd::new(16, 4);
        lcd.write_at(2, 1, format_args!("(LINK) F:{}", "ON "));
        assert_eq!(lcd.row_text(1).unwrap(), "  (LINK) F:ON");
        assert_eq!(lcd.row_text(0).unwrap(), "");
    }

    #[test]
    fn consecutive_writes_continue_from_cursor() {
        let mut lcd = TextLcd::new(16, 2);
        lcd.set_cursor(0, 0);
        lcd.write_text(format_args!("ab"));
        lcd.write_text(format_args!("cd"));
        assert_eq!(lcd.row_text(0).unwrap(), "abcd");
    }

    #[test]
    fn long_text_is_clipped_at_right_edge() {
        let mut lcd = TextLcd::new(5, 1);
        lcd.write_at(2, 0, format_args!("abcdef"));
        assert_eq!(lcd.row_text(0).unwrap(), "  abc");
    }

    #[test]
    fn write_below_last_row_is_ignored() {
        let mut lcd = TextLcd::new(5, 1);
        lcd.write_at(0, 3, format_args!("x"));
        assert_eq!(lcd.rows(), 1);
        assert_eq!(lcd.row_text(0).unwrap(), "");
        assert_eq!(lcd.row_text(3), None);
    }

    #[test]
    fn shared_display_serialises_two_writers() {
        let display = SharedDisplay::new(TextLcd::new(20, 6));

        let writers: Vec<_> = [(1u8, "LINK"), (4u8, "CNCT")]
            .into_iter()
            .map(|(row, label)| {
                let mut d = display.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        d.write_at(2, row, format_args!("({label}) {i:>4}"));
                    }
                })
            })
            .collect();
        for w in writers {
            w.join().unwrap();
        }

        display.with(|lcd| {
            assert_eq!(lcd.row_text(1).unwrap(), "  (LINK)  199");
            assert_eq!(lcd.row_text(4).unwrap(), "  (CNCT)  199");
        });
    }
}
