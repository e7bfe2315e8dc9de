/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Renderer task: the lowest-priority consumer.
//!
//! Drains the buffer and draws each message on the display.  Everything it
//! shows comes from message contents, so it never reads actuator state and
//! needs no lock of its own as long as it is the display's only writer.
//!
//! Screen layout (column 2):
//!
//! ```text
//! row 1   (LINK) F:ON
//! row 2          D:  500
//! row 4   (CNCT) F:OFF
//! row 5          D:  500
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use super::StopToken;
use crate::buffer::SafeBuffer;
use crate::io::DisplaySink;
use crate::message::{Message, SourceId};

const TEXT_COL: u8 = 2;

/// Smallest display the layout fits on.
pub const MIN_DISPLAY_COLS: u8 = 16;
pub const MIN_DISPLAY_ROWS: u8 = 6;

fn first_row(source: SourceId) -> u8 {
    match source {
        SourceId::Link => 1,
        SourceId::Connect => 4,
    }
}

pub struct Renderer<D> {
    buffer: Arc<SafeBuffer<Message>>,
    display: D,
}

impl<D: DisplaySink> Renderer<D> {
    pub fn new(buffer: Arc<SafeBuffer<Message>>, display: D) -> Self {
        Self { buffer, display }
    }

    /// Task body.
    ///
    /// Draws `initial` first so the screen isn't blank before the first
    /// event, then blocks on [`SafeBuffer::get`] and renders every message.
    /// Returns once a stop has been requested and the buffer is empty.
    ///
    /// A stop request alone does not wake a blocked `get`: whoever stops the
    /// renderer must put one more message after the request.
    pub fn run(mut self, initial: &[Message], stop: StopToken) {
        info!("renderer started");
        for msg in initial {
            self.render(msg);
        }

        let mut rendered = 0u64;
        loop {
            let msg = self.buffer.get();
            debug!(%msg, "get");
            self.render(&msg);
            rendered += 1;

            if stop.is_stopped() && self.buffer.is_empty() {
                break;
            }
        }
        info!(rendered, "renderer stopped");
    }

    /// Draw one message's two rows.
    pub fn render(&mut self, msg: &Message) {
        let row = first_row(msg.source);
        let flag = if msg.active { "ON " } else { "OFF" };
        self.display.write_at(
            TEXT_COL,
            row,
            format_args!("({}) F:{}", msg.source.label(), flag),
        );
        self.display.write_at(
            TEXT_COL,
            row + 1,
            format_args!("       D:{:>5}", msg.interval_ms),
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{SharedDisplay, TextLcd};
    use std::thread;
    use std::time::Duration;

    fn lcd() -> SharedDisplay<TextLcd> {
        SharedDisplay::new(TextLcd::new(20, 8))
    }

    fn row(display: &SharedDisplay<TextLcd>, row: u8) -> String {
        display.with(|lcd| lcd.row_text(row).unwrap_or_default())
    }

    #[test]
    fn render_matches_board_layout() {
        let display = lcd();
        let buffer = Arc::new(SafeBuffer::new(6).unwrap());
        let mut renderer = Renderer::new(buffer, display.clone());

        renderer.render(&Message::new(SourceId::Link, true, 500));
        renderer.render(&Message::new(SourceId::Connect, false, 5000));

        assert_eq!(row(&display, 1), "  (LINK) F:ON");
        assert_eq!(row(&display, 2), "         D:  500");
        assert_eq!(row(&display, 4), "  (CNCT) F:OFF");
        assert_eq!(row(&display, 5), "         D: 5000");
    }

    #[test]
    fn later_message_overwrites_earlier_one() {
        let display = lcd();
        let buffer = Arc::new(SafeBuffer::new(6).unwrap());
        let mut renderer = Renderer::new(buffer, display.clone());

        renderer.render(&Message::new(SourceId::Link, true, 5000));
        renderer.render(&Message::new(SourceId::Link, false, 10));

        assert_eq!(row(&display, 1), "  (LINK) F:OFF");
        assert_eq!(row(&display, 2), "         D:   10");
    }

    #[test]
    fn run_draws_initial_state_then_drains_buffer_before_exiting() {
        let display = lcd();
        let buffer = Arc::new(SafeBuffer::new(6).unwrap());
        let stop = StopToken::new();

        buffer.put(Message::new(SourceId::Link, true, 500));
        buffer.put(Message::new(SourceId::Connect, true, 300));
        stop.stop();

        let renderer = Renderer::new(Arc::clone(&buffer), display.clone());
        let initial = [
            Message::new(SourceId::Link, false, 500),
            Message::new(SourceId::Connect, false, 500),
        ];
        renderer.run(&initial, stop);

        assert!(buffer.is_empty());
        assert_eq!(row(&display, 1), "  (LINK) F:ON");
        assert_eq!(row(&display, 4), "  (CNCT) F:ON");
        assert_eq!(row(&display, 5), "         D:  300");
    }

    #[test]
    fn idle_renderer_blocks_until_a_message_arrives() {
        let display = lcd();
        let buffer = Arc::new(SafeBuffer::new(6).unwrap());
        let stop = StopToken::new();

        let handle = {
            let renderer = Renderer::new(Arc::clone(&buffer), display.clone());
            let stop = stop.clone();
            thread::spawn(move || renderer.run(&[], stop))
        };

        thread::sleep(Duration::from_millis(50));
        stop.stop();
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished(), "stop alone must not end a blocked get");

        buffer.put(Message::new(SourceId::Connect, false, 70));
        handle.join().unwrap();

        assert!(buffer.is_empty());
        assert_eq!(row(&display, 5), "         D:   70");
    }
}
