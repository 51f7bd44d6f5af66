//! Rest-complete alerts
//!
//! Sound, vibration and a short toast when the countdown ends. Each channel
//! is best effort: a failing sink is logged and the others still fire. A
//! channel the sink does not have is only logged at debug level.

use std::io::Write;

use crate::config::TimerSettings;
use crate::error::{AlertError, LiftRsError};
use crate::timer::{TimerListener, TimerState};

/// Vibration pattern in milliseconds: buzz, pause, buzz
pub const VIBRATION_PATTERN: [u32; 3] = [200, 100, 200];

pub const TOAST_MESSAGE: &str = "Rest complete!";

/// How long the toast stays on screen
pub const TOAST_SECONDS: u32 = 3;

/// Device-side output for alerts
pub trait AlertSink {
    fn play_sound(&mut self) -> Result<(), AlertError>;
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), AlertError>;
    fn show_toast(&mut self, message: &str, seconds: u32) -> Result<(), AlertError>;
}

/// Terminal sink: bell for sound, text for the toast, no vibration motor
#[derive(Debug, Default)]
pub struct TerminalSink;

impl AlertSink for TerminalSink {
    fn play_sound(&mut self) -> Result<(), AlertError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(|e| AlertError::DeliveryFailed {
                channel: "sound".to_string(),
                reason: e.to_string(),
            })
    }

    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), AlertError> {
        Err(AlertError::Unsupported {
            channel: "vibration".to_string(),
        })
    }

    fn show_toast(&mut self, message: &str, _seconds: u32) -> Result<(), AlertError> {
        println!("{}", message);
        Ok(())
    }
}

/// Timer listener firing alerts through a sink on completion
#[derive(Debug)]
pub struct CompletionAlerts<S: AlertSink> {
    sink: S,
    sound_enabled: bool,
    vibration_enabled: bool,
}

impl<S: AlertSink> CompletionAlerts<S> {
    pub fn new(sink: S, settings: &TimerSettings) -> Self {
        Self {
            sink,
            sound_enabled: settings.sound_enabled,
            vibration_enabled: settings.vibration_enabled,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run every enabled channel; failures are logged and dropped
    pub fn alert(&mut self) {
        if self.sound_enabled {
            report(self.sink.play_sound(), "Rest alert sound not played");
        }

        if self.vibration_enabled {
            report(self.sink.vibrate(&VIBRATION_PATTERN), "Rest alert vibration not delivered");
        }

        report(
            self.sink.show_toast(TOAST_MESSAGE, TOAST_SECONDS),
            "Rest alert toast not shown",
        );
    }
}

fn report(result: Result<(), AlertError>, message: &str) {
    if let Err(e) = result {
        LiftRsError::from(e).log(message);
    }
}

impl<S: AlertSink> TimerListener for CompletionAlerts<S> {
    fn on_complete(&mut self, _state: &TimerState) {
        self.alert();
    }
}
