use bitflags::bitflags;

bitflags! {
  /// The three touch buttons under the text panel, packed the way the panel
  /// firmware reports them.
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub struct DisplayButtons: u8 {
    const LEFT = 1 << 2;
    const CENTER = 1 << 1;
    const RIGHT = 1 << 0;
  }
}

/// An eight-line text panel with three touch buttons. Writes are
/// fire-and-forget; the panel owns its own refresh and holds the last text
/// written to each line.
pub trait Display {
  fn set_text(&self, line: u8, text: &str);
  fn clear_line(&self, line: u8);
  fn buttons(&self) -> DisplayButtons;
}

impl<'a, T: Display> Display for &'a T {
  fn set_text(&self, line: u8, text: &str) {
    (**self).set_text(line, text)
  }

  fn clear_line(&self, line: u8) {
    (**self).clear_line(line)
  }

  fn buttons(&self) -> DisplayButtons {
    (**self).buttons()
  }
}

/// Edge-detecting handler for the center panel button: each press
/// alternately writes a message to its line or clears it. The toggle state
/// lives here, not in a process-wide global.
#[derive(Debug)]
pub struct PressToggle {
  line: u8,
  pressed: bool,
  was_held: bool,
}

impl PressToggle {
  pub fn new(line: u8) -> Self {
    Self { line, pressed: false, was_held: false }
  }

  pub fn pressed(&self) -> bool {
    self.pressed
  }

  /// Runs once per control cycle. Toggles on the press edge only; holding
  /// the button does not retoggle.
  pub fn poll<D: Display>(&mut self, display: &D) {
    let held = display.buttons().contains(DisplayButtons::CENTER);
    if held && !self.was_held {
      self.pressed = !self.pressed;
      if self.pressed {
        display.set_text(self.line, "center button pressed");
      } else {
        display.clear_line(self.line);
      }
    }
    self.was_held = held;
  }
}

#[cfg(feature = "simulation")]
pub mod sim {
  use std::sync::{Arc, RwLock};

  use super::{Display, DisplayButtons};

  pub const PANEL_LINES: usize = 8;

  /// In-memory panel with line read-back and settable button state. Clones
  /// share the same panel.
  #[derive(Debug, Clone)]
  pub struct BufferedDisplay {
    lines: Arc<RwLock<[String; PANEL_LINES]>>,
    buttons: Arc<RwLock<DisplayButtons>>,
  }

  impl BufferedDisplay {
    pub fn new() -> Self {
      Self {
        lines: Arc::new(RwLock::new(Default::default())),
        buttons: Arc::new(RwLock::new(DisplayButtons::empty())),
      }
    }

    /// The text currently on a line; empty for cleared or out-of-range
    /// lines.
    pub fn line(&self, line: u8) -> String {
      self.lines.read().unwrap().get(line as usize).cloned().unwrap_or_default()
    }

    pub fn set_buttons(&self, buttons: DisplayButtons) {
      *self.buttons.write().unwrap() = buttons;
    }
  }

  impl Default for BufferedDisplay {
    fn default() -> Self {
      Self::new()
    }
  }

  impl Display for BufferedDisplay {
    fn set_text(&self, line: u8, text: &str) {
      if let Some(slot) = self.lines.write().unwrap().get_mut(line as usize) {
        *slot = text.to_string();
      }
    }

    fn clear_line(&self, line: u8) {
      if let Some(slot) = self.lines.write().unwrap().get_mut(line as usize) {
        slot.clear();
      }
    }

    fn buttons(&self) -> DisplayButtons {
      *self.buttons.read().unwrap()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::sim::BufferedDisplay;
  use super::{Display, DisplayButtons, PressToggle};

  #[test]
  fn toggle_fires_on_press_edges_only() {
    let panel = BufferedDisplay::new();
    let mut toggle = PressToggle::new(2);

    toggle.poll(&panel);
    assert!(!toggle.pressed());
    assert_eq!("", panel.line(2));

    panel.set_buttons(DisplayButtons::CENTER);
    toggle.poll(&panel);
    assert!(toggle.pressed());
    assert_eq!("center button pressed", panel.line(2));

    // still held: no retoggle
    toggle.poll(&panel);
    assert!(toggle.pressed());
    assert_eq!("center button pressed", panel.line(2));

    panel.set_buttons(DisplayButtons::empty());
    toggle.poll(&panel);
    panel.set_buttons(DisplayButtons::CENTER);
    toggle.poll(&panel);
    assert!(!toggle.pressed());
    assert_eq!("", panel.line(2));
  }

  #[test]
  fn other_buttons_do_not_toggle() {
    let panel = BufferedDisplay::new();
    let mut toggle = PressToggle::new(2);

    panel.set_buttons(DisplayButtons::LEFT | DisplayButtons::RIGHT);
    toggle.poll(&panel);
    assert!(!toggle.pressed());
  }

  #[test]
  fn panel_lines_write_and_clear() {
    let panel = BufferedDisplay::new();
    panel.set_text(1, "relay bot ready");
    assert_eq!("relay bot ready", panel.line(1));

    panel.clear_line(1);
    assert_eq!("", panel.line(1));

    // out of range writes are dropped
    panel.set_text(200, "nope");
    assert_eq!("", panel.line(200));
  }
}
