use crate::sensors::Sensor;
use crate::Command;

/// A human interface device exposing indexed analog axes and digital
/// buttons. Handles are cheap to copy and read fresh device state on every
/// call; an out-of-range index reads as the resting value rather than
/// failing, since the device may change under us between cycles.
pub trait HidDevice {
  type Button: Sensor<bool>;
  type Axis: Sensor<Command>;

  fn button(&self, index: usize) -> Self::Button;
  fn axis(&self, index: usize) -> Self::Axis;

  fn n_buttons(&self) -> usize;
  fn n_axes(&self) -> usize;

  fn name(&self) -> Option<String>;
}

#[cfg(feature = "simulation")]
pub mod sim {
  use std::sync::{Arc, RwLock};

  use crate::sensors::Sensor;
  use crate::Command;

  use super::HidDevice;

  /// An in-memory gamepad with settable axis and button state. Clones share
  /// state, so tests keep one handle to steer and give the other to the
  /// program.
  #[derive(Debug, Clone)]
  pub struct SimulatedHid {
    axes: Arc<RwLock<Vec<Command>>>,
    buttons: Arc<RwLock<Vec<bool>>>,
  }

  impl SimulatedHid {
    pub fn new(n_axes: usize, n_buttons: usize) -> Self {
      Self {
        axes: Arc::new(RwLock::new(vec![0; n_axes])),
        buttons: Arc::new(RwLock::new(vec![false; n_buttons])),
      }
    }

    pub fn set_axis(&self, index: usize, value: Command) {
      if let Some(slot) = self.axes.write().unwrap().get_mut(index) {
        *slot = value;
      }
    }

    pub fn set_button(&self, index: usize, held: bool) {
      if let Some(slot) = self.buttons.write().unwrap().get_mut(index) {
        *slot = held;
      }
    }
  }

  #[derive(Debug, Clone)]
  pub struct SimulatedAxis {
    axes: Arc<RwLock<Vec<Command>>>,
    index: usize,
  }

  impl Sensor<Command> for SimulatedAxis {
    fn get_sensor_value(&self) -> Command {
      self.axes.read().unwrap().get(self.index).copied().unwrap_or(0)
    }
  }

  #[derive(Debug, Clone)]
  pub struct SimulatedButton {
    buttons: Arc<RwLock<Vec<bool>>>,
    index: usize,
  }

  impl Sensor<bool> for SimulatedButton {
    fn get_sensor_value(&self) -> bool {
      self.buttons.read().unwrap().get(self.index).copied().unwrap_or(false)
    }
  }

  impl HidDevice for SimulatedHid {
    type Button = SimulatedButton;
    type Axis = SimulatedAxis;

    fn button(&self, index: usize) -> SimulatedButton {
      SimulatedButton { buttons: self.buttons.clone(), index }
    }

    fn axis(&self, index: usize) -> SimulatedAxis {
      SimulatedAxis { axes: self.axes.clone(), index }
    }

    fn n_buttons(&self) -> usize {
      self.buttons.read().unwrap().len()
    }

    fn n_axes(&self) -> usize {
      self.axes.read().unwrap().len()
    }

    fn name(&self) -> Option<String> {
      Some("simulated gamepad".to_string())
    }
  }
}
