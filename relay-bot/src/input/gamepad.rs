use super::hid::HidDevice;

/// Named view over a standard competition gamepad: two sticks and twelve
/// digital buttons.
pub trait Gamepad {
  type Hid: HidDevice;

  fn inner(&self) -> &Self::Hid;

  fn left_x(&self) -> <Self::Hid as HidDevice>::Axis;
  fn left_y(&self) -> <Self::Hid as HidDevice>::Axis;
  fn right_x(&self) -> <Self::Hid as HidDevice>::Axis;
  fn right_y(&self) -> <Self::Hid as HidDevice>::Axis;

  fn up(&self) -> <Self::Hid as HidDevice>::Button;
  fn down(&self) -> <Self::Hid as HidDevice>::Button;
  fn left(&self) -> <Self::Hid as HidDevice>::Button;
  fn right(&self) -> <Self::Hid as HidDevice>::Button;
  fn a(&self) -> <Self::Hid as HidDevice>::Button;
  fn b(&self) -> <Self::Hid as HidDevice>::Button;
  fn x(&self) -> <Self::Hid as HidDevice>::Button;
  fn y(&self) -> <Self::Hid as HidDevice>::Button;
  fn l1(&self) -> <Self::Hid as HidDevice>::Button;
  fn l2(&self) -> <Self::Hid as HidDevice>::Button;
  fn r1(&self) -> <Self::Hid as HidDevice>::Button;
  fn r2(&self) -> <Self::Hid as HidDevice>::Button;
}

#[derive(Debug, Clone)]
pub struct StandardGamepad<Hid: HidDevice>(Hid);

impl<Hid: HidDevice> StandardGamepad<Hid> {
  pub fn new(hid: Hid) -> Self {
    StandardGamepad(hid)
  }
}

impl<Hid: HidDevice> From<Hid> for StandardGamepad<Hid> {
  fn from(value: Hid) -> Self {
    StandardGamepad(value)
  }
}

impl<Hid: HidDevice> Gamepad for StandardGamepad<Hid> {
  type Hid = Hid;

  fn inner(&self) -> &Hid {
    &self.0
  }

  fn left_x(&self) -> Hid::Axis { self.0.axis(0) }
  fn left_y(&self) -> Hid::Axis { self.0.axis(1) }
  fn right_x(&self) -> Hid::Axis { self.0.axis(2) }
  fn right_y(&self) -> Hid::Axis { self.0.axis(3) }

  fn up(&self) -> Hid::Button { self.0.button(0) }
  fn down(&self) -> Hid::Button { self.0.button(1) }
  fn left(&self) -> Hid::Button { self.0.button(2) }
  fn right(&self) -> Hid::Button { self.0.button(3) }
  fn a(&self) -> Hid::Button { self.0.button(4) }
  fn b(&self) -> Hid::Button { self.0.button(5) }
  fn x(&self) -> Hid::Button { self.0.button(6) }
  fn y(&self) -> Hid::Button { self.0.button(7) }
  fn l1(&self) -> Hid::Button { self.0.button(8) }
  fn l2(&self) -> Hid::Button { self.0.button(9) }
  fn r1(&self) -> Hid::Button { self.0.button(10) }
  fn r2(&self) -> Hid::Button { self.0.button(11) }
}

#[cfg(test)]
mod tests {
  use crate::input::hid::sim::SimulatedHid;
  use crate::sensors::{AxisSensor, BinarySensor};

  use super::{Gamepad, StandardGamepad};

  #[test]
  fn named_accessors_follow_device_state() {
    let hid = SimulatedHid::new(4, 12);
    let pad = StandardGamepad::new(hid.clone());

    hid.set_axis(0, -30);
    hid.set_axis(3, 50);
    hid.set_button(2, true);

    assert_eq!(-30, pad.left_x().get_position());
    assert_eq!(50, pad.right_y().get_position());
    assert_eq!(0, pad.left_y().get_position());
    assert!(pad.left().get_state());
    assert!(!pad.right().get_state());
  }

  #[test]
  fn missing_indices_read_as_resting() {
    let hid = SimulatedHid::new(2, 2);
    let pad = StandardGamepad::new(hid);

    assert_eq!(0, pad.right_y().get_position());
    assert!(!pad.a().get_state());
  }
}
