use std::marker::PhantomData;
use std::time::Duration;

use crate::filters::{ClampingFilter, Filter, InvertingFilter};
use crate::Command;

/// Something that accepts a demand value. The hardware layer owns the
/// actuator's state; the core only ever writes.
pub trait Actuator<U, Time = Duration> {
  fn set_actuator_value(&mut self, value: U, now: Time);
}

impl<'a, T: Actuator<U, Time>, U, Time> Actuator<U, Time> for &'a mut T {
  fn set_actuator_value(&mut self, value: U, now: Time) {
    (**self).set_actuator_value(value, now)
  }
}

macro_rules! actuator_alias {
  ($ident:ident, $unit:ty, $setter_name:ident) => {
    pub trait $ident<Time = Duration>: Actuator<$unit, Time> {
      fn $setter_name(&mut self, value: $unit, time: Time) {
        self.set_actuator_value(value, time)
      }
    }
    impl<T: Actuator<$unit, Time>, Time> $ident<Time> for T {}
  };
}

actuator_alias!(CommandActuator, Command, set_command);

/// Applies a filter to every demand before it reaches the wrapped actuator.
#[derive(Debug, Clone)]
pub struct FilteredActuator<T, F, I, U, Time> {
  pub actuator: T,
  pub filter: F,
  phantom: PhantomData<(I, U, Time)>,
}

impl<T, F, I, U, Time> FilteredActuator<T, F, I, U, Time> {
  pub fn new(actuator: T, filter: F) -> Self {
    Self { actuator, filter, phantom: PhantomData }
  }
}

impl<T, F, I, U, Time> Actuator<I, Time> for FilteredActuator<T, F, I, U, Time>
where
  T: Actuator<U, Time>,
  F: Filter<I, Output = U>,
  Time: Copy,
{
  fn set_actuator_value(&mut self, value: I, now: Time) {
    self.actuator.set_actuator_value(self.filter.calculate(value), now)
  }
}

pub type InvertedActuator<T, U, Time> = FilteredActuator<T, InvertingFilter<U>, U, U, Time>;
pub type ClampedActuator<T, U, Time> = FilteredActuator<T, ClampingFilter<U>, U, U, Time>;

pub trait ActuatorExt<U, Time>: Sized + Actuator<U, Time> {
  fn invert(self) -> InvertedActuator<Self, U, Time>;
  fn clamp(self, min: U, max: U) -> ClampedActuator<Self, U, Time>;
  fn filter<I, F>(self, filter: F) -> FilteredActuator<Self, F, I, U, Time>;
}

impl<T: Actuator<U, Time>, U, Time> ActuatorExt<U, Time> for T {
  fn invert(self) -> InvertedActuator<Self, U, Time> {
    FilteredActuator::new(self, InvertingFilter::new())
  }

  fn clamp(self, min: U, max: U) -> ClampedActuator<Self, U, Time> {
    FilteredActuator::new(self, ClampingFilter::new(min, max))
  }

  fn filter<I, F>(self, filter: F) -> FilteredActuator<Self, F, I, U, Time> {
    FilteredActuator::new(self, filter)
  }
}

#[cfg(feature = "simulation")]
pub mod sim {
  use std::sync::{Arc, RwLock};

  use super::Actuator;

  /// Read-back for simulated actuators: the last demand and when it was
  /// written.
  pub trait ReadableActuator<U, Time>: Actuator<U, Time> {
    fn get_actuator_value(&self) -> (U, Time);
  }

  /// A motor group stand-in. Clones share the same demand cell, so a test
  /// can keep a handle and observe what the program wrote.
  #[derive(Debug, Clone)]
  pub struct SimulatedActuator<U, Time> {
    demand: Arc<RwLock<(U, Time)>>,
  }

  impl<U, Time> SimulatedActuator<U, Time> {
    pub fn new(initial: U, now: Time) -> Self {
      Self { demand: Arc::new(RwLock::new((initial, now))) }
    }
  }

  impl<U: Clone, Time: Clone> SimulatedActuator<U, Time> {
    /// The last demand, without the timestamp.
    pub fn value(&self) -> U {
      self.demand.read().unwrap().0.clone()
    }
  }

  impl<U: Clone, Time> Actuator<U, Time> for SimulatedActuator<U, Time> {
    fn set_actuator_value(&mut self, value: U, now: Time) {
      *self.demand.write().unwrap() = (value, now);
    }
  }

  impl<U: Clone, Time: Clone> ReadableActuator<U, Time> for SimulatedActuator<U, Time> {
    fn get_actuator_value(&self) -> (U, Time) {
      self.demand.read().unwrap().clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::sim::SimulatedActuator;
  use super::{ActuatorExt, CommandActuator};

  #[test]
  fn inverted_actuator_flips_sign() {
    let motor = SimulatedActuator::new(0, Duration::ZERO);
    let mut inverted = motor.clone().invert();

    inverted.set_command(80, Duration::from_millis(20));
    assert_eq!(-80, motor.value());
  }

  #[test]
  fn clamped_actuator_saturates_at_the_hardware_boundary() {
    let motor = SimulatedActuator::new(0, Duration::ZERO);
    let mut clamped = motor.clone().clamp(-127, 127);

    clamped.set_command(254, Duration::from_millis(20));
    assert_eq!(127, motor.value());

    clamped.set_command(-254, Duration::from_millis(40));
    assert_eq!(-127, motor.value());

    clamped.set_command(50, Duration::from_millis(60));
    assert_eq!(50, motor.value());
  }

  #[test]
  fn reversed_then_clamped_group() {
    let motor = SimulatedActuator::new(0, Duration::ZERO);
    let mut group = motor.clone().clamp(-127, 127).invert();

    group.set_command(-200, Duration::from_millis(20));
    assert_eq!(127, motor.value());
  }
}
