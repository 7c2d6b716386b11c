/// A read-only view of one hardware value. Reads are assumed to always
/// succeed; when the underlying device is absent the implementation returns
/// its resting value instead of failing.
pub trait Sensor<U> {
  fn get_sensor_value(&self) -> U;
}

impl<'a, T: Sensor<U>, U> Sensor<U> for &'a T {
  fn get_sensor_value(&self) -> U {
    (**self).get_sensor_value()
  }
}

macro_rules! sensor_alias {
  ($ident:ident, $unit:ty, $fn_name:ident) => {
    pub trait $ident: Sensor<$unit> {
      fn $fn_name(&self) -> $unit {
        self.get_sensor_value()
      }
    }
    impl<T: Sensor<$unit>> $ident for T {}
  };
}

sensor_alias!(BinarySensor, bool, get_state);
sensor_alias!(AxisSensor, crate::Command, get_position);
