pub mod adc;
pub mod bus;
pub mod delay;
pub mod indicator;
pub mod mock;
#[cfg(feature = "rpi")]
pub mod rpi;

pub use adc::{AdcReader, TransportError};
pub use bus::{check_transfer, timed_transfer, with_write_copy, BusError};
pub use delay::StdDelay;
pub use indicator::{AlarmIndicator, AlarmSink, IndicatorError};
pub use mock::MockAdc;
#[cfg(feature = "rpi")]
pub use rpi::{PiOutputPin, PiSpiBus};
