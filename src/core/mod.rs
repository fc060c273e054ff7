pub mod alarm_policy;
pub mod app_controller;
pub mod config;
pub mod config_validation;
pub mod ratio_window;
pub mod sampler;

pub use alarm_policy::{AlarmLevel, AlarmThresholds};
pub use app_controller::{AppController, CycleError};
pub use config::{AppConfig, ConfigError, DetectionMode};
pub use ratio_window::{RatioWindow, WINDOW_LEN};
pub use sampler::{Measurement, SampleError, Sampler};
