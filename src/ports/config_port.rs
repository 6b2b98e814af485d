//! Typed parameter access port.
//!
//! Values are stored as text; the numeric getters are views over
//! [`ConfigPort::get_string`] and the numeric setters write canonical decimal
//! text through [`ConfigPort::set_string`].

use crate::domain::error::ConfigError;
use crate::domain::numeric;

pub trait ConfigPort {
    fn get_string(&self, key: &str) -> Result<String, ConfigError>;
    fn set_string(&mut self, key: &str, value: &str);

    fn get_double(&self, key: &str) -> Result<f64, ConfigError> {
        self.get_string(key).map(|s| numeric::parse_double(&s))
    }

    fn get_float(&self, key: &str) -> Result<f32, ConfigError> {
        self.get_string(key).map(|s| numeric::parse_float(&s))
    }

    fn get_int(&self, key: &str) -> Result<i32, ConfigError> {
        self.get_string(key).map(|s| numeric::parse_int(&s))
    }

    /// Reads the value as base 16, with or without a `0x` prefix.
    fn get_hex(&self, key: &str) -> Result<i32, ConfigError> {
        self.get_string(key).map(|s| numeric::parse_hex(&s))
    }

    fn get_long(&self, key: &str) -> Result<i64, ConfigError> {
        self.get_string(key).map(|s| numeric::parse_long(&s))
    }

    fn set_double(&mut self, key: &str, value: f64) {
        self.set_string(key, &numeric::format_double(value));
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.set_string(key, &numeric::format_int(value));
    }

    fn set_long(&mut self, key: &str, value: i64) {
        self.set_string(key, &numeric::format_long(value));
    }
}
