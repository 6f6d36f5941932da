//! Dashboard parameter store
//!
//! Fixed-capacity map of named values plus per-name flags. Tunables are
//! registered once with defaults and changed through [`ParameterStore::set`];
//! diagnostics are written with [`ParameterStore::publish`] and are read-only
//! to the operator.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters (tunables plus published values)
pub const MAX_PARAMS: usize = 128;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Not listed on the dashboard
        const HIDDEN = 0b00000001;
        /// Cannot be changed by the operator
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean toggle
    Bool(bool),
    /// 32-bit signed integer (counts, chooser indices)
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Value as a float, converting integers
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f32),
            ParamValue::Bool(_) => None,
        }
    }

    /// Value as an integer, truncating floats
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(v) if v.is_finite() => Some(*v as i32),
            _ => None,
        }
    }

    /// Value as a boolean (non-zero integers are true)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            ParamValue::Int(v) => Some(*v != 0),
            ParamValue::Float(_) => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v)
    }
}

/// Parameter metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Parameter flags
    pub flags: ParamFlags,
}

/// Named parameter store
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
}

fn make_key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name)
        .map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = make_key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Float value of `name`, or `default` if missing or not numeric
    pub fn get_float(&self, name: &str, default: f32) -> f32 {
        self.get(name)
            .and_then(ParamValue::as_float)
            .unwrap_or(default)
    }

    /// Integer value of `name`, or `default` if missing or not numeric
    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.get(name).and_then(ParamValue::as_int).unwrap_or(default)
    }

    /// Boolean value of `name`, or `default` if missing or not boolean
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or(default)
    }

    /// Change a registered tunable
    ///
    /// Fails for unknown names and read-only parameters.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = make_key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::InvalidConfig);
        }

        if self.is_read_only(name) {
            return Err(ParameterError::ReadOnly);
        }

        self.parameters.insert(key, value).ok();
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = make_key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Write a diagnostic value
    ///
    /// Creates the entry as read-only on first use, then overwrites it on
    /// every call.
    pub fn publish(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<(), ParameterError> {
        let key = make_key(name)?;
        let value = value.into();

        if let Some(slot) = self.parameters.get_mut(&key) {
            *slot = value;
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(
                key,
                ParamMetadata {
                    flags: ParamFlags::READ_ONLY,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Check if parameter is hidden
    pub fn is_hidden(&self, name: &str) -> bool {
        self.has_flag(name, ParamFlags::HIDDEN)
    }

    /// Check if parameter is read-only
    pub fn is_read_only(&self, name: &str) -> bool {
        self.has_flag(name, ParamFlags::READ_ONLY)
    }

    fn has_flag(&self, name: &str, flag: ParamFlags) -> bool {
        self.get_metadata(name)
            .map(|meta| meta.flags.contains(flag))
            .unwrap_or(false)
    }

    /// Get all parameter names (excluding hidden parameters)
    pub fn iter_names(&self) -> impl Iterator<Item = &String<PARAM_NAME_LEN>> {
        self.parameters
            .keys()
            .filter(|name| !self.is_hidden(name.as_str()))
    }

    /// Get parameter count (excluding hidden parameters)
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    /// Get total parameter count (including hidden parameters)
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over all parameters (including hidden) in registration order
    pub fn iter_all(&self) -> impl Iterator<Item = (&String<PARAM_NAME_LEN>, &ParamValue)> {
        self.parameters.iter()
    }

    /// Get metadata for a parameter by name
    pub fn get_metadata(&self, name: &str) -> Option<&ParamMetadata> {
        let key = make_key(name).ok()?;
        self.metadata.get(&key)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
