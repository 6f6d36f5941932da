//! Mock speed controller

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::platform::{
    error::{MotorError, PlatformError},
    traits::{NeutralMode, SpeedController},
    Result,
};

#[derive(Debug, Default)]
struct MotorState {
    power: f32,
    neutral_mode: NeutralMode,
    voltage: f32,
    history: Vec<f32>,
    fault: bool,
}

/// Mock speed controller recording every commanded power
#[derive(Debug, Clone, Default)]
pub struct MockSpeedController {
    state: Rc<RefCell<MotorState>>,
}

impl MockSpeedController {
    /// Create a stopped, coasting controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded power
    pub fn last_power(&self) -> f32 {
        self.state.borrow().power
    }

    /// Every power accepted so far, oldest first
    pub fn history(&self) -> Vec<f32> {
        self.state.borrow().history.clone()
    }

    /// Forget recorded powers
    pub fn clear_history(&self) {
        self.state.borrow_mut().history.clear();
    }

    /// Current neutral mode
    pub fn neutral_mode(&self) -> NeutralMode {
        self.state.borrow().neutral_mode
    }

    /// Current voltage compensation
    pub fn voltage_compensation(&self) -> f32 {
        self.state.borrow().voltage
    }

    /// Make subsequent commands fail with a controller fault
    pub fn set_fault(&self, fault: bool) {
        self.state.borrow_mut().fault = fault;
    }
}

impl SpeedController for MockSpeedController {
    fn set_power(&mut self, power: f32) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fault {
            return Err(PlatformError::Motor(MotorError::Fault));
        }
        if !(-1.0..=1.0).contains(&power) {
            return Err(PlatformError::Motor(MotorError::InvalidPower));
        }
        state.power = power;
        state.history.push(power);
        Ok(())
    }

    fn power(&self) -> f32 {
        self.state.borrow().power
    }

    fn set_neutral_mode(&mut self, mode: NeutralMode) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fault {
            return Err(PlatformError::Motor(MotorError::Fault));
        }
        state.neutral_mode = mode;
        Ok(())
    }

    fn set_voltage_compensation(&mut self, volts: f32) -> Result<()> {
        if !(0.0..=16.0).contains(&volts) {
            return Err(PlatformError::Motor(MotorError::InvalidVoltage));
        }
        self.state.borrow_mut().voltage = volts;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_motor_records_history() {
        let handle = MockSpeedController::new();
        let mut motor = handle.clone();
        motor.set_power(0.2).unwrap();
        motor.set_power(-0.4).unwrap();
        assert_eq!(handle.history(), [0.2, -0.4]);
        assert_eq!(motor.power(), -0.4);
    }

    #[test]
    fn test_mock_motor_rejects_invalid_power() {
        let mut motor = MockSpeedController::new();
        assert_eq!(
            motor.set_power(1.5),
            Err(PlatformError::Motor(MotorError::InvalidPower))
        );
        assert!(motor.set_power(f32::NAN).is_err());
        assert!(motor.history().is_empty());
    }

    #[test]
    fn test_mock_motor_fault() {
        let mut motor = MockSpeedController::new();
        motor.set_fault(true);
        assert_eq!(
            motor.set_power(0.1),
            Err(PlatformError::Motor(MotorError::Fault))
        );
        motor.set_fault(false);
        assert!(motor.set_power(0.1).is_ok());
    }

    #[test]
    fn test_mock_motor_configuration() {
        let mut motor = MockSpeedController::new();
        motor.set_neutral_mode(NeutralMode::Brake).unwrap();
        motor.set_voltage_compensation(12.0).unwrap();
        assert_eq!(motor.neutral_mode(), NeutralMode::Brake);
        assert_eq!(motor.voltage_compensation(), 12.0);
        assert!(motor.set_voltage_compensation(-1.0).is_err());
    }
}
