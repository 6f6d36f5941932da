//! Command scheduler
//!
//! Runs robot commands once per loop:
//!
//! - At most one drive command runs at a time. Scheduling another drive
//!   command interrupts the current one.
//! - The default drive command runs whenever the robot is enabled and no
//!   other drive command is scheduled. It is re-initialized each time it
//!   takes over.
//! - Auxiliary commands (readouts, toggles) run alongside the drive command.
//! - While disabled only commands that declare `runs_when_disabled()` run;
//!   the others are cancelled.
//!
//! Every command that was initialized gets exactly one `end()` call, whether
//! it finished, was interrupted or was cancelled.

use alloc::boxed::Box;
use alloc::vec::Vec;

use drivebase_core::traits::TimeSource;

use crate::robot::commands::RobotCommand;
use crate::robot::context::RobotContext;

type BoxedCommand<T> = Box<dyn RobotCommand<T>>;

/// Per-loop command runner
pub struct CommandScheduler<T: TimeSource> {
    drive: Option<BoxedCommand<T>>,
    default_drive: Option<BoxedCommand<T>>,
    default_active: bool,
    auxiliary: Vec<BoxedCommand<T>>,
}

impl<T: TimeSource> Default for CommandScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> CommandScheduler<T> {
    /// Scheduler with no default drive command
    pub fn new() -> Self {
        Self {
            drive: None,
            default_drive: None,
            default_active: false,
            auxiliary: Vec::new(),
        }
    }

    /// Set the command that drives when nothing else does
    pub fn with_default_drive(mut self, command: BoxedCommand<T>) -> Self {
        self.default_drive = Some(command);
        self
    }

    /// Start a command
    ///
    /// Returns `false` if the command was not started: a command with the
    /// same name is already running, or the robot is disabled and the
    /// command cannot run disabled.
    pub fn schedule(
        &mut self,
        ctx: &mut RobotContext<T>,
        mut command: BoxedCommand<T>,
        enabled: bool,
    ) -> bool {
        if !enabled && !command.runs_when_disabled() {
            crate::log_debug!("Scheduler: {} cannot run disabled", command.name());
            return false;
        }
        if self.is_scheduled(command.name()) {
            return false;
        }

        if command.requires_drive() {
            self.interrupt_drive(ctx);
            command.initialize(ctx);
            crate::log_info!("Scheduler: {} started", command.name());
            self.drive = Some(command);
        } else {
            command.initialize(ctx);
            crate::log_info!("Scheduler: {} started", command.name());
            self.auxiliary.push(command);
        }
        true
    }

    /// Run every scheduled command once
    pub fn run(&mut self, ctx: &mut RobotContext<T>, enabled: bool) {
        if !enabled {
            self.cancel_disabled(ctx);
        }

        if let Some(mut command) = self.drive.take() {
            command.execute(ctx);
            if command.is_finished(ctx) {
                command.end(ctx, false);
                crate::log_info!("Scheduler: {} finished", command.name());
            } else {
                self.drive = Some(command);
            }
        } else if enabled {
            self.run_default(ctx);
        }

        self.auxiliary.retain_mut(|command| {
            command.execute(ctx);
            if command.is_finished(ctx) {
                command.end(ctx, false);
                crate::log_debug!("Scheduler: {} finished", command.name());
                false
            } else {
                true
            }
        });
    }

    /// Cancel a running command by name
    ///
    /// Returns `true` if a command was cancelled.
    pub fn cancel(&mut self, ctx: &mut RobotContext<T>, name: &str) -> bool {
        if self.drive.as_ref().is_some_and(|c| c.name() == name) {
            self.interrupt_drive(ctx);
            return true;
        }
        if let Some(index) = self.auxiliary.iter().position(|c| c.name() == name) {
            let mut command = self.auxiliary.remove(index);
            command.end(ctx, true);
            crate::log_info!("Scheduler: {} cancelled", command.name());
            return true;
        }
        false
    }

    /// Stop whatever is driving (the default command resumes when enabled)
    pub fn cancel_drive(&mut self, ctx: &mut RobotContext<T>) {
        self.interrupt_drive(ctx);
    }

    /// Stop every command
    pub fn cancel_all(&mut self, ctx: &mut RobotContext<T>) {
        self.interrupt_drive(ctx);
        for mut command in self.auxiliary.drain(..) {
            command.end(ctx, true);
        }
    }

    /// A command with this name is running
    pub fn is_scheduled(&self, name: &str) -> bool {
        self.drive_command_name() == Some(name)
            || self.auxiliary.iter().any(|c| c.name() == name)
    }

    /// Name of the command currently driving, if any
    pub fn drive_command_name(&self) -> Option<&'static str> {
        match (&self.drive, &self.default_drive) {
            (Some(command), _) => Some(command.name()),
            (None, Some(default)) if self.default_active => Some(default.name()),
            _ => None,
        }
    }

    /// Number of running auxiliary commands
    pub fn auxiliary_count(&self) -> usize {
        self.auxiliary.len()
    }

    fn run_default(&mut self, ctx: &mut RobotContext<T>) {
        let Some(command) = self.default_drive.as_mut() else {
            return;
        };
        if !self.default_active {
            command.initialize(ctx);
            self.default_active = true;
            crate::log_debug!("Scheduler: default {} started", command.name());
        }
        command.execute(ctx);
        if command.is_finished(ctx) {
            command.end(ctx, false);
            self.default_active = false;
        }
    }

    fn interrupt_drive(&mut self, ctx: &mut RobotContext<T>) {
        if let Some(mut command) = self.drive.take() {
            command.end(ctx, true);
            crate::log_info!("Scheduler: {} interrupted", command.name());
        }
        if self.default_active {
            if let Some(command) = self.default_drive.as_mut() {
                command.end(ctx, true);
            }
            self.default_active = false;
        }
    }

    fn cancel_disabled(&mut self, ctx: &mut RobotContext<T>) {
        let drive_stops = match &self.drive {
            Some(command) => !command.runs_when_disabled(),
            None => false,
        };
        let default_stops = self.default_active
            && self
                .default_drive
                .as_ref()
                .is_some_and(|c| !c.runs_when_disabled());
        if drive_stops || default_stops {
            self.interrupt_drive(ctx);
        }

        self.auxiliary.retain_mut(|command| {
            if command.runs_when_disabled() {
                true
            } else {
                command.end(ctx, true);
                crate::log_debug!("Scheduler: {} cancelled (disabled)", command.name());
                false
            }
        });
    }
}
