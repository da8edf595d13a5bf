pub mod conversions;
pub mod devices;
pub mod error;
pub mod executor;
pub mod instruction;
pub mod loader;
pub mod memory;
pub mod registers;
pub mod terminal;
pub mod trap;

use std::path::Path;

use error::{ImageLoadFailure, RunError};
use executor::Executor;
use loader::LoadStats;
use memory::Memory;
use registers::RegisterFile;
use trap::TrapIo;

// Caller supplies a TrapIo (normally a Terminal); Machine itself never
// assumes it owns the controlling terminal.
pub struct Machine {
    memory: Memory,
    executor: Executor,
}

impl Machine {
    pub fn new() -> Self {
        Machine { memory: Memory::new(), executor: Executor::new() }
    }

    // A failure here is never fatal to the run; remaining images still load.
    pub fn load_image(&mut self, path: &Path) -> Result<LoadStats, ImageLoadFailure> {
        loader::load_image(path, &mut self.memory)
            .map_err(|source| ImageLoadFailure { path: path.to_path_buf(), source })
    }

    pub fn run(&mut self, io: &mut dyn TrapIo) -> Result<(), RunError> {
        self.executor.run(&mut self.memory, io)
    }

    pub fn registers(&self) -> &RegisterFile {
        self.executor.registers()
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }
}
