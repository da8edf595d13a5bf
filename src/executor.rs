// The fetch-decode-execute loop of spec.md §4.6/§5: single-threaded, one
// instruction per iteration, the halt flag is the only thing checked
// between cycles, and no instruction is restartable (the only suspension
// points are the blocking reads inside TRAP-GETC and TRAP-IN, both of
// which live in trap.rs, not here).

use crate::error::RunError;
use crate::instruction::decode;
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::trap::TrapIo;

pub struct Executor {
    regs: RegisterFile,
    halted: bool,
}

impl Executor {
    pub fn new() -> Self {
        Executor { regs: RegisterFile::new(), halted: false }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn run(&mut self, memory: &mut Memory, io: &mut dyn TrapIo) -> Result<(), RunError> {
        while !self.halted {
            self.step(memory, io)?;
        }
        Ok(())
    }

    fn step(&mut self, memory: &mut Memory, io: &mut dyn TrapIo) -> Result<(), RunError> {
        let word = memory.read(self.regs.pc, io);
        self.regs.advance();
        let instruction = decode(word);
        log::trace!("pc={:#06x} word={:#06x} instr={:?}", self.regs.pc.wrapping_sub(1), word, instruction);
        instruction.execute(&mut self.regs, memory, io, &mut self.halted)
    }
}


#[cfg(test)]
impl Executor {
    fn regs_for_test(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }
}
