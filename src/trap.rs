// The six service calls of spec.md §4.5. Traps are host-implemented
// directly rather than jumping to guest handler code — spec.md's design
// notes are explicit that this means R7 is left untouched by TRAP, unlike
// a hardware-faithful LC-3.
//
// Trap output goes through `TrapIo` rather than a hardcoded stdout so the
// integration tests can capture it; `Terminal` is the real implementation,
// a canned buffer stands in for tests.

use crate::devices::KeyboardSource;
use crate::memory::Memory;
use crate::registers::RegisterFile;

pub const GETC: u8 = 0x20;
pub const OUT: u8 = 0x21;
pub const PUTS: u8 = 0x22;
pub const IN: u8 = 0x23;
pub const PUTSP: u8 = 0x24;
pub const HALT: u8 = 0x25;

const R0: usize = 0;

// A byte source to block on (GETC/IN), a byte sink to write through.
pub trait TrapIo: KeyboardSource {
    fn write_byte(&mut self, byte: u8);
    fn write_all(&mut self, bytes: &[u8]);
    fn flush(&mut self);
}

// An unrecognized vector is a silent no-op, matching the original's
// switch with no default arm.
pub fn dispatch(vector: u8, regs: &mut RegisterFile, memory: &mut Memory, io: &mut dyn TrapIo, halted: &mut bool) {
    match vector {
        GETC => {
            let byte = io.read_byte();
            regs.set(R0, byte as u16);
            regs.update_flags(R0);
        }
        OUT => {
            io.write_byte(regs.get(R0) as u8);
            io.flush();
        }
        PUTS => {
            let mut address = regs.get(R0);
            loop {
                let word = memory.read(address, io);
                if word == 0 {
                    break;
                }
                io.write_byte(word as u8);
                address = address.wrapping_add(1);
            }
            io.flush();
        }
        IN => {
            io.write_all(b"Enter a character: ");
            let byte = io.read_byte();
            io.write_byte(byte);
            io.flush();
            regs.set(R0, byte as u16);
            regs.update_flags(R0);
        }
        PUTSP => {
            let mut address = regs.get(R0);
            loop {
                let word = memory.read(address, io);
                if word == 0 {
                    break;
                }
                io.write_byte((word & 0x00FF) as u8);
                let high = (word >> 8) as u8;
                if high != 0 {
                    io.write_byte(high);
                }
                address = address.wrapping_add(1);
            }
            io.flush();
        }
        HALT => {
            io.write_all(b"Machine halted!\n");
            io.flush();
            *halted = true;
        }
        _ => {}
    }
}
